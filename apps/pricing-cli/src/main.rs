//! # Grocery Pricing CLI
//!
//! Prices order requests with `grocery-core` and prints JSON.
//!
//! ```sh
//! # Price an order with the standard prices
//! grocery-pricing price order.json
//!
//! # Read the order from stdin with a custom price file
//! cat order.json | grocery-pricing --config pricing.toml price -
//!
//! # List the active discount rules (optionally for one product type)
//! grocery-pricing rules --product-type beer
//!
//! # Show base prices / validate a price file
//! grocery-pricing prices
//! grocery-pricing --config pricing.toml check-config
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the default `info` level), so
//! stdout carries only JSON.

mod config;
mod error;
mod mapper;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use grocery_core::{price_list, OrderPricingService, ProductType};

use crate::error::{CliError, CliResult};
use crate::mapper::{map_order, OrderRequest};

#[derive(Parser, Debug)]
#[command(
    name = "grocery-pricing",
    version,
    about = "Price grocery orders with product and combo discounts"
)]
struct Cli {
    /// Path to the pricing configuration file (TOML). Defaults apply when
    /// omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price an order request and print the receipt.
    Price {
        /// Order request JSON file, or `-` for stdin.
        order: PathBuf,
    },

    /// List the active discount rules.
    Rules {
        /// Only rules concerning this product type (bread, vegetable, beer, dairy).
        #[arg(short, long, value_parser = parse_product_type)]
        product_type: Option<ProductType>,
    },

    /// Print the base price list.
    Prices,

    /// Validate the configuration and exit.
    CheckConfig,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            let report = serde_json::to_string_pretty(&err.report())
                .unwrap_or_else(|_| err.to_string());
            eprintln!("{}", report);
            ExitCode::from(err.code().exit_code())
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Arc::new(config::load_config(cli.config.as_deref())?);

    match cli.command {
        Command::Price { order } => {
            let service = OrderPricingService::from_config(config)?;
            let request: OrderRequest = serde_json::from_str(&read_input(&order)?)?;
            let order = map_order(&request)?;

            let receipt = service.calculate_receipt(&order)?;
            info!(
                lines = receipt.lines().len(),
                total = %receipt.total(),
                "Order priced"
            );
            print_json(&receipt)
        }
        Command::Rules { product_type } => {
            let catalog = OrderPricingService::from_config(config)?.rule_catalog();
            match product_type {
                Some(product_type) => print_json(&catalog.rules_for(product_type)),
                None => print_json(&catalog.all_rules()),
            }
        }
        Command::Prices => print_json(&price_list(&config)),
        Command::CheckConfig => {
            info!("Pricing configuration is valid");
            print_json(&*config)
        }
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::io("stdin", e))?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::io(path.display().to_string(), e))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_product_type(value: &str) -> Result<ProductType, String> {
    ProductType::ALL
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown product type '{}'", value))
}

/// Initializes tracing on stderr.
///
/// Default: INFO, can be overridden with RUST_LOG.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_type() {
        assert_eq!(parse_product_type("beer"), Ok(ProductType::Beer));
        assert_eq!(parse_product_type("VEGETABLE"), Ok(ProductType::Vegetable));
        assert!(parse_product_type("wine").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["grocery-pricing", "--config", "p.toml", "rules", "-p", "dairy"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("p.toml")));
        assert!(matches!(
            cli.command,
            Command::Rules {
                product_type: Some(ProductType::Dairy)
            }
        ));
    }

    #[test]
    fn test_price_pipeline_from_request() {
        let service =
            OrderPricingService::from_config(Arc::new(config::load_config(None).unwrap())).unwrap();
        let request: OrderRequest = serde_json::from_str(
            r#"{ "items": [ { "type": "BEER", "quantity": 6, "origin": "BELGIAN" } ] }"#,
        )
        .unwrap();
        let receipt = service.calculate_receipt(&map_order(&request).unwrap()).unwrap();
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["total"], "0.60");
    }
}
