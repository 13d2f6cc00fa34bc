//! Loads `pricing.toml`.
//!
//! Load order (later overrides earlier):
//! 1. Default values
//! 2. Config file, if one was given
//!
//! The result is always validated before the engine sees it.

use std::path::Path;

use grocery_core::PricingConfig;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

pub fn load_config(path: Option<&Path>) -> CliResult<PricingConfig> {
    let config = match path {
        Some(path) => {
            info!(?path, "Loading pricing config from file");
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(path.display().to_string(), e))?;
            parse_config(&contents)?
        }
        None => {
            debug!("No pricing config given, using defaults");
            PricingConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

pub fn parse_config(contents: &str) -> CliResult<PricingConfig> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_core::{BeerOrigin, Money};
    use rust_decimal::Decimal;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_demo_file_matches_defaults() {
        let config = parse_config(include_str!("../../../demos/pricing.toml")).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let config = parse_config(
            r#"
            [bread]
            unit_price = "1.10"

            [beer]
            german = { base_price = "0.85", pack_discount = "4.00", pack_size = 12 }
            free_bottle = { origin = "BELGIAN", every = 5 }

            [combo]
            discount_rate = "0.08"
            "#,
        )
        .unwrap();

        assert_eq!(config.bread.unit_price, Money::from_cents(110));
        assert_eq!(config.bread.special_age, 6);
        assert_eq!(config.beer.pack_size_for(BeerOrigin::German), 12);
        assert_eq!(config.beer.dutch.base_price, Money::from_cents(50));
        assert_eq!(config.beer.free_bottle.as_ref().map(|p| p.every), Some(5));
        assert_eq!(config.combo.discount_rate, Decimal::new(8, 2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_origin_table_with_only_pack_size() {
        let config = parse_config("[beer.german]\npack_size = 12\n").unwrap();

        assert_eq!(config.beer.pack_size_for(BeerOrigin::German), 12);
        assert_eq!(config.beer.german.base_price, Money::from_cents(80));
        assert_eq!(config.beer.german.pack_discount, Money::from_cents(400));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_misspelled_key_is_parse_error() {
        let err = parse_config("[bread]\nunit_prise = \"2.00\"\n").unwrap_err();
        assert!(matches!(err, CliError::Toml(_)));
        assert!(err.to_string().contains("unit_prise"));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = parse_config(
            r#"
            [vegetable]
            small_weight_threshold = 600
            "#,
        )
        .unwrap();
        let err: CliError = config.validate().unwrap_err().into();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_config("[bread\nunit_price = 1"),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/pricing.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
