//! # grocery-core: Pure Pricing Engine
//!
//! This crate prices grocery orders. It contains the discount rules, the
//! per-product pricing strategies and the order-level combo layer as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Grocery Pricing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pricing-cli (apps/)                          │   │
//! │  │   pricing.toml ──► PricingConfig     order.json ──► Order       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocery-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   rules   │  │ strategy  │  │  service  │  │   │
//! │  │   │ OrderItem │  │ Discount  │  │ per type  │  │ combo +   │  │   │
//! │  │   │  Receipt  │  │   Rule    │  │  RuleSet  │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONFIG FILES • NO SHARED MUTABLE STATE           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Order items, orders, receipts
//! - [`money`] - Decimal money and 2-place half-up normalization
//! - [`context`] - Per-product pricing contexts handed to rules
//! - [`rules`] - Discount rule traits, implementations and registry
//! - [`strategy`] - Per-product pricing strategies
//! - [`service`] - Order pricing orchestration
//! - [`catalog`] - Rule descriptions and the price list
//! - [`config`] - Pricing configuration (types and validation only)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validators
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use grocery_core::{BeerOrigin, Money, Order, OrderItem, OrderPricingService, PricingConfig};
//!
//! let service = OrderPricingService::from_config(Arc::new(PricingConfig::default())).unwrap();
//!
//! let order = Order::new(vec![
//!     OrderItem::bread(3, 3).unwrap(),
//!     OrderItem::vegetable(200).unwrap(),
//!     OrderItem::beer(6, BeerOrigin::Dutch).unwrap(),
//! ]);
//!
//! let receipt = service.calculate_receipt(&order).unwrap();
//! assert_eq!(receipt.subtotal(), Money::from_cents(800));
//! assert_eq!(receipt.total(), receipt.subtotal() - receipt.total_discount());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod money;
pub mod rules;
pub mod service;
pub mod strategy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{price_list, PriceInfo, RuleCatalog, RuleDescription};
pub use config::PricingConfig;
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use service::OrderPricingService;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Oldest bread (in days) that may be sold.
///
/// Older bread is rejected when the item is built, as a business rule
/// violation rather than a data error.
pub const MAX_BREAD_AGE_DAYS: u32 = 6;
