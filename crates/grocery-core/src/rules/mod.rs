//! # Rules Module
//!
//! Discount rules and the explicit rule registry.
//!
//! ## Rule Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Discount Rule Pipeline                            │
//! │                                                                         │
//! │  Per product group                                                     │
//! │  ────────────────                                                      │
//! │  BreadPricingContext ──► DiscountRule<BreadPricingContext> (sorted)    │
//! │       │                    ├── is_applicable(ctx)?                     │
//! │       │                    └── calculate_discount(ctx) ≥ 0             │
//! │       ▼                                                                 │
//! │  Σ discounts, capped at original_price ──► ReceiptLine                 │
//! │                                                                         │
//! │  Whole order (after every line is priced)                              │
//! │  ─────────────────────────────────────────                             │
//! │  OrderPricingContext ──► OrderDiscountRule (sorted)                    │
//! │       current_total shrinks after each applied rule                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registration
//! Rules are plain values built at startup from an `Arc<PricingConfig>` by
//! the functions below and handed to the strategies and the order service.
//! Nothing is discovered at runtime.
//!
//! ## Available Rules
//!
//! | Rule                        | Scope     | Order |
//! |-----------------------------|-----------|-------|
//! | [`BreadAgeBundleRule`]      | BREAD     | 100   |
//! | [`VegetableWeightTierRule`] | VEGETABLE | 100   |
//! | [`BeerPackDiscountRule`]    | BEER      | 100   |
//! | [`BeerFreeBottleRule`]      | BEER      | 150   |
//! | [`DairyThresholdRule`]      | DAIRY     | 100   |
//! | [`ComboDiscountRule`]       | ORDER     | 1000  |

pub mod beer;
pub mod bread;
pub mod combo;
pub mod dairy;
pub mod vegetable;

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::{
    BeerPricingContext, BreadPricingContext, DairyPricingContext, OrderPricingContext,
    PricingContext, VegetablePricingContext,
};
use crate::money::Money;
use crate::types::ProductType;

pub use beer::{BeerFreeBottleRule, BeerPackDiscountRule};
pub use bread::BreadAgeBundleRule;
pub use combo::ComboDiscountRule;
pub use dairy::DairyThresholdRule;
pub use vegetable::VegetableWeightTierRule;

/// Execution order used when a rule does not say otherwise.
pub const DEFAULT_RULE_ORDER: i32 = 100;

/// Execution order of order-level rules; they run after product rules.
pub const DEFAULT_ORDER_RULE_ORDER: i32 = 1000;

// =============================================================================
// Rule Traits
// =============================================================================

/// A product-level discount rule over one context type.
///
/// Rules are stateless. They may read configuration but never mutate it.
/// Lower [`order`](DiscountRule::order) values run first; ties keep
/// registration order.
pub trait DiscountRule<C: PricingContext>: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns true if this rule should run for `ctx`.
    fn is_applicable(&self, ctx: &C) -> bool;

    /// The discount for `ctx`. Must never be negative.
    fn calculate_discount(&self, ctx: &C) -> Money;

    fn order(&self) -> i32 {
        DEFAULT_RULE_ORDER
    }

    /// Human-readable description for the rule catalog.
    fn description(&self) -> String;
}

/// A discount rule evaluated against the whole order after per-product
/// pricing.
pub trait OrderDiscountRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Product types this rule is concerned with.
    fn product_types(&self) -> &[ProductType];

    fn is_applicable(&self, ctx: &OrderPricingContext<'_>) -> bool;

    /// The discount, usually a share of `ctx.current_total`.
    fn calculate_discount(&self, ctx: &OrderPricingContext<'_>) -> Money;

    fn order(&self) -> i32 {
        DEFAULT_ORDER_RULE_ORDER
    }

    fn description(&self) -> String;

    /// Scope label used in the rule catalog, e.g. `BREAD+VEGETABLE`.
    fn scope(&self) -> String {
        self.product_types()
            .iter()
            .map(ProductType::as_str)
            .collect::<Vec<_>>()
            .join("+")
    }
}

// =============================================================================
// Registry
// =============================================================================

pub type BoxedRule<C> = Box<dyn DiscountRule<C>>;
pub type BoxedOrderRule = Box<dyn OrderDiscountRule>;

pub fn bread_rules(config: &Arc<PricingConfig>) -> Vec<BoxedRule<BreadPricingContext>> {
    vec![Box::new(BreadAgeBundleRule::new(Arc::clone(config)))]
}

pub fn vegetable_rules(config: &Arc<PricingConfig>) -> Vec<BoxedRule<VegetablePricingContext>> {
    vec![Box::new(VegetableWeightTierRule::new(Arc::clone(config)))]
}

/// Beer rules. The free-bottle rule is only registered while the promotion
/// is configured.
pub fn beer_rules(config: &Arc<PricingConfig>) -> Vec<BoxedRule<BeerPricingContext>> {
    let mut rules: Vec<BoxedRule<BeerPricingContext>> =
        vec![Box::new(BeerPackDiscountRule::new(Arc::clone(config)))];

    if let Some(promo) = &config.beer.free_bottle {
        rules.push(Box::new(BeerFreeBottleRule::new(promo.origin, promo.every)));
    }

    rules
}

pub fn dairy_rules(config: &Arc<PricingConfig>) -> Vec<BoxedRule<DairyPricingContext>> {
    vec![Box::new(DairyThresholdRule::new(Arc::clone(config)))]
}

pub fn order_rules(config: &Arc<PricingConfig>) -> Vec<BoxedOrderRule> {
    vec![Box::new(ComboDiscountRule::new(
        config.combo.product_types.clone(),
        config.combo.discount_rate,
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FreeBottleConfig;
    use crate::types::BeerOrigin;

    #[test]
    fn test_default_registry() {
        let config = Arc::new(PricingConfig::default());
        assert_eq!(bread_rules(&config).len(), 1);
        assert_eq!(vegetable_rules(&config).len(), 1);
        assert_eq!(beer_rules(&config).len(), 1);
        assert_eq!(dairy_rules(&config).len(), 1);
        assert_eq!(order_rules(&config).len(), 1);
    }

    #[test]
    fn test_free_bottle_registered_when_configured() {
        let mut config = PricingConfig::default();
        config.beer.free_bottle = Some(FreeBottleConfig {
            origin: BeerOrigin::Dutch,
            every: 3,
        });
        let rules = beer_rules(&Arc::new(config));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].order(), 150);
    }

    #[test]
    fn test_combo_scope_label() {
        let rules = order_rules(&Arc::new(PricingConfig::default()));
        assert_eq!(rules[0].scope(), "BREAD+VEGETABLE");
        assert_eq!(rules[0].order(), DEFAULT_ORDER_RULE_ORDER);
    }
}
