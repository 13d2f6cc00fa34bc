//! # Strategy Module
//!
//! One pricing strategy per product type.
//!
//! ## Strategy Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_price(items)                               │
//! │                                                                         │
//! │  1. Keep own variant     items.filter_map(OrderItem::as_beer)          │
//! │  2. Group by key         BTreeMap<BeerOrigin, bottles>                 │
//! │  3. Build context        BeerPricingContext { packs, singles, ... }    │
//! │  4. RuleSet::discount    Σ applicable rules, each ≥ 0                  │
//! │  5. Cap                  min(Σ, original_price)                        │
//! │  6. Emit line            normalized original / discount / final        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 4 to 6 are shared by every product type and live in [`RuleSet`].
//! Group keys are iterated in `BTreeMap` order, so receipt lines come out
//! sorted by age (bread) and origin (beer).

pub mod beer;
pub mod bread;
pub mod dairy;
pub mod vegetable;

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::PricingConfig;
use crate::context::PricingContext;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::rules::BoxedRule;
use crate::types::{OrderItem, ProductType, ReceiptLine};

pub use beer::BeerPricingStrategy;
pub use bread::BreadPricingStrategy;
pub use dairy::DairyPricingStrategy;
pub use vegetable::VegetablePricingStrategy;

// =============================================================================
// Pricing Strategy Trait
// =============================================================================

/// Prices every item of one product type.
pub trait PricingStrategy: Send + Sync {
    /// The product type this strategy handles.
    fn product_type(&self) -> ProductType;

    /// Prices `items`, emitting one receipt line per group.
    ///
    /// Items of other product types are ignored.
    fn calculate_price(&self, items: &[OrderItem]) -> PricingResult<Vec<ReceiptLine>>;

    /// Descriptions of the registered rules, in execution order.
    fn rule_descriptions(&self) -> Vec<String>;
}

/// Builds the standard strategy for every product type.
pub fn default_strategies(config: &Arc<PricingConfig>) -> Vec<Box<dyn PricingStrategy>> {
    vec![
        Box::new(BreadPricingStrategy::from_config(Arc::clone(config))),
        Box::new(VegetablePricingStrategy::from_config(Arc::clone(config))),
        Box::new(BeerPricingStrategy::from_config(Arc::clone(config))),
        Box::new(DairyPricingStrategy::from_config(Arc::clone(config))),
    ]
}

// =============================================================================
// Rule Set
// =============================================================================

/// The rules of one product type, sorted once by execution order.
pub struct RuleSet<C: PricingContext> {
    rules: Vec<BoxedRule<C>>,
}

impl<C: PricingContext> RuleSet<C> {
    /// Sorts `rules` by [`order`](crate::rules::DiscountRule::order).
    /// The sort is stable, so equal orders keep registration order.
    pub fn new(mut rules: Vec<BoxedRule<C>>) -> Self {
        rules.sort_by_key(|rule| rule.order());
        RuleSet { rules }
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.description()).collect()
    }

    /// Sums the discounts of every applicable rule and caps the sum at the
    /// group's original price.
    ///
    /// ## Errors
    /// `InvariantViolation` if any rule returns a negative discount. The
    /// value is never clamped.
    pub fn discount(&self, ctx: &C, group: &str) -> PricingResult<Money> {
        let mut total = Money::ZERO;

        for rule in self.rules.iter().filter(|rule| rule.is_applicable(ctx)) {
            let discount = rule.calculate_discount(ctx);
            if discount.is_negative() {
                error!(
                    rule = rule.name(),
                    group,
                    discount = %discount,
                    "Discount rule returned a negative amount"
                );
                return Err(PricingError::InvariantViolation(format!(
                    "Discount rule '{}' returned negative discount {} for '{}'",
                    rule.name(),
                    discount,
                    group
                )));
            }
            total += discount;
        }

        let original = ctx.original_price();
        if total > original {
            warn!(
                group,
                discount = %total,
                original = %original,
                "Discount exceeds original price, capping"
            );
            return Ok(original);
        }

        Ok(total)
    }

    /// Runs the rules for `ctx` and emits the normalized receipt line.
    pub fn price_line(&self, ctx: &C, description: String) -> PricingResult<ReceiptLine> {
        let discount = self.discount(ctx, &description)?;
        let line = ReceiptLine::priced(description, ctx.original_price(), discount)
            .map_err(|e| {
                error!(error = %e, "Receipt line failed validation");
                e
            })?;

        debug!(
            line = line.description(),
            original = %line.original_price(),
            discount = %line.discount(),
            final_price = %line.final_price(),
            "Priced group"
        );

        Ok(line)
    }
}

/// Adds `qty` to a running group total.
pub(crate) fn add_quantity(total: &mut u32, qty: u32) -> PricingResult<()> {
    *total = total
        .checked_add(qty)
        .ok_or_else(|| PricingError::InvalidOrder("Order quantity is too large".to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DairyPricingContext;
    use crate::rules::DiscountRule;

    struct Fixed {
        amount: Money,
        order: i32,
        label: &'static str,
    }

    impl DiscountRule<DairyPricingContext> for Fixed {
        fn name(&self) -> &'static str {
            self.label
        }

        fn is_applicable(&self, _ctx: &DairyPricingContext) -> bool {
            true
        }

        fn calculate_discount(&self, _ctx: &DairyPricingContext) -> Money {
            self.amount
        }

        fn order(&self) -> i32 {
            self.order
        }

        fn description(&self) -> String {
            self.label.to_string()
        }
    }

    fn fixed(cents: i64, order: i32, label: &'static str) -> BoxedRule<DairyPricingContext> {
        Box::new(Fixed {
            amount: Money::from_cents(cents),
            order,
            label,
        })
    }

    fn ctx() -> DairyPricingContext {
        DairyPricingContext::new(2, Money::from_cents(120))
    }

    #[test]
    fn test_rules_sorted_stably_by_order() {
        let set = RuleSet::new(vec![
            fixed(1, 200, "late"),
            fixed(1, 100, "first"),
            fixed(1, 100, "second"),
        ]);
        assert_eq!(set.descriptions(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_discounts_are_summed() {
        let set = RuleSet::new(vec![fixed(10, 100, "a"), fixed(15, 100, "b")]);
        assert_eq!(set.discount(&ctx(), "2 x Dairy").unwrap(), Money::from_cents(25));
    }

    #[test]
    fn test_discount_capped_at_original_price() {
        let set = RuleSet::new(vec![fixed(200, 100, "a"), fixed(200, 100, "b")]);
        assert_eq!(set.discount(&ctx(), "2 x Dairy").unwrap(), Money::from_cents(240));

        let line = set.price_line(&ctx(), "2 x Dairy".to_string()).unwrap();
        assert_eq!(line.final_price(), Money::ZERO);
    }

    #[test]
    fn test_negative_discount_fails_loudly() {
        let set = RuleSet::new(vec![fixed(10, 100, "good"), fixed(-1, 100, "broken")]);
        let err = set.discount(&ctx(), "2 x Dairy").unwrap_err();
        assert!(matches!(err, PricingError::InvariantViolation(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_add_quantity_overflow() {
        let mut total = u32::MAX;
        assert!(add_quantity(&mut total, 1).is_err());
        let mut total = 1;
        add_quantity(&mut total, 2).unwrap();
        assert_eq!(total, 3);
    }
}
