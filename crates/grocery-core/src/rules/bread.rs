//! Age-banded bread bundles.
//!
//! ```text
//!   age:   0   1   2 │ 3   4   5 │ 6
//!          full price │ buy 1     │ buy 1
//!                     │ take 2    │ take 3
//!                     ▲           ▲
//!              bundle_min_age  special_age
//! ```

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::BreadPricingContext;
use crate::money::Money;

use super::DiscountRule;

/// Buy 1 take 2 for ages in `[bundle_min_age, special_age)`, buy 1 take 3
/// at exactly `special_age`.
pub struct BreadAgeBundleRule {
    config: Arc<PricingConfig>,
}

impl BreadAgeBundleRule {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        BreadAgeBundleRule { config }
    }

    /// Number of units given away for `ctx`.
    fn free_units(&self, ctx: &BreadPricingContext) -> u32 {
        let bread = &self.config.bread;
        if ctx.age == bread.special_age {
            (ctx.total_quantity / 3) * 2
        } else if ctx.age >= bread.bundle_min_age && ctx.age < bread.special_age {
            ctx.total_quantity / 2
        } else {
            0
        }
    }
}

impl DiscountRule<BreadPricingContext> for BreadAgeBundleRule {
    fn name(&self) -> &'static str {
        "bread_age_bundle"
    }

    fn is_applicable(&self, ctx: &BreadPricingContext) -> bool {
        ctx.age >= self.config.bread.bundle_min_age && ctx.age <= self.config.bread.special_age
    }

    fn calculate_discount(&self, ctx: &BreadPricingContext) -> Money {
        ctx.unit_price.multiply_quantity(self.free_units(ctx))
    }

    fn description(&self) -> String {
        let bread = &self.config.bread;
        format!(
            "Bread {}-{} days old: buy 1 take 2; {} days old: buy 1 take 3. Fresher bread is full price.",
            bread.bundle_min_age,
            bread.special_age.saturating_sub(1),
            bread.special_age
        )
    }
}
