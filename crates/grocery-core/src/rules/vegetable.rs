//! Weight-tiered vegetable discount.

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::VegetablePricingContext;
use crate::money::{format_percent, Money};

use super::DiscountRule;

/// Percentage off the whole vegetable group, chosen by total weight.
pub struct VegetableWeightTierRule {
    config: Arc<PricingConfig>,
}

impl VegetableWeightTierRule {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        VegetableWeightTierRule { config }
    }
}

impl DiscountRule<VegetablePricingContext> for VegetableWeightTierRule {
    fn name(&self) -> &'static str {
        "vegetable_weight_tier"
    }

    fn is_applicable(&self, ctx: &VegetablePricingContext) -> bool {
        ctx.total_weight_grams > 0
    }

    fn calculate_discount(&self, ctx: &VegetablePricingContext) -> Money {
        let rate = self.config.vegetable.discount_rate_for(ctx.total_weight_grams);
        ctx.original_price.percentage(rate)
    }

    fn description(&self) -> String {
        let veg = &self.config.vegetable;
        format!(
            "Vegetables under {}g: {} off; under {}g: {} off; {}g and over: {} off",
            veg.small_weight_threshold,
            format_percent(veg.small_weight_discount),
            veg.medium_weight_threshold,
            format_percent(veg.medium_weight_discount),
            veg.medium_weight_threshold,
            format_percent(veg.large_weight_discount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn discount_for(weight: u32) -> Money {
        let rule = VegetableWeightTierRule::new(Arc::new(PricingConfig::default()));
        let ctx = VegetablePricingContext::new(weight, Money::from_cents(100));
        rule.calculate_discount(&ctx)
    }

    #[test]
    fn test_tiers() {
        assert_eq!(discount_for(50).amount(), dec!(0.025));
        assert_eq!(discount_for(200).normalize(), Money::from_cents(14));
        assert_eq!(discount_for(501).normalize(), Money::from_cents(50));
    }

    #[test]
    fn test_boundary_weight_goes_to_next_tier() {
        // 100g at 7%, not 5%
        assert_eq!(discount_for(100).normalize(), Money::from_cents(7));
        // 500g at 10%, not 7%
        assert_eq!(discount_for(500).normalize(), Money::from_cents(50));
    }

    #[test]
    fn test_description() {
        let rule = VegetableWeightTierRule::new(Arc::new(PricingConfig::default()));
        assert_eq!(
            rule.description(),
            "Vegetables under 100g: 5% off; under 500g: 7% off; 500g and over: 10% off"
        );
    }
}
