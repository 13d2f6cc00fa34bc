//! Threshold-based dairy discount.

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::DairyPricingContext;
use crate::money::{format_percent, Money};

use super::DiscountRule;

/// Percentage off the dairy group once its price reaches the threshold.
pub struct DairyThresholdRule {
    config: Arc<PricingConfig>,
}

impl DairyThresholdRule {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        DairyThresholdRule { config }
    }
}

impl DiscountRule<DairyPricingContext> for DairyThresholdRule {
    fn name(&self) -> &'static str {
        "dairy_threshold"
    }

    fn is_applicable(&self, ctx: &DairyPricingContext) -> bool {
        ctx.original_price >= self.config.dairy.price_threshold
    }

    fn calculate_discount(&self, ctx: &DairyPricingContext) -> Money {
        ctx.original_price.percentage(self.config.dairy.discount_rate)
    }

    fn description(&self) -> String {
        format!(
            "Dairy: {} off when the dairy total reaches {}",
            format_percent(self.config.dairy.discount_rate),
            self.config.dairy.price_threshold
        )
    }
}
