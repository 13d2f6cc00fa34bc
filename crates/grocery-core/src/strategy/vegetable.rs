//! Vegetable pricing: every vegetable item merges into one weighed line.

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::VegetablePricingContext;
use crate::error::PricingResult;
use crate::rules::{self, BoxedRule};
use crate::types::{OrderItem, ProductType, ReceiptLine};

use super::{add_quantity, PricingStrategy, RuleSet};

pub struct VegetablePricingStrategy {
    config: Arc<PricingConfig>,
    rules: RuleSet<VegetablePricingContext>,
}

impl VegetablePricingStrategy {
    pub fn new(
        config: Arc<PricingConfig>,
        rules: Vec<BoxedRule<VegetablePricingContext>>,
    ) -> Self {
        VegetablePricingStrategy {
            config,
            rules: RuleSet::new(rules),
        }
    }

    pub fn from_config(config: Arc<PricingConfig>) -> Self {
        let rules = rules::vegetable_rules(&config);
        Self::new(config, rules)
    }
}

impl PricingStrategy for VegetablePricingStrategy {
    fn product_type(&self) -> ProductType {
        ProductType::Vegetable
    }

    fn calculate_price(&self, items: &[OrderItem]) -> PricingResult<Vec<ReceiptLine>> {
        let mut total_weight = 0u32;
        for vegetable in items.iter().filter_map(OrderItem::as_vegetable) {
            add_quantity(&mut total_weight, vegetable.weight_grams())?;
        }
        if total_weight == 0 {
            return Ok(Vec::new());
        }

        let ctx = VegetablePricingContext::new(total_weight, self.config.vegetable.price_per_100g);
        let line = self
            .rules
            .price_line(&ctx, format!("{}g Vegetables", total_weight))?;
        Ok(vec![line])
    }

    fn rule_descriptions(&self) -> Vec<String> {
        self.rules.descriptions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn price(weights: &[u32]) -> Vec<ReceiptLine> {
        let items: Vec<OrderItem> = weights
            .iter()
            .map(|w| OrderItem::vegetable(*w).unwrap())
            .collect();
        VegetablePricingStrategy::from_config(Arc::new(PricingConfig::default()))
            .calculate_price(&items)
            .unwrap()
    }

    #[test]
    fn test_merges_items_into_one_line() {
        let lines = price(&[200, 250]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description(), "450g Vegetables");
        assert_eq!(lines[0].original_price(), Money::from_cents(450));
        // 7% of 4.50 = 0.315 → 0.32
        assert_eq!(lines[0].discount(), Money::from_cents(32));
        assert_eq!(lines[0].final_price(), Money::from_cents(418));
    }

    #[test]
    fn test_merged_weight_picks_tier() {
        // two small items together reach the 10% tier
        let lines = price(&[250, 250]);
        assert_eq!(lines[0].discount(), Money::from_cents(50));
    }

    #[test]
    fn test_small_weight_rounds_half_up() {
        let lines = price(&[50]);
        assert_eq!(lines[0].original_price(), Money::from_cents(50));
        assert_eq!(lines[0].discount(), Money::from_cents(3));
        assert_eq!(lines[0].final_price(), Money::from_cents(47));
    }

    #[test]
    fn test_no_vegetables_no_line() {
        assert!(price(&[]).is_empty());
    }
}
