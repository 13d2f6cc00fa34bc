//! Bread pricing: one line per age.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::BreadPricingContext;
use crate::error::PricingResult;
use crate::rules::{self, BoxedRule};
use crate::types::{OrderItem, ProductType, ReceiptLine};

use super::{add_quantity, PricingStrategy, RuleSet};

pub struct BreadPricingStrategy {
    config: Arc<PricingConfig>,
    rules: RuleSet<BreadPricingContext>,
}

impl BreadPricingStrategy {
    pub fn new(config: Arc<PricingConfig>, rules: Vec<BoxedRule<BreadPricingContext>>) -> Self {
        BreadPricingStrategy {
            config,
            rules: RuleSet::new(rules),
        }
    }

    /// Strategy with the standard bread rules.
    pub fn from_config(config: Arc<PricingConfig>) -> Self {
        let rules = rules::bread_rules(&config);
        Self::new(config, rules)
    }
}

impl PricingStrategy for BreadPricingStrategy {
    fn product_type(&self) -> ProductType {
        ProductType::Bread
    }

    fn calculate_price(&self, items: &[OrderItem]) -> PricingResult<Vec<ReceiptLine>> {
        let mut by_age: BTreeMap<u32, u32> = BTreeMap::new();
        for bread in items.iter().filter_map(OrderItem::as_bread) {
            add_quantity(by_age.entry(bread.days_old()).or_default(), bread.quantity())?;
        }

        by_age
            .into_iter()
            .map(|(age, quantity)| {
                let ctx = BreadPricingContext::new(age, quantity, self.config.bread.unit_price);
                let description = format!("{} x Bread ({} days old)", quantity, age);
                self.rules.price_line(&ctx, description)
            })
            .collect()
    }

    fn rule_descriptions(&self) -> Vec<String> {
        self.rules.descriptions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn strategy() -> BreadPricingStrategy {
        BreadPricingStrategy::from_config(Arc::new(PricingConfig::default()))
    }

    #[test]
    fn test_groups_by_age() {
        let items = vec![
            OrderItem::bread(1, 3).unwrap(),
            OrderItem::bread(2, 0).unwrap(),
            OrderItem::bread(2, 3).unwrap(),
        ];
        let lines = strategy().calculate_price(&items).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].description(), "2 x Bread (0 days old)");
        assert_eq!(lines[0].discount(), Money::ZERO);
        assert_eq!(lines[1].description(), "3 x Bread (3 days old)");
        assert_eq!(lines[1].original_price(), Money::from_cents(300));
        assert_eq!(lines[1].discount(), Money::from_cents(100));
        assert_eq!(lines[1].final_price(), Money::from_cents(200));
    }

    #[test]
    fn test_ignores_other_variants() {
        let items = vec![OrderItem::dairy(3).unwrap()];
        assert!(strategy().calculate_price(&items).unwrap().is_empty());
    }

    #[test]
    fn test_special_age_line() {
        let items = vec![OrderItem::bread(3, 6).unwrap()];
        let lines = strategy().calculate_price(&items).unwrap();
        assert_eq!(lines[0].final_price(), Money::from_cents(100));
    }
}
