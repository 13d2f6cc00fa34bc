//! Dairy pricing: every dairy item merges into one line.

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::DairyPricingContext;
use crate::error::PricingResult;
use crate::rules::{self, BoxedRule};
use crate::types::{OrderItem, ProductType, ReceiptLine};

use super::{add_quantity, PricingStrategy, RuleSet};

pub struct DairyPricingStrategy {
    config: Arc<PricingConfig>,
    rules: RuleSet<DairyPricingContext>,
}

impl DairyPricingStrategy {
    pub fn new(config: Arc<PricingConfig>, rules: Vec<BoxedRule<DairyPricingContext>>) -> Self {
        DairyPricingStrategy {
            config,
            rules: RuleSet::new(rules),
        }
    }

    pub fn from_config(config: Arc<PricingConfig>) -> Self {
        let rules = rules::dairy_rules(&config);
        Self::new(config, rules)
    }
}

impl PricingStrategy for DairyPricingStrategy {
    fn product_type(&self) -> ProductType {
        ProductType::Dairy
    }

    fn calculate_price(&self, items: &[OrderItem]) -> PricingResult<Vec<ReceiptLine>> {
        let mut quantity = 0u32;
        for dairy in items.iter().filter_map(OrderItem::as_dairy) {
            add_quantity(&mut quantity, dairy.quantity())?;
        }
        if quantity == 0 {
            return Ok(Vec::new());
        }

        let ctx = DairyPricingContext::new(quantity, self.config.dairy.unit_price);
        let line = self.rules.price_line(&ctx, format!("{} x Dairy", quantity))?;
        Ok(vec![line])
    }

    fn rule_descriptions(&self) -> Vec<String> {
        self.rules.descriptions()
    }
}
