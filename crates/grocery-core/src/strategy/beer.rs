//! Beer pricing: one line per origin.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::BeerPricingContext;
use crate::error::PricingResult;
use crate::rules::{self, BoxedRule};
use crate::types::{BeerOrigin, OrderItem, ProductType, ReceiptLine};

use super::{add_quantity, PricingStrategy, RuleSet};

pub struct BeerPricingStrategy {
    config: Arc<PricingConfig>,
    rules: RuleSet<BeerPricingContext>,
}

impl BeerPricingStrategy {
    pub fn new(config: Arc<PricingConfig>, rules: Vec<BoxedRule<BeerPricingContext>>) -> Self {
        BeerPricingStrategy {
            config,
            rules: RuleSet::new(rules),
        }
    }

    pub fn from_config(config: Arc<PricingConfig>) -> Self {
        let rules = rules::beer_rules(&config);
        Self::new(config, rules)
    }

    fn context(&self, origin: BeerOrigin, bottles: u32) -> BeerPricingContext {
        let beer = &self.config.beer;
        BeerPricingContext::new(
            origin,
            bottles,
            beer.pack_size_for(origin),
            beer.origin(origin).base_price,
        )
    }
}

impl PricingStrategy for BeerPricingStrategy {
    fn product_type(&self) -> ProductType {
        ProductType::Beer
    }

    fn calculate_price(&self, items: &[OrderItem]) -> PricingResult<Vec<ReceiptLine>> {
        let mut by_origin: BTreeMap<BeerOrigin, u32> = BTreeMap::new();
        for beer in items.iter().filter_map(OrderItem::as_beer) {
            add_quantity(by_origin.entry(beer.origin()).or_default(), beer.quantity())?;
        }

        by_origin
            .into_iter()
            .map(|(origin, bottles)| {
                let ctx = self.context(origin, bottles);
                let description = format!(
                    "{} x {} Beer ({} packs + {} singles)",
                    bottles, origin, ctx.packs, ctx.singles
                );
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
    use crate::config::FreeBottleConfig;
    use crate::money::Money;

    fn strategy(config: PricingConfig) -> BeerPricingStrategy {
        BeerPricingStrategy::from_config(Arc::new(config))
    }

    #[test]
    fn test_belgian_six_pack() {
        let items = vec![OrderItem::beer(6, BeerOrigin::Belgian).unwrap()];
        let lines = strategy(PricingConfig::default()).calculate_price(&items).unwrap();

        assert_eq!(lines[0].description(), "6 x BELGIAN Beer (1 packs + 0 singles)");
        assert_eq!(lines[0].original_price(), Money::from_cents(360));
        assert_eq!(lines[0].discount(), Money::from_cents(300));
        assert_eq!(lines[0].final_price(), Money::from_cents(60));
    }

    #[test]
    fn test_groups_by_origin_in_stable_order() {
        let items = vec![
            OrderItem::beer(3, BeerOrigin::German).unwrap(),
            OrderItem::beer(4, BeerOrigin::Dutch).unwrap(),
            OrderItem::beer(3, BeerOrigin::German).unwrap(),
        ];
        let lines = strategy(PricingConfig::default()).calculate_price(&items).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].description(), "4 x DUTCH Beer (0 packs + 4 singles)");
        assert_eq!(lines[0].discount(), Money::ZERO);
        assert_eq!(lines[1].description(), "6 x GERMAN Beer (1 packs + 0 singles)");
        assert_eq!(lines[1].discount(), Money::from_cents(400));
    }

    #[test]
    fn test_origin_pack_size_override() {
        let mut config = PricingConfig::default();
        config.beer.german.pack_size = Some(12);
        let items = vec![OrderItem::beer(12, BeerOrigin::German).unwrap()];
        let lines = strategy(config).calculate_price(&items).unwrap();

        assert_eq!(lines[0].description(), "12 x GERMAN Beer (1 packs + 0 singles)");
        assert_eq!(lines[0].discount(), Money::from_cents(400));
    }

    #[test]
    fn test_free_bottle_stacks_and_is_capped() {
        let mut config = PricingConfig::default();
        config.beer.free_bottle = Some(FreeBottleConfig {
            origin: BeerOrigin::Dutch,
            every: 2,
        });
        let items = vec![OrderItem::beer(6, BeerOrigin::Dutch).unwrap()];
        let lines = strategy(config).calculate_price(&items).unwrap();

        // 6 x 0.50 = 3.00; pack 2.00 + three free bottles 1.50 = 3.50, capped
        assert_eq!(lines[0].discount(), Money::from_cents(300));
        assert_eq!(lines[0].final_price(), Money::ZERO);
    }
}
