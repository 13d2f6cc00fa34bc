//! # Rule Catalog
//!
//! Read-only introspection over the registered rules and the price list.
//! Nothing in here takes part in pricing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::PricingConfig;
use crate::money::Money;
use crate::rules::BoxedOrderRule;
use crate::strategy::PricingStrategy;
use crate::types::{BeerOrigin, ProductType};

/// One registered rule as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescription {
    /// `BREAD`, `BEER`, ... for product rules; `BREAD+VEGETABLE` for combos.
    pub scope: String,
    pub description: String,
    /// Product types the rule concerns.
    pub product_types: Vec<ProductType>,
}

/// Snapshot of rule descriptions taken from a configured service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleCatalog {
    rules: Vec<RuleDescription>,
}

impl RuleCatalog {
    /// Product rules first (by product type, then execution order), then
    /// order-level rules.
    pub fn build<'a>(
        strategies: impl IntoIterator<Item = &'a dyn PricingStrategy>,
        order_rules: &[BoxedOrderRule],
    ) -> Self {
        let mut rules = Vec::new();

        for strategy in strategies {
            let product_type = strategy.product_type();
            rules.extend(
                strategy
                    .rule_descriptions()
                    .into_iter()
                    .map(|description| RuleDescription {
                        scope: product_type.to_string(),
                        description,
                        product_types: vec![product_type],
                    }),
            );
        }

        rules.extend(order_rules.iter().map(|rule| RuleDescription {
            scope: rule.scope(),
            description: rule.description(),
            product_types: rule.product_types().to_vec(),
        }));

        RuleCatalog { rules }
    }

    pub fn all_rules(&self) -> &[RuleDescription] {
        &self.rules
    }

    /// Rules that concern `product_type`, including combos that list it.
    pub fn rules_for(&self, product_type: ProductType) -> Vec<&RuleDescription> {
        self.rules
            .iter()
            .filter(|rule| rule.product_types.contains(&product_type))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// =============================================================================
// Price List
// =============================================================================

/// A base price as listed to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    pub product_name: String,
    pub price: Money,
    pub unit: String,
}

impl PriceInfo {
    fn new(product_name: impl Into<String>, price: Money, unit: &str) -> Self {
        PriceInfo {
            product_name: product_name.into(),
            price: price.normalize(),
            unit: unit.to_string(),
        }
    }
}

/// Base prices before any discount.
///
/// ## Example
/// ```rust
/// use grocery_core::catalog::price_list;
/// use grocery_core::PricingConfig;
///
/// let prices = price_list(&PricingConfig::default());
/// assert_eq!(prices[0].product_name, "Bread");
/// assert_eq!(prices.len(), 6);
/// ```
pub fn price_list(config: &PricingConfig) -> Vec<PriceInfo> {
    let mut prices = vec![
        PriceInfo::new("Bread", config.bread.unit_price, "per unit"),
        PriceInfo::new("Vegetables", config.vegetable.price_per_100g, "per 100g"),
    ];
    prices.extend(BeerOrigin::ALL.iter().map(|origin| {
        PriceInfo::new(
            format!("{} Beer", origin.display_name()),
            config.beer.origin(*origin).base_price,
            "per bottle",
        )
    }));
    prices.push(PriceInfo::new("Dairy", config.dairy.unit_price, "per unit"));
    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FreeBottleConfig;
    use crate::service::OrderPricingService;
    use std::sync::Arc;

    fn catalog(config: PricingConfig) -> RuleCatalog {
        OrderPricingService::from_config(Arc::new(config))
            .unwrap()
            .rule_catalog()
    }

    #[test]
    fn test_all_rules_in_stable_order() {
        let catalog = catalog(PricingConfig::default());
        let scopes: Vec<&str> = catalog.all_rules().iter().map(|r| r.scope.as_str()).collect();
        assert_eq!(
            scopes,
            vec!["BREAD", "VEGETABLE", "BEER", "DAIRY", "BREAD+VEGETABLE"]
        );
    }

    #[test]
    fn test_rules_for_includes_combos() {
        let catalog = catalog(PricingConfig::default());
        let bread = catalog.rules_for(ProductType::Bread);
        assert_eq!(bread.len(), 2);
        assert_eq!(bread[1].scope, "BREAD+VEGETABLE");
        assert_eq!(catalog.rules_for(ProductType::Dairy).len(), 1);
    }

    #[test]
    fn test_free_bottle_listed_after_pack_rule() {
        let mut config = PricingConfig::default();
        config.beer.free_bottle = Some(FreeBottleConfig {
            origin: BeerOrigin::German,
            every: 4,
        });
        let catalog = catalog(config);
        let beer = catalog.rules_for(ProductType::Beer);
        assert_eq!(beer.len(), 2);
        assert_eq!(beer[1].description, "German beer: buy 3, get 1 free");
    }

    #[test]
    fn test_price_list() {
        let prices = price_list(&PricingConfig::default());
        let names: Vec<&str> = prices.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bread", "Vegetables", "Belgian Beer", "Dutch Beer", "German Beer", "Dairy"]
        );
        assert_eq!(prices[1].unit, "per 100g");
        assert_eq!(prices[2].price, Money::from_cents(60));
        assert_eq!(prices[5].price, Money::from_cents(120));
    }
}
