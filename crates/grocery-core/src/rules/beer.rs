//! Beer discounts: fixed amount per full pack, plus an optional
//! "every n-th bottle free" promotion.

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::context::BeerPricingContext;
use crate::money::Money;
use crate::types::BeerOrigin;

use super::DiscountRule;

/// Fixed discount per full pack, looked up by origin.
pub struct BeerPackDiscountRule {
    config: Arc<PricingConfig>,
}

impl BeerPackDiscountRule {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        BeerPackDiscountRule { config }
    }
}

impl DiscountRule<BeerPricingContext> for BeerPackDiscountRule {
    fn name(&self) -> &'static str {
        "beer_pack_discount"
    }

    fn is_applicable(&self, ctx: &BeerPricingContext) -> bool {
        ctx.packs > 0
    }

    fn calculate_discount(&self, ctx: &BeerPricingContext) -> Money {
        self.config
            .beer
            .origin(ctx.origin)
            .pack_discount
            .multiply_quantity(ctx.packs)
    }

    fn description(&self) -> String {
        let beer = &self.config.beer;
        let per_origin = BeerOrigin::ALL
            .iter()
            .map(|origin| {
                format!(
                    "{} {} per {}-pack",
                    origin.display_name(),
                    beer.origin(*origin).pack_discount,
                    beer.pack_size_for(*origin)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("Beer pack discounts: {}", per_origin)
    }
}

/// Every `every`-th bottle of `origin` is free.
pub struct BeerFreeBottleRule {
    origin: BeerOrigin,
    every: u32,
}

impl BeerFreeBottleRule {
    pub fn new(origin: BeerOrigin, every: u32) -> Self {
        BeerFreeBottleRule { origin, every }
    }
}

impl DiscountRule<BeerPricingContext> for BeerFreeBottleRule {
    fn name(&self) -> &'static str {
        "beer_free_bottle"
    }

    fn is_applicable(&self, ctx: &BeerPricingContext) -> bool {
        self.every > 0 && ctx.origin == self.origin && ctx.total_bottles >= self.every
    }

    fn calculate_discount(&self, ctx: &BeerPricingContext) -> Money {
        if self.every == 0 {
            return Money::ZERO;
        }
        ctx.unit_price.multiply_quantity(ctx.total_bottles / self.every)
    }

    fn order(&self) -> i32 {
        150
    }

    fn description(&self) -> String {
        format!(
            "{} beer: buy {}, get 1 free",
            self.origin.display_name(),
            self.every.saturating_sub(1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(origin: BeerOrigin, bottles: u32) -> BeerPricingContext {
        let config = PricingConfig::default();
        BeerPricingContext::new(
            origin,
            bottles,
            config.beer.pack_size_for(origin),
            config.beer.origin(origin).base_price,
        )
    }

    #[test]
    fn test_pack_discount_per_origin() {
        let rule = BeerPackDiscountRule::new(Arc::new(PricingConfig::default()));
        assert_eq!(
            rule.calculate_discount(&ctx(BeerOrigin::Belgian, 6)),
            Money::from_cents(300)
        );
        assert_eq!(
            rule.calculate_discount(&ctx(BeerOrigin::Dutch, 12)),
            Money::from_cents(400)
        );
        assert_eq!(
            rule.calculate_discount(&ctx(BeerOrigin::German, 13)),
            Money::from_cents(800)
        );
    }

    #[test]
    fn test_no_full_pack_no_discount() {
        let rule = BeerPackDiscountRule::new(Arc::new(PricingConfig::default()));
        let c = ctx(BeerOrigin::Dutch, 5);
        assert!(!rule.is_applicable(&c));
        assert_eq!(rule.calculate_discount(&c), Money::ZERO);
    }

    #[test]
    fn test_free_bottle_only_for_its_origin() {
        let rule = BeerFreeBottleRule::new(BeerOrigin::Dutch, 3);
        let dutch = ctx(BeerOrigin::Dutch, 7);
        assert!(rule.is_applicable(&dutch));
        assert_eq!(rule.calculate_discount(&dutch), Money::from_cents(100));

        assert!(!rule.is_applicable(&ctx(BeerOrigin::Belgian, 7)));
        assert!(!rule.is_applicable(&ctx(BeerOrigin::Dutch, 2)));
        assert_eq!(rule.description(), "Dutch beer: buy 2, get 1 free");
    }

    #[test]
    fn test_pack_description_lists_origins() {
        let rule = BeerPackDiscountRule::new(Arc::new(PricingConfig::default()));
        assert_eq!(
            rule.description(),
            "Beer pack discounts: Belgian €3.00 per 6-pack, Dutch €2.00 per 6-pack, German €4.00 per 6-pack"
        );
    }
}
