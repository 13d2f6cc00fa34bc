//! Cross-product combo discount.

use rust_decimal::Decimal;

use crate::context::OrderPricingContext;
use crate::money::{format_percent, Money};
use crate::types::ProductType;

use super::OrderDiscountRule;

/// Percentage off the running total when the order contains at least one
/// item of every listed product type.
///
/// The percentage applies to `current_total`, so it compounds on top of the
/// product-level discounts and any earlier order-level rule.
pub struct ComboDiscountRule {
    product_types: Vec<ProductType>,
    discount_rate: Decimal,
}

impl ComboDiscountRule {
    pub fn new(product_types: Vec<ProductType>, discount_rate: Decimal) -> Self {
        ComboDiscountRule {
            product_types,
            discount_rate,
        }
    }
}

impl OrderDiscountRule for ComboDiscountRule {
    fn name(&self) -> &'static str {
        "combo_discount"
    }

    fn product_types(&self) -> &[ProductType] {
        &self.product_types
    }

    fn is_applicable(&self, ctx: &OrderPricingContext<'_>) -> bool {
        !self.product_types.is_empty()
            && self
                .product_types
                .iter()
                .all(|product_type| ctx.order.contains(*product_type))
    }

    fn calculate_discount(&self, ctx: &OrderPricingContext<'_>) -> Money {
        ctx.current_total.percentage(self.discount_rate)
    }

    fn description(&self) -> String {
        let names = self
            .product_types
            .iter()
            .map(|t| t.as_str().to_lowercase())
            .collect::<Vec<_>>()
            .join(" and ");
        format!(
            "Combo: {} off the order total when buying {} together",
            format_percent(self.discount_rate),
            names
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BeerOrigin, Order, OrderItem};
    use rust_decimal_macros::dec;

    fn combo() -> ComboDiscountRule {
        ComboDiscountRule::new(vec![ProductType::Bread, ProductType::Vegetable], dec!(0.05))
    }

    #[test]
    fn test_requires_every_product_type() {
        let both = Order::new(vec![
            OrderItem::bread(1, 0).unwrap(),
            OrderItem::vegetable(100).unwrap(),
        ]);
        let bread_only = Order::new(vec![
            OrderItem::bread(1, 0).unwrap(),
            OrderItem::beer(6, BeerOrigin::Dutch).unwrap(),
        ]);

        let rule = combo();
        let total = Money::from_cents(500);
        assert!(rule.is_applicable(&OrderPricingContext::new(&both, total, total)));
        assert!(!rule.is_applicable(&OrderPricingContext::new(&bread_only, total, total)));
    }

    #[test]
    fn test_discount_uses_current_total() {
        let order = Order::new(vec![
            OrderItem::bread(3, 3).unwrap(),
            OrderItem::vegetable(200).unwrap(),
        ]);
        let ctx = OrderPricingContext::new(&order, Money::from_cents(800), Money::from_cents(486));
        assert_eq!(combo().calculate_discount(&ctx).normalize(), Money::from_cents(24));
    }

    #[test]
    fn test_description_and_scope() {
        let rule = combo();
        assert_eq!(rule.scope(), "BREAD+VEGETABLE");
        assert_eq!(
            rule.description(),
            "Combo: 5% off the order total when buying bread and vegetable together"
        );
    }
}
