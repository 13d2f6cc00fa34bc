//! # Domain Types
//!
//! Core domain types used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │   OrderItem     │   │    Receipt      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  items (owned)  │──►│  Bread          │   │  lines          │       │
//! │  │                 │   │  Vegetable      │   │  order_discounts│       │
//! │  └─────────────────┘   │  Beer           │   │  subtotal       │       │
//! │                        │  Dairy          │   │  total_discount │       │
//! │                        └─────────────────┘   │  total          │       │
//! │                                              └────────┬────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                │
//! │  │  ProductType    │   │   BeerOrigin    │   ┌────────▼────────┐       │
//! │  │  BREAD ...      │   │  BELGIAN ...    │   │  ReceiptLine    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction Invariants
//! Every item is immutable and validated on construction. Receipt values are
//! checked when built so a broken invariant never escapes the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::validation::validate_quantity;
use crate::MAX_BREAD_AGE_DAYS;

// =============================================================================
// Product Type
// =============================================================================

/// The closed set of product types the engine prices.
///
/// Ordering follows declaration order and drives the order of receipt lines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Bread,
    Vegetable,
    Beer,
    Dairy,
}

impl ProductType {
    /// All product types in receipt order.
    pub const ALL: [ProductType; 4] = [
        ProductType::Bread,
        ProductType::Vegetable,
        ProductType::Beer,
        ProductType::Dairy,
    ];

    /// Upper-case label used in messages and rule scopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Bread => "BREAD",
            ProductType::Vegetable => "VEGETABLE",
            ProductType::Beer => "BEER",
            ProductType::Dairy => "DAIRY",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Beer Origin
// =============================================================================

/// Beer origins with origin-specific prices and pack discounts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerOrigin {
    Belgian,
    Dutch,
    German,
}

impl BeerOrigin {
    /// All origins in receipt order.
    pub const ALL: [BeerOrigin; 3] = [BeerOrigin::Belgian, BeerOrigin::Dutch, BeerOrigin::German];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeerOrigin::Belgian => "BELGIAN",
            BeerOrigin::Dutch => "DUTCH",
            BeerOrigin::German => "GERMAN",
        }
    }

    /// Human-friendly name, e.g. `Belgian`.
    pub fn display_name(&self) -> &'static str {
        match self {
            BeerOrigin::Belgian => "Belgian",
            BeerOrigin::Dutch => "Dutch",
            BeerOrigin::German => "German",
        }
    }
}

impl fmt::Display for BeerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Items
// =============================================================================

/// Bread units of a single age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadItem {
    quantity: u32,
    days_old: u32,
}

impl BreadItem {
    /// Creates a bread item.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is zero
    /// - `InvalidOrder` if the bread is older than [`MAX_BREAD_AGE_DAYS`];
    ///   stale bread is a business rule, not malformed data
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::types::BreadItem;
    ///
    /// assert!(BreadItem::new(3, 6).is_ok());
    /// assert!(BreadItem::new(3, 7).is_err());
    /// ```
    pub fn new(quantity: u32, days_old: u32) -> PricingResult<Self> {
        validate_quantity("quantity", quantity)?;
        if days_old > MAX_BREAD_AGE_DAYS {
            return Err(PricingError::InvalidOrder(format!(
                "Bread older than {} days cannot be ordered",
                MAX_BREAD_AGE_DAYS
            )));
        }
        Ok(BreadItem { quantity, days_old })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn days_old(&self) -> u32 {
        self.days_old
    }
}

/// Loose vegetables sold by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VegetableItem {
    weight_grams: u32,
}

impl VegetableItem {
    pub fn new(weight_grams: u32) -> PricingResult<Self> {
        validate_quantity("weight_grams", weight_grams)?;
        Ok(VegetableItem { weight_grams })
    }

    pub fn weight_grams(&self) -> u32 {
        self.weight_grams
    }
}

/// Beer bottles of a single origin.
///
/// The origin is a required, typed field, so a beer without an origin
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerItem {
    quantity: u32,
    origin: BeerOrigin,
}

impl BeerItem {
    pub fn new(quantity: u32, origin: BeerOrigin) -> PricingResult<Self> {
        validate_quantity("quantity", quantity)?;
        Ok(BeerItem { quantity, origin })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn origin(&self) -> BeerOrigin {
        self.origin
    }
}

/// Dairy units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DairyItem {
    quantity: u32,
}

impl DairyItem {
    pub fn new(quantity: u32) -> PricingResult<Self> {
        validate_quantity("quantity", quantity)?;
        Ok(DairyItem { quantity })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A single line of a customer order.
///
/// The variant set is closed; every match over it is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderItem {
    Bread(BreadItem),
    Vegetable(VegetableItem),
    Beer(BeerItem),
    Dairy(DairyItem),
}

impl OrderItem {
    /// Shorthand for `OrderItem::Bread(BreadItem::new(..)?)`.
    pub fn bread(quantity: u32, days_old: u32) -> PricingResult<Self> {
        BreadItem::new(quantity, days_old).map(OrderItem::Bread)
    }

    pub fn vegetable(weight_grams: u32) -> PricingResult<Self> {
        VegetableItem::new(weight_grams).map(OrderItem::Vegetable)
    }

    pub fn beer(quantity: u32, origin: BeerOrigin) -> PricingResult<Self> {
        BeerItem::new(quantity, origin).map(OrderItem::Beer)
    }

    pub fn dairy(quantity: u32) -> PricingResult<Self> {
        DairyItem::new(quantity).map(OrderItem::Dairy)
    }

    /// The product type used to dispatch this item to a strategy.
    pub fn product_type(&self) -> ProductType {
        match self {
            OrderItem::Bread(_) => ProductType::Bread,
            OrderItem::Vegetable(_) => ProductType::Vegetable,
            OrderItem::Beer(_) => ProductType::Beer,
            OrderItem::Dairy(_) => ProductType::Dairy,
        }
    }

    pub fn as_bread(&self) -> Option<&BreadItem> {
        match self {
            OrderItem::Bread(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_vegetable(&self) -> Option<&VegetableItem> {
        match self {
            OrderItem::Vegetable(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_beer(&self) -> Option<&BeerItem> {
        match self {
            OrderItem::Beer(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_dairy(&self) -> Option<&DairyItem> {
        match self {
            OrderItem::Dairy(item) => Some(item),
            _ => None,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order: an owned, immutable list of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Order {
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(items: Vec<OrderItem>) -> Self {
        Order { items }
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The distinct product types present in this order.
    pub fn product_types(&self) -> BTreeSet<ProductType> {
        self.items.iter().map(OrderItem::product_type).collect()
    }

    /// Returns true if at least one item of `product_type` is present.
    pub fn contains(&self, product_type: ProductType) -> bool {
        self.items.iter().any(|item| item.product_type() == product_type)
    }
}

impl FromIterator<OrderItem> for Order {
    fn from_iter<I: IntoIterator<Item = OrderItem>>(iter: I) -> Self {
        Order::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Receipt Line
// =============================================================================

/// A single priced line of a receipt.
///
/// ## Invariant
/// `final_price == original_price - discount` and `final_price >= 0`.
/// All three amounts are normalized to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    description: String,
    original_price: Money,
    discount: Money,
    final_price: Money,
}

impl ReceiptLine {
    /// Builds a line from explicit amounts and checks that they reconcile.
    pub fn new(
        description: impl Into<String>,
        original_price: Money,
        discount: Money,
        final_price: Money,
    ) -> PricingResult<Self> {
        let description = description.into();
        let original_price = original_price.normalize();
        let discount = discount.normalize();
        let final_price = final_price.normalize();

        if discount.is_negative() {
            return Err(PricingError::InvariantViolation(format!(
                "Receipt line '{}' has a negative discount {}",
                description, discount
            )));
        }
        if final_price.is_negative() {
            return Err(PricingError::InvariantViolation(format!(
                "Receipt line '{}' has a negative final price {}",
                description, final_price
            )));
        }
        if original_price - discount != final_price {
            return Err(PricingError::InvariantViolation(format!(
                "Receipt line '{}' does not reconcile: {} - {} != {}",
                description, original_price, discount, final_price
            )));
        }

        Ok(ReceiptLine {
            description,
            original_price,
            discount,
            final_price,
        })
    }

    /// Builds a line from the original price and the (capped) discount.
    ///
    /// Both inputs are normalized first and the final price is derived from
    /// the normalized values, so the line always reconciles to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    /// use grocery_core::types::ReceiptLine;
    /// use rust_decimal::Decimal;
    ///
    /// let line = ReceiptLine::priced(
    ///     "50g Vegetables",
    ///     Money::from_cents(50),
    ///     Money::new(Decimal::new(25, 3)), // 0.025 → 0.03
    /// ).unwrap();
    /// assert_eq!(line.final_price(), Money::from_cents(47));
    /// ```
    pub fn priced(
        description: impl Into<String>,
        original_price: Money,
        discount: Money,
    ) -> PricingResult<Self> {
        let original_price = original_price.normalize();
        let discount = discount.normalize();
        ReceiptLine::new(description, original_price, discount, original_price - discount)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn original_price(&self) -> Money {
        self.original_price
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn final_price(&self) -> Money {
        self.final_price
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// An order-level (combo) discount that was applied to a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedOrderDiscount {
    pub description: String,
    pub amount: Money,
}

/// The terminal result of pricing one order.
///
/// ## Invariants
/// - `subtotal == Σ line.original_price`
/// - `total_discount == Σ line.discount + Σ order_discount.amount`
/// - `total == subtotal - total_discount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    order_discounts: Vec<AppliedOrderDiscount>,
    subtotal: Money,
    total_discount: Money,
    total: Money,
}

impl Receipt {
    /// Assembles a receipt and verifies that its totals reconcile.
    pub fn new(
        lines: Vec<ReceiptLine>,
        order_discounts: Vec<AppliedOrderDiscount>,
        subtotal: Money,
        total_discount: Money,
        total: Money,
    ) -> PricingResult<Self> {
        let subtotal = subtotal.normalize();
        let total_discount = total_discount.normalize();
        let total = total.normalize();

        let line_subtotal: Money = lines.iter().map(ReceiptLine::original_price).sum();
        if line_subtotal != subtotal {
            return Err(PricingError::InvariantViolation(format!(
                "Subtotal {} does not match the sum of line prices {}",
                subtotal, line_subtotal
            )));
        }

        let expected_discount: Money = lines.iter().map(ReceiptLine::discount).sum::<Money>()
            + order_discounts.iter().map(|d| d.amount).sum::<Money>();
        if expected_discount.normalize() != total_discount {
            return Err(PricingError::InvariantViolation(format!(
                "Total discount {} does not match line and order discounts {}",
                total_discount, expected_discount
            )));
        }

        if subtotal - total_discount != total || total.is_negative() {
            return Err(PricingError::InvariantViolation(format!(
                "Total {} is not subtotal {} minus discount {}",
                total, subtotal, total_discount
            )));
        }

        Ok(Receipt {
            lines,
            order_discounts,
            subtotal,
            total_discount,
            total,
        })
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    pub fn order_discounts(&self) -> &[AppliedOrderDiscount] {
        &self.order_discounts
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn total_discount(&self) -> Money {
        self.total_discount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Finds the first line whose description contains `keyword`
    /// (case-insensitive).
    pub fn find_line(&self, keyword: &str) -> Option<&ReceiptLine> {
        let keyword = keyword.to_lowercase();
        self.lines
            .iter()
            .find(|line| line.description.to_lowercase().contains(&keyword))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bread_item_invariants() {
        let bread = BreadItem::new(3, 3).unwrap();
        assert_eq!(bread.quantity(), 3);
        assert_eq!(bread.days_old(), 3);

        assert!(BreadItem::new(1, 0).is_ok());
        assert!(BreadItem::new(1, MAX_BREAD_AGE_DAYS).is_ok());

        let zero = BreadItem::new(0, 1).unwrap_err();
        assert!(matches!(zero, PricingError::Validation(_)));

        let stale = BreadItem::new(1, 7).unwrap_err();
        assert!(matches!(stale, PricingError::InvalidOrder(_)));
        assert_eq!(
            stale.to_string(),
            "Invalid order: Bread older than 6 days cannot be ordered"
        );
    }

    #[test]
    fn test_other_item_invariants() {
        assert!(VegetableItem::new(1).is_ok());
        assert!(VegetableItem::new(0).is_err());
        assert!(BeerItem::new(6, BeerOrigin::Dutch).is_ok());
        assert!(BeerItem::new(0, BeerOrigin::Dutch).is_err());
        assert!(DairyItem::new(2).is_ok());
        assert!(DairyItem::new(0).is_err());
    }

    #[test]
    fn test_order_item_product_type() {
        assert_eq!(OrderItem::bread(1, 0).unwrap().product_type(), ProductType::Bread);
        assert_eq!(OrderItem::vegetable(100).unwrap().product_type(), ProductType::Vegetable);
        assert_eq!(
            OrderItem::beer(1, BeerOrigin::German).unwrap().product_type(),
            ProductType::Beer
        );
        assert_eq!(OrderItem::dairy(1).unwrap().product_type(), ProductType::Dairy);

        let beer = OrderItem::beer(2, BeerOrigin::Belgian).unwrap();
        assert!(beer.as_beer().is_some());
        assert!(beer.as_bread().is_none());
    }

    #[test]
    fn test_order_owns_items_in_order() {
        let order: Order = vec![
            OrderItem::beer(6, BeerOrigin::Dutch).unwrap(),
            OrderItem::bread(3, 3).unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[0].product_type(), ProductType::Beer);
        assert!(order.contains(ProductType::Bread));
        assert!(!order.contains(ProductType::Dairy));
        assert_eq!(
            order.product_types().into_iter().collect::<Vec<_>>(),
            vec![ProductType::Bread, ProductType::Beer]
        );
        assert!(Order::default().is_empty());
    }

    #[test]
    fn test_receipt_line_rejects_negative_final_price() {
        let err = ReceiptLine::new(
            "bad",
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(-100),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvariantViolation(_)));
    }

    #[test]
    fn test_receipt_line_rejects_unreconciled_amounts() {
        let err = ReceiptLine::new(
            "bad",
            Money::from_cents(300),
            Money::from_cents(100),
            Money::from_cents(250),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvariantViolation(_)));
    }

    #[test]
    fn test_receipt_reconciles() {
        let line = ReceiptLine::priced("3 x Bread (3 days old)", Money::from_cents(300), Money::from_cents(100))
            .unwrap();
        let combo = AppliedOrderDiscount {
            description: "combo".into(),
            amount: Money::from_cents(10),
        };
        let receipt = Receipt::new(
            vec![line],
            vec![combo],
            Money::from_cents(300),
            Money::from_cents(110),
            Money::from_cents(190),
        )
        .unwrap();

        assert_eq!(receipt.total(), Money::from_cents(190));
        assert!(receipt.find_line("bread").is_some());
        assert!(receipt.find_line("beer").is_none());
    }

    #[test]
    fn test_receipt_rejects_wrong_total() {
        let line = ReceiptLine::priced("x", Money::from_cents(300), Money::ZERO).unwrap();
        let err = Receipt::new(
            vec![line],
            vec![],
            Money::from_cents(300),
            Money::ZERO,
            Money::from_cents(299),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvariantViolation(_)));
    }

    #[test]
    fn test_product_type_display_and_serde() {
        assert_eq!(ProductType::Vegetable.to_string(), "VEGETABLE");
        assert_eq!(BeerOrigin::Belgian.to_string(), "BELGIAN");
        let origin: BeerOrigin = serde_json::from_str("\"GERMAN\"").unwrap();
        assert_eq!(origin, BeerOrigin::German);
    }

    #[test]
    fn test_order_item_serializes_with_type_tag() {
        let json = serde_json::to_value(OrderItem::bread(3, 3).unwrap()).unwrap();
        assert_eq!(json["type"], "BREAD");
        assert_eq!(json["daysOld"], 3);
    }
}
