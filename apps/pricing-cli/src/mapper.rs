//! # Order Request Mapping
//!
//! Maps the loosely-typed JSON order request into a validated [`Order`].
//!
//! ## Request Format
//! ```json
//! {
//!   "items": [
//!     { "type": "BREAD", "quantity": 3, "daysOld": 3 },
//!     { "type": "VEGETABLE", "weightGrams": 200 },
//!     { "type": "BEER", "quantity": 6, "origin": "DUTCH" },
//!     { "type": "DAIRY", "quantity": 2 }
//!   ]
//! }
//! ```
//!
//! Fields a product type needs are checked here; fields it does not need
//! are ignored. Value checks (quantity > 0, bread age) happen in the item
//! constructors.

use serde::Deserialize;

use grocery_core::{BeerOrigin, Order, OrderItem, PricingError, PricingResult, ProductType};

#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub quantity: Option<u32>,
    pub days_old: Option<u32>,
    pub weight_grams: Option<u32>,
    pub origin: Option<BeerOrigin>,
}

pub fn map_order(request: &OrderRequest) -> PricingResult<Order> {
    request
        .items
        .iter()
        .map(map_item)
        .collect::<PricingResult<Vec<_>>>()
        .map(Order::new)
}

pub fn map_item(item: &OrderItemRequest) -> PricingResult<OrderItem> {
    let product_type = item.product_type;
    match product_type {
        ProductType::Bread => OrderItem::bread(
            required(item.quantity, "quantity", product_type)?,
            required(item.days_old, "daysOld", product_type)?,
        ),
        ProductType::Vegetable => {
            OrderItem::vegetable(required(item.weight_grams, "weightGrams", product_type)?)
        }
        ProductType::Beer => OrderItem::beer(
            required(item.quantity, "quantity", product_type)?,
            required(item.origin, "origin", product_type)?,
        ),
        ProductType::Dairy => OrderItem::dairy(required(item.quantity, "quantity", product_type)?),
    }
}

fn required<T>(value: Option<T>, field: &str, product_type: ProductType) -> PricingResult<T> {
    value.ok_or_else(|| {
        PricingError::InvalidOrder(format!(
            "{} field required for product type {}",
            field, product_type
        ))
    })
}
