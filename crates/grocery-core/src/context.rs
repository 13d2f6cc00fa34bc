//! # Pricing Contexts
//!
//! Read-only inputs handed to discount rules. One context type per product
//! type, plus the order-level context used by combo rules.
//!
//! Contexts are built fresh for every group inside a single
//! `calculate_price` call and dropped afterwards.

use crate::money::{Money, UNIT_PRICE_SCALE};
use crate::types::{BeerOrigin, Order};

/// Capability shared by every per-product context: the pre-discount price
/// of the group, used to cap the summed discount.
pub trait PricingContext {
    fn original_price(&self) -> Money;
}

// =============================================================================
// Bread
// =============================================================================

/// All bread units of one age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreadPricingContext {
    pub age: u32,
    pub total_quantity: u32,
    pub unit_price: Money,
    pub original_price: Money,
}

impl BreadPricingContext {
    pub fn new(age: u32, total_quantity: u32, unit_price: Money) -> Self {
        BreadPricingContext {
            age,
            total_quantity,
            unit_price,
            original_price: unit_price.multiply_quantity(total_quantity),
        }
    }
}

impl PricingContext for BreadPricingContext {
    fn original_price(&self) -> Money {
        self.original_price
    }
}

// =============================================================================
// Vegetable
// =============================================================================

/// All vegetables of an order, merged by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VegetablePricingContext {
    pub total_weight_grams: u32,
    pub price_per_gram: Money,
    pub original_price: Money,
}

impl VegetablePricingContext {
    /// Derives the per-gram price at four decimal places before multiplying,
    /// so rounding happens once more at the receipt boundary only.
    pub fn new(total_weight_grams: u32, price_per_100g: Money) -> Self {
        let price_per_gram = price_per_100g.divide_rounded(100, UNIT_PRICE_SCALE);
        VegetablePricingContext {
            total_weight_grams,
            price_per_gram,
            original_price: price_per_gram.multiply_quantity(total_weight_grams),
        }
    }
}

impl PricingContext for VegetablePricingContext {
    fn original_price(&self) -> Money {
        self.original_price
    }
}

// =============================================================================
// Beer
// =============================================================================

/// All bottles of one origin, split into full packs and loose singles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeerPricingContext {
    pub origin: BeerOrigin,
    pub total_bottles: u32,
    pub packs: u32,
    pub singles: u32,
    pub unit_price: Money,
    pub original_price: Money,
}

impl BeerPricingContext {
    /// `pack_size` is at least 1 after configuration validation; a zero
    /// value is treated as "no packs".
    pub fn new(origin: BeerOrigin, total_bottles: u32, pack_size: u32, unit_price: Money) -> Self {
        let (packs, singles) = match pack_size {
            0 => (0, total_bottles),
            size => (total_bottles / size, total_bottles % size),
        };
        BeerPricingContext {
            origin,
            total_bottles,
            packs,
            singles,
            unit_price,
            original_price: unit_price.multiply_quantity(total_bottles),
        }
    }
}

impl PricingContext for BeerPricingContext {
    fn original_price(&self) -> Money {
        self.original_price
    }
}

// =============================================================================
// Dairy
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DairyPricingContext {
    pub total_quantity: u32,
    pub original_price: Money,
}

impl DairyPricingContext {
    pub fn new(total_quantity: u32, unit_price: Money) -> Self {
        DairyPricingContext {
            total_quantity,
            original_price: unit_price.multiply_quantity(total_quantity),
        }
    }
}

impl PricingContext for DairyPricingContext {
    fn original_price(&self) -> Money {
        self.original_price
    }
}

// =============================================================================
// Order Level
// =============================================================================

/// Input for order-level (combo) rules.
///
/// `current_total` is the running total after product-level discounts and
/// every order-level rule applied so far. The service rebuilds this context
/// after each applied rule.
#[derive(Debug, Clone, Copy)]
pub struct OrderPricingContext<'a> {
    pub order: &'a Order,
    pub subtotal: Money,
    pub current_total: Money,
}

impl<'a> OrderPricingContext<'a> {
    pub fn new(order: &'a Order, subtotal: Money, current_total: Money) -> Self {
        OrderPricingContext {
            order,
            subtotal,
            current_total,
        }
    }

    /// Returns a copy with an updated running total.
    pub fn with_current_total(&self, current_total: Money) -> Self {
        OrderPricingContext {
            current_total,
            ..*self
        }
    }
}
