//! # Money Module
//!
//! Provides the `Money` type and the canonical normalization step.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents are not enough either:                                  │
//! │    vegetables cost €1.00 per 100g = €0.0100 per gram                   │
//! │    intermediate prices need at least 4 fractional digits               │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic during the calculation                     │
//! │    normalize() to 2 places, half-up, at the receipt boundary           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocery_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(186);
//! assert_eq!(price.to_string(), "€1.86");
//!
//! let raw = Money::new(Decimal::new(18650, 4)); // 1.8650
//! assert_eq!(raw.normalize(), Money::from_cents(187));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Number of fractional digits on every receipt amount.
pub const CURRENCY_SCALE: u32 = 2;

/// Number of fractional digits kept for derived unit prices (price per gram).
pub const UNIT_PRICE_SCALE: u32 = 4;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in euros.
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact arithmetic; negative values only ever appear
///   transiently and are rejected before they reach a receipt
/// - **Single field tuple struct**: zero-cost wrapper around `Decimal`
/// - **Serializes as a string**: `"1.86"`, never a lossy JSON float
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PricingConfig.unit_price ──► PricingContext.original_price            │
/// │                                        │                                │
/// │                         DiscountRule.calculate_discount                 │
/// │                                        │                                │
/// │                                        ▼                                │
/// │            normalize() ──► ReceiptLine ──► Receipt totals              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Zero euros.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a raw decimal amount without rounding it.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    ///
    /// let price = Money::from_cents(360);
    /// assert_eq!(price.to_string(), "€3.60");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CURRENCY_SCALE))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to exactly two fractional digits using half-up rounding.
    ///
    /// ## Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF-UP (midpoint away from zero)                                  │
    /// │                                                                     │
    /// │    1.8650 → 1.87                                                   │
    /// │    0.005  → 0.01                                                   │
    /// │    0.004  → 0.00                                                   │
    /// │    2      → 2.00   (scale is always padded to 2)                   │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn normalize(self) -> Money {
        Money(round_to_scale(self.0, CURRENCY_SCALE))
    }

    /// Multiplies by a whole quantity (units, bottles, grams). No rounding.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(60);
    /// assert_eq!(unit_price.multiply_quantity(6), Money::from_cents(360));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }

    /// Returns `rate` of this amount (`0.07` = 7%). No rounding.
    #[inline]
    pub fn percentage(&self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }

    /// Divides by a whole divisor and rounds half-up to `scale` digits.
    ///
    /// Used to derive unit prices such as price-per-gram from price-per-100g.
    pub fn divide_rounded(&self, divisor: u32, scale: u32) -> Money {
        if divisor == 0 {
            return Money::ZERO;
        }
        Money(round_to_scale(self.0 / Decimal::from(divisor), scale))
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }
}

/// Normalizes an optional amount; an absent amount normalizes to zero.
///
/// ## Example
/// ```rust
/// use grocery_core::money::{normalize, Money};
///
/// assert_eq!(normalize(None), Money::from_cents(0));
/// assert_eq!(normalize(Some(Money::from_cents(5))), Money::from_cents(5));
/// ```
pub fn normalize(amount: Option<Money>) -> Money {
    amount.map(Money::normalize).unwrap_or(Money::ZERO.normalize())
}

/// Formats a fractional rate as a whole percentage, e.g. `0.07` → `7%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn round_to_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never increases the scale, so 2 stays "2" without this
    rounded.rescale(scale);
    rounded
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with a euro sign, e.g. `€3.60`.
///
/// ## Note
/// This is for logs and receipt descriptions; front ends format for their
/// own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.normalize().0;
        if normalized.is_sign_negative() && !normalized.is_zero() {
            write!(f, "-€{}", normalized.abs())
        } else {
            write!(f, "€{}", normalized.abs())
        }
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
