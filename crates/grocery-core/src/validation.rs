//! # Validation Module
//!
//! Input validation utilities for order items and pricing configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request mapping (pricing-cli)                                │
//! │  ├── Type-required fields present (quantity, daysOld, origin...)       │
//! │  └── Fails with PricingError::InvalidOrder                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Item constructors (types.rs)                                 │
//! │  ├── THIS MODULE: quantity > 0, weight > 0                             │
//! │  └── Bread age ≤ MAX_BREAD_AGE_DAYS (business rule)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine invariants (strategy.rs, service.rs)                  │
//! │  └── Non-negative discounts, reconciled totals                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocery_core::validation::{validate_quantity, validate_rate};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_quantity("quantity", 5).is_ok());
//! assert!(validate_quantity("quantity", 0).is_err());
//! assert!(validate_rate("discount_rate", Decimal::new(5, 2)).is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a count-like value (units, bottles, grams, pack sizes).
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(field: &str, qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be strictly positive (a zero price is a configuration mistake)
///
/// ## Example
/// ```rust
/// use grocery_core::money::Money;
/// use grocery_core::validation::validate_price;
///
/// assert!(validate_price("unit_price", Money::from_cents(100)).is_ok());
/// assert!(validate_price("unit_price", Money::from_cents(0)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a fixed discount amount; zero is allowed.
pub fn validate_discount_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "unbounded".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage expressed as a fraction.
///
/// ## Rules
/// - Must be between 0 and 1 inclusive (0% to 100%)
pub fn validate_rate(field: &str, rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

/// Validates that `value` lies within `[min, max]`.
pub fn validate_range(field: &str, value: u32, min: u32, max: u32) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
