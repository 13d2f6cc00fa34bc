//! # Error Types
//!
//! Domain-specific error types for grocery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocery-core errors (this file)                                       │
//! │  ├── PricingError     - What crosses the engine boundary               │
//! │  │   ├── InvalidOrder        business rule violation                   │
//! │  │   ├── MissingStrategy     registration defect (whole call aborts)   │
//! │  │   ├── DuplicateStrategy   registration defect (at construction)     │
//! │  │   └── InvariantViolation  internal defect, never clamped            │
//! │  └── ValidationError  - Malformed item or configuration values         │
//! │                                                                         │
//! │  pricing-cli errors (separate crate)                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → CliError → stderr + exit code  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductType;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors surfaced by the pricing engine.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The order is well-formed but violates a business rule.
    ///
    /// ## When This Occurs
    /// - Bread older than the maximum sellable age
    /// - A type-required field was missing upstream
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// No strategy is registered for a product type present in the order.
    ///
    /// This is a wiring bug, not a user input problem; the whole receipt
    /// computation aborts.
    #[error("No pricing strategy registered for product type: {0}")]
    MissingStrategy(ProductType),

    /// Two strategies were registered for the same product type.
    #[error("More than one pricing strategy registered for product type: {0}")]
    DuplicateStrategy(ProductType),

    /// An internal invariant was broken (negative discount, negative final
    /// price, totals that do not reconcile).
    #[error("Pricing invariant violated: {0}")]
    InvariantViolation(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PricingError {
    /// Returns true for errors caused by the order contents rather than by
    /// the engine or its wiring.
    pub fn is_business_error(&self) -> bool {
        matches!(self, PricingError::InvalidOrder(_) | PricingError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when an item or configuration value is malformed. Used before any
/// pricing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Invalid combination of values.
    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::MissingStrategy(ProductType::Vegetable);
        assert_eq!(
            err.to_string(),
            "No pricing strategy registered for product type: VEGETABLE"
        );

        let err = PricingError::InvalidOrder("Bread older than 6 days cannot be ordered".into());
        assert_eq!(
            err.to_string(),
            "Invalid order: Bread older than 6 days cannot be ordered"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "discount_rate".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        };
        assert_eq!(err.to_string(), "discount_rate must be between 0 and 1");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::Required {
            field: "origin".to_string(),
        };
        let pricing_err: PricingError = validation_err.into();
        assert!(matches!(pricing_err, PricingError::Validation(_)));
        assert!(pricing_err.is_business_error());
        assert!(!PricingError::InvariantViolation("x".into()).is_business_error());
    }
}
