//! # CLI Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Output
//! Failures are printed to stderr as JSON with a machine-readable `code`
//! and a human-readable `message`, and the process exits non-zero:
//! ```json
//! {
//!   "code": "INVALID_ORDER",
//!   "message": "Invalid order: origin field required for product type BEER"
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

use grocery_core::{PricingError, ValidationError};

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed order request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed pricing config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid pricing config: {0}")]
    Config(#[from] ValidationError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Error codes printed alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// File could not be read
    IoError,

    /// Request or config could not be parsed
    ParseError,

    /// Config parsed but failed validation
    ConfigError,

    /// Order violates a business rule
    InvalidOrder,

    /// Engine wiring or invariant defect
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::IoError => 74,
            ErrorCode::ParseError => 65,
            ErrorCode::ConfigError => 78,
            ErrorCode::InvalidOrder => 2,
            ErrorCode::Internal => 70,
        }
    }
}

impl CliError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Io { .. } => ErrorCode::IoError,
            CliError::Json(_) | CliError::Toml(_) => ErrorCode::ParseError,
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Pricing(err) if err.is_business_error() => ErrorCode::InvalidOrder,
            CliError::Pricing(_) => ErrorCode::Internal,
        }
    }

    /// The JSON body printed to stderr.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_core::ProductType;

    #[test]
    fn test_codes() {
        let invalid: CliError = PricingError::InvalidOrder("bad".into()).into();
        assert_eq!(invalid.code(), ErrorCode::InvalidOrder);

        let missing: CliError = PricingError::MissingStrategy(ProductType::Dairy).into();
        assert_eq!(missing.code(), ErrorCode::Internal);

        let config: CliError = ValidationError::Required {
            field: "combo.product_types".into(),
        }
        .into();
        assert_eq!(config.code(), ErrorCode::ConfigError);
        assert_eq!(config.code().exit_code(), 78);
        assert_eq!(invalid.code().exit_code(), 2);
    }

    #[test]
    fn test_report_serialization() {
        let err: CliError = PricingError::InvalidOrder("Bread older than 6 days cannot be ordered".into()).into();
        let json = serde_json::to_value(err.report()).unwrap();
        assert_eq!(json["code"], "INVALID_ORDER");
        assert_eq!(
            json["message"],
            "Invalid order: Bread older than 6 days cannot be ordered"
        );
    }
}
