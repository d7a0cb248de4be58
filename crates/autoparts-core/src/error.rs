//! # Error Types
//!
//! Domain-specific error types for autoparts-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  autoparts-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors, access gates                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  autoparts-db errors (separate crate)                                  │
//! │  └── DbError          - Durable storage failures                       │
//! │                                                                         │
//! │  Storefront app errors                                                 │
//! │  └── ApiError         - What the browser UI sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// Most lookups treat a missing product as a no-op; this is raised only
    /// where the caller needs the record (e.g. adding to the cart by id).
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// A view that needs a signed-in user was opened anonymously.
    ///
    /// ## User Workflow
    /// ```text
    /// Open /profile
    ///      │
    ///      ▼
    /// Session::require_user() ── no user ──► AuthenticationRequired
    ///      │                                        │
    ///      ▼                                        ▼
    /// Profile view                          navigate(/login)
    /// ```
    #[error("Sign in required")]
    AuthenticationRequired,

    /// A view that needs the admin role was opened by a regular user.
    #[error("Administrator access required")]
    AdminRequired,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    ///
    /// The admin form reports every unfilled field (name, brand, price)
    /// through this one variant.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::ProductNotFound(7).to_string(), "Product not found: 7");
        assert_eq!(
            CoreError::AdminRequired.to_string(),
            "Administrator access required"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "brand".to_string(),
        };
        assert_eq!(err.to_string(), "brand is required");

        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
