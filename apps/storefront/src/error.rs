//! # Storefront Error Types
//!
//! Errors produced by the state holders and the serializable error the UI
//! receives from commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  State holder (SessionState, AdminCatalog)                             │
//! │  Result<T, AppError>                                                   │
//! │         │                                                               │
//! │         ├── CoreError::Validation  ── empty name, price 0 ──┐          │
//! │         ├── CoreError::AdminRequired ── gate failed ────────┤          │
//! │         └── DbError::Unavailable ── storage write failed ───┤          │
//! │                                                             ▼          │
//! │  Command function                                     ApiError         │
//! │  Result<T, ApiError> ─────────────────────────────► { code, message }  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('create_product', { draft })                            │
//! │  } catch (e) {                                                          │
//! │    // e.code = "VALIDATION_ERROR"                                       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use autoparts_core::{CoreError, ValidationError};
use autoparts_db::DbError;

// =============================================================================
// AppError
// =============================================================================

/// Failure of a state operation: a domain rule or a storage write.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

impl AppError {
    /// True if this is a rejected form or input value.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Core(CoreError::Validation(_)))
    }
}

/// Result type for state operations.
pub type AppResult<T> = Result<T, AppError>;

/// Failure while opening the storefront.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::state::ConfigError),

    #[error("Storage failed to open: {0}")]
    Storage(#[from] DbError),
}

// =============================================================================
// ApiError
// =============================================================================

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Durable storage read or write failed
    StorageError,

    /// Nobody is signed in
    Unauthorized,

    /// Signed in, but not as an administrator
    Forbidden,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts storage errors to API errors.
///
/// The underlying message is logged; the UI gets a generic one.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");
        match err {
            DbError::Serialization(_) => {
                ApiError::new(ErrorCode::StorageError, "Stored data is corrupted")
            }
            DbError::ConnectionFailed(_) | DbError::PoolExhausted | DbError::Unavailable(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage is unavailable")
            }
            DbError::MigrationFailed(_) | DbError::QueryFailed(_) | DbError::Internal(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::AuthenticationRequired => {
                ApiError::new(ErrorCode::Unauthorized, "Sign in required")
            }
            CoreError::AdminRequired => {
                ApiError::new(ErrorCode::Forbidden, "Administrator access required")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(e) => e.into(),
            AppError::Storage(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
