//! # Error Types
//!
//! Application errors and the error type handed to the frontend.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  create_product(input)                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  InventoryState method → AppResult<T>                            │  │
//! │  │         │                                                        │  │
//! │  │         ├── ValidationError ─┐                                   │  │
//! │  │         ├── CoreError ───────┼──► AppError ──► ApiError ────────►│  │
//! │  │         └── StoreError ──────┘                                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │  { "code": "NOT_FOUND", "message": "Product not found: 42" }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

use stockroom_core::{CoreError, ValidationError};
use stockroom_store::StoreError;

// =============================================================================
// App Error
// =============================================================================

/// Errors raised inside the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Business rule or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Store read or write failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed.
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A command invoked during startup failed.
    #[error("Command failed: {0}")]
    Command(#[from] ApiError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands.
///
/// ## Serialization
/// This is what the frontend receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "category 'Food' already exists"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity or category not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Store read or write failed
    StorageError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::SupplierNotFound(id) => ApiError::not_found("Supplier", &id),
            CoreError::CategoryNotFound(label) => ApiError::not_found("Category", &label),
            CoreError::AlreadyExists { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
///
/// The underlying cause is logged; the frontend gets a generic message.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Store connection failed")
            }
            StoreError::PoolExhausted => ApiError::new(ErrorCode::StorageError, "Store is busy"),
            other => {
                tracing::error!("Store operation failed: {}", other);
                ApiError::new(ErrorCode::StorageError, "Store operation failed")
            }
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(e) => e.into(),
            AppError::Store(e) => e.into(),
            AppError::Command(e) => e,
            other => {
                tracing::error!("Internal error: {}", other);
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
