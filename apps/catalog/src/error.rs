//! # App Error Type
//!
//! Unified error type returned by the state containers and the CLI.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  HomeState::load_all_products()                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Database Error? ─── DbError::StorageUnavailable ──┐                    │
//! │         │                                          ▼                    │
//! │  Seed batch failed? ─── AppError::seed(stage) ── AppError ──► caller    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──► snapshot replaced                                          │
//! │                                                                         │
//! │  On failure the published snapshot keeps its last good value.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfront_db::DbError;
use thiserror::Error;

/// Error returned from state container operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "STORAGE_UNAVAILABLE",
///   "message": "Storage unavailable: Pool is closed"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Storage could not be opened or reached
    StorageUnavailable,

    /// A query failed against a reachable store
    QueryFailure,

    /// A default-data batch failed and was rolled back
    SeedFailure,

    /// Configuration could not be loaded
    Config,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Wraps a failed seed batch, naming the table being seeded.
    pub fn seed(stage: &str, err: DbError) -> Self {
        AppError::new(
            ErrorCode::SeedFailure,
            format!("Seeding {} failed: {}", stage, err),
        )
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Config, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        let code = match &err {
            DbError::StorageUnavailable(_)
            | DbError::MigrationFailed(_)
            | DbError::SchemaTooNew { .. } => ErrorCode::StorageUnavailable,
            DbError::QueryFailed(_) | DbError::UniqueViolation { .. } => ErrorCode::QueryFailure,
            DbError::Category(_) => ErrorCode::SeedFailure,
            DbError::Internal(_) => ErrorCode::Internal,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::config(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::internal(format!("Background task failed: {}", err))
    }
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_unavailable() {
        let err: AppError = DbError::StorageUnavailable("Pool is closed".into()).into();
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert_eq!(err.to_string(), "Storage unavailable: Pool is closed");
    }

    #[test]
    fn test_seed_error_names_stage() {
        let err = AppError::seed("categories", DbError::QueryFailed("boom".into()));
        assert_eq!(err.code, ErrorCode::SeedFailure);
        assert_eq!(err.message, "Seeding categories failed: Query failed: boom");
    }

    #[test]
    fn test_serialized_shape() {
        let err = AppError::new(ErrorCode::QueryFailure, "bad");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "QUERY_FAILURE");
        assert_eq!(json["message"], "bad");
    }
}
