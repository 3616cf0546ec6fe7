//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (catalog app) ← code + message for state consumers           │
//! │                                                                         │
//! │  No retries happen at this layer; every failure propagates.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_core::CoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Storage cannot be reached or is not usable.
    ///
    /// ## When This Occurs
    /// - Database file can't be opened or created
    /// - Pool closed or timed out
    /// - Schema not initialized ("no such table")
    /// - File is corrupted or not a database
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Query execution failed against a healthy store.
    ///
    /// ## When This Occurs
    /// - CHECK constraint violation (negative price)
    /// - Row decoding failure
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Unique constraint violation (explicit id already taken).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// The file was written by a newer schema than this build knows.
    #[error("Database schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: i64, supported: i64 },

    /// Seed data could not be matched to stored categories.
    #[error("Category resolution failed: {0}")]
    Category(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for failures of the store itself rather than of one query.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::StorageUnavailable(_))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message (constraint / missing table / corrupt)
/// PoolTimedOut / PoolClosed   → DbError::StorageUnavailable
/// Io / Tls / Configuration    → DbError::StorageUnavailable
/// RowNotFound / decode errors → DbError::QueryFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "no such table: <table>"
                // "file is not a database" / "database disk image is malformed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::duplicate(field, "unknown")
                } else if msg.contains("no such table")
                    || msg.contains("file is not a database")
                    || msg.contains("malformed")
                {
                    DbError::StorageUnavailable(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => {
                DbError::StorageUnavailable("Timed out acquiring a connection".to_string())
            }

            sqlx::Error::PoolClosed => DbError::StorageUnavailable("Pool is closed".to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::StorageUnavailable(err.to_string())
            }

            sqlx::Error::RowNotFound
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => DbError::QueryFailed(err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_mean_storage_unavailable() {
        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(err.is_unavailable());

        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_row_not_found_is_a_query_failure() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[test]
    fn test_schema_too_new_message() {
        let err = DbError::SchemaTooNew {
            found: 3,
            supported: 2,
        };
        assert_eq!(
            err.to_string(),
            "Database schema version 3 is newer than supported version 2"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let err: DbError = CoreError::UnknownCategory("Toys".to_string()).into();
        assert!(matches!(err, DbError::Category(_)));
    }
}
