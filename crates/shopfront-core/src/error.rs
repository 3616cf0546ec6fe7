//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  └── CoreError        - Category key resolution failures               │
//! │                                                                         │
//! │  shopfront-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures (wraps CoreError)             │
//! │                                                                         │
//! │  catalog app errors                                                    │
//! │  └── AppError         - What state consumers see (code + message)      │
//! │                                                                         │
//! │  Flow: CoreError → DbError → AppError → Presentation                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::catalog::CategoryKey;

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A category name does not correspond to any [`CategoryKey`].
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// A seeded category is not present in storage.
    ///
    /// ## When This Occurs
    /// - Products are seeded before categories
    /// - The categories table was partially written by hand
    #[error("Category {0} has not been seeded")]
    MissingCategory(CategoryKey),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownCategory("Toys".to_string());
        assert_eq!(err.to_string(), "Unknown category: 'Toys'");

        let err = CoreError::MissingCategory(CategoryKey::Drinks);
        assert_eq!(err.to_string(), "Category Drinks has not been seeded");
    }
}
