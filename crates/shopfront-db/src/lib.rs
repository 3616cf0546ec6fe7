//! # shopfront-db: Database Layer for Shopfront
//!
//! This crate provides database access for Shopfront.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  HomeState::search_products("milk")                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shopfront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │ (pool.rs)     │    │ (category.rs,  │   │  (embedded)  │   │   │
//! │  │   │ Provider      │◄───│  product.rs)   │   │ 001_products │   │   │
//! │  │   │ (provider.rs) │    │                │   │ 002_category │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/shopfront.db  (PRAGMA user_version = 2)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`provider`] - Memoized shared handle
//! - [`migrations`] - Embedded migrations and schema version policy
//! - [`error`] - Database error types
//! - [`repository`] - Category and product repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_db::{DatabaseProvider, DbConfig};
//!
//! let provider = DatabaseProvider::new(DbConfig::new("path/to/shopfront.db"));
//! let db = provider.get().await?;
//!
//! let products = db.products().get_all_with_category_name().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod provider;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::{SchemaPolicy, SCHEMA_VERSION};
pub use pool::{Database, DbConfig};
pub use provider::DatabaseProvider;

pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
