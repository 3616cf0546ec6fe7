//! # shopfront-core: Entities and Pure Logic for Shopfront
//!
//! This crate defines the shapes everything else passes around: the two
//! persisted entities, the joined read projection, the in-memory comment,
//! and the literal seed catalog. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Presentation (renders published snapshots)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ watch::Receiver                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          apps/catalog (HomeState, ProductDetailState)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                   │   │
//! │  │   │   types   │  │   money   │  │  catalog  │                   │   │
//! │  │   │  Product  │  │   Money   │  │ seed rows │                   │   │
//! │  │   │ Category  │  │  (cents)  │  │ CategoryId│                   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopfront-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Category, Product, ProductWithName, Comment
//! - [`money`] - Integer-cents price type
//! - [`catalog`] - Default categories/products and key-to-id resolution
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::catalog::{CategoryKey, DEFAULT_PRODUCTS};
//!
//! let bread = &DEFAULT_PRODUCTS[0];
//! assert_eq!(bread.name, "Festive Bread");
//! assert_eq!(bread.category, CategoryKey::Pastries);
//! assert_eq!(bread.price.cents(), 599);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CategoryIds, CategoryKey, DefaultProduct, DEFAULT_PRODUCTS};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id value meaning "let storage assign one" on insert.
pub const UNASSIGNED_ID: i64 = 0;
