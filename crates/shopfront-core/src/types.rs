//! # Domain Types
//!
//! Entities used throughout Shopfront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Persisted                              Derived / in-memory             │
//! │  ┌─────────────────┐                    ┌─────────────────────────┐     │
//! │  │    Category     │◄──── join ────────►│    ProductWithName      │     │
//! │  │  id (i64)       │  category_id = id  │  Product fields         │     │
//! │  │  name           │                    │  + category_name        │     │
//! │  └─────────────────┘                    └─────────────────────────┘     │
//! │  ┌─────────────────┐                    ┌─────────────────────────┐     │
//! │  │    Product      │                    │       Comment           │     │
//! │  │  id (i64)       │                    │  id (UUID string)       │     │
//! │  │  name           │                    │  product_id, user_name  │     │
//! │  │  category_id    │                    │  text, timestamp (ms)   │     │
//! │  │  price (Money)  │                    └─────────────────────────┘     │
//! │  │  image_res      │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Surrogate Keys
//! Persisted ids are SQLite rowids. An id of [`UNASSIGNED_ID`] (0) asks
//! storage to assign the next one on insert.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::UNASSIGNED_ID;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Surrogate key; `0` before insert.
    pub id: i64,

    /// Display name ("Electronics", "Pastries", ...).
    pub name: String,
}

impl Category {
    /// Creates a category that storage will assign an id to.
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: UNASSIGNED_ID,
            name: name.into(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Surrogate key; `0` before insert.
    pub id: i64,

    pub name: String,

    /// Id of the owning [`Category`]. Not a hard foreign key.
    pub category_id: i64,

    /// Unit price, never negative.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,

    /// Symbolic handle of a bundled image, resolved by the presentation layer.
    pub image_res: String,
}

impl Product {
    /// Creates a product that storage will assign an id to.
    pub fn new(
        name: impl Into<String>,
        category_id: i64,
        price: Money,
        image_res: impl Into<String>,
    ) -> Self {
        Product {
            id: UNASSIGNED_ID,
            name: name.into(),
            category_id,
            price,
            image_res: image_res.into(),
        }
    }
}

// =============================================================================
// ProductWithName
// =============================================================================

/// Read-only projection: a product joined with its category's name.
///
/// Built per query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductWithName {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,
    pub image_res: String,
    pub category_name: String,
}

impl ProductWithName {
    /// Case-insensitive substring match on the product name.
    ///
    /// An empty query matches every product.
    ///
    /// ```rust
    /// # use shopfront_core::{Money, ProductWithName};
    /// let tv = ProductWithName {
    ///     id: 2,
    ///     name: "Samsung 55\" TV".into(),
    ///     category_id: 1,
    ///     price: Money::from_cents(59999),
    ///     image_res: "test_tv".into(),
    ///     category_name: "Electronics".into(),
    /// };
    /// assert!(tv.matches("SAMSUNG"));
    /// assert!(!tv.matches("fridge"));
    /// ```
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

// =============================================================================
// Comment
// =============================================================================

/// A user comment on a product detail view.
///
/// Held in memory only; lost when the owning state is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Random unique token (UUID v4).
    pub id: String,

    pub product_id: String,

    pub user_name: String,

    pub text: String,

    /// Capture time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> ProductWithName {
        ProductWithName {
            id: 5,
            name: "Brookside Milk".to_string(),
            category_id: 4,
            price: Money::from_cents(299),
            image_res: "test_milk".to_string(),
            category_name: "Drinks".to_string(),
        }
    }

    #[test]
    fn test_new_entities_are_unassigned() {
        assert_eq!(Category::new("Electronics").id, UNASSIGNED_ID);

        let product = Product::new("Samsung Fridge", 1, Money::from_cents(79999), "test_fridge");
        assert_eq!(product.id, UNASSIGNED_ID);
        assert_eq!(product.category_id, 1);
    }

    #[test]
    fn test_matches_ignores_case() {
        let milk = milk();
        assert!(milk.matches("milk"));
        assert!(milk.matches("MILK"));
        assert!(milk.matches("side m"));
        assert!(!milk.matches("zzz"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(milk().matches(""));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(milk()).unwrap();
        assert_eq!(json["categoryName"], "Drinks");
        assert_eq!(json["imageRes"], "test_milk");
        assert_eq!(json["price"], 299);
    }
}
