//! # Seed Catalog
//!
//! The literal rows inserted on first run, and the mapping from named
//! category keys to the ids storage actually assigned.
//!
//! ## Named Keys Instead of Positional Ids
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Default products name their category by CategoryKey, never by id.     │
//! │                                                                         │
//! │  categories table            CategoryIds              DEFAULT_PRODUCTS  │
//! │  ┌────┬─────────────┐       ┌─────────────────┐      ┌───────────────┐ │
//! │  │ 1  │ Electronics │ ────► │ Electronics → 1 │ ◄─── │ Samsung TV    │ │
//! │  │ 2  │ Pastries    │ ────► │ Pastries    → 2 │ ◄─── │ Festive Bread │ │
//! │  │ .. │ ...         │       │ ...             │      │ ...           │ │
//! │  └────┴─────────────┘       └─────────────────┘      └───────────────┘ │
//! │                                                                         │
//! │  On a fresh store the ids come out 1..6 in declaration order, but      │
//! │  products never depend on that.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product};

// =============================================================================
// Category Keys
// =============================================================================

/// The six seeded categories, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKey {
    Electronics,
    Pastries,
    Detergents,
    Drinks,
    Beauty,
    Organic,
}

impl CategoryKey {
    /// Every key, in the order categories are seeded.
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Electronics,
        CategoryKey::Pastries,
        CategoryKey::Detergents,
        CategoryKey::Drinks,
        CategoryKey::Beauty,
        CategoryKey::Organic,
    ];

    /// The stored category name.
    pub const fn name(&self) -> &'static str {
        match self {
            CategoryKey::Electronics => "Electronics",
            CategoryKey::Pastries => "Pastries",
            CategoryKey::Detergents => "Detergents",
            CategoryKey::Drinks => "Drinks",
            CategoryKey::Beauty => "Beauty",
            CategoryKey::Organic => "Organic",
        }
    }

    /// Builds the unsaved seed row for this key.
    pub fn to_category(self) -> Category {
        Category::new(self.name())
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// Default Products
// =============================================================================

/// A seed product row, referencing its category by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultProduct {
    pub name: &'static str,
    pub category: CategoryKey,
    pub price: Money,
    pub image_res: &'static str,
}

impl DefaultProduct {
    /// Builds the unsaved product row once the category id is known.
    pub fn to_product(&self, category_id: i64) -> Product {
        Product::new(self.name, category_id, self.price, self.image_res)
    }
}

/// Products inserted on first run, in insertion order.
pub const DEFAULT_PRODUCTS: [DefaultProduct; 6] = [
    DefaultProduct {
        name: "Festive Bread",
        category: CategoryKey::Pastries,
        price: Money::from_cents(599),
        image_res: "test_bread",
    },
    DefaultProduct {
        name: "Samsung 55\" TV",
        category: CategoryKey::Electronics,
        price: Money::from_cents(59999),
        image_res: "test_tv",
    },
    DefaultProduct {
        name: "Hisense Washing Machine",
        category: CategoryKey::Detergents,
        price: Money::from_cents(39999),
        image_res: "test_washm",
    },
    DefaultProduct {
        name: "Samsung Fridge",
        category: CategoryKey::Electronics,
        price: Money::from_cents(79999),
        image_res: "test_fridge",
    },
    DefaultProduct {
        name: "Brookside Milk",
        category: CategoryKey::Drinks,
        price: Money::from_cents(299),
        image_res: "test_milk",
    },
    DefaultProduct {
        name: "Ramtons Blender",
        category: CategoryKey::Electronics,
        price: Money::from_cents(4999),
        image_res: "test_blender",
    },
];

// =============================================================================
// Category Id Resolution
// =============================================================================

/// Maps category keys to the ids found in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIds {
    ids: HashMap<CategoryKey, i64>,
}

impl CategoryIds {
    /// Builds the mapping from stored category rows.
    ///
    /// Rows whose name is not a known key are ignored. When a name appears
    /// more than once the first row wins, so pass rows ordered by id.
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut ids = HashMap::new();
        for category in categories {
            if let Ok(key) = category.name.parse::<CategoryKey>() {
                ids.entry(key).or_insert(category.id);
            }
        }
        CategoryIds { ids }
    }

    /// Returns the stored id for `key`.
    pub fn id_of(&self, key: CategoryKey) -> CoreResult<i64> {
        self.ids
            .get(&key)
            .copied()
            .ok_or(CoreError::MissingCategory(key))
    }

    /// Number of keys resolved.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(rows: &[(i64, &str)]) -> Vec<Category> {
        rows.iter()
            .map(|(id, name)| Category {
                id: *id,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_key_order_and_names() {
        let names: Vec<_> = CategoryKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            ["Electronics", "Pastries", "Detergents", "Drinks", "Beauty", "Organic"]
        );
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("Drinks".parse::<CategoryKey>().unwrap(), CategoryKey::Drinks);
        assert_eq!(" organic ".parse::<CategoryKey>().unwrap(), CategoryKey::Organic);
        assert_eq!(
            "Toys".parse::<CategoryKey>().unwrap_err(),
            CoreError::UnknownCategory("Toys".to_string())
        );
    }

    #[test]
    fn test_default_products_follow_seed_contract() {
        let expected = [
            ("Festive Bread", CategoryKey::Pastries, 599),
            ("Samsung 55\" TV", CategoryKey::Electronics, 59999),
            ("Hisense Washing Machine", CategoryKey::Detergents, 39999),
            ("Samsung Fridge", CategoryKey::Electronics, 79999),
            ("Brookside Milk", CategoryKey::Drinks, 299),
            ("Ramtons Blender", CategoryKey::Electronics, 4999),
        ];
        for (product, (name, key, cents)) in DEFAULT_PRODUCTS.iter().zip(expected) {
            assert_eq!(product.name, name);
            assert_eq!(product.category, key);
            assert_eq!(product.price.cents(), cents);
            assert!(!product.price.is_negative());
        }
    }

    #[test]
    fn test_fresh_store_resolves_to_one_through_six() {
        let rows: Vec<Category> = CategoryKey::ALL
            .iter()
            .enumerate()
            .map(|(i, key)| Category {
                id: i as i64 + 1,
                name: key.name().to_string(),
            })
            .collect();
        let ids = CategoryIds::from_categories(&rows);

        assert_eq!(ids.len(), 6);
        assert_eq!(ids.id_of(CategoryKey::Electronics).unwrap(), 1);
        assert_eq!(ids.id_of(CategoryKey::Pastries).unwrap(), 2);
        assert_eq!(ids.id_of(CategoryKey::Organic).unwrap(), 6);
    }

    #[test]
    fn test_resolution_does_not_depend_on_insert_order() {
        let ids = CategoryIds::from_categories(&stored(&[(10, "Drinks"), (11, "Electronics")]));
        assert_eq!(ids.id_of(CategoryKey::Drinks).unwrap(), 10);
        assert_eq!(ids.id_of(CategoryKey::Electronics).unwrap(), 11);
    }

    #[test]
    fn test_first_duplicate_wins_and_unknown_rows_are_skipped() {
        let ids = CategoryIds::from_categories(&stored(&[
            (1, "Electronics"),
            (2, "Garden"),
            (7, "Electronics"),
        ]));
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.id_of(CategoryKey::Electronics).unwrap(), 1);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let ids = CategoryIds::from_categories(&[]);
        assert!(ids.is_empty());
        assert_eq!(
            ids.id_of(CategoryKey::Beauty).unwrap_err(),
            CoreError::MissingCategory(CategoryKey::Beauty)
        );
    }

    #[test]
    fn test_to_product_uses_resolved_id() {
        let product = DEFAULT_PRODUCTS[4].to_product(42);
        assert_eq!(product.name, "Brookside Milk");
        assert_eq!(product.category_id, 42);
        assert_eq!(product.image_res, "test_milk");
    }
}
