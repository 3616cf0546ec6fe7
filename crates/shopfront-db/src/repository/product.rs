//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Joined Read
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products p                         categories c                        │
//! │  ┌────┬────────────────┬────┐       ┌────┬─────────────┐                │
//! │  │ 1  │ Festive Bread  │ 2  │──────►│ 2  │ Pastries    │                │
//! │  │ 2  │ Samsung 55" TV │ 1  │──────►│ 1  │ Electronics │                │
//! │  │ 7  │ Orphan         │ 99 │──╳    └────┴─────────────┘                │
//! │  └────┴────────────────┴────┘                                           │
//! │                                                                         │
//! │  INNER JOIN on p.category_id = c.id, ordered by p.id                   │
//! │  → ProductWithName rows; products without a category are skipped       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_core::{CategoryIds, Product, ProductWithName, DEFAULT_PRODUCTS};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::category;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Counts stored products. Zero means "first run".
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts one product and returns its id.
    ///
    /// An `id` of 0 lets SQLite assign the next one. `category_id` is not
    /// checked against the categories table.
    pub async fn insert(&self, product: &Product) -> DbResult<i64> {
        insert_with(&self.pool, product).await
    }

    /// Reads every product joined with its category name.
    pub async fn get_all_with_category_name(&self) -> DbResult<Vec<ProductWithName>> {
        let products = sqlx::query_as::<_, ProductWithName>(
            r#"
            SELECT
                p.id,
                p.name,
                p.category_id,
                p.price_cents,
                p.image_res,
                c.name AS category_name
            FROM products p
            INNER JOIN categories c ON p.category_id = c.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Loaded products with category names");
        Ok(products)
    }

    /// Inserts the six default products in one transaction.
    ///
    /// Category ids are looked up by name inside the same transaction, so the
    /// default categories must already be stored. Any failure rolls back every
    /// row of the batch. There is no count guard here.
    pub async fn insert_defaults(&self) -> DbResult<Vec<i64>> {
        info!("Inserting default products");

        let mut tx = self.pool.begin().await?;

        let stored = category::list_with(&mut *tx).await?;
        let category_ids = CategoryIds::from_categories(&stored);

        let mut ids = Vec::with_capacity(DEFAULT_PRODUCTS.len());
        for seed in DEFAULT_PRODUCTS.iter() {
            let category_id = category_ids.id_of(seed.category)?;
            ids.push(insert_with(&mut *tx, &seed.to_product(category_id)).await?);
        }
        tx.commit().await?;

        info!(count = ids.len(), "Default products inserted");
        Ok(ids)
    }
}

pub(crate) async fn insert_with<'e, E>(executor: E, product: &Product) -> DbResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    debug!(name = %product.name, category_id = product.category_id, "Inserting product");

    let result = sqlx::query(
        r#"
        INSERT INTO products (id, name, category_id, price_cents, image_res)
        VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.category_id)
    .bind(product.price)
    .bind(&product.image_res)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}
