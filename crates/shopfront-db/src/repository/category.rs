//! # Category Repository
//!
//! Database operations for categories.

use shopfront_core::{Category, CategoryKey};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Counts stored categories. Zero means "first run".
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts one category and returns its id.
    ///
    /// An `id` of 0 lets SQLite assign the next one.
    pub async fn insert(&self, category: &Category) -> DbResult<i64> {
        insert_with(&self.pool, category).await
    }

    /// Lists every category, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        list_with(&self.pool).await
    }

    /// Inserts the six default categories in one transaction.
    ///
    /// Either all six rows land or none do. There is no count guard here:
    /// calling this twice inserts twelve rows.
    ///
    /// ## Returns
    /// The assigned ids, in [`CategoryKey::ALL`] order.
    pub async fn insert_defaults(&self) -> DbResult<Vec<i64>> {
        info!("Inserting default categories");

        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(CategoryKey::ALL.len());
        for key in CategoryKey::ALL {
            ids.push(insert_with(&mut *tx, &key.to_category()).await?);
        }
        tx.commit().await?;

        info!(count = ids.len(), "Default categories inserted");
        Ok(ids)
    }
}

pub(crate) async fn insert_with<'e, E>(executor: E, category: &Category) -> DbResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    debug!(name = %category.name, "Inserting category");

    let result = sqlx::query("INSERT INTO categories (id, name) VALUES (NULLIF(?1, 0), ?2)")
        .bind(category.id)
        .bind(&category.name)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn list_with<'e, E>(executor: E) -> DbResult<Vec<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(executor)
        .await?;

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use shopfront_core::{Category, CategoryKey};

    async fn fresh_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let repo = fresh_db().await.categories();

        let first = repo.insert(&Category::new("Electronics")).await.unwrap();
        let second = repo.insert(&Category::new("Pastries")).await.unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_keeps_explicit_id() {
        let repo = fresh_db().await.categories();

        let id = repo
            .insert(&Category {
                id: 40,
                name: "Beauty".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(id, 40);
        assert_eq!(repo.list().await.unwrap()[0].name, "Beauty");
    }

    #[tokio::test]
    async fn test_duplicate_explicit_id_is_rejected() {
        let repo = fresh_db().await.categories();
        let category = Category {
            id: 3,
            name: "Detergents".to_string(),
        };

        repo.insert(&category).await.unwrap();
        let err = repo.insert(&category).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_defaults_yields_one_through_six_in_order() {
        let repo = fresh_db().await.categories();

        let ids = repo.insert_defaults().await.unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        let expected: Vec<&str> = CategoryKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_insert_defaults_is_unguarded() {
        let repo = fresh_db().await.categories();

        repo.insert_defaults().await.unwrap();
        repo.insert_defaults().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 12);
    }
}
