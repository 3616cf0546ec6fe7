//! # Database Provider
//!
//! Lazily builds one [`Database`] and hands the same instance to every caller.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main()                                                                 │
//! │    let provider = DatabaseProvider::new(config);   // nothing opened   │
//! │                                                                         │
//! │  caller A: provider.get().await ──► opens pool, migrates ──► Arc<Db>   │
//! │  caller B: provider.get().await ──► waits for A ─────────────► same    │
//! │  caller C: provider.get().await ──► already set ─────────────► same    │
//! │                                                                         │
//! │  Failed initialization is not remembered: the next get() retries.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The provider is an ordinary value owned by the composition root and
//! passed to whatever needs it; there is no global.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};

/// Memoizing source of the process-wide [`Database`].
#[derive(Debug)]
pub struct DatabaseProvider {
    config: DbConfig,
    database: OnceCell<Arc<Database>>,
}

impl DatabaseProvider {
    /// Creates a provider. No connection is opened until [`get`](Self::get).
    pub fn new(config: DbConfig) -> Self {
        DatabaseProvider {
            config,
            database: OnceCell::new(),
        }
    }

    /// Returns the shared database, opening it on first use.
    pub async fn get(&self) -> DbResult<Arc<Database>> {
        let database = self
            .database
            .get_or_try_init(|| async {
                debug!(path = %self.config.database_path.display(), "Opening shared database");
                Database::new(self.config.clone()).await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(database))
    }

    /// True once a caller has successfully opened the database.
    pub fn is_initialized(&self) -> bool {
        self.database.initialized()
    }

    /// The configuration used to open the database.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::SchemaPolicy;

    #[tokio::test]
    async fn test_get_returns_the_same_instance() {
        let provider = DatabaseProvider::new(DbConfig::in_memory());
        assert!(!provider.is_initialized());

        let first = provider.get().await.unwrap();
        let second = provider.get().await.unwrap();

        assert!(provider.is_initialized());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_concurrent_first_callers_share_one_database() {
        let provider = Arc::new(DatabaseProvider::new(DbConfig::in_memory()));

        let a = tokio::spawn({
            let provider = Arc::clone(&provider);
            async move { provider.get().await.unwrap() }
        });
        let b = tokio::spawn({
            let provider = Arc::clone(&provider);
            async move { provider.get().await.unwrap() }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_writes_are_visible_through_every_handle() {
        let provider = DatabaseProvider::new(DbConfig::in_memory());

        provider.get().await.unwrap().categories().insert_defaults().await.unwrap();

        let count = provider.get().await.unwrap().categories().count().await.unwrap();
        assert_eq!(count, 6);
    }

    #[test]
    fn test_config_is_what_it_opens() {
        let provider = DatabaseProvider::new(
            DbConfig::new("/tmp/shop.db").schema_policy(SchemaPolicy::Recreate),
        );

        assert_eq!(provider.config().database_path, std::path::PathBuf::from("/tmp/shop.db"));
        assert_eq!(provider.config().schema_policy, SchemaPolicy::Recreate);
        assert!(!provider.is_initialized());
    }

    #[tokio::test]
    async fn test_failed_open_is_not_memoized() {
        let mut config = DbConfig::new("/nonexistent-dir/definitely/missing/shopfront.db");
        config.acquire_timeout = std::time::Duration::from_secs(2);
        let provider = DatabaseProvider::new(config);

        assert!(provider.get().await.is_err());
        assert!(!provider.is_initialized());
    }
}
