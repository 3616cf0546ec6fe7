//! # Database Migrations
//!
//! Embedded SQL migrations and the schema version policy.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Database::new()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Read PRAGMA user_version (schema version in the file header)          │
//! │       │                                                                 │
//! │       ├── newer than SCHEMA_VERSION?                                   │
//! │       │     Migrate  → DbError::SchemaTooNew                           │
//! │       │     Recreate → drop every table, start over                    │
//! │       ▼                                                                 │
//! │  Run pending embedded migrations (_sqlx_migrations bookkeeping)        │
//! │       ├── 001_create_products.sql    ✓                                 │
//! │       └── 002_create_categories.sql  ⬜ (pending on a v1 file)          │
//! │       ▼                                                                 │
//! │  PRAGMA user_version = SCHEMA_VERSION                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Changing the Schema
//!
//! 1. Add `migrations/sqlite/NNN_description.sql` with the next number
//! 2. Bump [`SCHEMA_VERSION`] to that number
//! 3. **NEVER** modify existing migrations
//!
//! Adding a new query to a repository needs neither.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Current schema version. Must equal the newest migration's number.
pub const SCHEMA_VERSION: i64 = 2;

/// Tables owned by this schema, dropped by [`SchemaPolicy::Recreate`].
const OWNED_TABLES: [&str; 3] = ["products", "categories", "_sqlx_migrations"];

// =============================================================================
// Schema Policy
// =============================================================================

/// What to do when the file's schema does not line up with this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Apply pending migrations in place; refuse files from a newer build.
    #[default]
    Migrate,

    /// Wipe all tables and rebuild from scratch on any mismatch.
    Recreate,
}

impl fmt::Display for SchemaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPolicy::Migrate => write!(f, "migrate"),
            SchemaPolicy::Recreate => write!(f, "recreate"),
        }
    }
}

impl FromStr for SchemaPolicy {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "migrate" => Ok(SchemaPolicy::Migrate),
            "recreate" | "destructive" => Ok(SchemaPolicy::Recreate),
            other => Err(DbError::MigrationFailed(format!(
                "Unknown schema policy: '{}'. Valid options: migrate, recreate",
                other
            ))),
        }
    }
}

// =============================================================================
// Running
// =============================================================================

/// Brings the schema up to [`SCHEMA_VERSION`] according to `policy`.
///
/// Idempotent: on an up-to-date file this only rewrites `user_version`.
pub async fn run_migrations(pool: &SqlitePool, policy: SchemaPolicy) -> DbResult<()> {
    let found = schema_version(pool).await?;
    info!(found, expected = SCHEMA_VERSION, %policy, "Checking schema version");

    if found > SCHEMA_VERSION {
        match policy {
            SchemaPolicy::Migrate => {
                return Err(DbError::SchemaTooNew {
                    found,
                    supported: SCHEMA_VERSION,
                })
            }
            SchemaPolicy::Recreate => {
                warn!(found, "Schema is newer than this build, recreating database");
                drop_all_tables(pool).await?;
            }
        }
    }

    match MIGRATOR.run(pool).await {
        Ok(()) => {}
        Err(err) if policy == SchemaPolicy::Recreate => {
            warn!(error = %err, "Migration history does not match, recreating database");
            drop_all_tables(pool).await?;
            MIGRATOR.run(pool).await?;
        }
        Err(err) => return Err(err.into()),
    }

    set_schema_version(pool, SCHEMA_VERSION).await?;

    info!(version = SCHEMA_VERSION, "All migrations applied successfully");
    Ok(())
}

/// Reads the schema version stored in the file header.
pub async fn schema_version(pool: &SqlitePool) -> DbResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (embedded_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}

async fn set_schema_version(pool: &SqlitePool, version: i64) -> DbResult<()> {
    // PRAGMA does not accept bound parameters.
    sqlx::query(&format!("PRAGMA user_version = {}", version))
        .execute(pool)
        .await?;
    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> DbResult<()> {
    let mut tx = pool.begin().await?;
    for table in OWNED_TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    set_schema_version(pool, 0).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn fresh_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[test]
    fn test_schema_version_matches_newest_migration() {
        let newest = MIGRATOR.migrations.iter().map(|m| m.version).max();
        assert_eq!(newest, Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("migrate".parse::<SchemaPolicy>().unwrap(), SchemaPolicy::Migrate);
        assert_eq!("Recreate".parse::<SchemaPolicy>().unwrap(), SchemaPolicy::Recreate);
        assert!("sometimes".parse::<SchemaPolicy>().is_err());
    }

    #[tokio::test]
    async fn test_fresh_database_is_at_current_version() {
        let db = fresh_db().await;

        assert_eq!(schema_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
        assert_eq!(migration_status(db.pool()).await.unwrap(), (2, 2));
    }

    #[tokio::test]
    async fn test_rerunning_keeps_data() {
        let db = fresh_db().await;
        db.categories().insert_defaults().await.unwrap();

        run_migrations(db.pool(), SchemaPolicy::Migrate).await.unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_newer_file_is_refused_under_migrate() {
        let db = fresh_db().await;
        set_schema_version(db.pool(), SCHEMA_VERSION + 1).await.unwrap();

        let err = run_migrations(db.pool(), SchemaPolicy::Migrate)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::SchemaTooNew { found: 3, supported: 2 }));
    }

    #[tokio::test]
    async fn test_newer_file_is_wiped_under_recreate() {
        let db = fresh_db().await;
        db.categories().insert_defaults().await.unwrap();
        set_schema_version(db.pool(), SCHEMA_VERSION + 1).await.unwrap();

        run_migrations(db.pool(), SchemaPolicy::Recreate).await.unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 0);
        assert_eq!(schema_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
    }
}
