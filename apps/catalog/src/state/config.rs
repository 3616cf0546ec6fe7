//! # Configuration
//!
//! Application configuration and the user session, loaded once at startup
//! and passed into whatever needs them.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                               │
//! │  2. catalog.toml                                                       │
//! │       ~/.config/shopfront-catalog/catalog.toml (Linux)                 │
//! │       ~/Library/Application Support/com.shopfront.catalog/ (macOS)     │
//! │  3. Environment variables                                              │
//! │       SHOPFRONT_DB_PATH, SHOPFRONT_USER_NAME,                          │
//! │       SHOPFRONT_SCHEMA_POLICY, SHOPFRONT_LOG                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/shopfront/shopfront.db"
//! max_connections = 4
//! schema_policy = "migrate"   # migrate | recreate
//!
//! [session]
//! user_name = "alice"
//!
//! [log]
//! filter = "info,shopfront=debug,sqlx=warn"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shopfront_db::{DbConfig, SchemaPolicy};
use std::path::PathBuf;
use crate::error::{AppError, AppResult};

const DATABASE_FILE: &str = "shopfront.db";
const CONFIG_FILE: &str = "catalog.toml";

// =============================================================================
// Session
// =============================================================================

/// Who is using the app. Injected into state containers that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Name attached to comments posted without an explicit author.
    #[serde(default = "default_user_name")]
    pub user_name: String,
}

fn default_user_name() -> String {
    "Guest".to_string()
}

impl Session {
    pub fn new(user_name: impl Into<String>) -> Self {
        Session {
            user_name: user_name.into(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session {
            user_name: default_user_name(),
        }
    }
}

// =============================================================================
// Database Settings
// =============================================================================

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. Default: `shopfront.db` in the platform data folder.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pool size. Default: 5
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// What to do on a schema version mismatch. Default: migrate
    #[serde(default)]
    pub schema_policy: SchemaPolicy,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
            schema_policy: SchemaPolicy::default(),
        }
    }
}

// =============================================================================
// Log Settings
// =============================================================================

/// Logging settings. `RUST_LOG` still wins when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,shopfront=debug,sqlx=warn".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub session: Session,

    #[serde(default)]
    pub log: LogSettings,

    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; a malformed one is. Nothing is logged
    /// here since the log filter is itself part of the result.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
                config.source = Some(path);
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections fall back to defaults.
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `SHOPFRONT_*` overrides looked up through `lookup`.
    ///
    /// ## Returns
    /// * `Err(AppError)` - `SHOPFRONT_SCHEMA_POLICY` names no known policy
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(path) = lookup("SHOPFRONT_DB_PATH") {
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(user_name) = lookup("SHOPFRONT_USER_NAME") {
            self.session.user_name = user_name;
        }

        if let Some(policy) = lookup("SHOPFRONT_SCHEMA_POLICY") {
            self.database.schema_policy = policy
                .parse()
                .map_err(|err| AppError::config(format!("SHOPFRONT_SCHEMA_POLICY: {}", err)))?;
        }

        if let Some(filter) = lookup("SHOPFRONT_LOG") {
            self.log.filter = filter;
        }

        Ok(())
    }

    /// Resolves the database file, creating the data folder if needed.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| AppError::config("Could not determine app data directory"))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE))
    }

    /// Builds the storage configuration.
    pub fn db_config(&self) -> AppResult<DbConfig> {
        Ok(DbConfig::new(self.database_path()?)
            .max_connections(self.database.max_connections)
            .schema_policy(self.database.schema_policy))
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shopfront", "catalog")
}
