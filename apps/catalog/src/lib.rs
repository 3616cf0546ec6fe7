//! # Shopfront Catalog
//!
//! State containers for the catalog screens plus the command-line entry point
//! that wires them together.
//!
//! ## Module Organization
//! ```text
//! shopfront_catalog/
//! ├── lib.rs                ◄─── Startup: config, logging, provider, report
//! ├── state/
//! │   ├── mod.rs            ◄─── State type exports
//! │   ├── config.rs         ◄─── AppConfig + Session
//! │   ├── home.rs           ◄─── Seeding, product list, search
//! │   └── product_detail.rs ◄─── In-memory comments
//! └── error.rs              ◄─── AppError for callers
//! ```

pub mod error;
pub mod state;

use serde::Serialize;
use shopfront_core::{Comment, ProductWithName};
use shopfront_db::DatabaseProvider;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::{AppError, AppResult};
use state::{AppConfig, HomePhase, HomeState, ProductDetailState};

pub const USAGE: &str = "\
Shopfront Catalog

Usage: shopfront-catalog [OPTIONS]

Options:
  -c, --config <PATH>            Config file (default: platform config folder)
  -d, --db <PATH>                Database file, overrides config
  -s, --search <QUERY>           Publish only products whose name contains QUERY
      --comment <ID> <TEXT>      Post a comment on product ID as the session user
  -h, --help                     Show this help message";

// =============================================================================
// Arguments
// =============================================================================

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub search: Option<String>,
    pub comments: Vec<(String, String)>,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config = Some(value(&mut args, &arg)?.into()),
                "--db" | "-d" => parsed.db = Some(value(&mut args, &arg)?.into()),
                "--search" | "-s" => parsed.search = Some(value(&mut args, &arg)?),
                "--comment" => {
                    let product_id = value(&mut args, &arg)?;
                    let text = value(&mut args, &arg)?;
                    parsed.comments.push((product_id, text));
                }
                "--help" | "-h" => parsed.help = true,
                other => return Err(AppError::config(format!("Unknown argument: {}", other))),
            }
        }

        Ok(parsed)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> AppResult<String> {
    args.next()
        .ok_or_else(|| AppError::config(format!("Missing value for {}", flag)))
}

// =============================================================================
// Report
// =============================================================================

/// What the CLI prints once the home state is ready.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    pub phase: HomePhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub products: Vec<ProductWithName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

// =============================================================================
// Startup
// =============================================================================

/// Initializes the tracing subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Runs the catalog.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load AppConfig (file ─► SHOPFRONT_* env ─► --db flag)              │
/// │  2. Initialize logging from the config filter, then report the source  │
/// │  3. DatabaseProvider::get() opens the file and migrates the schema     │
/// │  4. HomeState::new seeds empty tables and publishes the product list   │
/// │  5. Optional search replaces the snapshot                              │
/// │  6. Comments go to a ProductDetailState for the session user           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: CliArgs) -> AppResult<CatalogReport> {
    let mut config = AppConfig::load(args.config)?;
    if let Some(db) = args.db {
        config.database.path = Some(db);
    }

    init_tracing(&config.log.filter);
    info!(user = %config.session.user_name, "Starting Shopfront Catalog");
    match &config.source {
        Some(path) => info!(?path, "Loaded config from file"),
        None => debug!("No config file, using defaults and environment"),
    }

    let provider = DatabaseProvider::new(config.db_config()?);
    info!(
        path = %provider.config().database_path.display(),
        policy = %provider.config().schema_policy,
        "Using catalog database"
    );
    let db = provider.get().await?;

    let home = HomeState::new(db);
    home.ready().await?;

    if let Some(query) = &args.search {
        home.search_products(query.clone()).await??;
    }

    let detail = ProductDetailState::new(config.session.clone());
    for (product_id, text) in args.comments {
        detail.post_comment(product_id, text);
    }

    let report = CatalogReport {
        phase: home.phase(),
        query: args.search,
        products: home.snapshot().as_ref().clone(),
        comments: detail.snapshot().as_ref().clone(),
    };

    provider.get().await?.close().await;
    Ok(report)
}

/// Renders a report as pretty JSON.
pub fn render(report: &CatalogReport) -> AppResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|err| AppError::internal(format!("Could not render report: {}", err)))
}
