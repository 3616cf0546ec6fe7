//! # Home State
//!
//! Seeds the store on first run and publishes the current product list.
//!
//! ## Bootstrap
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         HomeState::new(db)                              │
//! │                                │ tokio::spawn                           │
//! │                                ▼                                        │
//! │   Uninitialized ──► SeedingCategories ──► SeedingProducts ──► Ready     │
//! │                          │                      │                       │
//! │               count == 0 ? insert six   count == 0 ? insert six         │
//! │               (one transaction)         (one transaction)               │
//! │                                                  │                      │
//! │                                     read joined projection, publish     │
//! │                                                                         │
//! │   Any failure ──► Failed(error); the product snapshot is untouched     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Publishing
//! Snapshots go out on a `watch` channel: every subscriber sees the latest
//! full list and each later replacement. There is no queue and no diff.
//! Operations run as independent tasks, so when two overlap the one that
//! finishes last decides the snapshot.

use serde::Serialize;
use shopfront_core::ProductWithName;
use shopfront_db::Database;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// An immutable, complete product list.
pub type ProductSnapshot = Arc<Vec<ProductWithName>>;

/// Where the bootstrap sequence currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "error", rename_all = "snake_case")]
pub enum HomePhase {
    Uninitialized,
    SeedingCategories,
    SeedingProducts,
    Ready,
    Failed(AppError),
}

/// State container behind the home screen.
///
/// Cloning is cheap; clones publish to the same channels.
#[derive(Debug, Clone)]
pub struct HomeState {
    inner: Arc<HomeInner>,
}

#[derive(Debug)]
struct HomeInner {
    db: Arc<Database>,
    products: watch::Sender<ProductSnapshot>,
    phase: watch::Sender<HomePhase>,
}

impl HomeState {
    /// Creates the state and starts the bootstrap as a background task.
    ///
    /// Must be called from within a Tokio runtime. Await [`ready`](Self::ready)
    /// to know when the first snapshot is out.
    pub fn new(db: Arc<Database>) -> Self {
        let state = Self::idle(db);

        let bootstrap = state.clone();
        tokio::spawn(async move {
            if let Err(err) = bootstrap.initialize().await {
                warn!(error = %err, "Home bootstrap failed");
            }
        });

        state
    }

    /// Creates the state without starting the bootstrap.
    pub fn idle(db: Arc<Database>) -> Self {
        let (products, _) = watch::channel(Arc::new(Vec::new()));
        let (phase, _) = watch::channel(HomePhase::Uninitialized);

        HomeState {
            inner: Arc::new(HomeInner { db, products, phase }),
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Subscribes to product snapshots.
    pub fn products(&self) -> watch::Receiver<ProductSnapshot> {
        self.inner.products.subscribe()
    }

    /// The snapshot published most recently.
    pub fn snapshot(&self) -> ProductSnapshot {
        self.inner.products.borrow().clone()
    }

    /// Subscribes to bootstrap phase changes.
    pub fn phases(&self) -> watch::Receiver<HomePhase> {
        self.inner.phase.subscribe()
    }

    /// The current bootstrap phase.
    pub fn phase(&self) -> HomePhase {
        self.inner.phase.borrow().clone()
    }

    /// Waits until the bootstrap has finished.
    ///
    /// ## Returns
    /// * `Ok(())` - Phase reached `Ready`
    /// * `Err(AppError)` - The bootstrap failed with this error
    pub async fn ready(&self) -> AppResult<()> {
        let mut phases = self.phases();
        let phase = phases
            .wait_for(|phase| matches!(phase, HomePhase::Ready | HomePhase::Failed(_)))
            .await
            .map_err(|_| AppError::internal("Home state was dropped"))?;

        match &*phase {
            HomePhase::Failed(err) => Err(err.clone()),
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Runs the guarded bootstrap: seed empty tables, then publish.
    ///
    /// Safe to repeat; tables that already have rows are left alone.
    ///
    /// ## Returns
    /// Number of products published.
    pub async fn initialize(&self) -> AppResult<usize> {
        match self.bootstrap().await {
            Ok(published) => {
                self.set_phase(HomePhase::Ready);
                info!(published, "Home state ready");
                Ok(published)
            }
            Err(err) => {
                self.set_phase(HomePhase::Failed(err.clone()));
                Err(err)
            }
        }
    }

    async fn bootstrap(&self) -> AppResult<usize> {
        let db = &self.inner.db;

        self.set_phase(HomePhase::SeedingCategories);
        if db.categories().count().await? == 0 {
            db.categories()
                .insert_defaults()
                .await
                .map_err(|err| AppError::seed("categories", err))?;
        }

        self.set_phase(HomePhase::SeedingProducts);
        if db.products().count().await? == 0 {
            db.products()
                .insert_defaults()
                .await
                .map_err(|err| AppError::seed("products", err))?;
        }

        reload(&self.inner, None).await
    }

    fn set_phase(&self, phase: HomePhase) {
        debug!(?phase, "Home phase");
        self.inner.phase.send_replace(phase);
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Re-reads every product and publishes the full list.
    pub fn load_all_products(&self) -> JoinHandle<AppResult<usize>> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { reload(&inner, None).await })
    }

    /// Re-reads every product and publishes those whose name contains
    /// `query`, ignoring case. No match publishes an empty list.
    pub fn search_products(&self, query: impl Into<String>) -> JoinHandle<AppResult<usize>> {
        let inner = Arc::clone(&self.inner);
        let query = query.into();
        tokio::spawn(async move { reload(&inner, Some(&query)).await })
    }

    /// Inserts the default categories without checking whether they exist.
    pub fn insert_default_categories(&self) -> JoinHandle<AppResult<Vec<i64>>> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner
                .db
                .categories()
                .insert_defaults()
                .await
                .map_err(|err| AppError::seed("categories", err))
        })
    }

    /// Inserts the default products without checking whether they exist.
    pub fn insert_default_products(&self) -> JoinHandle<AppResult<Vec<i64>>> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner
                .db
                .products()
                .insert_defaults()
                .await
                .map_err(|err| AppError::seed("products", err))
        })
    }
}

/// Reads the joined projection, filters it, and replaces the snapshot.
async fn reload(inner: &HomeInner, query: Option<&str>) -> AppResult<usize> {
    let all = inner
        .db
        .products()
        .get_all_with_category_name()
        .await
        .map_err(|err| {
            warn!(error = %err, "Product read failed, keeping previous snapshot");
            AppError::from(err)
        })?;

    let rows: Vec<ProductWithName> = match query {
        Some(query) => all.into_iter().filter(|p| p.matches(query)).collect(),
        None => all,
    };

    let published = rows.len();
    inner.products.send_replace(Arc::new(rows));
    debug!(published, query = query.unwrap_or(""), "Published product snapshot");

    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shopfront_core::Money;
    use shopfront_db::DbConfig;

    async fn memory_db() -> Arc<Database> {
        Arc::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    async fn ready_home() -> (HomeState, Arc<Database>) {
        let db = memory_db().await;
        let home = HomeState::new(Arc::clone(&db));
        home.ready().await.unwrap();
        (home, db)
    }

    fn names(snapshot: &ProductSnapshot) -> Vec<&str> {
        snapshot.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fresh_store_is_seeded_and_published() {
        let (home, db) = ready_home().await;

        assert_eq!(home.phase(), HomePhase::Ready);
        assert_eq!(db.categories().count().await.unwrap(), 6);
        assert_eq!(db.products().count().await.unwrap(), 6);

        let snapshot = home.snapshot();
        assert_eq!(snapshot.len(), 6);
        assert!(snapshot.iter().all(|p| (1..=6).contains(&p.category_id)));
    }

    #[tokio::test]
    async fn test_reinitializing_does_not_reseed() {
        let (home, db) = ready_home().await;

        home.initialize().await.unwrap();
        let second = HomeState::new(Arc::clone(&db));
        second.ready().await.unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 6);
        assert_eq!(db.products().count().await.unwrap(), 6);
        assert_eq!(second.snapshot().len(), 6);
    }

    #[tokio::test]
    async fn test_load_all_products_carries_category_names() {
        let (home, db) = ready_home().await;

        let published = home.load_all_products().await.unwrap().unwrap();
        assert_eq!(published as i64, db.products().count().await.unwrap());

        let snapshot = home.snapshot();
        let bread = snapshot.iter().find(|p| p.name == "Festive Bread").unwrap();
        assert_eq!(bread.category_name, "Pastries");
        assert_eq!(bread.price, Money::from_cents(599));
        assert!((bread.price.as_decimal() - 5.99).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (home, _db) = ready_home().await;

        assert_eq!(home.search_products("milk").await.unwrap().unwrap(), 1);
        assert_eq!(names(&home.snapshot()), vec!["Brookside Milk"]);

        assert_eq!(home.search_products("SAMSUNG").await.unwrap().unwrap(), 2);
        assert_eq!(
            names(&home.snapshot()),
            vec!["Samsung 55\" TV", "Samsung Fridge"]
        );
    }

    #[tokio::test]
    async fn test_search_without_matches_publishes_empty_list() {
        let (home, db) = ready_home().await;

        assert_eq!(home.search_products("zzz").await.unwrap().unwrap(), 0);
        assert!(home.snapshot().is_empty());
        assert_eq!(db.products().count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_load_after_search_replaces_snapshot() {
        let (home, _db) = ready_home().await;

        home.search_products("blender").await.unwrap().unwrap();
        assert_eq!(home.snapshot().len(), 1);

        home.load_all_products().await.unwrap().unwrap();
        assert_eq!(home.snapshot().len(), 6);
    }

    #[tokio::test]
    async fn test_subscribers_receive_new_snapshots() {
        let (home, _db) = ready_home().await;
        let mut products = home.products();
        products.borrow_and_update();

        home.search_products("fridge").await.unwrap().unwrap();

        assert!(products.has_changed().unwrap());
        assert_eq!(names(&products.borrow_and_update()), vec!["Samsung Fridge"]);
    }

    #[tokio::test]
    async fn test_earlier_snapshots_are_not_mutated() {
        let (home, _db) = ready_home().await;
        let before = home.snapshot();

        home.search_products("milk").await.unwrap().unwrap();

        assert_eq!(before.len(), 6);
        assert_eq!(home.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_searches_leave_one_complete_result() {
        let (home, _db) = ready_home().await;

        let milk = home.search_products("milk");
        let samsung = home.search_products("samsung");
        milk.await.unwrap().unwrap();
        samsung.await.unwrap().unwrap();

        let last = names(&home.snapshot()).join(",");
        assert!(
            last == "Brookside Milk" || last == "Samsung 55\" TV,Samsung Fridge",
            "unexpected snapshot: {last}"
        );
    }

    #[tokio::test]
    async fn test_failed_read_keeps_last_snapshot() {
        let (home, db) = ready_home().await;
        db.close().await;

        let err = home.load_all_products().await.unwrap().unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert_eq!(home.snapshot().len(), 6);
    }

    #[tokio::test]
    async fn test_bootstrap_failure_is_reported() {
        let db = Arc::new(
            Database::new(DbConfig::in_memory().run_migrations(false))
                .await
                .unwrap(),
        );
        let home = HomeState::new(db);

        let err = home.ready().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert_eq!(home.phase(), HomePhase::Failed(err));
        assert!(home.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_idle_state_publishes_nothing() {
        let home = HomeState::idle(memory_db().await);

        assert_eq!(home.phase(), HomePhase::Uninitialized);
        assert!(home.snapshot().is_empty());

        assert_eq!(home.initialize().await.unwrap(), 6);
        assert_eq!(home.phase(), HomePhase::Ready);
    }

    #[tokio::test]
    async fn test_default_inserts_are_unguarded() {
        let (home, db) = ready_home().await;

        let ids = home.insert_default_categories().await.unwrap().unwrap();
        assert_eq!(ids, vec![7, 8, 9, 10, 11, 12]);
        home.insert_default_products().await.unwrap().unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 12);
        assert_eq!(db.products().count().await.unwrap(), 12);

        // New products resolve to the first matching category rows.
        home.load_all_products().await.unwrap().unwrap();
        assert!(home.snapshot().iter().all(|p| (1..=6).contains(&p.category_id)));
    }
}
