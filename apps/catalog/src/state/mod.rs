//! # State Module
//!
//! State containers for the catalog screens. Each one owns its own channels
//! and is handed only the dependencies it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig ──► DatabaseProvider ──► Arc<Database>                       │
//! │      │                                   │                              │
//! │      │ Session                           │                              │
//! │      ▼                                   ▼                              │
//! │  ┌──────────────────────┐   ┌──────────────────────────┐               │
//! │  │ ProductDetailState   │   │ HomeState                │               │
//! │  │                      │   │                          │               │
//! │  │ watch<[Comment]>     │   │ watch<[ProductWithName]> │               │
//! │  │ in memory only       │   │ watch<HomePhase>         │               │
//! │  └──────────────────────┘   └──────────────────────────┘               │
//! │                                                                         │
//! │  Snapshots are Arc'd and never mutated after publishing.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod home;
mod product_detail;

pub use config::{AppConfig, DatabaseSettings, LogSettings, Session};
pub use home::{HomePhase, HomeState, ProductSnapshot};
pub use product_detail::{CommentSnapshot, ProductDetailState};
