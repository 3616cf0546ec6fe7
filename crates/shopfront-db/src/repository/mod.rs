//! # Repository Module
//!
//! Database repository implementations for Shopfront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  State container                                                       │
//! │       │                                                                 │
//! │       │  db.products().get_all_with_category_name()                    │
//! │       ▼                                                                 │
//! │  CategoryRepository            ProductRepository                       │
//! │  ├── count()                   ├── count()                             │
//! │  ├── insert(&Category)         ├── insert(&Product)                    │
//! │  ├── list()                    ├── get_all_with_category_name()        │
//! │  └── insert_defaults()         └── insert_defaults()                   │
//! │       │                                                                 │
//! │       │  SQL Query (one transaction per default batch)                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation propagates storage failures as `DbError`; nothing here
//! retries.

pub mod category;
pub mod product;
