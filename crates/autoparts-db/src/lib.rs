//! # autoparts-db: Durable Storage for the AutoParts Storefront
//!
//! A string key-value store with two typed records on top of it: the
//! signed-in user and the admin catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Data Flow                                │
//! │                                                                         │
//! │  Storefront command (login, create_product)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  autoparts-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ Repositories  │    │ KeyValueStore │    │  Migrations  │  │   │
//! │  │   │               │    │               │    │  (embedded)  │  │   │
//! │  │   │ SessionRepo   │───►│ Database      │    │ 001_kv.sql   │  │   │
//! │  │   │ ProductRepo   │    │ MemoryStore   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite file (kv_entries)                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`kv`] - The `KeyValueStore` trait and the in-memory store
//! - [`pool`] - SQLite pool creation and the durable store
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Typed `user` and `products` records
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use autoparts_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("autoparts.db")).await?;
//! let catalog = db.products().load_or_seed().await?;
//! let user = db.sessions().load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use pool::{Database, DbConfig};

pub use repository::product::{ProductRepository, PRODUCTS_KEY};
pub use repository::session::{SessionRepository, USER_KEY};
