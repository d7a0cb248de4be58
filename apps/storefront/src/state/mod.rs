//! # State Module
//!
//! State holders for the storefront, one per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront::open(config)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌──────────────┬─────────┴────────┬───────────────────┐            │
//! │     ▼              ▼                  ▼                   ▼            │
//! │  ┌──────────┐  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐    │
//! │  │CartState │  │SessionState  │  │CatalogState  │  │AdminCatalog  │    │
//! │  │          │  │              │  │              │  │              │    │
//! │  │Arc<Mutex<│  │tokio Mutex + │  │seed products │  │tokio Mutex + │    │
//! │  │  Cart>>  │  │key "user"    │  │(read-only)   │  │key "products"│    │
//! │  └──────────┘  └──────────────┘  └──────────────┘  └──────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: std Mutex, never held across an await                    │
//! │  • SessionState / AdminCatalog: tokio Mutex, held across storage writes│
//! │  • CatalogState, StorefrontConfig: read-only after startup             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod admin;
mod cart;
mod catalog;
mod config;
mod session;

pub use admin::AdminCatalog;
pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigError, StorefrontConfig, DATABASE_FILE_NAME, DEFAULT_LOGIN_DELAY_MS};
pub use session::SessionState;
