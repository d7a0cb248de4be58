//! # Storefront Commands
//!
//! The operations the browser UI invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Product grid, category selector
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── auth.rs     ◄─── Login, registration, logout, profile gate
//! ├── admin.rs    ◄─── Admin gate and product CRUD
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI event (click "В корзину")                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  add_to_cart(&catalog, &cart, &notifier, product_id)                    │
//! │         │        ▲        ▲        ▲                                    │
//! │         │        └────────┴────────┴── state passed explicitly         │
//! │         ▼                                                               │
//! │  Result<CartResponse, ApiError>  ──(JSON)──►  UI re-renders             │
//! │         │                                                               │
//! │         └──► Notifier::notify("Добавлено в корзину")                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs. There are no globals.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
