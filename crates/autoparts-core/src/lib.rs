//! # autoparts-core: Pure Business Logic for the AutoParts Storefront
//!
//! This crate is the **heart** of the storefront. It contains the catalog,
//! cart and session rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AutoParts Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI                                   │   │
//! │  │   Catalog grid ──► Cart sheet ──► Login ──► Profile ──► Admin   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Storefront commands (apps/storefront)           │   │
//! │  │    browse_catalog, add_to_cart, login, create_product, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ autoparts-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ catalog │ │   auth   │ │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │ filter  │ │ Session  │ │   │
//! │  │   │  User   │ │Discount │ │CartLine │ │  seed   │ │  gates   │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 autoparts-db (durable key-value store)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, User, Role, Discount)
//! - [`money`] - Money type with integer arithmetic (kopecks, no floats)
//! - [`cart`] - Cart, CartLine and totals
//! - [`catalog`] - Seed catalog and the search/category filter
//! - [`auth`] - Mock credential rules and the session gate
//! - [`ids`] - Time-derived id generation
//! - [`validation`] - Admin form and cart input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use autoparts_core::catalog::seed_catalog;
//! use autoparts_core::{Cart, Money};
//!
//! let catalog = seed_catalog();
//! let mut cart = Cart::new();
//! cart.add(&catalog[0]).unwrap(); // 3500 ₽ at 15% off
//! cart.add(&catalog[1]).unwrap(); // 450 ₽
//!
//! assert_eq!(cart.total(), Money::from_rubles(3425));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::Session;
pub use cart::{Cart, CartLine, CartTotals, QuantityUpdate};
pub use catalog::{CatalogQuery, CategoryFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::IdGenerator;
pub use money::Money;
pub use types::*;
