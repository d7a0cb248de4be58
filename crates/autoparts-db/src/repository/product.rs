//! # Product Repository
//!
//! The admin catalog, stored as one JSON array under key `products`.
//!
//! ## First Access
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_or_seed()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get("products") ──── Some(json) ──► decode ──► Vec<Product>           │
//! │       │                                                                 │
//! │      None                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed_catalog() ──► set("products") ──► six seed products              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order of the array is the display order of the admin table.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::kv::KeyValueStore;
use autoparts_core::catalog::seed_catalog;
use autoparts_core::Product;

/// Durable key holding the admin catalog.
pub const PRODUCTS_KEY: &str = "products";

/// Repository for the persisted admin catalog.
#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        ProductRepository { store }
    }

    /// Reads the stored catalog, `None` if it was never written.
    pub async fn load(&self) -> DbResult<Option<Vec<Product>>> {
        let Some(raw) = self.store.get(PRODUCTS_KEY).await? else {
            return Ok(None);
        };

        let products: Vec<Product> = serde_json::from_str(&raw)?;
        debug!(count = products.len(), "Loaded product catalog");
        Ok(Some(products))
    }

    /// Reads the stored catalog, writing the seed list first if it is absent.
    pub async fn load_or_seed(&self) -> DbResult<Vec<Product>> {
        if let Some(products) = self.load().await? {
            return Ok(products);
        }

        info!("No stored catalog, seeding");
        self.reset().await
    }

    /// Overwrites the stored catalog with `products`.
    pub async fn save_all(&self, products: &[Product]) -> DbResult<()> {
        let raw = serde_json::to_string(products)?;
        self.store.set(PRODUCTS_KEY, &raw).await?;
        debug!(count = products.len(), "Product catalog persisted");
        Ok(())
    }

    /// Replaces the stored catalog with the seed list and returns it.
    pub async fn reset(&self) -> DbResult<Vec<Product>> {
        let seed = seed_catalog();
        self.save_all(&seed).await?;
        info!(count = seed.len(), "Product catalog reset to seed");
        Ok(seed)
    }
}
