//! # Catalog State
//!
//! The storefront's product grid. The storefront always shows the fixed
//! seed catalog; edits made in the admin catalog do not reach it.

use autoparts_core::catalog::seed_catalog;
use autoparts_core::{CatalogQuery, Product};

/// Read-only storefront catalog.
#[derive(Debug, Clone)]
pub struct CatalogState {
    products: Vec<Product>,
}

impl CatalogState {
    /// The six seed products.
    pub fn seeded() -> Self {
        CatalogState::with_products(seed_catalog())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        CatalogState { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products matching `query`, in catalog order.
    pub fn browse<'a>(&'a self, query: &CatalogQuery) -> impl Iterator<Item = &'a Product> + 'a {
        query.apply(&self.products)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::seeded()
    }
}
