//! # Admin Catalog State
//!
//! The durable product list managed from the admin page (key `products`).
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update / delete                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate ──── Err ──► ValidationError (nothing written)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock list ──► build next list ──► repo.save_all(&next)                │
//! │                                          │                              │
//! │                         Ok ──► swap in memory                          │
//! │                         Err ──► keep old list, return DbError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only administrators reach this state: `Storefront::admin_catalog` checks
//! the session before loading, and every write goes through the gated
//! `commands::admin` functions.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use autoparts_core::validation::{validate_draft, validate_product};
use autoparts_core::{IdGenerator, Product, ProductDraft, ProductPatch};
use autoparts_db::{DbResult, KeyValueStore, ProductRepository};

use crate::error::AppResult;

/// Admin catalog backed by a key-value store.
#[derive(Debug)]
pub struct AdminCatalog<S> {
    products: Mutex<Vec<Product>>,
    repo: ProductRepository<S>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> AdminCatalog<S> {
    /// Loads the stored list, seeding it on first access.
    pub(crate) async fn load(repo: ProductRepository<S>) -> DbResult<Self> {
        let products = repo.load_or_seed().await?;
        let max_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        info!(count = products.len(), max_id, "Admin catalog loaded");

        Ok(AdminCatalog {
            products: Mutex::new(products),
            repo,
            ids: IdGenerator::above(max_id),
        })
    }

    /// Snapshot of the list in display order.
    pub async fn products(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Product> {
        self.products.lock().await.iter().find(|p| p.id == id).cloned()
    }

    /// Validates `draft`, appends it with a fresh id and persists.
    ///
    /// An omitted discount is stored as 0.
    pub(crate) async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        if let Err(err) = validate_draft(&draft) {
            warn!(error = %err, "Rejected new product");
            return Err(err.into());
        }

        let mut products = self.products.lock().await;
        let product = draft.into_product(self.ids.next_id());

        let mut next = products.clone();
        next.push(product.clone());
        self.repo.save_all(&next).await?;
        *products = next;

        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Merges `patch` over product `id`, validates the result and persists.
    ///
    /// ## Returns
    /// * `Ok(None)` - No product with that id; nothing written
    pub(crate) async fn update(&self, id: i64, patch: ProductPatch) -> AppResult<Option<Product>> {
        let mut products = self.products.lock().await;

        let Some(index) = products.iter().position(|p| p.id == id) else {
            debug!(product_id = id, "Update for unknown product ignored");
            return Ok(None);
        };

        let merged = patch.apply_to(&products[index]);
        if let Err(err) = validate_product(&merged) {
            warn!(product_id = id, error = %err, "Rejected product update");
            return Err(err.into());
        }

        let mut next = products.clone();
        next[index] = merged.clone();
        self.repo.save_all(&next).await?;
        *products = next;

        info!(product_id = id, "Product updated");
        Ok(Some(merged))
    }

    /// Removes product `id` if present and persists the list.
    ///
    /// ## Returns
    /// Whether a product was removed.
    pub(crate) async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut products = self.products.lock().await;

        let next: Vec<Product> = products.iter().filter(|p| p.id != id).cloned().collect();
        let removed = next.len() != products.len();
        self.repo.save_all(&next).await?;
        *products = next;

        if removed {
            info!(product_id = id, "Product deleted");
        } else {
            debug!(product_id = id, "Delete for unknown product ignored");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use autoparts_core::{Category, CoreError, ValidationError};
    use autoparts_db::MemoryStore;

    async fn fresh(store: &MemoryStore) -> AdminCatalog<MemoryStore> {
        AdminCatalog::load(ProductRepository::new(store.clone()))
            .await
            .unwrap()
    }

    fn draft(name: &str, brand: &str, price: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            brand: brand.to_string(),
            price,
            category: Category::Filters,
            ..ProductDraft::default()
        }
    }

    async fn stored(store: &MemoryStore) -> Vec<Product> {
        ProductRepository::new(store.clone()).load().await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_fresh_store_has_six_seed_products() {
        let store = MemoryStore::new();
        let catalog = fresh(&store).await;

        let ids: Vec<i64> = catalog.products().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(stored(&store).await.len(), 6);
    }

    #[tokio::test]
    async fn test_create_appends_exactly_one() {
        let store = MemoryStore::new();
        let catalog = fresh(&store).await;

        let product = catalog.create(draft("Салонный фильтр", "Mann", 1)).await.unwrap();

        assert!(product.id > 6);
        assert_eq!(product.discount, Some(0));
        let after = stored(&store).await;
        assert_eq!(after.len(), 7);
        assert_eq!(after.last(), Some(&product));
    }

    #[tokio::test]
    async fn test_price_zero_is_rejected_and_nothing_written() {
        let store = MemoryStore::new();
        let catalog = fresh(&store).await;

        let err = catalog.create(draft("Фильтр", "Mann", 0)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let err = catalog.create(draft("   ", "Mann", 100)).await.unwrap_err();
        assert!(err.is_validation());

        assert_eq!(stored(&store).await.len(), 6);
    }

    #[tokio::test]
    async fn test_rapid_creates_get_distinct_ids() {
        let catalog = fresh(&MemoryStore::new()).await;

        let a = catalog.create(draft("A", "B", 10)).await.unwrap();
        let b = catalog.create(draft("C", "D", 10)).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_merges_and_validates() {
        let store = MemoryStore::new();
        let catalog = fresh(&store).await;

        let patch = ProductPatch {
            price: Some(4000),
            discount: Some(10),
            ..ProductPatch::default()
        };
        let updated = catalog.update(1, patch).await.unwrap().unwrap();
        assert_eq!(updated.price, 4000);
        assert_eq!(updated.name, "Тормозные колодки");
        assert_eq!(stored(&store).await[0], updated);

        let bad = ProductPatch {
            brand: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(catalog.update(1, bad).await.unwrap_err().is_validation());
        assert_eq!(catalog.get(1).await.unwrap().brand, "Brembo");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let catalog = fresh(&MemoryStore::new()).await;
        let result = catalog.update(999, ProductPatch::default()).await.unwrap();
        assert_eq!(result, None);
        assert_eq!(catalog.products().await.len(), 6);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let catalog = fresh(&store).await;

        assert!(catalog.delete(2).await.unwrap());
        assert!(!catalog.delete(2).await.unwrap());

        let ids: Vec<i64> = stored(&store).await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_list() {
        let store = MemoryStore::new();
        let catalog = fresh(&store).await;

        store.set_unavailable(true);
        let err = catalog.delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(catalog.products().await.len(), 6);

        assert!(catalog.create(draft("A", "B", 1)).await.is_err());
        assert_eq!(catalog.products().await.len(), 6);
    }

    #[tokio::test]
    async fn test_reload_sees_previous_writes() {
        let store = MemoryStore::new();
        let created = fresh(&store).await.create(draft("A", "B", 5)).await.unwrap();

        let reloaded = fresh(&store).await;
        assert_eq!(reloaded.get(created.id).await, Some(created.clone()));

        // New ids stay above everything already stored
        let next = reloaded.create(draft("C", "D", 5)).await.unwrap();
        assert!(next.id > created.id);
    }
}
