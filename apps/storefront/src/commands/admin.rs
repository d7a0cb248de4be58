//! # Admin Commands
//!
//! The admin page: a product table with add, edit and delete.
//!
//! ## Access Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  every admin command                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  session.require_admin() ── not admin ──► navigate(/login), Err        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AdminCatalog::{create, update, delete}                                │
//! │       │                                                                 │
//! │       ├── ValidationError ──► toast "Заполните все обязательные поля"  │
//! │       └── Ok ──────────────► toast "Товар добавлен/обновлен/удален"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::{ApiError, AppError};
use crate::notify::{Navigator, Notification, Notifier, Route};
use crate::state::{AdminCatalog, SessionState};
use autoparts_core::{Product, ProductDraft, ProductPatch};
use autoparts_db::KeyValueStore;

const REQUIRED_FIELDS_MESSAGE: &str = "Заполните все обязательные поля";

async fn ensure_admin<S: KeyValueStore>(
    session: &SessionState<S>,
    navigator: &dyn Navigator,
) -> Result<(), ApiError> {
    if let Err(err) = session.require_admin().await {
        navigator.navigate(Route::Login);
        return Err(err.into());
    }
    Ok(())
}

fn report_failure(notifier: &dyn Notifier, err: AppError) -> ApiError {
    if err.is_validation() {
        notifier.notify(Notification::error(REQUIRED_FIELDS_MESSAGE));
    }
    err.into()
}

/// Opens the admin page: the product table in display order.
pub async fn list_products<S: KeyValueStore, P: KeyValueStore>(
    session: &SessionState<S>,
    catalog: &AdminCatalog<P>,
    navigator: &dyn Navigator,
) -> Result<Vec<Product>, ApiError> {
    ensure_admin(session, navigator).await?;
    let products = catalog.products().await;
    debug!(count = products.len(), "list_products command");
    Ok(products)
}

/// Adds a product from the "new product" form.
pub async fn create_product<S: KeyValueStore, P: KeyValueStore>(
    session: &SessionState<S>,
    catalog: &AdminCatalog<P>,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    draft: ProductDraft,
) -> Result<Product, ApiError> {
    ensure_admin(session, navigator).await?;

    let product = catalog
        .create(draft)
        .await
        .map_err(|err| report_failure(notifier, err))?;

    notifier.notify(Notification::success(
        "Товар добавлен",
        format!("{} добавлен в каталог", product.name),
    ));
    Ok(product)
}

/// Saves the edit form for product `id`.
///
/// ## Returns
/// `None` if no product has that id (nothing is changed).
pub async fn update_product<S: KeyValueStore, P: KeyValueStore>(
    session: &SessionState<S>,
    catalog: &AdminCatalog<P>,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    id: i64,
    patch: ProductPatch,
) -> Result<Option<Product>, ApiError> {
    ensure_admin(session, navigator).await?;

    let updated = catalog
        .update(id, patch)
        .await
        .map_err(|err| report_failure(notifier, err))?;

    if let Some(product) = &updated {
        notifier.notify(Notification::success(
            "Товар обновлен",
            format!("{} успешно обновлен", product.name),
        ));
    }
    Ok(updated)
}

/// Deletes product `id`. Deleting a missing id is not an error.
pub async fn delete_product<S: KeyValueStore, P: KeyValueStore>(
    session: &SessionState<S>,
    catalog: &AdminCatalog<P>,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    id: i64,
) -> Result<bool, ApiError> {
    ensure_admin(session, navigator).await?;

    let removed = catalog.delete(id).await?;
    if removed {
        notifier.notify(Notification::success("Товар удален", "Товар удален из каталога"));
    }
    Ok(removed)
}
