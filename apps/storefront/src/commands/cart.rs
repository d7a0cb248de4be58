//! # Cart Commands
//!
//! Cart manipulation from the product grid and the cart sheet.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐   "Оформить заказ"            │
//! │  │  Empty   │──────────────►│ In Cart  │──────────────────► (label only)│
//! │  │  Cart    │◄──────────────│          │                                │
//! │  └──────────┘  last line     └──────────┘                               │
//! │                removed           │  ▲                                   │
//! │                                  └──┘ update_cart_item                  │
//! │                                       remove_from_cart                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::{CartState, CatalogState};
use autoparts_core::{Cart, CartLine, CartTotals, CoreError, QuantityUpdate};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Cart Sheet
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  Корзина                                           2 товара    │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Тормозные колодки    x1    2975.00 ₽  (было 3500.00 ₽)       │
/// │  Масляный фильтр      x1     450.00 ₽                         │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Итого:                     3425.00 ₽                         │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity + 1
/// - Not in cart: new line with a snapshot of the product's price/discount
/// - Confirms with "Добавлено в корзину"
///
/// ## Errors
/// - `NOT_FOUND` if the id is not in the catalog
/// - `VALIDATION_ERROR` if the product is out of stock or its line is
///   already at the largest quantity
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    notifier: &dyn Notifier,
    product_id: i64,
) -> Result<CartResponse, ApiError> {
    let product = catalog
        .find(product_id)
        .ok_or(CoreError::ProductNotFound(product_id))?;

    if !product.in_stock {
        warn!(product_id, "Out-of-stock product not added");
        return Err(ApiError::validation("Нет в наличии"));
    }

    let response = cart.with_cart_mut(|c| {
        let quantity = c.add(product)?;
        debug!(product_id, quantity, "add_to_cart command");
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })?;

    notifier.notify(Notification::success(
        "Добавлено в корзину",
        format!("{} добавлен в корзину", product.name),
    ));

    Ok(response)
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0: removes the line
/// - Negative quantity: `VALIDATION_ERROR`, cart unchanged
/// - Product not in cart: nothing happens
pub fn update_cart_item(
    cart: &CartState,
    product_id: i64,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    cart.with_cart_mut(|c| {
        let outcome = c.update_quantity(product_id, quantity)?;
        match outcome {
            QuantityUpdate::NotInCart => {
                debug!(product_id, quantity, "update_cart_item for product not in cart")
            }
            _ => debug!(product_id, quantity, ?outcome, "update_cart_item command"),
        }
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Removes a line from the cart. Removing a missing line is not an error.
pub fn remove_from_cart(cart: &CartState, product_id: i64) -> CartResponse {
    cart.with_cart_mut(|c| {
        let removed = c.remove(product_id);
        debug!(product_id, removed, "remove_from_cart command");
        CartResponse::from(&*c)
    })
}
