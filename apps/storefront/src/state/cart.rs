//! # Cart State
//!
//! Holds the shopper's cart for the lifetime of the process.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Command                 Cart State Change     │
//! │  ─────────                ───────                 ─────────────────     │
//! │                                                                         │
//! │  "В корзину" ───────────► add_to_cart() ────────► line.qty += 1 / push │
//! │                                                                         │
//! │  +/- buttons ───────────► update_cart_item() ───► line.qty = n (0 = rm)│
//! │                                                                         │
//! │  Trash icon ────────────► remove_from_cart() ───► lines.retain(..)     │
//! │                                                                         │
//! │  Open cart sheet ───────► get_cart() ───────────► (read only)          │
//! │                                                                         │
//! │  NOTE: The lock is never held across an await.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is never persisted; a restart starts with an empty cart.

use std::sync::{Arc, Mutex, PoisonError};

use autoparts_core::Cart;

/// Shared cart state. Clones share the same cart.
///
/// A poisoned lock is recovered, never propagated.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Runs `f` with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Runs `f` with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoparts_core::catalog::seed_catalog;
    use autoparts_core::{CartTotals, Money};

    #[test]
    fn test_clones_share_the_cart() {
        let state = CartState::new();
        let other = state.clone();
        let catalog = seed_catalog();

        other.with_cart_mut(|cart| cart.add(&catalog[1]).unwrap());

        let totals = state.with_cart(|cart| CartTotals::from(cart));
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total, Money::from_rubles(450));
    }

    #[test]
    fn test_concurrent_adds() {
        let state = CartState::new();
        let product = seed_catalog().remove(0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                let product = product.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        state.with_cart_mut(|cart| cart.add(&product).unwrap());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        state.with_cart(|cart| {
            assert_eq!(cart.item_count(), 1);
            assert_eq!(cart.total_quantity(), 80);
        });
    }
}
