//! # Cart
//!
//! The in-memory shopping cart.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Cart Method             State Change          │
//! │  ─────────────────        ───────────             ────────────          │
//! │                                                                         │
//! │  "В корзину" ────────────► add() ────────────────► qty += 1 or push    │
//! │                                                                         │
//! │  − / + buttons ──────────► update_quantity() ────► qty = n (0 removes) │
//! │                                                                         │
//! │  Trash icon ─────────────► remove() ─────────────► line dropped        │
//! │                                                                         │
//! │  Cart sheet ─────────────► total() ──────────────► (computed, read)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is never persisted: a reload starts with an empty cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// ## Snapshot Pattern
/// The product is copied when first added, so later edits to the admin
/// catalog do not change the price of a line already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product data at the time of adding (frozen).
    pub product: Product,

    /// Always at least 1; a line that would reach 0 is removed instead.
    pub quantity: u32,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn product_id(&self) -> i64 {
        self.product.id
    }

    /// Effective unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.effective_price() * self.quantity
    }

    /// List unit price × quantity (before discount).
    pub fn line_subtotal(&self) -> Money {
        self.product.list_price() * self.quantity
    }
}

// =============================================================================
// Quantity Update Outcome
// =============================================================================

/// What `Cart::update_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuantityUpdate {
    /// The line now has the requested quantity.
    Updated,
    /// Quantity 0 was requested and the line was dropped.
    Removed,
    /// No line for that product; nothing changed.
    NotInCart,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id (adding again increases quantity)
/// - No stored line has quantity 0
/// - Lines keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1
    /// - Not in cart: appended with quantity 1 and a snapshot of the product
    ///
    /// ## Returns
    /// The line's quantity after the add.
    ///
    /// ## Errors
    /// `OutOfRange` if the line is already at the largest storable
    /// quantity; the cart is unchanged.
    pub fn add(&mut self, product: &Product) -> CoreResult<u32> {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line
                .quantity
                .checked_add(1)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: i64::from(u32::MAX),
                })?;
            return Ok(line.quantity);
        }

        self.lines.push(CartLine::new(product));
        Ok(1)
    }

    /// Removes the line for `product_id`.
    ///
    /// Returns `false` when there was no such line (not an error).
    pub fn remove(&mut self, product_id: i64) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.product_id() != product_id);
        self.lines.len() != initial_len
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity < 0`: rejected, cart unchanged
    /// - `quantity == 0`: same as `remove`
    /// - product not in cart: no-op, no line is created
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) -> CoreResult<QuantityUpdate> {
        let quantity = validate_quantity(quantity)?;

        if quantity == 0 {
            return Ok(if self.remove(product_id) {
                QuantityUpdate::Removed
            } else {
                QuantityUpdate::NotInCart
            });
        }

        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(QuantityUpdate::Updated)
            }
            None => Ok(QuantityUpdate::NotInCart),
        }
    }

    /// Returns the line for `product_id`, if present.
    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: i64) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id() == product_id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products (the cart badge).
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of list prices × quantities, before discounts.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_subtotal).sum()
    }

    /// Sum of effective prices × quantities. Recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// How much the discounts take off the subtotal.
    pub fn savings(&self) -> Money {
        self.subtotal() - self.total()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Cart totals summary for the cart sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
    pub subtotal: Money,
    pub savings: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            savings: cart.savings(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_catalog;
    use crate::error::CoreError;
    use crate::types::Category;

    fn test_product(id: i64, price: i64, discount: Option<u8>) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            category: Category::Brakes,
            price,
            image: String::new(),
            brand: "Brand".to_string(),
            in_stock: true,
            discount,
        }
    }

    #[test]
    fn test_add_same_product_twice_keeps_one_line() {
        let mut cart = Cart::new();
        let product = test_product(1, 100, None);

        assert_eq!(cart.add(&product).unwrap(), 1);
        assert_eq!(cart.add(&product).unwrap(), 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&test_product(3, 10, None)).unwrap();
        cart.add(&test_product(1, 10, None)).unwrap();
        cart.add(&test_product(3, 10, None)).unwrap();

        let ids: Vec<i64> = cart.lines().iter().map(CartLine::product_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_storefront_scenario_totals() {
        let mut cart = Cart::new();
        assert!(cart.total().is_zero());

        cart.add(&test_product(1, 3500, Some(15))).unwrap();
        assert_eq!(cart.total(), Money::from_rubles(2975));

        cart.add(&test_product(2, 450, None)).unwrap();
        assert_eq!(cart.line(2).map(|l| l.quantity), Some(1));
        assert_eq!(cart.total(), Money::from_rubles(3425));

        assert_eq!(cart.update_quantity(1, 0).unwrap(), QuantityUpdate::Removed);
        assert_eq!(cart.total(), Money::from_rubles(450));
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let catalog = seed_catalog();
        let mut by_update = Cart::new();
        let mut by_remove = Cart::new();
        for product in &catalog[..3] {
            by_update.add(product).unwrap();
            by_remove.add(product).unwrap();
        }

        by_update.update_quantity(2, 0).unwrap();
        by_remove.remove(2);

        let ids = |cart: &Cart| cart.lines().iter().map(CartLine::product_id).collect::<Vec<_>>();
        assert_eq!(ids(&by_update), ids(&by_remove));
        assert_eq!(by_update.total(), by_remove.total());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 450, None)).unwrap();

        assert_eq!(cart.update_quantity(1, 4).unwrap(), QuantityUpdate::Updated);
        assert_eq!(cart.total(), Money::from_rubles(1800));
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_update_quantity_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 450, None)).unwrap();

        assert_eq!(cart.update_quantity(99, 3).unwrap(), QuantityUpdate::NotInCart);
        assert_eq!(cart.update_quantity(99, 0).unwrap(), QuantityUpdate::NotInCart);
        assert_eq!(cart.item_count(), 1);
        assert!(cart.line(99).is_none());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 450, None)).unwrap();

        let err = cart.update_quantity(1, -1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_independent_of_add_order() {
        let catalog = seed_catalog();

        let mut forward = Cart::new();
        for product in &catalog {
            forward.add(product).unwrap();
        }
        forward.add(&catalog[0]).unwrap();

        let mut backward = Cart::new();
        backward.add(&catalog[0]).unwrap();
        for product in catalog.iter().rev() {
            backward.add(product).unwrap();
        }

        assert_eq!(forward.total(), backward.total());
    }

    #[test]
    fn test_line_keeps_price_snapshot() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 1000, None);
        cart.add(&product).unwrap();

        product.price = 5000;
        cart.add(&product).unwrap();

        assert_eq!(cart.total(), Money::from_rubles(2000));
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 3500, Some(15))).unwrap();
        cart.add(&test_product(1, 3500, Some(15))).unwrap();
        cart.add(&test_product(2, 450, None)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal, Money::from_rubles(7450));
        assert_eq!(totals.total, Money::from_rubles(6400));
        assert_eq!(totals.savings, Money::from_rubles(1050));
    }

    #[test]
    fn test_add_at_max_quantity_is_rejected() {
        let catalog = seed_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog[1]).unwrap();
        assert_eq!(
            cart.update_quantity(2, i64::from(u32::MAX)).unwrap(),
            QuantityUpdate::Updated
        );

        let err = cart.add(&catalog[1]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart.line(2).map(|l| l.quantity), Some(u32::MAX));
    }
}
