//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In the browser storefront:                                             │
//! │    550 * (1 - 15 / 100) = 467.49999999999994  ❌ WRONG!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Kopecks                                          │
//! │    55000 kopecks * 85 / 100 = 46750 kopecks = 467.50 ₽                 │
//! │    Whole-ruble prices with whole-percent discounts are always exact    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use autoparts_core::money::Money;
//! use autoparts_core::types::Discount;
//!
//! let price = Money::from_rubles(3500);
//! let discounted = price.apply_discount(Discount::from_percent(15));
//! assert_eq!(discounted, Money::from_rubles(2975));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Discount;

/// Kopecks per ruble.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (kopecks).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for savings deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Product::effective_price() ──► CartLine::line_total()
///                                                        │
///                                                        ▼
///                                                  Cart::total()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kopecks (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use autoparts_core::money::Money;
    ///
    /// let price = Money::from_kopecks(46750); // 467.50 ₽
    /// assert_eq!(price.kopecks(), 46750);
    /// ```
    #[inline]
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Money(kopecks)
    }

    /// Creates a Money value from whole rubles.
    ///
    /// Catalog prices are whole rubles, so this is how product prices
    /// enter the money domain.
    #[inline]
    pub const fn from_rubles(rubles: i64) -> Self {
        Money(rubles * MINOR_PER_MAJOR)
    }

    /// Returns the value in kopecks.
    #[inline]
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Returns the whole-ruble portion.
    ///
    /// ## Example
    /// ```rust
    /// use autoparts_core::money::Money;
    ///
    /// assert_eq!(Money::from_kopecks(46750).rubles(), 467);
    /// assert_eq!(Money::from_kopecks(-550).rubles(), -5);
    /// ```
    #[inline]
    pub const fn rubles(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the kopeck portion (always 0-99).
    #[inline]
    pub const fn kopecks_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Rounding
    /// Half a kopeck rounds up. For whole-ruble amounts the result is
    /// always exact because `rubles * 100 * (100 - pct)` is divisible by 100.
    ///
    /// ## Example
    /// ```rust
    /// use autoparts_core::money::Money;
    /// use autoparts_core::types::Discount;
    ///
    /// let price = Money::from_rubles(550);
    /// let discounted = price.apply_discount(Discount::from_percent(15));
    /// assert_eq!(discounted.kopecks(), 46750); // 467.50 ₽
    /// ```
    pub fn apply_discount(&self, discount: Discount) -> Money {
        // i128 so that large prices cannot overflow the intermediate product
        let remaining = i128::from(100 - discount.percent());
        let kopecks = (i128::from(self.0) * remaining + 50) / 100;
        Money::from_kopecks(kopecks as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use autoparts_core::money::Money;
    ///
    /// let unit_price = Money::from_rubles(450);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_rubles(1350));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as rubles with kopecks.
///
/// ## Note
/// This is for logs. The app layer's `StorefrontConfig::format_currency`
/// is what the UI uses.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} ₽",
            sign,
            self.rubles().abs(),
            self.kopecks_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing line totals into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
