//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │    Discount     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  percent (u8)   │       │
//! │  │  name, brand    │   │  email, name    │   │  15 = 15% off   │       │
//! │  │  category       │   │  role           │   └─────────────────┘       │
//! │  │  price (₽)      │   └─────────────────┘                             │
//! │  │  discount?      │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │    Category     │   │      Role       │       │
//! │                        │  Brakes         │   │  User           │       │
//! │                        │  Engine         │   │  Admin          │       │
//! │                        │  Filters        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names match the JSON the browser storefront keeps in local storage
//! (`stock`, not `in_stock`), so records written by either side round-trip.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Discount
// =============================================================================

/// A percentage discount, clamped to 0-100.
///
/// Clamping on construction keeps the effective price non-negative even
/// when a stored record carries an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Discount(u8);

impl Discount {
    /// Creates a discount from a whole percentage; values above 100 clamp to 100.
    #[inline]
    pub fn from_percent(percent: u8) -> Self {
        Discount(percent.min(100))
    }

    /// Returns the discount as a whole percentage.
    #[inline]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Checks if the discount is zero (no reduction).
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Brake pads, discs, calipers.
    Brakes,
    /// Engine kits and ignition.
    Engine,
    /// Oil, air and cabin filters.
    Filters,
}

impl Category {
    /// Every category, in storefront selector order.
    pub const ALL: [Category; 3] = [Category::Brakes, Category::Engine, Category::Filters];

    /// The identifier used in storage and in the category selector.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Brakes => "brakes",
            Category::Engine => "engine",
            Category::Filters => "filters",
        }
    }

    /// The label shown in the storefront and admin table.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Brakes => "Тормозная система",
            Category::Engine => "Двигатель",
            Category::Filters => "Фильтры",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: i64,

    /// Display name (searched by the catalog filter).
    pub name: String,

    pub category: Category,

    /// Unit price in whole rubles.
    pub price: i64,

    /// Opaque image reference (URL).
    pub image: String,

    pub brand: String,

    /// Availability flag.
    #[serde(rename = "stock")]
    pub in_stock: bool,

    /// Optional discount percentage (0-100). Absent means no discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
}

impl Product {
    /// Returns the list price as Money.
    #[inline]
    pub fn list_price(&self) -> Money {
        Money::from_rubles(self.price)
    }

    /// Returns the discount, if any.
    #[inline]
    pub fn discount(&self) -> Option<Discount> {
        self.discount.map(Discount::from_percent)
    }

    /// Whether a non-zero discount applies.
    pub fn has_discount(&self) -> bool {
        self.discount().is_some_and(|d| !d.is_zero())
    }

    /// Unit price after the optional discount.
    ///
    /// `price × (1 − discount / 100)` when a discount is present, else `price`.
    ///
    /// ## Example
    /// ```rust
    /// use autoparts_core::catalog::seed_catalog;
    /// use autoparts_core::Money;
    ///
    /// let pads = &seed_catalog()[0]; // 3500 ₽, 15% off
    /// assert_eq!(pads.effective_price(), Money::from_rubles(2975));
    /// ```
    pub fn effective_price(&self) -> Money {
        match self.discount() {
            Some(discount) => self.list_price().apply_discount(discount),
            None => self.list_price(),
        }
    }
}

// =============================================================================
// Admin Form Input
// =============================================================================

/// Image used when the admin form is opened for a new product.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://cdn.poehali.dev/projects/c83f47bd-a908-4a14-9fde-752a62506983/files/0a7b622b-0ffc-4240-881b-95d78761629d.jpg";

/// Fields submitted by the admin "add product" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub price: i64,
    pub image: String,
    pub brand: String,
    #[serde(rename = "stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub discount: Option<u8>,
}

impl Default for ProductDraft {
    /// The blank form: brakes, price 0, default image, in stock, 0% discount.
    fn default() -> Self {
        ProductDraft {
            name: String::new(),
            category: Category::Brakes,
            price: 0,
            image: DEFAULT_PRODUCT_IMAGE.to_string(),
            brand: String::new(),
            in_stock: true,
            discount: Some(0),
        }
    }
}

impl ProductDraft {
    /// Builds the stored product; an omitted discount is stored as 0.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            image: self.image,
            brand: self.brand,
            in_stock: self.in_stock,
            discount: Some(self.discount.unwrap_or(0)),
        }
    }
}

/// Fields submitted by the admin "edit product" form.
///
/// Each present field overwrites the stored value; the id never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "stock")]
    pub in_stock: Option<bool>,
    pub discount: Option<u8>,
}

impl ProductPatch {
    /// Returns `existing` with every present field replaced.
    pub fn apply_to(&self, existing: &Product) -> Product {
        let mut merged = existing.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(price) = self.price {
            merged.price = price;
        }
        if let Some(image) = &self.image {
            merged.image = image.clone();
        }
        if let Some(brand) = &self.brand {
            merged.brand = brand.clone();
        }
        if let Some(in_stock) = self.in_stock {
            merged.in_stock = in_stock;
        }
        if let Some(discount) = self.discount {
            merged.discount = Some(discount);
        }
        merged
    }
}

impl From<Product> for ProductPatch {
    /// A patch that rewrites every field, as the edit dialog submits it.
    fn from(product: Product) -> Self {
        ProductPatch {
            name: Some(product.name),
            category: Some(product.category),
            price: Some(product.price),
            image: Some(product.image),
            brand: Some(product.brand),
            in_stock: Some(product.in_stock),
            discount: product.discount,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Display name.
    pub name: String,
    pub role: Role,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i64, discount: Option<u8>) -> Product {
        Product {
            id: 1,
            name: "Тормозные колодки".to_string(),
            category: Category::Brakes,
            price,
            image: DEFAULT_PRODUCT_IMAGE.to_string(),
            brand: "Brembo".to_string(),
            in_stock: true,
            discount,
        }
    }

    #[test]
    fn test_effective_price_with_discount() {
        assert_eq!(product(3500, Some(15)).effective_price(), Money::from_rubles(2975));
    }

    #[test]
    fn test_effective_price_without_discount() {
        assert_eq!(product(450, None).effective_price(), Money::from_rubles(450));
        assert_eq!(product(450, Some(0)).effective_price(), Money::from_rubles(450));
        assert!(!product(450, Some(0)).has_discount());
    }

    #[test]
    fn test_effective_price_clamps_out_of_range_discount() {
        let p = product(800, Some(150));
        assert!(p.effective_price().is_zero());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("engine".parse::<Category>().unwrap(), Category::Engine);
        assert!("wheels".parse::<Category>().is_err());
        assert_eq!(Category::Filters.display_name(), "Фильтры");
    }

    #[test]
    fn test_product_json_matches_storefront_shape() {
        let json = serde_json::to_value(product(450, None)).unwrap();
        assert_eq!(json["stock"], true);
        assert_eq!(json["category"], "brakes");
        assert!(json.get("discount").is_none());

        let parsed: Product = serde_json::from_str(
            r#"{"id":2,"name":"Масляный фильтр","category":"filters","price":450,
                "image":"x","brand":"Mann","stock":true}"#,
        )
        .unwrap();
        assert_eq!(parsed.discount, None);
        assert!(parsed.in_stock);
    }

    #[test]
    fn test_draft_defaults_discount_to_zero() {
        let draft = ProductDraft {
            name: "Колодки".to_string(),
            brand: "ATE".to_string(),
            price: 1200,
            discount: None,
            ..ProductDraft::default()
        };
        let product = draft.into_product(42);
        assert_eq!(product.id, 42);
        assert_eq!(product.discount, Some(0));
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let existing = product(3500, Some(15));
        let patch = ProductPatch {
            price: Some(3900),
            in_stock: Some(false),
            ..ProductPatch::default()
        };
        let merged = patch.apply_to(&existing);
        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.name, existing.name);
        assert_eq!(merged.price, 3900);
        assert!(!merged.in_stock);
        assert_eq!(merged.discount, Some(15));
    }

    #[test]
    fn test_user_role_serialization() {
        let user = User {
            id: 1,
            email: "admin@autoparts.ru".to_string(),
            name: "Администратор".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""role":"admin""#));
        assert!(user.is_admin());
    }
}
