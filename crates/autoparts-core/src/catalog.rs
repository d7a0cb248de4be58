//! # Catalog
//!
//! The fixed storefront catalog and the search/category filter.
//!
//! ## Filter Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──► name contains query (case-insensitive) ──┐               │
//! │                                                        AND ──► results │
//! │           ──► category == selector OR selector == all ─┘               │
//! │                                                                         │
//! │  • source order preserved, no pagination                               │
//! │  • empty query matches everything                                      │
//! │  • re-run on every input change; nothing cached                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Category, Product};

const IMAGE_BRAKES: &str =
    "https://cdn.poehali.dev/projects/c83f47bd-a908-4a14-9fde-752a62506983/files/3e49715f-e2c0-4381-b926-8f27dba2e7d3.jpg";
const IMAGE_FILTERS: &str =
    "https://cdn.poehali.dev/projects/c83f47bd-a908-4a14-9fde-752a62506983/files/da726a92-fe29-4088-a9f0-19e7f87232c6.jpg";
const IMAGE_ENGINE: &str = crate::types::DEFAULT_PRODUCT_IMAGE;

// =============================================================================
// Category Selector
// =============================================================================

/// The storefront category selector: one category or the "all" wildcard.
///
/// Serialized as the selector string (`"all"`, `"brakes"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this selector.
    #[inline]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    /// Selector label ("Все категории" for the wildcard).
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Все категории",
            CategoryFilter::Only(category) => category.display_name(),
        }
    }

    /// Every selector option in display order, wildcard first.
    pub fn options() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>()
            .map(CategoryFilter::Only)
            .map_err(|_| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: CategoryFilter::options().map(|o| o.to_string()).collect(),
            })
    }
}

// =============================================================================
// Query + Filter
// =============================================================================

/// The two storefront inputs that drive the catalog grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text search over product names.
    pub search: String,
    pub category: CategoryFilter,
}

impl CatalogQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        CatalogQuery {
            search: search.into(),
            category,
        }
    }

    /// Applies this query to `products`.
    pub fn apply<'a>(&self, products: &'a [Product]) -> impl Iterator<Item = &'a Product> + 'a {
        filter_products(products, &self.search, self.category)
    }
}

/// Lazily filters `products` by case-insensitive name substring and category.
///
/// ## Example
/// ```rust
/// use autoparts_core::catalog::{filter_products, seed_catalog, CategoryFilter};
/// use autoparts_core::Category;
///
/// let catalog = seed_catalog();
/// let names: Vec<_> = filter_products(&catalog, "ФИЛЬТР", CategoryFilter::All)
///     .map(|p| p.name.as_str())
///     .collect();
/// assert_eq!(names, ["Масляный фильтр", "Воздушный фильтр"]);
///
/// let brakes = filter_products(&catalog, "", Category::Brakes.into()).count();
/// assert_eq!(brakes, 2);
/// ```
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    category: CategoryFilter,
) -> impl Iterator<Item = &'a Product> + 'a {
    let needle = query.to_lowercase();
    products.iter().filter(move |product| {
        category.matches(product.category)
            && (needle.is_empty() || product.name.to_lowercase().contains(&needle))
    })
}

// =============================================================================
// Seed Catalog
// =============================================================================

fn seed_product(
    id: i64,
    name: &str,
    category: Category,
    price: i64,
    image: &str,
    brand: &str,
    in_stock: bool,
    discount: Option<u8>,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        category,
        price,
        image: image.to_string(),
        brand: brand.to_string(),
        in_stock,
        discount,
    }
}

/// The six products shown by the storefront and used to seed the admin store.
///
/// Order is significant: it is the display order of both views.
pub fn seed_catalog() -> Vec<Product> {
    vec![
        seed_product(1, "Тормозные колодки", Category::Brakes, 3500, IMAGE_BRAKES, "Brembo", true, Some(15)),
        seed_product(2, "Масляный фильтр", Category::Filters, 450, IMAGE_FILTERS, "Mann", true, None),
        seed_product(3, "Комплект двигателя", Category::Engine, 25000, IMAGE_ENGINE, "Bosch", true, Some(20)),
        seed_product(4, "Воздушный фильтр", Category::Filters, 550, IMAGE_FILTERS, "Mann", true, None),
        seed_product(5, "Тормозные диски", Category::Brakes, 5200, IMAGE_BRAKES, "Brembo", true, None),
        seed_product(6, "Свечи зажигания", Category::Engine, 800, IMAGE_ENGINE, "NGK", false, None),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(iter: impl Iterator<Item = &'a Product>) -> Vec<i64> {
        iter.map(|p| p.id).collect()
    }

    #[test]
    fn test_seed_catalog_order() {
        let catalog = seed_catalog();
        assert_eq!(ids(catalog.iter()), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(catalog[0].discount, Some(15));
        assert!(!catalog[5].in_stock);
    }

    #[test]
    fn test_empty_query_all_categories_returns_everything() {
        let catalog = seed_catalog();
        assert_eq!(ids(filter_products(&catalog, "", CategoryFilter::All)).len(), 6);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = seed_catalog();
        assert_eq!(ids(filter_products(&catalog, "тормозные", CategoryFilter::All)), vec![1, 5]);
        assert_eq!(ids(filter_products(&catalog, "ДИСКИ", CategoryFilter::All)), vec![5]);
        assert!(ids(filter_products(&catalog, "колесо", CategoryFilter::All)).is_empty());
    }

    #[test]
    fn test_category_and_search_combine() {
        let catalog = seed_catalog();
        let engine: CategoryFilter = Category::Engine.into();
        assert_eq!(ids(filter_products(&catalog, "", engine)), vec![3, 6]);
        assert_eq!(ids(filter_products(&catalog, "свечи", engine)), vec![6]);
        assert!(ids(filter_products(&catalog, "фильтр", engine)).is_empty());
    }

    #[test]
    fn test_query_does_not_match_brand() {
        let catalog = seed_catalog();
        assert!(ids(filter_products(&catalog, "brembo", CategoryFilter::All)).is_empty());
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "filters".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Filters)
        );
        assert!("tyres".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::options().count(), 4);
    }

    #[test]
    fn test_selector_serializes_as_string() {
        let query = CatalogQuery::new("", Category::Brakes.into());
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["category"], "brakes");

        let parsed: CatalogQuery =
            serde_json::from_str(r#"{"search":"диски","category":"all"}"#).unwrap();
        assert_eq!(parsed.category, CategoryFilter::All);
    }

    #[test]
    fn test_catalog_query_apply() {
        let catalog = seed_catalog();
        let query = CatalogQuery::new("фильтр", Category::Filters.into());
        assert_eq!(ids(query.apply(&catalog)), vec![2, 4]);
    }
}
