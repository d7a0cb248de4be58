//! # Catalog Commands
//!
//! The storefront product grid and its category selector.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Search box: "фильтр"        Category tabs: [Все] [Тормоза] [Фильтры]  │
//! │       │                                          │                      │
//! │       └──────────────┬───────────────────────────┘                      │
//! │                      ▼                                                  │
//! │  browse_catalog(&catalog, "фильтр", "filters")                          │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  CategoryFilter::from_str("filters") ── unknown ──► VALIDATION_ERROR   │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  filter_products(..) ──► Vec<ProductDto> (catalog order)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;
use autoparts_core::{CatalogQuery, Category, CategoryFilter, Money, Product};

/// A product card as the grid renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub category: Category,
    /// Human-readable category label.
    pub category_name: String,
    /// List price in whole rubles.
    pub price: i64,
    /// Price after discount, in kopecks.
    pub effective_price: Money,
    pub discount: Option<u8>,
    pub image: String,
    pub brand: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name.clone(),
            category: p.category,
            category_name: p.category.display_name().to_string(),
            price: p.price,
            effective_price: p.effective_price(),
            discount: p.discount,
            image: p.image.clone(),
            brand: p.brand.clone(),
            in_stock: p.in_stock,
        }
    }
}

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: CategoryFilter,
    pub name: String,
}

/// Filters the storefront catalog.
///
/// ## Arguments
/// * `search` - Case-insensitive name substring (empty matches all)
/// * `category` - Selector id: `"all"`, `"brakes"`, `"engine"` or `"filters"`
pub fn browse_catalog(
    catalog: &CatalogState,
    search: &str,
    category: &str,
) -> Result<Vec<ProductDto>, ApiError> {
    let category: CategoryFilter = category.parse()?;
    let query = CatalogQuery::new(search, category);

    let products: Vec<ProductDto> = catalog.browse(&query).map(ProductDto::from).collect();
    debug!(
        search = %query.search,
        category = %query.category,
        count = products.len(),
        "browse_catalog command"
    );
    Ok(products)
}

/// Lists the category selector entries, "all" first.
pub fn list_categories() -> Vec<CategoryOption> {
    CategoryFilter::options()
        .map(|id| CategoryOption {
            id,
            name: id.display_name().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = CatalogState::seeded();
        let products = browse_catalog(&catalog, "ФИЛЬТР", "all").unwrap();

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(products[0].category_name, "Фильтры");
    }

    #[test]
    fn test_category_selector() {
        let catalog = CatalogState::seeded();

        let brakes = browse_catalog(&catalog, "", "brakes").unwrap();
        assert_eq!(brakes.len(), 2);
        assert_eq!(brakes[0].effective_price, Money::from_rubles(2975));

        let err = browse_catalog(&catalog, "", "tyres").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_category_options() {
        let options = list_categories();
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            ["Все категории", "Тормозная система", "Двигатель", "Фильтры"]
        );

        let json = serde_json::to_value(&options[0]).unwrap();
        assert_eq!(json["id"], "all");
    }
}
