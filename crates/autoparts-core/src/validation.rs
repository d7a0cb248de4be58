//! # Validation Module
//!
//! Input validation for the admin product form and the cart.
//!
//! ## Admin Form Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Save product                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name blank?   ──► Required { field: "name" }                          │
//! │  brand blank?  ──► Required { field: "brand" }                         │
//! │  price == 0?   ──► Required { field: "price" }   (0 means "unfilled")  │
//! │  price < 0?    ──► Negative { field: "price" }                         │
//! │  discount>100? ──► OutOfRange { field: "discount", 0..=100 }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OK → persist                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A price of exactly 0 is treated as an unfilled field, so a free item
//! cannot be added through the admin form.
//!
//! ## Usage
//! ```rust
//! use autoparts_core::validation::validate_quantity;
//!
//! assert!(validate_quantity(3).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Product, ProductDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted discount percentage.
pub const MAX_DISCOUNT_PERCENT: u8 = 100;

// =============================================================================
// Product Validators
// =============================================================================

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the admin-editable fields of a product.
///
/// Checks run in form order (name, brand, price, discount) and the first
/// failure is returned.
pub fn validate_product_fields(
    name: &str,
    brand: &str,
    price: i64,
    discount: Option<u8>,
) -> ValidationResult<()> {
    require_text("name", name)?;
    require_text("brand", brand)?;

    if price == 0 {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    if price < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if discount.is_some_and(|d| d > MAX_DISCOUNT_PERCENT) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: i64::from(MAX_DISCOUNT_PERCENT),
        });
    }

    Ok(())
}

/// Validates a new-product form submission.
///
/// ## Example
/// ```rust
/// use autoparts_core::types::ProductDraft;
/// use autoparts_core::validation::validate_draft;
///
/// let blank = ProductDraft::default();
/// assert!(validate_draft(&blank).is_err());
/// ```
pub fn validate_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_fields(&draft.name, &draft.brand, draft.price, draft.discount)
}

/// Validates a complete product record (used after merging an edit).
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_fields(&product.name, &product.brand, product.price, product.discount)
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a requested cart quantity and narrows it to the stored type.
///
/// ## Rules
/// - Negative quantities are rejected
/// - Zero is accepted here; the cart turns it into a removal
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
