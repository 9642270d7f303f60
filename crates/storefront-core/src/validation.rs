//! # Validation Module
//!
//! Input validation for the product form and the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Product form (storefront-app)                                 │
//! │  ├── Runs on submit only, never per keystroke                          │
//! │  └── THIS MODULE: first failing field wins (name, price, category)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Local API (POST /products)                                   │
//! │  └── THIS MODULE again, on the decoded NewProduct                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints on name length and price range                  │
//! │  └── Foreign key to categories                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_price, validate_product_name};
//!
//! assert!(validate_product_name("Bread").is_ok());
//! assert_eq!(validate_price("10").unwrap(), 10.0);
//! assert!(validate_price("1001").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Category, NewProduct};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_NAME_LENGTH, MAX_PRICE, MIN_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Form
// =============================================================================

/// Raw values held by the product form, exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormInput {
    pub name: String,
    pub price: String,
    pub category_id: Option<i64>,
}

/// Validates a whole product form.
///
/// ## Rules
/// Fields are checked in declaration order and the first failure is
/// returned, so the form only ever shows one message:
///
/// ```text
/// name ──► price ──► category ──► Ok(NewProduct)
///   │        │          │
///   ▼        ▼          ▼
///  Err      Err        Err
/// ```
pub fn validate_product_form(input: &ProductFormInput) -> ValidationResult<NewProduct> {
    let name = validate_product_name(&input.name)?;
    let price = validate_price(&input.price)?;
    let category_id = validate_category(input.category_id)?;

    Ok(NewProduct {
        name,
        price,
        category_id,
    })
}

/// Validates an already-decoded payload, as received by the API.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price_value(product.price)?;
    validate_category(Some(product.category_id))?;
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - Must be at most 255 characters once surrounding whitespace is trimmed
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Bread").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// assert!(validate_product_name(&"a".repeat(256)).is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price typed into the form.
///
/// ## Rules
/// ```text
/// ""  / "abc" / "NaN"  ──► Required
/// "0" / "-1"           ──► BelowMinimum { min: 1 }
/// "1001"               ──► AboveMaximum { max: 1000 }
/// "10"                 ──► Ok(10.0)
/// ```
pub fn validate_price(raw: &str) -> ValidationResult<f64> {
    let price = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ValidationError::Required {
            field: "price".to_string(),
        })?;

    validate_price_value(price)?;
    Ok(price)
}

/// Validates a numeric price against the accepted range.
pub fn validate_price_value(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    if price < MIN_PRICE as f64 {
        return Err(ValidationError::BelowMinimum {
            field: "price".to_string(),
            min: MIN_PRICE,
        });
    }

    if price > MAX_PRICE as f64 {
        return Err(ValidationError::AboveMaximum {
            field: "price".to_string(),
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates the category selection.
pub fn validate_category(category_id: Option<i64>) -> ValidationResult<i64> {
    match category_id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::Required {
            field: "category".to_string(),
        }),
    }
}

/// Validates that the selected category is one of the options offered.
///
/// A form only offers the categories it fetched, so an id outside that list
/// is rejected with the list of names that were on offer.
pub fn validate_category_choice(category_id: i64, offered: &[Category]) -> ValidationResult<()> {
    if offered.iter().any(|c| c.id == category_id) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "category".to_string(),
        allowed: offered.iter().map(|c| c.name.clone()).collect(),
    })
}

/// Validates a product identifier before a request is issued.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_product_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::AboveMaximum {
            field: "quantity".to_string(),
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct product fits in the cart.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::AboveMaximum {
            field: "cart items".to_string(),
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProductFormInput {
        ProductFormInput {
            name: "Bread".to_string(),
            price: "10".to_string(),
            category_id: Some(1),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Bread ").unwrap(), "Bread");
        assert!(validate_product_name(&"a".repeat(255)).is_ok());

        assert_eq!(
            validate_product_name("").unwrap_err(),
            ValidationError::Required {
                field: "name".to_string()
            }
        );
        assert!(validate_product_name("   ").is_err());

        let err = validate_product_name(&"a".repeat(256)).unwrap_err();
        assert!(err.to_string().contains("255"));
    }

    #[test]
    fn test_name_length_counts_trimmed_chars() {
        let padded = format!("{} ", "a".repeat(255));
        assert_eq!(validate_product_name(&padded).unwrap(), "a".repeat(255));

        let padded = format!("  {}  ", "a".repeat(256));
        assert!(matches!(
            validate_product_name(&padded),
            Err(ValidationError::TooLong { max: 255, .. })
        ));

        // Characters, not bytes.
        assert!(validate_product_name(&"é".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_category_choice() {
        let offered = vec![
            Category {
                id: 1,
                name: "Bakery".to_string(),
            },
            Category {
                id: 2,
                name: "Dairy".to_string(),
            },
        ];

        assert!(validate_category_choice(2, &offered).is_ok());
        assert_eq!(
            validate_category_choice(9999, &offered).unwrap_err(),
            ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: vec!["Bakery".to_string(), "Dairy".to_string()],
            }
        );
        assert!(validate_category_choice(1, &[]).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price("1").unwrap(), 1.0);
        assert_eq!(validate_price("1000").unwrap(), 1000.0);
        assert_eq!(validate_price(" 9.99 ").unwrap(), 9.99);

        for raw in ["", "a", "NaN", "inf"] {
            let err = validate_price(raw).unwrap_err();
            assert!(err.to_string().contains("required"), "{raw}: {err}");
        }

        for raw in ["0", "-1", "0.5"] {
            let err = validate_price(raw).unwrap_err();
            assert!(matches!(err, ValidationError::BelowMinimum { min: 1, .. }));
            assert!(err.to_string().contains('1'));
        }

        let err = validate_price("1001").unwrap_err();
        assert!(matches!(err, ValidationError::AboveMaximum { max: 1000, .. }));
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn test_validate_form_success() {
        let product = validate_product_form(&valid_input()).unwrap();
        assert_eq!(
            product,
            NewProduct {
                name: "Bread".to_string(),
                price: 10.0,
                category_id: 1,
            }
        );
    }

    #[test]
    fn test_validate_form_reports_first_failure_only() {
        let input = ProductFormInput {
            name: String::new(),
            price: "abc".to_string(),
            category_id: None,
        };
        assert_eq!(validate_product_form(&input).unwrap_err().field(), "name");

        let input = ProductFormInput {
            price: "abc".to_string(),
            category_id: None,
            ..valid_input()
        };
        assert_eq!(validate_product_form(&input).unwrap_err().field(), "price");

        let input = ProductFormInput {
            category_id: None,
            ..valid_input()
        };
        assert_eq!(validate_product_form(&input).unwrap_err().field(), "category");
    }

    #[test]
    fn test_validate_new_product() {
        let ok = NewProduct {
            name: "Bread".to_string(),
            price: 10.0,
            category_id: 1,
        };
        assert!(validate_new_product(&ok).is_ok());

        let too_expensive = NewProduct {
            price: 5000.0,
            ..ok.clone()
        };
        assert!(validate_new_product(&too_expensive).is_err());

        let no_category = NewProduct { category_id: 0, ..ok };
        assert!(validate_new_product(&no_category).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(1).is_ok());
        assert!(validate_product_id(0).is_err());
        assert!(validate_product_id(-5).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
    }
}
