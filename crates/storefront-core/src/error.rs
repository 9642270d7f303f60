//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Cart and domain rule failures                   │
//! │  ├── ValidationError  - Form field failures (never reach a handler)     │
//! │  └── FetchError       - Why a fetch ended in the Failed state           │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  storefront-app errors                                                  │
//! │  └── ApiError         - What crosses the Api seam                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → FetchError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Category cannot be found.
    ///
    /// ## When This Occurs
    /// - A submitted product references a category that was deleted
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// Cart has reached the maximum number of distinct products.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// The product is not in the cart.
    #[error("Product {0} not in cart")]
    NotInCart(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The messages are shown verbatim in the form's alert, so they name the
/// bound that was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, empty, or not parseable.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is under the lower bound.
    #[error("{field} must be greater than or equal to {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Numeric value is over the upper bound.
    #[error("{field} must be less than or equal to {max}")]
    AboveMaximum { field: String, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Returns the name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Fetch Error
// =============================================================================

/// Why a fetch settled in the failed state.
///
/// ## Rendering
/// ```text
/// InvalidId  ──► "Invalid product id"            (no request issued)
/// NotFound   ──► "The given product was not found."
/// Network    ──► "An unexpected error occurred."  (detail only in logs)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The identifier was rejected before any request was made.
    #[error("Invalid {resource} id: {id}")]
    InvalidId { resource: String, id: i64 },

    /// The request succeeded but the payload was empty.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The request failed, returned a non-2xx status, or could not be decoded.
    #[error("Request failed: {0}")]
    Network(String),
}

impl FetchError {
    /// Message shown to the user.
    ///
    /// Network failures are deliberately generic; the cause is logged.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::InvalidId { resource, .. } => format!("Invalid {} id", resource),
            FetchError::NotFound { resource } => {
                format!("The given {} was not found.", resource)
            }
            FetchError::Network(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Generic wording used for every network and submission failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
