//! # Domain Types
//!
//! Core domain types shared by the fixture database, the API seam and the
//! views.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (≥ 1)       │   │  name           │   │  id             │       │
//! │  │  name           │   │  price          │   │  name           │       │
//! │  │  price [1,1000] │   │  category_id    │   └─────────────────┘       │
//! │  │  category_id ───┼──►│  (form payload) │                             │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────┐       │
//! │                                              │  OrderStatus    │       │
//! │                                              │  New (default)  │       │
//! │                                              │  Processed      │       │
//! │                                              │  Fulfilled      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All structs serialize as camelCase, which is what the browser frontend
//! and the API payloads use.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Database identifier, always ≥ 1.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name, 1 to 255 characters.
    pub name: String,

    /// Unit price, within [1, 1000].
    pub price: f64,

    /// Category this product belongs to.
    #[ts(type = "number")]
    pub category_id: i64,
}

impl Product {
    /// Returns the submission payload for this product (everything but the id).
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            price: self.price,
            category_id: self.category_id,
        }
    }
}

/// The payload a product form submits.
///
/// Only ever constructed from validated input, so `price` is within bounds
/// and `name` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[ts(type = "number")]
    pub category_id: i64,
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Read-only from the views' perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// The fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order was placed and nothing has happened yet.
    #[default]
    New,
    /// Order is being prepared.
    Processed,
    /// Order was handed over to the customer.
    Fulfilled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::New,
        OrderStatus::Processed,
        OrderStatus::Fulfilled,
    ];

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Processed => "Processed",
            OrderStatus::Fulfilled => "Fulfilled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
