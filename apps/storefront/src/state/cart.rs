//! # Cart State
//!
//! The shopping cart and the provider that scopes it to a view subtree.
//!
//! ## Provider / Context
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   let provider = CartProvider::new();        ◄── root of the subtree    │
//! │                                                                         │
//! │        provider.context()  ──►  CartContext<'p>  (Copy)                 │
//! │                                     │                                   │
//! │                   ┌─────────────────┼─────────────────┐                 │
//! │                   ▼                 ▼                 ▼                 │
//! │           BrowseProductsPage   row quantities    add / remove           │
//! │                                                                         │
//! │   The borrow checker rejects any context that outlives the provider.   │
//! │   Dropping the provider drops the cart. There is no global cart.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation takes the lock briefly and never across an `.await`.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_cart_size, validate_product_id, validate_quantity};
use storefront_core::{CoreError, CoreResult, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: i64,

    /// Always in `1..=MAX_ITEM_QUANTITY`
    pub quantity: u32,

    pub added_at: DateTime<Utc>,
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product merges quantities)
/// - Every quantity is at least 1 (setting 0 removes the line)
/// - At most `MAX_CART_ITEMS` lines, at most `MAX_ITEM_QUANTITY` per line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,

    /// When the cart was created or last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` of a product, merging with an existing line.
    pub fn add_item(&mut self, product_id: i64, quantity: u32) -> CoreResult<()> {
        validate_product_id(product_id)?;
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let merged = item.quantity.saturating_add(quantity);
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = merged;
            return Ok(());
        }

        if validate_cart_size(self.items.len()).is_err() {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem {
            product_id,
            quantity,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Sets the quantity of a line; `0` removes it.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CoreError::NotInCart(product_id))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: i64) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == before {
            Err(CoreError::NotInCart(product_id))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Quantity of `product_id` in the cart, `0` when absent.
    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Owns the cart for one view subtree.
#[derive(Debug, Default)]
pub struct CartProvider {
    cart: Mutex<Cart>,
}

impl CartProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a context borrowing this provider.
    pub fn context(&self) -> CartContext<'_> {
        CartContext { provider: self }
    }
}

/// Borrowed access to the nearest [`CartProvider`].
#[derive(Debug, Clone, Copy)]
pub struct CartContext<'a> {
    provider: &'a CartProvider,
}

impl<'a> CartContext<'a> {
    /// Runs `f` with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.provider.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Runs `f` with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.provider.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    pub fn add(&self, product_id: i64, quantity: u32) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.add_item(product_id, quantity))
    }

    pub fn update(&self, product_id: i64, quantity: u32) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.update_quantity(product_id, quantity))
    }

    pub fn remove(&self, product_id: i64) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.remove_item(product_id))
    }

    pub fn clear(&self) {
        self.with_cart_mut(Cart::clear)
    }

    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.with_cart(|cart| cart.quantity_of(product_id))
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ValidationError;

    #[test]
    fn test_add_merges_quantities() {
        let mut cart = Cart::new();

        cart.add_item(1, 2).unwrap();
        cart.add_item(1, 3).unwrap();
        cart.add_item(2, 1).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.quantity_of(1), 5);
        assert_eq!(cart.total_quantity(), 6);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(1, 2).unwrap();

        cart.update_quantity(1, 7).unwrap();
        assert_eq!(cart.quantity_of(1), 7);

        cart.update_quantity(1, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(1), 0);
    }

    #[test]
    fn test_missing_items() {
        let mut cart = Cart::new();
        assert!(matches!(cart.remove_item(4), Err(CoreError::NotInCart(4))));
        assert!(matches!(
            cart.update_quantity(4, 1),
            Err(CoreError::NotInCart(4))
        ));
    }

    #[test]
    fn test_limits() {
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add_item(1, 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(cart.add_item(0, 1).is_err());

        cart.add_item(1, MAX_ITEM_QUANTITY).unwrap();
        assert!(matches!(
            cart.add_item(1, 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.quantity_of(1), MAX_ITEM_QUANTITY);

        for id in 2..=MAX_CART_ITEMS as i64 {
            cart.add_item(id, 1).unwrap();
        }
        assert!(matches!(
            cart.add_item(MAX_CART_ITEMS as i64 + 1, 1),
            Err(CoreError::CartTooLarge { .. })
        ));
        assert_eq!(cart.item_count(), MAX_CART_ITEMS);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(1, 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_contexts_share_one_cart() {
        let provider = CartProvider::new();
        let a = provider.context();
        let b = provider.context();

        a.add(3, 2).unwrap();
        b.add(3, 1).unwrap();

        assert_eq!(a.quantity_of(3), 3);
        assert_eq!(
            b.totals(),
            CartTotals {
                item_count: 1,
                total_quantity: 3
            }
        );

        b.clear();
        assert_eq!(a.totals().item_count, 0);
    }

    #[test]
    fn test_providers_are_independent() {
        let first = CartProvider::new();
        let second = CartProvider::new();

        first.context().add(1, 1).unwrap();

        assert_eq!(first.context().quantity_of(1), 1);
        assert_eq!(second.context().quantity_of(1), 0);
    }
}
