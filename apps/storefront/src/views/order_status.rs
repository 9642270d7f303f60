//! Order status picker.

use std::sync::Mutex;

use storefront_core::validation::ValidationResult;
use storefront_core::{OrderStatus, Selector};

/// A status selector with `New` preselected.
#[derive(Debug)]
pub struct OrderStatusSelect {
    selector: Mutex<Selector<OrderStatus>>,
}

impl OrderStatusSelect {
    /// `on_change` receives every accepted selection, synchronously.
    pub fn new(on_change: impl FnMut(&OrderStatus) + Send + 'static) -> Self {
        OrderStatusSelect {
            selector: Mutex::new(Selector::order_status(on_change)),
        }
    }

    /// Option labels in display order.
    pub fn options(&self) -> Vec<String> {
        self.lock().labels().into_iter().map(String::from).collect()
    }

    pub fn selected(&self) -> OrderStatus {
        self.lock().selected().copied().unwrap_or_default()
    }

    pub fn select(&self, status: OrderStatus) -> ValidationResult<()> {
        self.lock().select(status)
    }

    /// Selects by label, as a user picking from the open list would.
    pub fn select_label(&self, label: &str) -> ValidationResult<()> {
        self.lock().select_label(label)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Selector<OrderStatus>> {
        self.selector.lock().expect("Status selector mutex poisoned")
    }
}
