//! # Selector
//!
//! A single-choice control over a fixed or fetched option set.
//!
//! ## Change Flow
//! ```text
//! user picks option ──► Selector::select(value)
//!                           │
//!                           ├── value not offered? ──► Err(NotAllowed), no callback
//!                           │
//!                           └── selected = value ──► on_change(&value)  (synchronous)
//! ```
//!
//! There is no debouncing: every accepted selection reaches the callback
//! before `select` returns.

use std::fmt;

use crate::error::ValidationError;
use crate::filter::CategoryFilter;
use crate::types::{Category, OrderStatus};
use crate::validation::ValidationResult;

/// One option of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
}

impl<V> SelectOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        SelectOption {
            value,
            label: label.into(),
        }
    }
}

type ChangeCallback<V> = Box<dyn FnMut(&V) + Send>;

/// A single-select control.
pub struct Selector<V> {
    field: String,
    options: Vec<SelectOption<V>>,
    selected: Option<V>,
    on_change: ChangeCallback<V>,
}

impl<V: Clone + PartialEq> Selector<V> {
    /// Creates a selector with nothing selected.
    pub fn new(
        field: impl Into<String>,
        options: Vec<SelectOption<V>>,
        on_change: impl FnMut(&V) + Send + 'static,
    ) -> Self {
        Selector {
            field: field.into(),
            options,
            selected: None,
            on_change: Box::new(on_change),
        }
    }

    /// Preselects `value` without notifying the callback.
    ///
    /// Ignored when `value` is not one of the options.
    pub fn with_default(mut self, value: V) -> Self {
        if self.options.iter().any(|o| o.value == value) {
            self.selected = Some(value);
        }
        self
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    /// Labels of every option, in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    pub fn selected(&self) -> Option<&V> {
        self.selected.as_ref()
    }

    /// Label of the current selection, as shown on the closed trigger.
    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected.as_ref()?;
        self.options
            .iter()
            .find(|o| &o.value == selected)
            .map(|o| o.label.as_str())
    }

    /// Selects `value` and emits it to the change callback.
    pub fn select(&mut self, value: V) -> ValidationResult<()> {
        if !self.options.iter().any(|o| o.value == value) {
            return Err(ValidationError::NotAllowed {
                field: self.field.clone(),
                allowed: self.options.iter().map(|o| o.label.clone()).collect(),
            });
        }

        self.selected = Some(value.clone());
        (self.on_change)(&value);
        Ok(())
    }

    /// Selects the option with the given label.
    pub fn select_label(&mut self, label: &str) -> ValidationResult<()> {
        let value = self
            .options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.value.clone())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: self.field.clone(),
                allowed: self.options.iter().map(|o| o.label.clone()).collect(),
            })?;
        self.select(value)
    }
}

impl Selector<OrderStatus> {
    /// The order status selector: New, Processed, Fulfilled with New selected.
    pub fn order_status(on_change: impl FnMut(&OrderStatus) + Send + 'static) -> Self {
        let options = OrderStatus::ALL
            .iter()
            .map(|status| SelectOption::new(*status, status.label()))
            .collect();

        Selector::new("status", options, on_change).with_default(OrderStatus::default())
    }
}

impl Selector<CategoryFilter> {
    /// The category filter: an "All" option followed by every category.
    pub fn category_filter(
        categories: &[Category],
        on_change: impl FnMut(&CategoryFilter) + Send + 'static,
    ) -> Self {
        let options = std::iter::once(CategoryFilter::All)
            .chain(categories.iter().map(|c| CategoryFilter::Category(c.id)))
            .map(|filter| SelectOption::new(filter, filter.label(categories)))
            .collect();

        Selector::new("category", options, on_change).with_default(CategoryFilter::All)
    }
}

impl<V: fmt::Debug> fmt::Debug for Selector<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("field", &self.field)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
