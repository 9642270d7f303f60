//! # Product Form
//!
//! Create/edit form for a product. Validates on submit only.
//!
//! ## Submit Flow
//! ```text
//! submit(handler)
//!    │
//!    ├── categories not loaded? ────────────► Unavailable
//!    │
//!    ├── already submitting? ───────────────► Busy
//!    │
//!    ├── validate name ─► price ─► category
//!    │        │                    └── not one of the loaded options
//!    │        └── first failure ─────────────► Invalid(error)
//!    │                                          handler not called
//!    │                                          focus untouched
//!    │
//!    └── submitting = true  (submit disabled)
//!           │
//!           handler(NewProduct).await
//!           │
//!        submitting = false (submit enabled)
//!           ├── Ok  ─────────────────────────► Submitted
//!           └── Err ─► warn! + status toast ─► Failed
//! ```

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use storefront_core::validation::{
    validate_category_choice, validate_product_form, ProductFormInput,
};
use storefront_core::{
    Category, FetchState, NewProduct, Product, SelectOption, ValidationError,
    GENERIC_ERROR_MESSAGE,
};
use tracing::{debug, warn};

use crate::api::Api;
use crate::fetcher::ResourceFetcher;
use crate::state::{ToastKind, Toaster};

/// Form inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Price,
    Category,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not called.
    Invalid(ValidationError),
    /// The handler resolved.
    Submitted,
    /// The handler rejected; a toast was shown.
    Failed,
    /// A previous submit is still pending.
    Busy,
    /// The category options are loading or failed to load, so the form is
    /// not on screen.
    Unavailable,
}

/// What the form shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FormView {
    /// Categories are loading.
    Skeleton,
    /// Categories failed to load.
    Error(String),
    Fields(FormFields),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub price: String,
    pub category_options: Vec<SelectOption<i64>>,
    pub category_id: Option<i64>,
    pub focus: Option<FormField>,
    pub error: Option<String>,
    pub submit_disabled: bool,
}

#[derive(Debug, Default)]
struct FormState {
    input: ProductFormInput,
    focus: Option<FormField>,
    error: Option<ValidationError>,
    submitting: bool,
}

/// The product form.
#[derive(Debug)]
pub struct ProductForm {
    categories: ResourceFetcher<Vec<Category>>,
    state: Mutex<FormState>,
    toaster: Toaster,
}

impl ProductForm {
    /// Creates a form, pre-filled from `product` when editing.
    pub fn new(product: Option<&Product>, toaster: Toaster) -> Self {
        let input = match product {
            Some(product) => ProductFormInput {
                name: product.name.clone(),
                price: product.price.to_string(),
                category_id: Some(product.category_id),
            },
            None => ProductFormInput::default(),
        };

        ProductForm {
            categories: ResourceFetcher::new("categories"),
            state: Mutex::new(FormState {
                input,
                ..FormState::default()
            }),
            toaster,
        }
    }

    /// Fetches the category options. Focuses the name input once they load.
    pub async fn load(&self, api: &dyn Api) -> FormView {
        let state = self.categories.load(api, "/categories").await;
        if state.data().is_some() {
            self.lock().focus = Some(FormField::Name);
        }
        self.render()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().input.name = name.into();
    }

    pub fn set_price(&self, price: impl Into<String>) {
        self.lock().input.price = price.into();
    }

    pub fn select_category(&self, category_id: i64) {
        self.lock().input.category_id = Some(category_id);
    }

    pub fn focus(&self, field: FormField) {
        self.lock().focus = Some(field);
    }

    pub fn focused(&self) -> Option<FormField> {
        self.lock().focus
    }

    pub fn input(&self) -> ProductFormInput {
        self.lock().input.clone()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.lock().submitting
    }

    /// The single validation message currently shown, if any.
    pub fn error_message(&self) -> Option<String> {
        self.lock().error.as_ref().map(ToString::to_string)
    }

    /// Validates the inputs and, if they pass, hands them to `handler`.
    ///
    /// Submit stays disabled until the handler's future settles, including
    /// when that future is dropped before completing.
    pub async fn submit<F, Fut, T, E>(&self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(NewProduct) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let categories = match self.categories.state() {
            FetchState::Loaded(categories) => categories,
            other => {
                debug!(loading = other.is_loading(), "Submit ignored, categories unavailable");
                return SubmitOutcome::Unavailable;
            }
        };

        let product = {
            let mut state = self.lock();
            if state.submitting {
                debug!("Submit ignored, previous submit pending");
                return SubmitOutcome::Busy;
            }

            let validated = validate_product_form(&state.input).and_then(|product| {
                validate_category_choice(product.category_id, &categories)?;
                Ok(product)
            });

            match validated {
                Ok(product) => {
                    state.error = None;
                    state.submitting = true;
                    product
                }
                Err(err) => {
                    debug!(field = err.field(), error = %err, "Product form invalid");
                    state.error = Some(err.clone());
                    return SubmitOutcome::Invalid(err);
                }
            }
        };

        let _pending = PendingSubmit { form: self };

        match handler(product).await {
            Ok(_) => SubmitOutcome::Submitted,
            Err(err) => {
                warn!(error = %err, "Product submission failed");
                self.toaster.notify(ToastKind::Status, GENERIC_ERROR_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn render(&self) -> FormView {
        match self.categories.state() {
            FetchState::Loading => FormView::Skeleton,
            FetchState::Failed(err) => FormView::Error(err.user_message()),
            FetchState::Loaded(categories) => {
                let state = self.lock();
                FormView::Fields(FormFields {
                    name: state.input.name.clone(),
                    price: state.input.price.clone(),
                    category_options: categories
                        .into_iter()
                        .map(|c| SelectOption::new(c.id, c.name))
                        .collect(),
                    category_id: state.input.category_id,
                    focus: state.focus,
                    error: state.error.as_ref().map(ToString::to_string),
                    submit_disabled: state.submitting,
                })
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().expect("Form state mutex poisoned")
    }
}

/// Re-enables submit when dropped.
struct PendingSubmit<'a> {
    form: &'a ProductForm,
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        self.form.lock().submitting = false;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
