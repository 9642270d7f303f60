//! # Api Module
//!
//! The HTTP-like seam between views and the catalog backend.
//!
//! ## Routes
//! ```text
//! GET  /products        ──► [Product]
//! GET  /products/{id}   ──► Product | null
//! GET  /categories      ──► [Category]
//! POST /products        ──► Product      (body: NewProduct)
//! ```
//!
//! Views only depend on the [`Api`] trait. [`LocalApi`] answers from the
//! SQLite fixture database and supports per-path fault injection through
//! [`FaultInjector`], which is how slow and failing backends are simulated.

mod fault;
mod local;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

pub use fault::{Fault, FaultInjector};
pub use local::{LocalApi, Method, RequestRecord};

/// Result of one API call.
pub type ApiResult = Result<Value, ApiError>;

/// An HTTP-like backend.
///
/// Payloads are JSON values so that decoding (and decoding failures) happen
/// in the fetcher, the same place a browser client would decode a response.
#[async_trait]
pub trait Api: Send + Sync {
    /// Issues a GET for `path`.
    async fn get(&self, path: &str) -> ApiResult;

    /// Issues a POST of `body` to `path`.
    async fn post(&self, path: &str, body: Value) -> ApiResult;
}
