//! # Local API
//!
//! In-process implementation of [`Api`] backed by the fixture database.
//!
//! ## Request Flow
//! ```text
//! get("/products/1")
//!      │
//!      ├── record request (method + path)
//!      │
//!      ├── fault installed?  Fail ──► 500
//!      │                     Hang ──► never resolves
//!      │                     Null ──► 200 null
//!      │                     Delay ─► sleep, then continue
//!      │
//!      └── route ──► repository ──► JSON value
//! ```

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::fault::{Fault, FaultInjector};
use super::{Api, ApiResult};
use crate::error::ApiError;
use storefront_core::validation::validate_new_product;
use storefront_core::{CoreError, NewProduct};
use storefront_db::Database;

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One request received by the local API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: Method,
    pub path: String,
}

/// The catalog backend, answering from SQLite.
#[derive(Debug)]
pub struct LocalApi {
    db: Database,
    faults: FaultInjector,
    requests: Mutex<Vec<RequestRecord>>,
}

impl LocalApi {
    pub fn new(db: Database) -> Self {
        LocalApi {
            db,
            faults: FaultInjector::default(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The database this API serves from.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Fault registry for simulating slow or failing routes.
    pub fn faults(&self) -> &FaultInjector {
        &self.faults
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.requests
            .lock()
            .expect("Request log mutex poisoned")
            .clone()
    }

    /// Number of requests received for `path` (any method).
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .expect("Request log mutex poisoned")
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    fn record(&self, method: Method, path: &str) {
        self.requests
            .lock()
            .expect("Request log mutex poisoned")
            .push(RequestRecord {
                method,
                path: path.to_string(),
            });
    }

    /// Applies the fault for `path`.
    ///
    /// Returns `Some(response)` when the fault short-circuits the route.
    async fn apply_fault(&self, method: Method, path: &str) -> Option<ApiResult> {
        match self.faults.fault_for(path)? {
            Fault::Fail => {
                debug!(%method, path, "Simulated failure");
                Some(Err(ApiError::internal(format!(
                    "Simulated failure: {} {}",
                    method, path
                ))))
            }
            Fault::Null => Some(Ok(Value::Null)),
            Fault::Delay(duration) => {
                debug!(%method, path, ?duration, "Simulated delay");
                tokio::time::sleep(duration).await;
                None
            }
            Fault::Hang => {
                debug!(%method, path, "Simulated hang");
                std::future::pending::<()>().await;
                None
            }
        }
    }

    async fn route_get(&self, segments: &[&str]) -> ApiResult {
        match segments {
            ["products"] => to_json(&self.db.products().list().await?),
            ["products", id] => {
                let id = parse_id(id)?;
                match self.db.products().get_by_id(id).await? {
                    Some(product) => to_json(&product),
                    None => Ok(Value::Null),
                }
            }
            ["categories"] => to_json(&self.db.categories().list().await?),
            _ => Err(ApiError::not_found(
                "Route",
                &format!("GET /{}", segments.join("/")),
            )),
        }
    }

    async fn route_post(&self, segments: &[&str], body: Value) -> ApiResult {
        match segments {
            ["products"] => {
                let product: NewProduct = serde_json::from_value(body)
                    .map_err(|e| ApiError::bad_request(format!("Invalid product payload: {}", e)))?;
                validate_new_product(&product)?;

                if self.db.categories().get_by_id(product.category_id).await?.is_none() {
                    return Err(CoreError::CategoryNotFound(product.category_id).into());
                }

                let created = self.db.products().insert(&product).await?;
                info!(id = created.id, name = %created.name, "Product created");
                to_json(&created)
            }
            _ => Err(ApiError::not_found(
                "Route",
                &format!("POST /{}", segments.join("/")),
            )),
        }
    }
}

#[async_trait]
impl Api for LocalApi {
    async fn get(&self, path: &str) -> ApiResult {
        let start = Instant::now();
        self.record(Method::Get, path);

        if let Some(response) = self.apply_fault(Method::Get, path).await {
            return response;
        }

        let segments = split_path(path);
        let response = self.route_get(&segments).await;

        debug!(
            path,
            ok = response.is_ok(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GET handled"
        );
        response
    }

    async fn post(&self, path: &str, body: Value) -> ApiResult {
        self.record(Method::Post, path);

        if let Some(response) = self.apply_fault(Method::Post, path).await {
            return response;
        }

        let segments = split_path(path);
        self.route_post(&segments, body).await
    }
}

/// Splits `/products/1?x=y` into `["products", "1"]`.
fn split_path(path: &str) -> Vec<&str> {
    path.split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_id(segment: &str) -> Result<i64, ApiError> {
    segment
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid id: {}", segment)))
}

fn to_json<T: Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
