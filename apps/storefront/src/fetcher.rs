//! # Resource Fetcher
//!
//! Loads one remote resource through the [`Api`] and tracks its
//! [`FetchState`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ResourceFetcher::load                            │
//! │                                                                         │
//! │   begin() ──► ticket n, state = Loading                                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   api.get(path).await          (lock NOT held)                          │
//! │      │                                                                  │
//! │      ├── Err(ApiError)    ──► Failed(Network)                           │
//! │      ├── Ok(null)         ──► Failed(NotFound)                          │
//! │      ├── Ok(undecodable)  ──► Failed(Network)                           │
//! │      └── Ok(value)        ──► Loaded(T)                                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   settle(ticket n, result)                                              │
//! │      └── ticket n superseded? ──► dropped, state untouched              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no cache and no retry. Each `load` issues exactly one request.

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::Api;
use storefront_core::{FetchError, FetchState, Generation, RequestTicket};

#[derive(Debug)]
struct Inner<T> {
    state: FetchState<T>,
    generation: Generation,
}

/// Fetch state for one resource, shared by reference.
#[derive(Debug)]
pub struct ResourceFetcher<T> {
    resource: &'static str,
    inner: Mutex<Inner<T>>,
}

impl<T> ResourceFetcher<T>
where
    T: DeserializeOwned + Clone,
{
    /// Creates a fetcher in the `Loading` state.
    ///
    /// `resource` names the thing being fetched in user-facing messages
    /// ("product", "categories").
    pub fn new(resource: &'static str) -> Self {
        ResourceFetcher {
            resource,
            inner: Mutex::new(Inner {
                state: FetchState::Loading,
                generation: Generation::new(),
            }),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T> {
        self.lock().state.clone()
    }

    /// Number of requests begun so far (rejections included).
    pub fn requests_issued(&self) -> u64 {
        self.lock().generation.issued()
    }

    /// Starts a new request and returns its ticket.
    ///
    /// Every ticket handed out before this one becomes stale.
    pub fn begin(&self) -> RequestTicket {
        let mut inner = self.lock();
        let ticket = inner.generation.begin();
        inner.state = FetchState::Loading;
        debug!(resource = self.resource, ticket = ticket.number(), "Fetch started");
        ticket
    }

    /// Settles the request identified by `ticket`.
    ///
    /// Returns `false` (and leaves state alone) when the ticket is stale.
    pub fn settle(&self, ticket: RequestTicket, result: Result<T, FetchError>) -> bool {
        let mut inner = self.lock();
        if !inner.generation.is_current(ticket) {
            debug!(
                resource = self.resource,
                ticket = ticket.number(),
                latest = inner.generation.issued(),
                "Dropping stale response"
            );
            return false;
        }

        if let Err(err) = &result {
            debug!(resource = self.resource, error = %err, "Fetch failed");
        }
        inner.state = FetchState::from_result(result);
        true
    }

    /// Fails without issuing a request.
    ///
    /// Still bumps the generation, so a response from an earlier request
    /// can't overwrite the rejection.
    pub fn reject(&self, err: FetchError) {
        let mut inner = self.lock();
        inner.generation.begin();
        debug!(resource = self.resource, error = %err, "Fetch rejected");
        inner.state = FetchState::Failed(err);
    }

    /// Issues one GET for `path` and settles the state with the outcome.
    pub async fn load(&self, api: &dyn Api, path: &str) -> FetchState<T> {
        let ticket = self.begin();
        let result = self.request(api, path).await;
        self.settle(ticket, result);
        self.state()
    }

    async fn request(&self, api: &dyn Api, path: &str) -> Result<T, FetchError> {
        let value = api
            .get(path)
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        if value.is_null() {
            return Err(FetchError::NotFound {
                resource: self.resource.to_string(),
            });
        }

        decode(value)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("Fetch state mutex poisoned")
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value)
        .map_err(|e| FetchError::Network(format!("Malformed response: {}", e)))
}

// =============================================================================
// Unit Tests
// =============================================================================
