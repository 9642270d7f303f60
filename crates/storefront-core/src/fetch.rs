//! # Fetch State
//!
//! The lifecycle of one asynchronous read, as a tagged union.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                 new request (ticket n)                                  │
//! │        ┌───────────────────────────────────────┐                        │
//! │        ▼                                       │                        │
//! │   ┌─────────┐   settle(ticket n, Ok)    ┌──────┴─────┐                  │
//! │   │ Loading │──────────────────────────►│ Loaded(T)  │                  │
//! │   └────┬────┘                           └────────────┘                  │
//! │        │        settle(ticket n, Err)   ┌────────────────────┐          │
//! │        └───────────────────────────────►│ Failed(FetchError) │          │
//! │                                         └────────────────────┘          │
//! │                                                                         │
//! │   settle(ticket m < n, _) ──► ignored (stale)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A loading flag next to an error flag can't express "loading and failed"
//! at once because there is only one variant.

use crate::error::FetchError;

// =============================================================================
// Fetch State
// =============================================================================

/// State of an asynchronous read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    /// A request is in flight (or about to be issued on mount).
    #[default]
    Loading,
    /// The latest request failed.
    Failed(FetchError),
    /// The latest request succeeded.
    Loaded(T),
}

impl<T> FetchState<T> {
    /// Builds the settled state from a request outcome.
    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchState::Loaded(data),
            Err(err) => FetchState::Failed(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// Returns the data, if loaded.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the error, if failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Maps the loaded data, keeping the variant.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Failed(err) => FetchState::Failed(err),
            FetchState::Loaded(data) => FetchState::Loaded(f(data)),
        }
    }
}

// =============================================================================
// Request Generations
// =============================================================================

/// Identifies one issued request.
///
/// Only the ticket from the most recent [`Generation::begin`] may settle
/// state; any older ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Returns the raw generation number (for logging).
    pub const fn number(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for one fetching component.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, invalidating every ticket handed out before.
    pub fn begin(&mut self) -> RequestTicket {
        self.current += 1;
        RequestTicket(self.current)
    }

    /// Whether `ticket` belongs to the latest request.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }

    /// Number of requests begun so far.
    pub fn issued(&self) -> u64 {
        self.current
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
