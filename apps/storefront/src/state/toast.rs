//! Transient notifications.
//!
//! A toast stays on screen for the toaster's time-to-live, then drops out
//! of [`Toaster::toasts`] on the next read.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Accessibility role of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Polite announcement (`role="status"`)
    Status,
    /// Assertive announcement (`role="alert"`)
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// How long a toast stays up unless the toaster says otherwise.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// Toast queue shared by the views of one page.
///
/// Clones share the same queue.
#[derive(Debug, Clone)]
pub struct Toaster {
    toasts: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Toaster {
            toasts: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Pushes a toast and returns its id.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let created_at = Utc::now();
        let expires_at = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at,
            expires_at,
        };
        let id = toast.id;
        self.lock().push(toast);
        id
    }

    /// Toasts currently shown, oldest first. Expired toasts are pruned.
    pub fn toasts(&self) -> Vec<Toast> {
        let now = Utc::now();
        let mut toasts = self.lock();
        toasts.retain(|t| t.expires_at > now);
        toasts.clone()
    }

    /// Removes a toast. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().expect("Toast mutex poisoned")
    }
}
