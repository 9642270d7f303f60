//! Per-path fault injection for the local API.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

/// How a route misbehaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Respond with a 500.
    Fail,
    /// Wait, then respond normally.
    Delay(Duration),
    /// Never respond.
    Hang,
    /// Respond 200 with a `null` body.
    Null,
}

/// Registry of faults keyed by exact request path.
///
/// ## Usage
/// ```rust
/// use std::time::Duration;
/// use storefront_app::api::{Fault, FaultInjector};
///
/// let faults = FaultInjector::default();
/// faults.fail("/categories");
/// faults.delay("/products", Duration::from_millis(50));
///
/// assert_eq!(faults.fault_for("/categories"), Some(Fault::Fail));
/// faults.reset();
/// assert_eq!(faults.fault_for("/categories"), None);
/// ```
#[derive(Debug, Default)]
pub struct FaultInjector {
    faults: Mutex<HashMap<String, Fault>>,
}

impl FaultInjector {
    /// Installs `fault` for `path`, replacing any previous one.
    pub fn set(&self, path: impl Into<String>, fault: Fault) {
        let path = path.into();
        debug!(path = %path, ?fault, "Installing API fault");
        self.faults
            .lock()
            .expect("Fault registry mutex poisoned")
            .insert(path, fault);
    }

    pub fn fail(&self, path: impl Into<String>) {
        self.set(path, Fault::Fail);
    }

    pub fn delay(&self, path: impl Into<String>, duration: Duration) {
        self.set(path, Fault::Delay(duration));
    }

    pub fn hang(&self, path: impl Into<String>) {
        self.set(path, Fault::Hang);
    }

    pub fn respond_null(&self, path: impl Into<String>) {
        self.set(path, Fault::Null);
    }

    /// Removes the fault for `path`.
    pub fn clear(&self, path: &str) {
        self.faults
            .lock()
            .expect("Fault registry mutex poisoned")
            .remove(path);
    }

    /// Removes every fault.
    pub fn reset(&self) {
        self.faults
            .lock()
            .expect("Fault registry mutex poisoned")
            .clear();
    }

    /// Fault installed for `path`, if any.
    pub fn fault_for(&self, path: &str) -> Option<Fault> {
        self.faults
            .lock()
            .expect("Fault registry mutex poisoned")
            .get(path)
            .cloned()
    }
}
