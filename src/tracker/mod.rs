//! Persisted attention flags
//!
//! Trackers turn small values in the key-value store into a boolean
//! "show the banner/badge" signal the UI can watch. Two shapes exist:
//!
//! - [`ResolutionFlag`]: per-user "done" marker (profile completed,
//!   onboarding seen). Shows the indicator until resolved.
//! - [`PendingBadge`]: installation-wide badge raised when pending
//!   appointment ids appear that were not present on the previous check.
//!
//! Read failures are logged and leave the signal as it was. Write failures
//! are returned to the caller and leave the signal as it was.

mod pending;
mod resolution;

pub use pending::{PendingBadge, PendingSource};
pub use resolution::{FlagKind, ResolutionFlag};

use crate::config::StorageKeys;
use crate::store::{KeyValueStore, KeyedLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Shared services every tracker needs.
///
/// Build one at startup and clone it into each tracker; clones share the
/// same store, lock table and key names.
#[derive(Clone)]
pub struct FlagContext {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<KeyedLock>,
    keys: Arc<StorageKeys>,
}

impl FlagContext {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self {
            store,
            locks: Arc::new(KeyedLock::new()),
            keys: Arc::new(keys),
        }
    }

    /// Context with the default key names
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, StorageKeys::default())
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn locks(&self) -> &KeyedLock {
        &self.locks
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }
}

/// Observable boolean owned by one view.
///
/// After [`Indicator::detach`] the owning view is gone: updates from
/// operations still in flight are discarded.
#[derive(Debug)]
pub(crate) struct Indicator {
    tx: watch::Sender<bool>,
    attached: AtomicBool,
}

impl Indicator {
    pub(crate) fn new(initial: bool) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            attached: AtomicBool::new(true),
        }
    }

    pub(crate) fn get(&self) -> bool {
        *self.tx.borrow()
    }

    /// Publish `value`. Returns false if the view was torn down.
    pub(crate) fn set(&self, value: bool) -> bool {
        if !self.is_attached() {
            debug!(value, "View torn down, discarding indicator update");
            return false;
        }
        self.tx.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
        true
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub(crate) fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

/// Parse a stored boolean flag. Only the exact string `"true"` is set.
pub(crate) fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("true"))
}

pub(crate) fn encode_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
