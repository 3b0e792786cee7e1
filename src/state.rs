//! State shared between the fetch task and the host tick domain.
//!
//! DESIGN
//! ======
//! The live snapshot is published through a `tokio::sync::watch` channel
//! holding `Arc<Snapshot>`. The writer builds a complete snapshot and swaps it
//! in with one `send_replace`; readers clone the `Arc` and never see a
//! half-built value. The selected building is a small `RwLock`-guarded label
//! with a version counter so consumers can tell when it changed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;

use crate::building::{Building, resolve};
use crate::telemetry::{BuildingSurvey, Snapshot};

// =============================================================================
// SNAPSHOT PUBLISHING
// =============================================================================

/// Write side of the live snapshot. Owned by the synchronizer.
pub struct SnapshotStore {
    tx: watch::Sender<Option<Arc<Snapshot>>>,
    next_sequence: AtomicU64,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx, next_sequence: AtomicU64::new(1) }
    }

    /// Wrap `surveys` in a new snapshot and make it the live one.
    pub fn publish(&self, surveys: Vec<BuildingSurvey>) -> Arc<Snapshot> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(Snapshot::new(sequence, surveys));
        self.tx.send_replace(Some(Arc::clone(&snapshot)));
        snapshot
    }

    #[must_use]
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader { rx: self.tx.subscribe() }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of the live snapshot. Cheap to clone; each clone tracks its own
/// "seen" position.
#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Option<Arc<Snapshot>>>,
}

impl SnapshotReader {
    /// The current snapshot, if any fetch has succeeded yet.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.rx.borrow().clone()
    }

    /// The current snapshot if it was published since the last call.
    pub fn take_changed(&mut self) -> Option<Arc<Snapshot>> {
        // EDGE: a dropped store reports an error; the last value stays readable.
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        self.rx.borrow_and_update().clone()
    }
}

// =============================================================================
// SELECTION
// =============================================================================

#[derive(Debug)]
struct Selection {
    label: String,
    version: u64,
}

/// Handle to the building currently picked in the UI.
///
/// Injected into every consumer that needs the selection instead of being
/// discovered at runtime.
#[derive(Debug, Clone)]
pub struct SelectedBuilding {
    inner: Arc<RwLock<Selection>>,
}

impl SelectedBuilding {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(Selection { label: label.into(), version: 0 })) }
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .label
            .clone()
    }

    /// Bumped on every change of label.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).version
    }

    /// Store `label` as-is, known or not. Returns whether the label changed.
    pub fn set(&self, label: impl Into<String>) -> bool {
        let label = label.into();
        let mut selection = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if selection.label == label {
            return false;
        }
        selection.label = label;
        selection.version += 1;
        true
    }

    pub fn select(&self, building: Building) -> bool {
        self.set(building.label())
    }

    /// Select `label` only if it names a known building; unknown labels leave
    /// the selection untouched.
    pub fn set_if_known(&self, label: &str) -> bool {
        match resolve(label) {
            Ok(building) => self.select(building),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
