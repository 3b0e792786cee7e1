//! Sync service — periodic background fetch of the occupancy summary.
//!
//! DESIGN
//! ======
//! A background task fetches, publishes on success, then sleeps for the
//! fetch interval before the next cycle. The interval is measured from the end
//! of one fetch to the start of the next, not on a fixed grid.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch is logged and the live snapshot is left as it was; the loop
//! carries on to the next cycle. Nothing is retried early.
//!
//! SHUTDOWN
//! ========
//! `SyncHandle::stop` signals the task through a watch channel. The task
//! observes it at either wait point (in-flight fetch or interval sleep), so
//! teardown never waits out a full interval. Dropping the handle also stops
//! the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

use crate::state::SnapshotStore;
use crate::telemetry::{Snapshot, SurveySource, SyncError};

pub struct SyncHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Ask the loop to stop at its next wait point.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for the task to exit.
    ///
    /// # Errors
    ///
    /// Returns the join error if the task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.stop();
        self.task.await
    }
}

/// Spawn the fetch loop. The first fetch starts immediately.
pub fn spawn_sync_task<S>(source: S, store: SnapshotStore, interval: Duration) -> SyncHandle
where
    S: SurveySource + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    info!(interval_secs = interval.as_secs_f64(), "telemetry sync configured");

    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = stop_rx.changed() => break,
                _ = fetch_once(&source, &store) => {}
            }

            tokio::select! {
                biased;
                _ = stop_rx.changed() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
        info!("telemetry sync stopped");
    });

    SyncHandle { stop_tx, task }
}

/// Run one fetch cycle: publish on success, log and keep the old snapshot on
/// failure.
///
/// # Errors
///
/// Returns the fetch error after logging it; the store is untouched.
pub async fn fetch_once<S>(source: &S, store: &SnapshotStore) -> Result<Arc<Snapshot>, SyncError>
where
    S: SurveySource + ?Sized,
{
    match source.fetch_surveys().await {
        Ok(surveys) => {
            let snapshot = store.publish(surveys);
            info!(sequence = snapshot.sequence(), surveys = snapshot.surveys().len(), "snapshot published");
            Ok(snapshot)
        }
        Err(e) => {
            let kept = store.latest().map(|s| s.sequence());
            warn!(error = %e, kept_sequence = ?kept, "telemetry fetch failed; keeping previous snapshot");
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
