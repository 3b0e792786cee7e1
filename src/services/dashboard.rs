//! Dashboard panel — the UI-facing readout for the selected building.
//!
//! DESIGN
//! ======
//! The panel is polled from the host tick. It rebuilds its view when a new
//! snapshot has been published or the selected building changed, and records
//! the building's free count in the rolling history after every successful
//! rebuild. This is the only writer of the history.
//!
//! ERROR HANDLING
//! ==============
//! An unknown label or a building missing from the snapshot skips the cycle:
//! the previous view stays on screen and no history sample is recorded.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::building::{Building, BuildingError, locate};
use crate::history::HistoryAggregator;
use crate::rate::{free_rate, percent};
use crate::state::{SelectedBuilding, SnapshotReader};
use crate::telemetry::{BuildingSurvey, Snapshot};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("no snapshot available yet")]
    NoSnapshot,
    #[error(transparent)]
    Building(#[from] BuildingError),
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorRow {
    pub name: String,
    pub free: u32,
    pub occupied: u32,
}

/// Everything the dashboard widgets display for one building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub building: Building,
    /// Sequence of the snapshot this view was built from.
    pub sequence: u64,
    pub free: u32,
    pub occupied: u32,
    /// Free ratio in `[0, 1]`; also the fill of the occupancy bar.
    pub free_rate: f32,
    pub free_percent: u32,
    pub floors: Vec<FloorRow>,
}

impl DashboardView {
    #[must_use]
    pub fn from_survey(building: Building, sequence: u64, survey: &BuildingSurvey) -> Self {
        let rate = free_rate(survey);
        Self {
            building,
            sequence,
            free: survey.free_count,
            occupied: survey.occupied_count,
            free_rate: rate,
            free_percent: percent(rate),
            floors: survey
                .floors
                .iter()
                .map(|floor| FloorRow { name: floor.name.clone(), free: floor.free_count, occupied: floor.occupied_count })
                .collect(),
        }
    }
}

// =============================================================================
// PANEL
// =============================================================================

pub struct DashboardPanel {
    snapshots: SnapshotReader,
    selection: SelectedBuilding,
    history: HistoryAggregator<Building>,
    current: Option<Arc<Snapshot>>,
    seen_selection: u64,
    view: Option<DashboardView>,
}

impl DashboardPanel {
    #[must_use]
    pub fn new(snapshots: SnapshotReader, selection: SelectedBuilding, history_capacity: usize) -> Self {
        let seen_selection = selection.version();
        Self {
            snapshots,
            selection,
            history: HistoryAggregator::new(history_capacity),
            current: None,
            seen_selection,
            view: None,
        }
    }

    /// Rebuild if a new snapshot arrived or the selection changed. Returns the
    /// new view when a rebuild succeeded this tick.
    pub fn tick(&mut self) -> Option<&DashboardView> {
        let fresh = self.snapshots.take_changed();
        let selection_version = self.selection.version();
        let selection_changed = selection_version != self.seen_selection;
        if fresh.is_none() && !selection_changed {
            return None;
        }
        if fresh.is_some() {
            self.current = fresh;
        }
        self.seen_selection = selection_version;

        match self.refresh() {
            Ok(()) => self.view.as_ref(),
            Err(DashboardError::NoSnapshot) => {
                debug!("dashboard waiting for first snapshot");
                None
            }
            Err(e) => {
                warn!(error = %e, "dashboard update skipped");
                None
            }
        }
    }

    /// Rebuild the view from the held snapshot and record a history sample.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoSnapshot`] before the first snapshot and
    /// [`DashboardError::Building`] when the selection cannot be located. The
    /// previous view and the history are left untouched on error.
    pub fn refresh(&mut self) -> Result<(), DashboardError> {
        let snapshot = self.current.as_ref().ok_or(DashboardError::NoSnapshot)?;
        let (building, survey) = locate(snapshot, &self.selection.label())?;

        let view = DashboardView::from_survey(building, snapshot.sequence(), survey);
        self.history.append(building, view.free);
        debug!(?building, free = view.free, occupied = view.occupied, "dashboard updated");
        self.view = Some(view);
        Ok(())
    }

    #[must_use]
    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// Trend points for the building the current view shows, so the chart
    /// and the readout never disagree. Empty before the first view.
    #[must_use]
    pub fn chart_points(&self) -> Vec<(usize, u32)> {
        self.view
            .as_ref()
            .map(|view| self.history.chart_points(&view.building))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryAggregator<Building> {
        &self.history
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
