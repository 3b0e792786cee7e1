//! Compact per-building seat counts for publishing.
//!
//! Surveys are matched by their numeric id first and by canonical name when
//! the endpoint omits ids. Buildings absent from the snapshot are left out.
//! Payload keys come from [`Building::summary_key`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::building::{Building, lookup, lookup_by_id};
use crate::telemetry::{BuildingSurvey, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatCounts {
    pub free: u32,
    pub occupied: u32,
}

impl From<&BuildingSurvey> for SeatCounts {
    fn from(survey: &BuildingSurvey) -> Self {
        Self { free: survey.free_count, occupied: survey.occupied_count }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeatSummary {
    counts: BTreeMap<&'static str, SeatCounts>,
}

impl SeatSummary {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let counts = Building::ALL
            .into_iter()
            .filter_map(|building| {
                lookup_by_id(snapshot, building.survey_id())
                    .or_else(|_| lookup(snapshot, building.canonical_key()))
                    .ok()
                    .map(|survey| (building.summary_key(), SeatCounts::from(survey)))
            })
            .collect();
        Self { counts }
    }

    #[must_use]
    pub fn get(&self, building: Building) -> Option<SeatCounts> {
        self.counts.get(building.summary_key()).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
