//! Known buildings and how they are located inside a snapshot.
//!
//! DESIGN
//! ======
//! The set of buildings is closed: each variant of [`Building`] has exactly one
//! row in `BUILDINGS` carrying its user-facing label, canonical survey name,
//! survey id and summary key. A label outside the table resolves to
//! [`BuildingError::UnknownLabel`]; there is no fallback building.

use serde::Serialize;

use crate::telemetry::{BuildingSurvey, Snapshot};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BuildingError {
    #[error("unknown building label: {0}")]
    UnknownLabel(String),
    #[error("building not found in snapshot: {key}")]
    NotFound { key: String },
    #[error("survey id {id} not found in snapshot")]
    IdNotFound { id: u32 },
}

// =============================================================================
// BUILDINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Building {
    OnePoolStreet,
    Marshgate,
}

struct BuildingEntry {
    building: Building,
    label: &'static str,
    canonical_key: &'static str,
    survey_id: u32,
    summary_key: &'static str,
}

const BUILDINGS: [BuildingEntry; 2] = [
    BuildingEntry {
        building: Building::OnePoolStreet,
        label: "One Pool Street",
        canonical_key: "East Campus - Pool St",
        survey_id: 111,
        summary_key: "pool",
    },
    BuildingEntry {
        building: Building::Marshgate,
        label: "Marshgate",
        canonical_key: "East Campus - Marshgate",
        survey_id: 115,
        summary_key: "marshgate",
    },
];

impl Building {
    pub const ALL: [Building; 2] = [Building::OnePoolStreet, Building::Marshgate];

    fn entry(self) -> &'static BuildingEntry {
        match self {
            Self::OnePoolStreet => &BUILDINGS[0],
            Self::Marshgate => &BUILDINGS[1],
        }
    }

    /// Label shown in the building picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Survey name used by the telemetry endpoint.
    #[must_use]
    pub fn canonical_key(self) -> &'static str {
        self.entry().canonical_key
    }

    #[must_use]
    pub fn survey_id(self) -> u32 {
        self.entry().survey_id
    }

    /// Short key used in the seat summary payload.
    #[must_use]
    pub fn summary_key(self) -> &'static str {
        self.entry().summary_key
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Map a user-facing label to its building.
///
/// # Errors
///
/// Returns [`BuildingError::UnknownLabel`] for labels outside the table.
pub fn resolve(label: &str) -> Result<Building, BuildingError> {
    BUILDINGS
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| entry.building)
        .ok_or_else(|| BuildingError::UnknownLabel(label.to_string()))
}

/// Find the first survey whose name equals `canonical_key`.
///
/// # Errors
///
/// Returns [`BuildingError::NotFound`] when no survey matches.
pub fn lookup<'a>(snapshot: &'a Snapshot, canonical_key: &str) -> Result<&'a BuildingSurvey, BuildingError> {
    snapshot
        .surveys()
        .iter()
        .find(|survey| survey.name == canonical_key)
        .ok_or_else(|| BuildingError::NotFound { key: canonical_key.to_string() })
}

/// Find the first survey carrying `id`.
///
/// # Errors
///
/// Returns [`BuildingError::IdNotFound`] when no survey carries the id.
pub fn lookup_by_id(snapshot: &Snapshot, id: u32) -> Result<&BuildingSurvey, BuildingError> {
    snapshot
        .surveys()
        .iter()
        .find(|survey| survey.id == Some(id))
        .ok_or(BuildingError::IdNotFound { id })
}

/// Resolve `label` and locate its survey in one step.
///
/// # Errors
///
/// Propagates [`resolve`] and [`lookup`] failures.
pub fn locate<'a>(snapshot: &'a Snapshot, label: &str) -> Result<(Building, &'a BuildingSurvey), BuildingError> {
    let building = resolve(label)?;
    let survey = lookup(snapshot, building.canonical_key())?;
    Ok((building, survey))
}

#[cfg(test)]
#[path = "building_test.rs"]
mod tests;
