//! Telemetry types — survey records, the immutable snapshot, and sync errors.
//!
//! Wire field names follow the occupancy API (`sensors_absent`,
//! `sensors_occupied`, `maps`); Rust-side names describe what the counts mean.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Characters of a non-success response body kept for the log line.
pub const STATUS_BODY_LIMIT: usize = 200;

/// Errors produced while fetching or decoding a telemetry snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The request could not be sent or the body could not be read.
    #[error("telemetry request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success HTTP status. `body` holds at
    /// most [`STATUS_BODY_LIMIT`] characters of the response.
    #[error("telemetry response error: status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a well-formed survey summary.
    #[error("telemetry response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// RECORDS
// =============================================================================

/// Per-floor occupancy counts inside a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub name: String,
    #[serde(rename = "sensors_absent")]
    pub free_count: u32,
    #[serde(rename = "sensors_occupied")]
    pub occupied_count: u32,
}

/// One building's occupancy report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSurvey {
    /// Numeric survey id, when the endpoint provides one.
    #[serde(default)]
    pub id: Option<u32>,
    /// Canonical survey name, e.g. `"East Campus - Pool St"`.
    pub name: String,
    #[serde(rename = "sensors_absent")]
    pub free_count: u32,
    #[serde(rename = "sensors_occupied")]
    pub occupied_count: u32,
    /// Floors in the order the endpoint lists them.
    #[serde(rename = "maps", default)]
    pub floors: Vec<FloorRecord>,
}

/// Top-level body returned by the summary endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SurveySummary {
    pub(crate) surveys: Vec<BuildingSurvey>,
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// One complete fetch result. Never mutated after construction; a newer
/// snapshot replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    sequence: u64,
    fetched_at: SystemTime,
    surveys: Vec<BuildingSurvey>,
}

impl Snapshot {
    #[must_use]
    pub fn new(sequence: u64, surveys: Vec<BuildingSurvey>) -> Self {
        Self { sequence, fetched_at: SystemTime::now(), surveys }
    }

    /// Publication order, starting at 1 for the first successful fetch.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub fn fetched_at(&self) -> SystemTime {
        self.fetched_at
    }

    #[must_use]
    pub fn surveys(&self) -> &[BuildingSurvey] {
        &self.surveys
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a summary body into its survey list.
///
/// # Errors
///
/// Returns [`SyncError::Parse`] when the body is not valid JSON or does not
/// match the survey schema (including negative counts).
pub fn parse_surveys(body: &str) -> Result<Vec<BuildingSurvey>, SyncError> {
    let summary: SurveySummary = serde_json::from_str(body).map_err(|e| SyncError::Parse(e.to_string()))?;
    Ok(summary.surveys)
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
