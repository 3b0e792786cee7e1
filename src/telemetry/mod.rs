//! Telemetry — the occupancy data model and the source it is fetched from.
//!
//! DESIGN
//! ======
//! `SurveySource` is the seam between the synchronizer and the network so the
//! fetch loop can be driven by a scripted source in tests. `TelemetryClient`
//! is the production implementation.

pub mod client;
pub mod types;

pub use client::TelemetryClient;
pub use types::{BuildingSurvey, FloorRecord, Snapshot, SyncError, parse_surveys};

/// Anything that can produce a fresh survey list.
#[async_trait::async_trait]
pub trait SurveySource: Send + Sync {
    async fn fetch_surveys(&self) -> Result<Vec<BuildingSurvey>, SyncError>;
}
