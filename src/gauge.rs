//! Gauge needle sampling.
//!
//! Once per period the sampler reads the selected building, looks up its
//! free rate in the live snapshot and maps it onto the needle's sweep. The
//! snapshot and selection handles are injected at construction.

use tracing::{debug, warn};

use crate::building::{BuildingError, locate};
use crate::rate::free_rate;
use crate::state::{SelectedBuilding, SnapshotReader};

pub const DEFAULT_GAUGE_PERIOD_SECS: f32 = 1.0;

/// Needle sweep presets for the two deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaugeProfile {
    /// Handheld free-seats view, ±70°.
    #[default]
    FreeSeats,
    /// Digital twin installation, ±90°.
    DigitalTwin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeConfig {
    /// Needle angle in degrees at 0% free.
    pub min_angle: f32,
    /// Needle angle in degrees at 100% free.
    pub max_angle: f32,
    pub period_secs: f32,
}

impl GaugeConfig {
    #[must_use]
    pub fn for_profile(profile: GaugeProfile) -> Self {
        let (min_angle, max_angle) = match profile {
            GaugeProfile::FreeSeats => (-70.0, 70.0),
            GaugeProfile::DigitalTwin => (-90.0, 90.0),
        };
        Self { min_angle, max_angle, period_secs: DEFAULT_GAUGE_PERIOD_SECS }
    }
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::for_profile(GaugeProfile::default())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GaugeError {
    #[error("no snapshot available yet")]
    NoSnapshot,
    #[error(transparent)]
    Building(#[from] BuildingError),
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[must_use]
pub fn lerp_angle(min_angle: f32, max_angle: f32, t: f32) -> f32 {
    min_angle + (max_angle - min_angle) * t.clamp(0.0, 1.0)
}

pub struct GaugeSampler {
    config: GaugeConfig,
    snapshots: SnapshotReader,
    selection: SelectedBuilding,
    elapsed: f32,
    angle: Option<f32>,
}

impl GaugeSampler {
    #[must_use]
    pub fn new(config: GaugeConfig, snapshots: SnapshotReader, selection: SelectedBuilding) -> Self {
        Self { config, snapshots, selection, elapsed: 0.0, angle: None }
    }

    /// Last angle produced, if any sample has succeeded.
    #[must_use]
    pub fn angle(&self) -> Option<f32> {
        self.angle
    }

    /// Angle for the selected building right now.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::NoSnapshot`] before the first fetch and
    /// [`GaugeError::Building`] when the selection cannot be located.
    pub fn sample(&self) -> Result<f32, GaugeError> {
        let snapshot = self.snapshots.latest().ok_or(GaugeError::NoSnapshot)?;
        let (_, survey) = locate(&snapshot, &self.selection.label())?;
        Ok(lerp_angle(self.config.min_angle, self.config.max_angle, free_rate(survey)))
    }

    /// Advance by `dt` seconds. Returns the new angle on ticks where a period
    /// elapsed and the sample succeeded.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        if self.elapsed < self.config.period_secs {
            return None;
        }
        // One sample per tick, however many periods a long frame spans.
        if self.config.period_secs > 0.0 {
            self.elapsed %= self.config.period_secs;
        } else {
            self.elapsed = 0.0;
        }

        match self.sample() {
            Ok(angle) => {
                debug!(angle, "gauge sampled");
                self.angle = Some(angle);
                Some(angle)
            }
            Err(GaugeError::NoSnapshot) => None,
            Err(e) => {
                warn!(error = %e, "gauge update skipped");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "gauge_test.rs"]
mod tests;
