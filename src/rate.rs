//! Free-space ratio for surveys and floors.

use crate::telemetry::{BuildingSurvey, FloorRecord};

/// Anything reporting free and occupied seat counts.
pub trait Occupancy {
    fn free_count(&self) -> u32;
    fn occupied_count(&self) -> u32;

    #[must_use]
    fn total(&self) -> u64 {
        u64::from(self.free_count()) + u64::from(self.occupied_count())
    }
}

impl Occupancy for BuildingSurvey {
    fn free_count(&self) -> u32 {
        self.free_count
    }

    fn occupied_count(&self) -> u32 {
        self.occupied_count
    }
}

impl Occupancy for FloorRecord {
    fn free_count(&self) -> u32 {
        self.free_count
    }

    fn occupied_count(&self) -> u32 {
        self.occupied_count
    }
}

/// `free / (free + occupied)`, or exactly `0.0` when there are no seats.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn free_rate(record: &impl Occupancy) -> f32 {
    let total = record.total();
    if total == 0 {
        return 0.0;
    }
    (f64::from(record.free_count()) / total as f64) as f32
}

/// Rate as a whole percentage, ties rounded to even.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(rate: f32) -> u32 {
    (rate.clamp(0.0, 1.0) * 100.0).round_ties_even() as u32
}

#[cfg(test)]
#[path = "rate_test.rs"]
mod tests;
