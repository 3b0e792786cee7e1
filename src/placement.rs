//! Touch-debounced placement of the dashboard and gauge anchors.
//!
//! A touch must be held past a debounce threshold before it is treated as a
//! placement gesture. While armed, every tick with a successful surface hit
//! places the primary anchor (first time) or moves it (afterwards). The
//! secondary anchor is never stored: it is recomputed from the primary pose by
//! [`secondary_pose`] whenever it is read or reported.
//!
//! The timer only counts down on ticks where the touch was already held on the
//! previous tick, so the first tick of a press never decrements it.
//!
//! The AR host owns the session: it builds one from `AppConfig::placement`
//! with [`PlacementSession::new`] and calls [`PlacementSession::tick`] once per
//! frame with the current touch and its surface raycaster.

use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};
use tracing::{debug, info};

pub const DEFAULT_DEBOUNCE_SECS: f32 = 0.5;

/// Distance along the primary anchor's forward axis at which the secondary
/// anchor sits. Negative places it in front of the dashboard's face.
pub const DEFAULT_ANCHOR_OFFSET: f32 = -1.1;

// =============================================================================
// POSE
// =============================================================================

/// Position and orientation in tracked space. Forward is `+Z`, up is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose { position: Vec3::ZERO, rotation: Quat::IDENTITY };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Pose of the secondary anchor for a primary anchor at `primary`: pushed
/// `offset` along the primary's forward axis and turned 180° about Y.
#[must_use]
pub fn secondary_pose(primary: Pose, offset: f32) -> Pose {
    Pose {
        position: primary.position + primary.forward() * offset,
        rotation: primary.rotation * Quat::from_rotation_y(PI),
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// What the debounce timer is reset to when the touch is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseReset {
    /// Reset to zero. The next press arms after a single held tick without
    /// waiting out the threshold again. Matches the deployed behaviour.
    #[default]
    Expire,
    /// Reset to the configured threshold, so every press is debounced.
    Rearm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    pub debounce_secs: f32,
    pub anchor_offset: f32,
    pub release_reset: ReleaseReset,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            debounce_secs: DEFAULT_DEBOUNCE_SECS,
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
            release_reset: ReleaseReset::default(),
        }
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Primary touch as sampled on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchInput {
    pub active: bool,
    /// Screen-space touch position. Ignored when `active` is false.
    pub position: Vec2,
}

impl TouchInput {
    #[must_use]
    pub fn held(position: Vec2) -> Self {
        Self { active: true, position }
    }

    #[must_use]
    pub fn released() -> Self {
        Self::default()
    }
}

/// Surface hit-testing supplied by the AR host.
pub trait SurfaceRaycaster {
    /// Pose of the first surface under `screen`, if any.
    fn raycast(&mut self, screen: Vec2) -> Option<Pose>;
}

impl<F> SurfaceRaycaster for F
where
    F: FnMut(Vec2) -> Option<Pose>,
{
    fn raycast(&mut self, screen: Vec2) -> Option<Pose> {
        self(screen)
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// No touch contact.
    Idle,
    /// Touch held, debounce timer not yet below zero.
    Pressing,
    /// Touch held past the threshold; hits place or move anchors.
    Armed,
}

/// Result of one placement tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementAction {
    None,
    /// Both anchors were created. Happens at most once per session.
    Placed { primary: Pose, secondary: Pose },
    /// Both anchors were repositioned.
    Moved { primary: Pose, secondary: Pose },
}

#[derive(Debug, Clone)]
pub struct PlacementSession {
    config: PlacementConfig,
    touching: bool,
    timer: f32,
    primary: Option<Pose>,
}

impl PlacementSession {
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self { config, touching: false, timer: config.debounce_secs, primary: None }
    }

    #[must_use]
    pub fn config(&self) -> PlacementConfig {
        self.config
    }

    #[must_use]
    pub fn phase(&self) -> TouchPhase {
        if !self.touching {
            TouchPhase::Idle
        } else if self.timer < 0.0 {
            TouchPhase::Armed
        } else {
            TouchPhase::Pressing
        }
    }

    /// Remaining debounce time; negative once armed.
    #[must_use]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    #[must_use]
    pub fn primary(&self) -> Option<Pose> {
        self.primary
    }

    #[must_use]
    pub fn secondary(&self) -> Option<Pose> {
        self.primary.map(|primary| secondary_pose(primary, self.config.anchor_offset))
    }

    /// Advance by `dt` seconds with this tick's touch sample.
    pub fn tick(&mut self, dt: f32, touch: TouchInput, raycaster: &mut impl SurfaceRaycaster) -> PlacementAction {
        if self.touching {
            self.timer -= dt;
        }

        if !touch.active {
            if self.touching {
                debug!(timer = self.timer, "touch released");
            }
            self.touching = false;
            self.timer = match self.config.release_reset {
                ReleaseReset::Expire => 0.0,
                ReleaseReset::Rearm => self.config.debounce_secs,
            };
            return PlacementAction::None;
        }
        self.touching = true;

        if self.timer >= 0.0 {
            return PlacementAction::None;
        }
        let Some(hit) = raycaster.raycast(touch.position) else {
            return PlacementAction::None;
        };

        match self.primary {
            None => {
                self.primary = Some(hit);
                let secondary = secondary_pose(hit, self.config.anchor_offset);
                info!(position = ?hit.position, "anchors placed");
                PlacementAction::Placed { primary: hit, secondary }
            }
            Some(current) => {
                // Moves carry position only; orientation stays from the first placement.
                let moved = Pose { position: hit.position, rotation: current.rotation };
                self.primary = Some(moved);
                PlacementAction::Moved { primary: moved, secondary: secondary_pose(moved, self.config.anchor_offset) }
            }
        }
    }
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

#[cfg(test)]
#[path = "placement_test.rs"]
mod tests;
