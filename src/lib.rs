//! Occupancy telemetry and anchor placement for an AR seat-finder.
//!
//! The crate keeps a live snapshot of per-building seat counts fetched from a
//! remote sensors API, derives readouts and a rolling history from it, and
//! turns touch input plus surface hits into placements for the dashboard and
//! gauge anchors. Rendering, widgets and surface detection belong to the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`telemetry`] | Survey data model, snapshot, and the HTTP client |
//! | [`state`] | Live snapshot channel and the selected-building handle |
//! | [`services`] | Background sync task, dashboard panel and MQTT seat publisher |
//! | [`building`] | Known buildings, label resolution and survey lookup |
//! | [`rate`] | Free-seat ratio |
//! | [`history`] | Fixed-capacity rolling sample buffers |
//! | [`gauge`] | Periodic needle-angle sampling |
//! | [`placement`] | Touch-debounced anchor placement state machine |
//! | [`summary`] | Compact seat-count payload |
//! | [`config`] | Environment-driven configuration |

pub mod building;
pub mod config;
pub mod gauge;
pub mod history;
pub mod placement;
pub mod rate;
pub mod services;
pub mod state;
pub mod summary;
pub mod telemetry;
