//! Runtime configuration parsed from environment variables.
//!
//! Every tunable has a named default constant; only the API token is
//! required. Numeric values that fail to parse fall back to their default,
//! enumerated values that fail to parse are rejected.

use std::time::Duration;

use crate::building::Building;
use crate::gauge::{GaugeConfig, GaugeProfile};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::placement::{DEFAULT_ANCHOR_OFFSET, DEFAULT_DEBOUNCE_SECS, PlacementConfig, ReleaseReset};

pub const DEFAULT_API_URL: &str = "https://uclapi.com/workspaces/sensors/summary";
pub const DEFAULT_SURVEY_FILTER: &str = "student";
pub const DEFAULT_FETCH_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const DEFAULT_MQTT_TOPIC: &str = "student/TripleBang/seats";
pub const DEFAULT_MQTT_CLIENT_ID: &str = "seatview";
pub const DEFAULT_MQTT_KEEP_ALIVE_SECS: u64 = 60;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: String },
    #[error("invalid value '{value}' for {var}")]
    Invalid { var: String, value: String },
}

// =============================================================================
// CONFIG
// =============================================================================

/// Endpoint and credentials for the occupancy API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub survey_filter: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Broker the seat summary is published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttConfig {
    pub broker: String,
    pub port: u16,
    pub topic: String,
    pub client_id: String,
    pub keep_alive_secs: u64,
}

impl MqttConfig {
    /// Read broker settings. `None` when `SEATVIEW_MQTT_BROKER` is unset or
    /// empty, which disables publishing.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let broker = std::env::var("SEATVIEW_MQTT_BROKER").ok().filter(|b| !b.trim().is_empty())?;
        Some(Self {
            broker: broker.trim().to_string(),
            port: env_parse("SEATVIEW_MQTT_PORT", DEFAULT_MQTT_PORT),
            topic: std::env::var("SEATVIEW_MQTT_TOPIC").unwrap_or_else(|_| DEFAULT_MQTT_TOPIC.to_string()),
            client_id: std::env::var("SEATVIEW_MQTT_CLIENT_ID").unwrap_or_else(|_| DEFAULT_MQTT_CLIENT_ID.to_string()),
            keep_alive_secs: env_parse("SEATVIEW_MQTT_KEEP_ALIVE_SECS", DEFAULT_MQTT_KEEP_ALIVE_SECS).max(1),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Pause between the end of one fetch and the start of the next.
    pub fetch_interval: Duration,
    /// Samples kept per building in the rolling history.
    pub history_capacity: usize,
    pub placement: PlacementConfig,
    pub gauge: GaugeConfig,
    /// Building label selected at startup.
    pub initial_building: String,
    /// Seat summary publishing; disabled when no broker is configured.
    pub mqtt: Option<MqttConfig>,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SEATVIEW_API_TOKEN`
    ///
    /// Optional:
    /// - `SEATVIEW_API_URL`, `SEATVIEW_SURVEY_FILTER`
    /// - `SEATVIEW_FETCH_INTERVAL_SECS`: default 10
    /// - `SEATVIEW_REQUEST_TIMEOUT_SECS` / `SEATVIEW_CONNECT_TIMEOUT_SECS`: default 30 / 10
    /// - `SEATVIEW_HISTORY_CAPACITY`: default 180
    /// - `SEATVIEW_DEBOUNCE_SECS`: default 0.5
    /// - `SEATVIEW_RELEASE_RESET`: `expire` (default) or `rearm`
    /// - `SEATVIEW_ANCHOR_OFFSET`: default -1.1
    /// - `SEATVIEW_GAUGE_PROFILE`: `free-seats` (default, ±70°) or `digital-twin` (±90°)
    /// - `SEATVIEW_GAUGE_MIN_ANGLE` / `SEATVIEW_GAUGE_MAX_ANGLE`: override the profile
    /// - `SEATVIEW_GAUGE_PERIOD_SECS`: default 1
    /// - `SEATVIEW_BUILDING`: initial selection, default `One Pool Street`
    /// - `SEATVIEW_MQTT_BROKER`: enables seat summary publishing when set
    /// - `SEATVIEW_MQTT_PORT` / `SEATVIEW_MQTT_TOPIC` / `SEATVIEW_MQTT_CLIENT_ID`:
    ///   default 1883 / `student/TripleBang/seats` / `seatview`
    /// - `SEATVIEW_MQTT_KEEP_ALIVE_SECS`: default 60
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or an enumerated value is unknown.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("SEATVIEW_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar { var: "SEATVIEW_API_TOKEN".into() })?;

        let api = ApiConfig {
            base_url: std::env::var("SEATVIEW_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token,
            survey_filter: std::env::var("SEATVIEW_SURVEY_FILTER").unwrap_or_else(|_| DEFAULT_SURVEY_FILTER.to_string()),
            request_timeout_secs: env_parse("SEATVIEW_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse("SEATVIEW_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let placement = PlacementConfig {
            debounce_secs: env_parse("SEATVIEW_DEBOUNCE_SECS", DEFAULT_DEBOUNCE_SECS),
            anchor_offset: env_parse("SEATVIEW_ANCHOR_OFFSET", DEFAULT_ANCHOR_OFFSET),
            release_reset: parse_release_reset(std::env::var("SEATVIEW_RELEASE_RESET").ok().as_deref())?,
        };

        let profile = parse_gauge_profile(std::env::var("SEATVIEW_GAUGE_PROFILE").ok().as_deref())?;
        let defaults = GaugeConfig::for_profile(profile);
        let gauge = GaugeConfig {
            min_angle: env_parse("SEATVIEW_GAUGE_MIN_ANGLE", defaults.min_angle),
            max_angle: env_parse("SEATVIEW_GAUGE_MAX_ANGLE", defaults.max_angle),
            period_secs: env_parse("SEATVIEW_GAUGE_PERIOD_SECS", defaults.period_secs),
        };

        Ok(Self {
            api,
            fetch_interval: Duration::from_secs(env_parse("SEATVIEW_FETCH_INTERVAL_SECS", DEFAULT_FETCH_INTERVAL_SECS)),
            history_capacity: env_parse("SEATVIEW_HISTORY_CAPACITY", DEFAULT_HISTORY_CAPACITY),
            placement,
            gauge,
            initial_building: std::env::var("SEATVIEW_BUILDING")
                .unwrap_or_else(|_| Building::OnePoolStreet.label().to_string()),
            mqtt: MqttConfig::from_env(),
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_release_reset(raw: Option<&str>) -> Result<ReleaseReset, ConfigError> {
    match raw.unwrap_or("expire") {
        "expire" => Ok(ReleaseReset::Expire),
        "rearm" => Ok(ReleaseReset::Rearm),
        other => Err(ConfigError::Invalid { var: "SEATVIEW_RELEASE_RESET".into(), value: other.into() }),
    }
}

fn parse_gauge_profile(raw: Option<&str>) -> Result<GaugeProfile, ConfigError> {
    match raw.unwrap_or("free-seats") {
        "free-seats" => Ok(GaugeProfile::FreeSeats),
        "digital-twin" => Ok(GaugeProfile::DigitalTwin),
        other => Err(ConfigError::Invalid { var: "SEATVIEW_GAUGE_PROFILE".into(), value: other.into() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
