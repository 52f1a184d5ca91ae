//! Configuration for the journey emitter.
//!
//! All configuration is read from environment variables, each with a
//! default, so a bare `journey-emitter` invocation drives the standard
//! London to Birmingham journey against a local NATS server.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use journey_core::channels::{
    ChannelMap, DEFAULT_EMERGENCY_CHANNEL, DEFAULT_GPS_CHANNEL, DEFAULT_TRAFFIC_CHANNEL,
    DEFAULT_VEHICLE_CHANNEL, DEFAULT_WEATHER_CHANNEL,
};
use journey_core::journey::{DEFAULT_DEVICE_ID, DEFAULT_SEED};
use journey_core::runner::RunSettings;

use crate::error::EmitterError;

/// Default NATS server URL.
pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";

/// Default pacing delay in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5_000;

/// Complete emitter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// NATS server URL.
    pub nats_url: String,
    /// Channel (NATS subject) per event kind.
    pub channels: ChannelMap,
    /// Device identifier stamped on every event.
    pub device_id: String,
    /// Seed for the journey's random source.
    pub seed: u64,
    /// Wall-clock delay between ticks.
    pub tick_interval: Duration,
    /// Stop after this many emitted ticks (0 = unlimited).
    pub max_ticks: u64,
    /// Simulated start time; `None` means the current wall-clock time.
    pub start_time: Option<DateTime<Utc>>,
    /// Publish to an in-memory sink instead of NATS.
    pub dry_run: bool,
}

impl EmitterConfig {
    /// Load configuration from the process environment.
    ///
    /// | variable | default |
    /// |---|---|
    /// | `NATS_URL` | `nats://localhost:4222` |
    /// | `VEHICLE_TOPIC` | `vehicle_data` |
    /// | `GPS_TOPIC` | `gps_data` |
    /// | `TRAFFIC_TOPIC` | `traffic_data` |
    /// | `WEATHER_TOPIC` | `weather_data` |
    /// | `EMERGENCY_TOPIC` | `emergency_data` |
    /// | `DEVICE_ID` | `Vehicle-JN` |
    /// | `SIMULATION_SEED` | `42` |
    /// | `TICK_INTERVAL_MS` | `5000` |
    /// | `MAX_TICKS` | `0` (unlimited) |
    /// | `JOURNEY_START_TIME` | now (RFC 3339 when set) |
    /// | `DRY_RUN` | `false` |
    ///
    /// Two runs produce byte-identical payloads only when they share both
    /// `SIMULATION_SEED` and `JOURNEY_START_TIME`. Left unset, the start
    /// time is the wall clock and every timestamp differs between runs.
    pub fn from_env() -> Result<Self, EmitterError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EmitterError> {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_owned());

        let channels = ChannelMap {
            vehicle: text("VEHICLE_TOPIC", DEFAULT_VEHICLE_CHANNEL),
            gps: text("GPS_TOPIC", DEFAULT_GPS_CHANNEL),
            traffic: text("TRAFFIC_TOPIC", DEFAULT_TRAFFIC_CHANNEL),
            weather: text("WEATHER_TOPIC", DEFAULT_WEATHER_CHANNEL),
            emergency: text("EMERGENCY_TOPIC", DEFAULT_EMERGENCY_CHANNEL),
        };

        let tick_interval_ms: u64 = parse_var(&lookup, "TICK_INTERVAL_MS", DEFAULT_TICK_INTERVAL_MS)?;

        let start_time = lookup("JOURNEY_START_TIME")
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| {
                        EmitterError::Config(format!("invalid JOURNEY_START_TIME {raw:?}: {e}"))
                    })
            })
            .transpose()?;

        let device_id = text("DEVICE_ID", DEFAULT_DEVICE_ID);
        if device_id.trim().is_empty() {
            return Err(EmitterError::Config(String::from("DEVICE_ID must not be empty")));
        }

        Ok(Self {
            nats_url: text("NATS_URL", DEFAULT_NATS_URL),
            channels,
            device_id,
            seed: parse_var(&lookup, "SIMULATION_SEED", DEFAULT_SEED)?,
            tick_interval: Duration::from_millis(tick_interval_ms),
            max_ticks: parse_var(&lookup, "MAX_TICKS", 0)?,
            start_time,
            dry_run: parse_var(&lookup, "DRY_RUN", false)?,
        })
    }

    /// Whether runs with this configuration are byte-for-byte repeatable,
    /// which needs a pinned start time.
    pub const fn is_reproducible(&self) -> bool {
        self.start_time.is_some()
    }

    /// Loop settings derived from this configuration.
    pub const fn run_settings(&self) -> RunSettings {
        RunSettings {
            tick_interval: self.tick_interval,
            max_ticks: self.max_ticks,
        }
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, EmitterError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| EmitterError::Config(format!("invalid {name} {raw:?}: {e}")))
    })
}
