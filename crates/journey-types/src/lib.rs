//! Shared type definitions for the journey telemetry generator.
//!
//! # Modules
//!
//! - [`coordinate`] -- The latitude/longitude value type
//! - [`ids`] -- Type-safe UUID wrappers for event and incident identifiers
//! - [`enums`] -- Event kinds, weather conditions, incident categories
//! - [`events`] -- The five fixed-schema event records and their variant

pub mod coordinate;
pub mod enums;
pub mod events;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use coordinate::Coordinate;
pub use enums::{EventKind, IncidentStatus, IncidentType, WeatherCondition};
pub use events::{
    EmergencyEvent, GpsEvent, JourneyEvent, TickEvents, TrafficCameraEvent, VehicleEvent,
    WeatherEvent,
};
pub use ids::{EventId, IncidentId};
