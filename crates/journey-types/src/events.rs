//! Event records emitted on the journey channels.
//!
//! Each record has a fixed schema. Field declaration order is the field
//! order on the wire, and field names serialize in camelCase.
//!
//! All five records produced in one tick share the same `device_id`,
//! `timestamp`, and (where present) `location`. [`TickEvents`] groups them
//! and yields them in emission order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::enums::{EventKind, IncidentStatus, IncidentType, WeatherCondition};
use crate::ids::{EventId, IncidentId};

/// Vehicle position plus static vehicle description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEvent {
    /// Event identifier.
    pub id: EventId,
    /// Reporting device.
    pub device_id: String,
    /// Simulated time of the reading.
    pub timestamp: DateTime<Utc>,
    /// Vehicle position.
    pub location: Coordinate,
    /// Speed in km/h.
    pub speed: f64,
    /// Compass heading label.
    pub direction: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: u16,
    /// Fuel type label.
    pub fuel_type: String,
}

/// GPS reading for the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsEvent {
    /// Event identifier.
    pub id: EventId,
    /// Reporting device.
    pub device_id: String,
    /// Simulated time of the reading.
    pub timestamp: DateTime<Utc>,
    /// Speed in km/h.
    pub speed: f64,
    /// Compass heading label.
    pub direction: String,
    /// Vehicle category label.
    pub vehicle_type: String,
}

/// Capture from a roadside traffic camera near the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficCameraEvent {
    /// Event identifier.
    pub id: EventId,
    /// Reporting device.
    pub device_id: String,
    /// Camera that took the snapshot.
    pub camera_id: String,
    /// Where the snapshot was taken.
    pub location: Coordinate,
    /// Simulated time of the capture.
    pub timestamp: DateTime<Utc>,
    /// Encoded image. Always a placeholder marker.
    pub snapshot: String,
}

/// Weather at the vehicle's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherEvent {
    /// Event identifier.
    pub id: EventId,
    /// Reporting device.
    pub device_id: String,
    /// Where the reading was taken.
    pub location: Coordinate,
    /// Simulated time of the reading.
    pub timestamp: DateTime<Utc>,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Sky condition.
    pub weather_condition: WeatherCondition,
    /// Precipitation in millimetres.
    pub precipitation: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Air quality index (0-500).
    pub air_quality_index: f64,
}

/// Emergency incident observed near the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyEvent {
    /// Event identifier.
    pub id: EventId,
    /// Reporting device.
    pub device_id: String,
    /// Incident identifier, independent of the event identifier.
    pub incident_id: IncidentId,
    /// Incident category.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Simulated time of the report.
    pub timestamp: DateTime<Utc>,
    /// Incident position.
    pub location: Coordinate,
    /// Incident status.
    pub status: IncidentStatus,
    /// Free-text description.
    pub description: String,
}

/// Any one of the five event records.
///
/// Serializes as the bare inner record, with no tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JourneyEvent {
    /// See [`VehicleEvent`].
    Vehicle(VehicleEvent),
    /// See [`GpsEvent`].
    Gps(GpsEvent),
    /// See [`TrafficCameraEvent`].
    Traffic(TrafficCameraEvent),
    /// See [`WeatherEvent`].
    Weather(WeatherEvent),
    /// See [`EmergencyEvent`].
    Emergency(EmergencyEvent),
}

impl JourneyEvent {
    /// Which kind of event this is.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Vehicle(_) => EventKind::Vehicle,
            Self::Gps(_) => EventKind::Gps,
            Self::Traffic(_) => EventKind::Traffic,
            Self::Weather(_) => EventKind::Weather,
            Self::Emergency(_) => EventKind::Emergency,
        }
    }

    /// The event's own identifier.
    pub const fn id(&self) -> EventId {
        match self {
            Self::Vehicle(e) => e.id,
            Self::Gps(e) => e.id,
            Self::Traffic(e) => e.id,
            Self::Weather(e) => e.id,
            Self::Emergency(e) => e.id,
        }
    }

    /// The reporting device.
    pub fn device_id(&self) -> &str {
        match self {
            Self::Vehicle(e) => &e.device_id,
            Self::Gps(e) => &e.device_id,
            Self::Traffic(e) => &e.device_id,
            Self::Weather(e) => &e.device_id,
            Self::Emergency(e) => &e.device_id,
        }
    }

    /// Simulated time of the event.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Vehicle(e) => e.timestamp,
            Self::Gps(e) => e.timestamp,
            Self::Traffic(e) => e.timestamp,
            Self::Weather(e) => e.timestamp,
            Self::Emergency(e) => e.timestamp,
        }
    }

    /// Location of the event. GPS readings carry none.
    pub const fn location(&self) -> Option<Coordinate> {
        match self {
            Self::Vehicle(e) => Some(e.location),
            Self::Gps(_) => None,
            Self::Traffic(e) => Some(e.location),
            Self::Weather(e) => Some(e.location),
            Self::Emergency(e) => Some(e.location),
        }
    }
}

/// The five events generated in a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickEvents {
    /// Vehicle record.
    pub vehicle: VehicleEvent,
    /// GPS record.
    pub gps: GpsEvent,
    /// Traffic camera record.
    pub traffic: TrafficCameraEvent,
    /// Weather record.
    pub weather: WeatherEvent,
    /// Emergency record.
    pub emergency: EmergencyEvent,
}

impl TickEvents {
    /// Consume the batch, yielding the events in emission order:
    /// vehicle, GPS, traffic, weather, emergency.
    pub fn into_ordered(self) -> [JourneyEvent; 5] {
        [
            JourneyEvent::Vehicle(self.vehicle),
            JourneyEvent::Gps(self.gps),
            JourneyEvent::Traffic(self.traffic),
            JourneyEvent::Weather(self.weather),
            JourneyEvent::Emergency(self.emergency),
        ]
    }

    /// Shared timestamp of the batch.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.vehicle.timestamp
    }

    /// Shared location of the batch.
    pub const fn location(&self) -> Coordinate {
        self.vehicle.location
    }
}
