//! Event payload construction.
//!
//! Every builder is a pure function of the device identity, the tick's
//! shared timestamp and location, and a random source. Random draws happen
//! in a fixed order: the event id first, then fields in declaration order.
//! [`build_tick_events`] calls the builders in emission order, so a seeded
//! source always yields the same batch.

use chrono::{DateTime, Utc};
use journey_types::{
    Coordinate, EmergencyEvent, EventId, GpsEvent, IncidentId, IncidentStatus, IncidentType,
    TickEvents, TrafficCameraEvent, VehicleEvent, WeatherCondition, WeatherEvent,
};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Heading reported by vehicle and GPS events. Not derived from movement.
pub const DIRECTION: &str = "North-East";

/// Vehicle manufacturer.
pub const VEHICLE_MAKE: &str = "BMW";

/// Vehicle model.
pub const VEHICLE_MODEL: &str = "C500";

/// Vehicle model year.
pub const VEHICLE_YEAR: u16 = 2025;

/// Vehicle fuel type.
pub const FUEL_TYPE: &str = "Hybrid";

/// Default GPS vehicle category.
pub const DEFAULT_VEHICLE_TYPE: &str = "Private";

/// Default traffic camera identifier.
pub const DEFAULT_CAMERA_ID: &str = "Nikon-Cam123";

/// Placeholder for the camera image payload.
pub const SNAPSHOT_PLACEHOLDER: &str = "Base64EncodedString";

/// Placeholder emergency description.
pub const INCIDENT_DESCRIPTION: &str = "Incident Description";

/// Fixed identity of the reporting vehicle for one journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Device identifier stamped on every event.
    pub device_id: String,
    /// Camera identifier used for traffic events.
    pub camera_id: String,
    /// Vehicle category used for GPS events.
    pub vehicle_type: String,
}

impl DeviceProfile {
    /// Profile with the default camera and vehicle type.
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            camera_id: DEFAULT_CAMERA_ID.to_owned(),
            vehicle_type: DEFAULT_VEHICLE_TYPE.to_owned(),
        }
    }
}

/// Draw a version 4 event identifier from `rng`.
fn next_event_id(rng: &mut impl Rng) -> EventId {
    EventId::from_random_bytes(rng.random())
}

/// Pick uniformly from a non-empty option list.
fn pick<T: Copy>(rng: &mut impl Rng, options: &[T], fallback: T) -> T {
    options.choose(rng).copied().unwrap_or(fallback)
}

/// Build a vehicle event. Speed is uniform in `[10, 40]`.
pub fn vehicle_event(
    rng: &mut impl Rng,
    device_id: &str,
    timestamp: DateTime<Utc>,
    location: Coordinate,
) -> VehicleEvent {
    VehicleEvent {
        id: next_event_id(rng),
        device_id: device_id.to_owned(),
        timestamp,
        location,
        speed: rng.random_range(10.0..=40.0),
        direction: DIRECTION.to_owned(),
        make: VEHICLE_MAKE.to_owned(),
        model: VEHICLE_MODEL.to_owned(),
        year: VEHICLE_YEAR,
        fuel_type: FUEL_TYPE.to_owned(),
    }
}

/// Build a GPS event. Speed is uniform in `[0, 40]`.
pub fn gps_event(
    rng: &mut impl Rng,
    device_id: &str,
    timestamp: DateTime<Utc>,
    vehicle_type: &str,
) -> GpsEvent {
    GpsEvent {
        id: next_event_id(rng),
        device_id: device_id.to_owned(),
        timestamp,
        speed: rng.random_range(0.0..=40.0),
        direction: DIRECTION.to_owned(),
        vehicle_type: vehicle_type.to_owned(),
    }
}

/// Build a traffic camera event with a placeholder snapshot.
pub fn traffic_camera_event(
    rng: &mut impl Rng,
    device_id: &str,
    timestamp: DateTime<Utc>,
    location: Coordinate,
    camera_id: &str,
) -> TrafficCameraEvent {
    TrafficCameraEvent {
        id: next_event_id(rng),
        device_id: device_id.to_owned(),
        camera_id: camera_id.to_owned(),
        location,
        timestamp,
        snapshot: SNAPSHOT_PLACEHOLDER.to_owned(),
    }
}

/// Build a weather event.
///
/// | field | range |
/// |---|---|
/// | temperature | `[-5, 26]` °C |
/// | precipitation | `[0, 25]` mm |
/// | wind speed | `[0, 100]` |
/// | humidity | `[0, 100]` % |
/// | air quality index | `[0, 500]` |
pub fn weather_event(
    rng: &mut impl Rng,
    device_id: &str,
    timestamp: DateTime<Utc>,
    location: Coordinate,
) -> WeatherEvent {
    let id = next_event_id(rng);
    let temperature = rng.random_range(-5.0..=26.0);
    let weather_condition = pick(rng, &WeatherCondition::ALL, WeatherCondition::Sunny);
    let precipitation = rng.random_range(0.0..=25.0);
    let wind_speed = rng.random_range(0.0..=100.0);
    let humidity = rng.random_range(0.0..=100.0);
    let air_quality_index = rng.random_range(0.0..=500.0);

    WeatherEvent {
        id,
        device_id: device_id.to_owned(),
        location,
        timestamp,
        temperature,
        weather_condition,
        precipitation,
        wind_speed,
        humidity,
        air_quality_index,
    }
}

/// Build an emergency incident event.
pub fn emergency_event(
    rng: &mut impl Rng,
    device_id: &str,
    timestamp: DateTime<Utc>,
    location: Coordinate,
) -> EmergencyEvent {
    let id = next_event_id(rng);
    let incident_id = IncidentId::from_random_bytes(rng.random());
    let incident_type = pick(rng, &IncidentType::ALL, IncidentType::None);
    let status = pick(rng, &IncidentStatus::ALL, IncidentStatus::Active);

    EmergencyEvent {
        id,
        device_id: device_id.to_owned(),
        incident_id,
        incident_type,
        timestamp,
        location,
        status,
        description: INCIDENT_DESCRIPTION.to_owned(),
    }
}

/// Build all five events for one tick, in emission order.
pub fn build_tick_events(
    rng: &mut impl Rng,
    device: &DeviceProfile,
    timestamp: DateTime<Utc>,
    location: Coordinate,
) -> TickEvents {
    let device_id = device.device_id.as_str();
    let vehicle = vehicle_event(rng, device_id, timestamp, location);
    let gps = gps_event(rng, device_id, timestamp, &device.vehicle_type);
    let traffic = traffic_camera_event(rng, device_id, timestamp, location, &device.camera_id);
    let weather = weather_event(rng, device_id, timestamp, location);
    let emergency = emergency_event(rng, device_id, timestamp, location);

    TickEvents {
        vehicle,
        gps,
        traffic,
        weather,
        emergency,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 7, 30, 0).unwrap()
    }

    fn here() -> Coordinate {
        Coordinate::new(51.9, -0.8)
    }

    #[test]
    fn vehicle_fields() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let v = vehicle_event(&mut rng, "Vehicle-JN", at(), here());
            assert!((10.0..=40.0).contains(&v.speed));
            assert_eq!(v.direction, "North-East");
            assert_eq!(v.make, "BMW");
            assert_eq!(v.model, "C500");
            assert_eq!(v.year, 2025);
            assert_eq!(v.fuel_type, "Hybrid");
            assert_eq!(v.location, here());
        }
    }

    #[test]
    fn gps_speed_range_and_vehicle_type() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let g = gps_event(&mut rng, "Vehicle-JN", at(), DEFAULT_VEHICLE_TYPE);
            assert!((0.0..=40.0).contains(&g.speed));
            assert_eq!(g.vehicle_type, "Private");
        }
    }

    #[test]
    fn weather_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let w = weather_event(&mut rng, "Vehicle-JN", at(), here());
            assert!((-5.0..=26.0).contains(&w.temperature));
            assert!((0.0..=25.0).contains(&w.precipitation));
            assert!((0.0..=100.0).contains(&w.wind_speed));
            assert!((0.0..=100.0).contains(&w.humidity));
            assert!((0.0..=500.0).contains(&w.air_quality_index));
        }
    }

    #[test]
    fn weather_conditions_all_reachable() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(weather_event(&mut rng, "d", at(), here()).weather_condition);
        }
        assert_eq!(seen.len(), WeatherCondition::ALL.len());
    }

    #[test]
    fn emergency_ids_independent() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut types = std::collections::HashSet::new();
        let mut statuses = std::collections::HashSet::new();
        for _ in 0..500 {
            let e = emergency_event(&mut rng, "d", at(), here());
            assert_ne!(e.id.into_inner(), e.incident_id.into_inner());
            assert_eq!(e.description, "Incident Description");
            types.insert(e.incident_type);
            statuses.insert(e.status);
        }
        assert_eq!(types.len(), IncidentType::ALL.len());
        assert_eq!(statuses.len(), IncidentStatus::ALL.len());
    }

    #[test]
    fn traffic_uses_camera_and_placeholder() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = traffic_camera_event(&mut rng, "d", at(), here(), DEFAULT_CAMERA_ID);
        assert_eq!(t.camera_id, "Nikon-Cam123");
        assert_eq!(t.snapshot, "Base64EncodedString");
    }

    #[test]
    fn tick_events_share_time_location_and_device() {
        let mut rng = StdRng::seed_from_u64(42);
        let device = DeviceProfile::new("Vehicle-JN");
        let batch = build_tick_events(&mut rng, &device, at(), here());

        let events = batch.into_ordered();
        let mut ids = std::collections::HashSet::new();
        for event in &events {
            assert_eq!(event.timestamp(), at());
            assert_eq!(event.device_id(), "Vehicle-JN");
            if let Some(location) = event.location() {
                assert_eq!(location, here());
            }
            ids.insert(event.id());
        }
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn seeded_batches_reproduce() {
        let device = DeviceProfile::new("Vehicle-JN");
        let a = build_tick_events(&mut StdRng::seed_from_u64(42), &device, at(), here());
        let b = build_tick_events(&mut StdRng::seed_from_u64(42), &device, at(), here());
        assert_eq!(a.vehicle.id, b.vehicle.id);
        assert_eq!(a.emergency.incident_id, b.emergency.incident_id);
        assert_eq!(a, b);
    }
}
