//! Channel names per event kind.

use journey_types::EventKind;

/// Default channel for vehicle events.
pub const DEFAULT_VEHICLE_CHANNEL: &str = "vehicle_data";
/// Default channel for GPS events.
pub const DEFAULT_GPS_CHANNEL: &str = "gps_data";
/// Default channel for traffic camera events.
pub const DEFAULT_TRAFFIC_CHANNEL: &str = "traffic_data";
/// Default channel for weather events.
pub const DEFAULT_WEATHER_CHANNEL: &str = "weather_data";
/// Default channel for emergency events.
pub const DEFAULT_EMERGENCY_CHANNEL: &str = "emergency_data";

/// Where each kind of event is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    /// Channel for [`EventKind::Vehicle`].
    pub vehicle: String,
    /// Channel for [`EventKind::Gps`].
    pub gps: String,
    /// Channel for [`EventKind::Traffic`].
    pub traffic: String,
    /// Channel for [`EventKind::Weather`].
    pub weather: String,
    /// Channel for [`EventKind::Emergency`].
    pub emergency: String,
}

impl ChannelMap {
    /// Channel name for `kind`.
    pub fn for_kind(&self, kind: EventKind) -> &str {
        match kind {
            EventKind::Vehicle => &self.vehicle,
            EventKind::Gps => &self.gps,
            EventKind::Traffic => &self.traffic,
            EventKind::Weather => &self.weather,
            EventKind::Emergency => &self.emergency,
        }
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            vehicle: DEFAULT_VEHICLE_CHANNEL.to_owned(),
            gps: DEFAULT_GPS_CHANNEL.to_owned(),
            traffic: DEFAULT_TRAFFIC_CHANNEL.to_owned(),
            weather: DEFAULT_WEATHER_CHANNEL.to_owned(),
            emergency: DEFAULT_EMERGENCY_CHANNEL.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_kind() {
        let channels = ChannelMap::default();
        let names: Vec<&str> = EventKind::ALL
            .iter()
            .map(|kind| channels.for_kind(*kind))
            .collect();
        assert_eq!(
            names,
            vec!["vehicle_data", "gps_data", "traffic_data", "weather_data", "emergency_data"]
        );
    }
}
