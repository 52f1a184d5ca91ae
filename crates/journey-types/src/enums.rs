//! Enumeration types carried by journey events.
//!
//! Variants serialize as their bare names (`"Sunny"`, `"Accident"`, ...),
//! which is the form downstream consumers of the channels expect.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The five kinds of event emitted per tick.
///
/// Declaration order is the emission order within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Vehicle position and descriptive data.
    Vehicle,
    /// GPS speed and heading reading.
    Gps,
    /// Roadside traffic camera capture.
    Traffic,
    /// Local weather reading.
    Weather,
    /// Emergency incident report.
    Emergency,
}

impl EventKind {
    /// All event kinds in emission order.
    pub const ALL: [Self; 5] = [
        Self::Vehicle,
        Self::Gps,
        Self::Traffic,
        Self::Weather,
        Self::Emergency,
    ];

    /// Short lowercase label used in log fields.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Gps => "gps",
            Self::Traffic => "traffic",
            Self::Weather => "weather",
            Self::Emergency => "emergency",
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Sky condition reported by a weather event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// Clear skies.
    Sunny,
    /// Overcast.
    Cloudy,
    /// Rainfall.
    Rainy,
    /// Snowfall.
    Snow,
}

impl WeatherCondition {
    /// Every condition, in the order used for uniform selection.
    pub const ALL: [Self; 4] = [Self::Sunny, Self::Cloudy, Self::Rainy, Self::Snow];
}

// ---------------------------------------------------------------------------
// Emergencies
// ---------------------------------------------------------------------------

/// Category of an emergency incident.
///
/// `None` is a real category on the wire: a report with no incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    /// Fire.
    Fire,
    /// Road traffic accident.
    Accident,
    /// Medical emergency.
    Medical,
    /// Police matter.
    Police,
    /// No incident.
    None,
}

impl IncidentType {
    /// Every incident type, in the order used for uniform selection.
    pub const ALL: [Self; 5] = [
        Self::Fire,
        Self::Accident,
        Self::Medical,
        Self::Police,
        Self::None,
    ];
}

/// Lifecycle status of an emergency incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    /// Incident is ongoing.
    Active,
    /// Incident has been dealt with.
    Resolved,
}

impl IncidentStatus {
    /// Every status, in the order used for uniform selection.
    pub const ALL: [Self; 2] = [Self::Active, Self::Resolved];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds_in_emission_order() {
        let mut sorted = EventKind::ALL;
        sorted.sort();
        assert_eq!(sorted, EventKind::ALL);
        assert_eq!(EventKind::ALL.first(), Some(&EventKind::Vehicle));
        assert_eq!(EventKind::ALL.last(), Some(&EventKind::Emergency));
    }

    #[test]
    fn incident_none_serializes_as_name() {
        let json = serde_json::to_string(&IncidentType::None).unwrap_or_default();
        assert_eq!(json, "\"None\"");
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EventKind::Gps.to_string(), "gps");
        assert_eq!(EventKind::Emergency.label(), "emergency");
    }
}
