//! Wire encoding for journey events.
//!
//! Events are encoded as compact JSON. Field order follows the record
//! declarations, so equal records always encode to identical bytes.

use journey_types::{EventId, EventKind, JourneyEvent};

/// A record could not be encoded.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode {kind} event {id}: {source}")]
pub struct CodecError {
    /// Kind of the record that failed.
    pub kind: EventKind,
    /// Identifier of the record that failed.
    pub id: EventId,
    /// Underlying serializer error.
    #[source]
    pub source: serde_json::Error,
}

/// Encode one event as its wire payload.
///
/// # Errors
///
/// Returns [`CodecError`] if the record cannot be serialized.
pub fn encode_event(event: &JourneyEvent) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(event).map_err(|source| CodecError {
        kind: event.kind(),
        id: event.id(),
        source,
    })
}

/// Message key for an event: its own identifier in canonical form.
pub fn message_key(event: &JourneyEvent) -> String {
    event.id().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use journey_types::{Coordinate, TrafficCameraEvent};
    use serde_json::Value;

    use super::*;

    fn traffic() -> JourneyEvent {
        JourneyEvent::Traffic(TrafficCameraEvent {
            id: EventId::from_random_bytes([0x42; 16]),
            device_id: String::from("Vehicle-JN"),
            camera_id: String::from("Nikon-Cam123"),
            location: Coordinate::new(51.5, -0.5),
            timestamp: chrono::Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 30).unwrap(),
            snapshot: String::from("Base64EncodedString"),
        })
    }

    #[test]
    fn payload_field_order_is_stable() {
        let bytes = encode_event(&traffic()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let id = traffic().id().to_string();
        assert_eq!(
            text,
            format!(
                "{{\"id\":\"{id}\",\"deviceId\":\"Vehicle-JN\",\"cameraId\":\"Nikon-Cam123\",\
                 \"location\":[51.5,-0.5],\"timestamp\":\"2025-01-01T00:00:30Z\",\
                 \"snapshot\":\"Base64EncodedString\"}}"
            )
        );
    }

    #[test]
    fn key_matches_payload_id() {
        let event = traffic();
        let payload: Value = serde_json::from_slice(&encode_event(&event).unwrap()).unwrap();
        assert_eq!(payload["id"], message_key(&event));
    }
}
