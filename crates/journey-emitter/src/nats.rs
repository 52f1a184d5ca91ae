//! NATS-backed emission sink.
//!
//! Each event kind maps to a NATS subject (the configured channel name).
//! The message key travels in the [`KEY_HEADER`] header, since NATS has no
//! native message key. Publishing only enqueues into the client's write
//! buffer; the journey loop flushes once per tick. NATS subjects are not
//! partitioned, so every [`Delivery`] reports `partition: None`.
//!
//! Connection-level events (disconnects, reconnects, server and client
//! errors) arrive out of band and are logged as they happen.

use async_nats::{ConnectOptions, Event, HeaderMap};
use journey_core::sink::{Delivery, EmissionSink, SinkError};
use tracing::{info, warn};

use crate::error::EmitterError;

/// Header carrying the message key (the event id).
pub const KEY_HEADER: &str = "Msg-Key";

/// NATS client wrapper implementing [`EmissionSink`].
pub struct NatsSink {
    client: async_nats::Client,
}

impl NatsSink {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`EmitterError::Nats`] if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, EmitterError> {
        info!(url = url, "connecting to NATS server");
        let client = ConnectOptions::new()
            .event_callback(|event| async move { log_connection_event(&event) })
            .connect(url)
            .await
            .map_err(|e| EmitterError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }
}

/// Anything other than a (re)connect means publishes may be at risk.
const fn is_fault(event: &Event) -> bool {
    !matches!(event, Event::Connected)
}

fn log_connection_event(event: &Event) {
    if is_fault(event) {
        warn!(event = %event, "NATS connection event");
    } else {
        info!(event = %event, "NATS connection event");
    }
}

/// Headers for a keyed message.
fn key_headers(key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(KEY_HEADER, key);
    headers
}

impl EmissionSink for NatsSink {
    async fn publish(
        &mut self,
        channel: &str,
        key: &str,
        payload: Vec<u8>,
    ) -> Result<Delivery, SinkError> {
        self.client
            .publish_with_headers(channel.to_owned(), key_headers(key), payload.into())
            .await
            .map_err(|e| SinkError::Publish {
                channel: channel.to_owned(),
                message: e.to_string(),
            })?;
        Ok(Delivery {
            channel: channel.to_owned(),
            partition: None,
        })
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.client.flush().await.map_err(|e| SinkError::Flush {
            message: e.to_string(),
        })
    }
}

impl std::fmt::Debug for NatsSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsSink")
            .field("connected", &true)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use futures::StreamExt as _;
    use journey_core::channels::ChannelMap;
    use journey_core::control::JourneyControl;
    use journey_core::factory::DeviceProfile;
    use journey_core::geo::{BIRMINGHAM, GeoInterpolator, LONDON};
    use journey_core::journey::{Journey, JourneyParams};
    use journey_core::runner::{NoOpCallback, RunSettings, run_journey};

    use super::*;

    #[test]
    fn key_header_carries_event_id() {
        let headers = key_headers("3f1c2a7e-0000-4000-8000-000000000000");
        let value = headers.get(KEY_HEADER).map(|v| v.as_str().to_owned());
        assert_eq!(value.as_deref(), Some("3f1c2a7e-0000-4000-8000-000000000000"));
    }

    #[test]
    fn connection_faults_are_distinguished() {
        assert!(!is_fault(&Event::Connected));
        assert!(is_fault(&Event::Disconnected));
        assert!(is_fault(&Event::LameDuckMode));
        log_connection_event(&Event::Disconnected);
    }

    #[tokio::test]
    async fn connect_to_unreachable_server_fails() {
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            NatsSink::connect("nats://127.0.0.1:1"),
        )
        .await;
        // Either the connect fails fast or the timeout fires; it never succeeds.
        assert!(!matches!(result, Ok(Ok(_))));
    }

    // Integration tests that require a live NATS server are marked #[ignore].
    #[tokio::test]
    #[ignore]
    async fn tick_arrives_in_order_with_keys() {
        let observer = async_nats::connect("nats://localhost:4222").await.unwrap();
        let mut sub = observer.subscribe("journey-test.>".to_owned()).await.unwrap();

        let channels = ChannelMap {
            vehicle: String::from("journey-test.vehicle"),
            gps: String::from("journey-test.gps"),
            traffic: String::from("journey-test.traffic"),
            weather: String::from("journey-test.weather"),
            emergency: String::from("journey-test.emergency"),
        };
        let mut sink = NatsSink::connect("nats://localhost:4222").await.unwrap();
        let mut journey = Journey::new(JourneyParams {
            route: GeoInterpolator::new(LONDON, BIRMINGHAM),
            device: DeviceProfile::new("Vehicle-IT"),
            start_time: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            seed: 42,
        });
        let control = JourneyControl::new();
        let settings = RunSettings {
            tick_interval: Duration::from_millis(10),
            max_ticks: 1,
        };
        let _ = run_journey(
            &mut journey,
            &mut sink,
            &channels,
            &control,
            settings,
            &mut NoOpCallback,
        )
        .await
        .unwrap();

        let mut subjects = Vec::new();
        for _ in 0..5 {
            let msg = tokio::time::timeout(Duration::from_secs(2), sub.next())
                .await
                .unwrap()
                .unwrap();
            let payload: serde_json::Value = serde_json::from_slice(&msg.payload).unwrap();
            let key = msg
                .headers
                .as_ref()
                .and_then(|h| h.get(KEY_HEADER))
                .map(|v| v.as_str().to_owned());
            assert_eq!(payload["id"].as_str(), key.as_deref());
            subjects.push(msg.subject.to_string());
        }
        assert_eq!(
            subjects,
            vec![
                "journey-test.vehicle",
                "journey-test.gps",
                "journey-test.traffic",
                "journey-test.weather",
                "journey-test.emergency",
            ]
        );
    }
}
