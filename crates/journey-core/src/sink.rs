//! Emission sink abstraction.
//!
//! The journey loop hands each encoded event to an [`EmissionSink`] along
//! with its channel name and message key. Sinks buffer as they like; the
//! loop calls [`flush`](EmissionSink::flush) once at the end of every tick.
//! Publishing only waits for the message to be accepted locally, never for
//! a remote acknowledgement.
//!
//! The completion of each publish is a [`Delivery`] (or a [`SinkError`]),
//! which the loop logs through [`report_delivery`].

use std::future::Future;

use journey_types::EventKind;
use tracing::{debug, warn};

/// Errors reported by a sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A single message could not be published.
    #[error("publish to {channel} failed: {message}")]
    Publish {
        /// Destination channel.
        channel: String,
        /// Transport error description.
        message: String,
    },

    /// Buffered messages could not be flushed.
    #[error("flush failed: {message}")]
    Flush {
        /// Transport error description.
        message: String,
    },
}

/// Completion notice for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Channel the message went to.
    pub channel: String,
    /// Partition or shard, for transports that have one.
    pub partition: Option<u32>,
}

/// A destination for encoded journey events.
///
/// Messages published on one sink must reach the wire in call order.
pub trait EmissionSink: Send {
    /// Publish `payload` on `channel` keyed by `key`.
    fn publish(
        &mut self,
        channel: &str,
        key: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<Delivery, SinkError>> + Send;

    /// Push any buffered messages to the transport.
    fn flush(&mut self) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Log the outcome of one publish.
pub fn report_delivery(kind: EventKind, key: &str, outcome: &Result<Delivery, SinkError>) {
    match outcome {
        Ok(delivery) => debug!(
            kind = %kind,
            key = key,
            channel = delivery.channel,
            partition = ?delivery.partition,
            "Message delivered"
        ),
        Err(e) => warn!(
            kind = %kind,
            key = key,
            error = %e,
            "Message delivery failed"
        ),
    }
}

/// One message captured by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Destination channel.
    pub channel: String,
    /// Message key.
    pub key: String,
    /// Encoded payload.
    pub payload: Vec<u8>,
}

/// In-process sink that records every message in order.
///
/// Backs dry runs (no broker) and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Vec<SentMessage>,
    flushes: u64,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages published so far, in publish order.
    pub fn messages(&self) -> &[SentMessage] {
        &self.messages
    }

    /// Number of completed flushes.
    pub const fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Consume the sink, returning the captured messages.
    pub fn into_messages(self) -> Vec<SentMessage> {
        self.messages
    }
}

impl EmissionSink for MemorySink {
    async fn publish(
        &mut self,
        channel: &str,
        key: &str,
        payload: Vec<u8>,
    ) -> Result<Delivery, SinkError> {
        self.messages.push(SentMessage {
            channel: channel.to_owned(),
            key: key.to_owned(),
            payload,
        });
        Ok(Delivery {
            channel: channel.to_owned(),
            partition: None,
        })
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes = self.flushes.saturating_add(1);
        Ok(())
    }
}
