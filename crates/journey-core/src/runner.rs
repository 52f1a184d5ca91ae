//! Journey loop runner with pacing and stop control.
//!
//! This module provides [`run_journey`], the top-level async function that
//! drives [`Journey::tick`] until the vehicle arrives, the optional tick
//! bound is hit, or a stop is requested. For every non-arrival tick it:
//!
//! - encodes and publishes the five events in emission order,
//! - logs the completion of every publish,
//! - flushes the sink once,
//! - notifies the [`TickCallback`],
//! - sleeps for the tick interval, waking early on a stop request.
//!
//! Encoding, delivery, and flush failures are logged and counted, never
//! retried, and never abort the tick or the loop. When a flush fails, the
//! tick's publishes are counted as undelivered.
//!
//! [`Journey::tick`]: crate::journey::Journey::tick

use std::time::Duration;

use chrono::{DateTime, Utc};
use journey_types::{Coordinate, JourneyEvent, TickEvents};
use tracing::{error, info, warn};

use crate::channels::ChannelMap;
use crate::codec::{self, CodecError};
use crate::control::JourneyControl;
use crate::journey::{Journey, JourneyError, TickOutcome};
use crate::sink::{self, EmissionSink};

/// Default wall-clock delay between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Turns one event into its wire payload.
type Encoder = fn(&JourneyEvent) -> Result<Vec<u8>, CodecError>;

/// Errors that end a journey run abnormally.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick could not be produced.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying journey error.
        #[from]
        source: JourneyError,
    },
}

/// Reason why the journey ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyEndReason {
    /// The vehicle reached its destination.
    Arrived,
    /// A stop was requested (user interrupt).
    Interrupted,
    /// The configured tick bound was reached.
    MaxTicksReached,
}

/// Loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Wall-clock delay after each emitted tick.
    pub tick_interval: Duration,
    /// Stop after this many emitted ticks (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_ticks: 0,
        }
    }
}

/// What happened to one emitted tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Shared simulated time of the batch.
    pub timestamp: DateTime<Utc>,
    /// Shared location of the batch.
    pub location: Coordinate,
    /// Events accepted by the sink.
    pub delivered: u32,
    /// Events the sink rejected, or lost to a failed flush.
    pub delivery_failures: u32,
    /// Events that could not be encoded.
    pub serialization_failures: u32,
    /// Whether the end-of-tick flush failed.
    pub flush_failed: bool,
}

/// Callback invoked after each emitted tick.
pub trait TickCallback: Send {
    /// Called once the tick's events have been published and flushed.
    fn on_tick(&mut self, report: &TickReport);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _report: &TickReport) {}
}

/// Result of a journey run.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneySummary {
    /// Why the run ended.
    pub end_reason: JourneyEndReason,
    /// Ticks performed, including an arrival tick.
    pub ticks: u64,
    /// Events accepted by the sink.
    pub events_emitted: u64,
    /// Events the sink rejected, or lost to a failed flush.
    pub delivery_failures: u64,
    /// Events that could not be encoded.
    pub serialization_failures: u64,
    /// Ticks whose flush failed.
    pub flush_failures: u64,
    /// Vehicle position when the run ended.
    pub final_position: Coordinate,
    /// Simulated time when the run ended.
    pub final_time: DateTime<Utc>,
}

/// Run the journey loop until arrival, the tick bound, or a stop request.
///
/// A stop is honored before a tick starts or during the pacing delay; a
/// tick that has started always publishes all of its events first.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick cannot be produced.
pub async fn run_journey<S: EmissionSink>(
    journey: &mut Journey,
    sink: &mut S,
    channels: &ChannelMap,
    control: &JourneyControl,
    settings: RunSettings,
    callback: &mut dyn TickCallback,
) -> Result<JourneySummary, RunnerError> {
    let mut emitted_ticks: u64 = 0;
    let mut events_emitted: u64 = 0;
    let mut delivery_failures: u64 = 0;
    let mut serialization_failures: u64 = 0;
    let mut flush_failures: u64 = 0;

    info!(
        device_id = journey.device().device_id,
        origin = %journey.route().origin(),
        destination = %journey.route().destination(),
        tick_interval_ms = settings.tick_interval.as_millis(),
        max_ticks = settings.max_ticks,
        "Journey starting"
    );

    let end_reason = loop {
        // --- Check stop request (before tick) ---
        if control.is_stop_requested() {
            break JourneyEndReason::Interrupted;
        }

        // --- Execute tick ---
        let (tick, events) = match journey.tick()? {
            TickOutcome::Emit { tick, events } => (tick, events),
            TickOutcome::Arrived { .. } => break JourneyEndReason::Arrived,
        };

        let report = emit_tick(tick, events, sink, channels, codec::encode_event).await;
        emitted_ticks = emitted_ticks.saturating_add(1);
        events_emitted = events_emitted.saturating_add(u64::from(report.delivered));
        delivery_failures = delivery_failures.saturating_add(u64::from(report.delivery_failures));
        serialization_failures =
            serialization_failures.saturating_add(u64::from(report.serialization_failures));
        if report.flush_failed {
            flush_failures = flush_failures.saturating_add(1);
        }

        info!(
            tick = report.tick,
            timestamp = %report.timestamp,
            location = %report.location,
            delivered = report.delivered,
            failed = report.delivery_failures,
            flush_failed = report.flush_failed,
            "Tick emitted"
        );
        callback.on_tick(&report);

        // --- Check tick limit (after tick) ---
        if settings.max_ticks > 0 && emitted_ticks >= settings.max_ticks {
            break JourneyEndReason::MaxTicksReached;
        }

        // --- Pace ---
        if !control.pace(settings.tick_interval).await {
            break JourneyEndReason::Interrupted;
        }
    };

    Ok(JourneySummary {
        end_reason,
        ticks: journey.ticks(),
        events_emitted,
        delivery_failures,
        serialization_failures,
        flush_failures,
        final_position: journey.position(),
        final_time: journey.current_time(),
    })
}

/// Encode, publish, and flush one tick's events in emission order.
async fn emit_tick<S: EmissionSink>(
    tick: u64,
    events: TickEvents,
    sink: &mut S,
    channels: &ChannelMap,
    encode: Encoder,
) -> TickReport {
    let mut report = TickReport {
        tick,
        timestamp: events.timestamp(),
        location: events.location(),
        delivered: 0,
        delivery_failures: 0,
        serialization_failures: 0,
        flush_failed: false,
    };

    for event in events.into_ordered() {
        let kind = event.kind();
        let key = codec::message_key(&event);
        let payload = match encode(&event) {
            Ok(payload) => payload,
            Err(e) => {
                error!(tick, error = %e, "Skipping event that failed to encode");
                report.serialization_failures = report.serialization_failures.saturating_add(1);
                continue;
            }
        };

        let outcome = sink.publish(channels.for_kind(kind), &key, payload).await;
        sink::report_delivery(kind, &key, &outcome);
        if outcome.is_ok() {
            report.delivered = report.delivered.saturating_add(1);
        } else {
            report.delivery_failures = report.delivery_failures.saturating_add(1);
        }
    }

    if let Err(e) = sink.flush().await {
        warn!(
            tick,
            lost = report.delivered,
            error = %e,
            "Flush failed, counting the tick's publishes as undelivered"
        );
        report.flush_failed = true;
        report.delivery_failures = report.delivery_failures.saturating_add(report.delivered);
        report.delivered = 0;
    }

    report
}

/// Log the end of a journey run.
pub fn log_journey_end(summary: &JourneySummary) {
    match summary.end_reason {
        JourneyEndReason::Arrived => info!("Vehicle has reached its destination"),
        JourneyEndReason::Interrupted => info!("Simulation stopped by user"),
        JourneyEndReason::MaxTicksReached => info!("Tick limit reached"),
    }
    info!(
        reason = ?summary.end_reason,
        ticks = summary.ticks,
        events_emitted = summary.events_emitted,
        delivery_failures = summary.delivery_failures,
        serialization_failures = summary.serialization_failures,
        flush_failures = summary.flush_failures,
        final_position = %summary.final_position,
        final_time = %summary.final_time,
        "Journey ended"
    );
    if summary.delivery_failures > 0 || summary.flush_failures > 0 {
        warn!(
            delivery_failures = summary.delivery_failures,
            flush_failures = summary.flush_failures,
            "Some events were not delivered"
        );
    }
}
