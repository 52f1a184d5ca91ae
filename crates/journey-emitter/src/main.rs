//! Journey telemetry generator entry point.
//!
//! Simulates one vehicle driving from London to Birmingham and streams
//! five correlated events per tick (vehicle, GPS, traffic camera, weather,
//! emergency) onto NATS subjects, pausing between ticks.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Build the journey (route, device, seed, start time)
//! 4. Install the Ctrl-C handler
//! 5. Connect to NATS (or use the in-memory sink on a dry run)
//! 6. Run the journey loop until arrival, tick limit, or interrupt
//! 7. Log the result
//!
//! Exits 0 on arrival, tick limit, or user interrupt. Any other failure is
//! logged and returned, which exits non-zero with the error on stderr.

mod config;
mod error;
mod logging;
mod nats;

use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use journey_core::control::JourneyControl;
use journey_core::factory::DeviceProfile;
use journey_core::geo::{BIRMINGHAM, GeoInterpolator, LONDON};
use journey_core::journey::{Journey, JourneyParams};
use journey_core::runner::{self, JourneySummary, NoOpCallback};
use journey_core::sink::MemorySink;
use tracing::{error, info, warn};

use crate::config::EmitterConfig;
use crate::nats::NatsSink;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the broker connection, or the
/// journey itself fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    info!("journey-emitter starting");

    match run().await {
        Ok(summary) => {
            runner::log_journey_end(&summary);
            info!("journey-emitter shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Unexpected error occurred");
            Err(e)
        }
    }
}

/// Load configuration, wire the sink and interrupt handler, and drive
/// the journey to completion.
async fn run() -> anyhow::Result<JourneySummary> {
    let config = EmitterConfig::from_env().context("loading configuration")?;
    info!(
        nats_url = config.nats_url,
        device_id = config.device_id,
        seed = config.seed,
        tick_interval_ms = config.tick_interval.as_millis(),
        max_ticks = config.max_ticks,
        dry_run = config.dry_run,
        "configuration loaded"
    );
    if !config.is_reproducible() {
        info!(
            "JOURNEY_START_TIME unset, starting from the wall clock; \
             timestamps will differ between runs"
        );
    }

    let mut journey = Journey::new(JourneyParams {
        route: GeoInterpolator::new(LONDON, BIRMINGHAM),
        device: DeviceProfile::new(config.device_id.clone()),
        start_time: config.start_time.unwrap_or_else(Utc::now),
        seed: config.seed,
    });

    let control = Arc::new(JourneyControl::new());
    spawn_interrupt_handler(Arc::clone(&control));

    let settings = config.run_settings();
    let summary = if config.dry_run {
        let mut sink = MemorySink::new();
        let summary = runner::run_journey(
            &mut journey,
            &mut sink,
            &config.channels,
            &control,
            settings,
            &mut NoOpCallback,
        )
        .await
        .context("running journey")?;
        info!(
            captured = sink.messages().len(),
            "dry run complete, no messages were sent to a broker"
        );
        summary
    } else {
        let mut sink = NatsSink::connect(&config.nats_url)
            .await
            .context("connecting to NATS")?;
        runner::run_journey(
            &mut journey,
            &mut sink,
            &config.channels,
            &control,
            settings,
            &mut NoOpCallback,
        )
        .await
        .context("running journey")?
    };

    Ok(summary)
}

/// Request a clean stop when Ctrl-C arrives.
///
/// The journey loop observes the stop between ticks, so the current tick's
/// events are always published in full.
fn spawn_interrupt_handler(control: Arc<JourneyControl>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, stopping after the current tick");
                control.request_stop();
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for interrupt signal");
            }
        }
    });
}
