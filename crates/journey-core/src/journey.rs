//! Journey state machine.
//!
//! A [`Journey`] owns everything that changes over a simulated drive: the
//! vehicle position, the simulated clock, and the seeded random source all
//! derived values come from. Each call to [`Journey::tick`] performs one
//! step:
//!
//! 1. Advance position and clock.
//! 2. Build the five events for the new position and time.
//! 3. If the arrival predicate holds, discard the events and terminate.
//! 4. Otherwise hand the events back for emission.
//!
//! Once terminated the journey stays terminated.

use chrono::{DateTime, Utc};
use journey_types::{Coordinate, TickEvents};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::clock::{ClockError, SimulatedClock};
use crate::factory::{self, DeviceProfile};
use crate::geo::GeoInterpolator;

/// Default random seed, giving reproducible fixtures.
pub const DEFAULT_SEED: u64 = 42;

/// Default device identifier.
pub const DEFAULT_DEVICE_ID: &str = "Vehicle-JN";

/// Errors that can occur during a tick.
#[derive(Debug, thiserror::Error)]
pub enum JourneyError {
    /// The simulated clock could not advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// `tick` was called after the journey terminated.
    #[error("journey already terminated after {ticks} ticks")]
    Terminated {
        /// Ticks performed before termination.
        ticks: u64,
    },
}

/// Lifecycle of a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyState {
    /// Ticks are being produced.
    Running,
    /// The vehicle arrived. Terminal.
    Terminated,
}

/// Everything needed to start a journey.
#[derive(Debug, Clone)]
pub struct JourneyParams {
    /// Route and step size.
    pub route: GeoInterpolator,
    /// Reporting device identity.
    pub device: DeviceProfile,
    /// Simulated time before the first tick.
    pub start_time: DateTime<Utc>,
    /// Seed for the journey's random source.
    pub seed: u64,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Events to emit for this tick.
    Emit {
        /// 1-based tick number.
        tick: u64,
        /// The five events, sharing timestamp and location.
        events: TickEvents,
    },
    /// The vehicle arrived on this tick; nothing is emitted.
    Arrived {
        /// 1-based tick number of the arrival.
        tick: u64,
        /// Position on arrival.
        location: Coordinate,
        /// Simulated time on arrival.
        timestamp: DateTime<Utc>,
    },
}

/// A single simulated drive from origin to destination.
#[derive(Debug, Clone)]
pub struct Journey {
    route: GeoInterpolator,
    device: DeviceProfile,
    position: Coordinate,
    clock: SimulatedClock,
    rng: StdRng,
    state: JourneyState,
    ticks: u64,
}

impl Journey {
    /// Start a journey at the route origin.
    pub fn new(params: JourneyParams) -> Self {
        Self {
            position: params.route.origin(),
            route: params.route,
            device: params.device,
            clock: SimulatedClock::new(params.start_time),
            rng: StdRng::seed_from_u64(params.seed),
            state: JourneyState::Running,
            ticks: 0,
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> JourneyState {
        self.state
    }

    /// Ticks performed so far, including an arrival tick.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current vehicle position.
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Current simulated time.
    pub const fn current_time(&self) -> DateTime<Utc> {
        self.clock.current()
    }

    /// The route being driven.
    pub const fn route(&self) -> &GeoInterpolator {
        &self.route
    }

    /// The reporting device.
    pub const fn device(&self) -> &DeviceProfile {
        &self.device
    }

    /// Perform one tick.
    ///
    /// # Errors
    ///
    /// Returns [`JourneyError::Terminated`] once the journey has arrived,
    /// and [`JourneyError::Clock`] if simulated time overflows.
    pub fn tick(&mut self) -> Result<TickOutcome, JourneyError> {
        if self.state == JourneyState::Terminated {
            return Err(JourneyError::Terminated { ticks: self.ticks });
        }

        // Position is committed only once the clock has advanced, so a
        // failed tick leaves the journey where it was.
        let mut next_position = self.position;
        let location = self.route.advance(&mut next_position, &mut self.rng);
        let timestamp = self.clock.next(&mut self.rng)?;
        self.position = next_position;
        self.ticks = self.ticks.saturating_add(1);

        // Built before the arrival check so the random sequence does not
        // depend on whether this tick is the last one.
        let events = factory::build_tick_events(&mut self.rng, &self.device, timestamp, location);

        if self.route.has_arrived(location) {
            self.state = JourneyState::Terminated;
            info!(
                tick = self.ticks,
                %location,
                %timestamp,
                "Vehicle reached destination, ending simulation"
            );
            return Ok(TickOutcome::Arrived {
                tick: self.ticks,
                location,
                timestamp,
            });
        }

        debug!(tick = self.ticks, %location, %timestamp, "Tick generated");
        Ok(TickOutcome::Emit {
            tick: self.ticks,
            events,
        })
    }
}
