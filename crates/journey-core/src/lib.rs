//! Journey simulation engine for the telemetry generator.
//!
//! This crate owns the tick loop that drives a simulated vehicle from an
//! origin to a destination, producing five correlated events per tick.
//!
//! # Modules
//!
//! - [`geo`] -- Per-step route interpolation, jitter, and the arrival
//!   predicate.
//! - [`clock`] -- Simulated clock advancing by random 30-60 second steps.
//! - [`factory`] -- Pure builders for the five event records.
//! - [`journey`] -- The [`Journey`] state machine owning position, clock,
//!   and the seeded random source.
//! - [`codec`] -- JSON wire encoding and message keys.
//! - [`channels`] -- Channel names per event kind.
//! - [`sink`] -- [`EmissionSink`] trait and the in-memory sink.
//! - [`control`] -- Shared stop control honored between ticks.
//! - [`runner`] -- The paced, cancellable emission loop.
//!
//! [`Journey`]: journey::Journey
//! [`EmissionSink`]: sink::EmissionSink

pub mod channels;
pub mod clock;
pub mod codec;
pub mod control;
pub mod factory;
pub mod geo;
pub mod journey;
pub mod runner;
pub mod sink;
