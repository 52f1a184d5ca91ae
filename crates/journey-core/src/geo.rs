//! Straight-line route interpolation with road-noise jitter.
//!
//! A route is split into a fixed number of equal steps. Every tick the
//! vehicle moves one step toward the destination, plus an independent
//! uniform jitter on each axis to mimic real road travel.

use journey_types::Coordinate;
use rand::Rng;

/// Default number of steps between origin and destination.
pub const ROUTE_STEPS: u32 = 100;

/// Maximum absolute jitter applied per axis per tick, in degrees.
pub const JITTER_DEGREES: f64 = 0.0005;

/// Central London, the default journey origin.
pub const LONDON: Coordinate = Coordinate::new(51.5074, -0.1278);

/// Central Birmingham, the default journey destination.
pub const BIRMINGHAM: Coordinate = Coordinate::new(52.4862, -1.8904);

/// Errors raised when building an interpolator.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// A route cannot be split into zero steps.
    #[error("route must have at least one step")]
    ZeroSteps,
}

/// Per-step movement between a fixed origin and destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoInterpolator {
    origin: Coordinate,
    destination: Coordinate,
    /// Per-axis delta applied every tick before jitter.
    increment: Coordinate,
}

impl GeoInterpolator {
    /// Build an interpolator that reaches `destination` in [`ROUTE_STEPS`]
    /// steps.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            increment: step_increment(origin, destination, ROUTE_STEPS),
        }
    }

    /// Build an interpolator with a custom step count.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::ZeroSteps`] if `steps` is zero.
    pub fn with_steps(
        origin: Coordinate,
        destination: Coordinate,
        steps: u32,
    ) -> Result<Self, GeoError> {
        if steps == 0 {
            return Err(GeoError::ZeroSteps);
        }
        Ok(Self {
            origin,
            destination,
            increment: step_increment(origin, destination, steps),
        })
    }

    /// Route start.
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Route end.
    pub const fn destination(&self) -> Coordinate {
        self.destination
    }

    /// The fixed per-tick movement, without jitter.
    pub const fn increment(&self) -> Coordinate {
        self.increment
    }

    /// Move `position` one step toward the destination and return the new
    /// value.
    ///
    /// Latitude jitter is drawn before longitude jitter.
    pub fn advance(&self, position: &mut Coordinate, rng: &mut impl Rng) -> Coordinate {
        position.latitude += self.increment.latitude;
        position.longitude += self.increment.longitude;

        position.latitude += rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES);
        position.longitude += rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES);

        *position
    }

    /// Whether `location` has reached or passed the destination on both
    /// axes, in the direction of travel.
    ///
    /// For a route whose latitude increases and longitude decreases (London
    /// to Birmingham) this is `lat >= dest.lat && lon <= dest.lon`.
    pub fn has_arrived(&self, location: Coordinate) -> bool {
        reached(
            location.latitude,
            self.destination.latitude,
            self.increment.latitude,
        ) && reached(
            location.longitude,
            self.destination.longitude,
            self.increment.longitude,
        )
    }
}

fn step_increment(origin: Coordinate, destination: Coordinate, steps: u32) -> Coordinate {
    let n = f64::from(steps);
    Coordinate::new(
        (destination.latitude - origin.latitude) / n,
        (destination.longitude - origin.longitude) / n,
    )
}

/// A non-negative step approaches from below, a negative one from above.
fn reached(value: f64, target: f64, step: f64) -> bool {
    if step >= 0.0 {
        value >= target
    } else {
        value <= target
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn default_route_increments() {
        let geo = GeoInterpolator::new(LONDON, BIRMINGHAM);
        let inc = geo.increment();
        assert!((inc.latitude - 0.009_788).abs() < 1e-9);
        assert!((inc.longitude + 0.017_626).abs() < 1e-9);
    }

    #[test]
    fn advance_stays_within_jitter_of_increment() {
        let geo = GeoInterpolator::new(LONDON, BIRMINGHAM);
        let mut rng = StdRng::seed_from_u64(42);
        let mut position = LONDON;

        for _ in 0..500 {
            let before = position;
            let after = geo.advance(&mut position, &mut rng);
            assert_eq!(after, position);

            let dlat = after.latitude - before.latitude - geo.increment().latitude;
            let dlon = after.longitude - before.longitude - geo.increment().longitude;
            assert!(dlat.abs() <= JITTER_DEGREES + EPS, "lat jitter {dlat}");
            assert!(dlon.abs() <= JITTER_DEGREES + EPS, "lon jitter {dlon}");

            // Increment dwarfs jitter, so movement is strictly toward the
            // destination on both axes.
            assert!(after.latitude > before.latitude);
            assert!(after.longitude < before.longitude);
        }
    }

    #[test]
    fn arrival_matches_route_convention() {
        let geo = GeoInterpolator::new(LONDON, BIRMINGHAM);
        assert!(!geo.has_arrived(LONDON));
        assert!(geo.has_arrived(BIRMINGHAM));
        assert!(geo.has_arrived(Coordinate::new(52.5, -1.9)));
        // Past on latitude only.
        assert!(!geo.has_arrived(Coordinate::new(52.5, -1.8)));
        // Past on longitude only.
        assert!(!geo.has_arrived(Coordinate::new(52.4, -1.9)));
    }

    #[test]
    fn arrival_is_sign_agnostic() {
        // Birmingham back to London: latitude decreases, longitude increases.
        let geo = GeoInterpolator::new(BIRMINGHAM, LONDON);
        assert!(!geo.has_arrived(BIRMINGHAM));
        assert!(geo.has_arrived(LONDON));
        assert!(geo.has_arrived(Coordinate::new(51.4, 0.0)));
        assert!(!geo.has_arrived(Coordinate::new(51.6, 0.0)));
    }

    #[test]
    fn custom_step_count() {
        let geo = GeoInterpolator::with_steps(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, -2.0),
            4,
        )
        .unwrap();
        assert!((geo.increment().latitude - 0.25).abs() < EPS);
        assert!((geo.increment().longitude + 0.5).abs() < EPS);
    }

    #[test]
    fn zero_steps_rejected() {
        let result = GeoInterpolator::with_steps(LONDON, BIRMINGHAM, 0);
        assert!(matches!(result, Err(GeoError::ZeroSteps)));
    }
}
