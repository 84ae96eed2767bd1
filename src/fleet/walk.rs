use chrono::{DateTime, Utc};

use super::random::RandomSource;
use super::types::{TrackedUnit, UnitStatus};

/// Full width of the uniform step, in degrees.
pub const STEP_DEGREES: f64 = 0.001;
/// Chance that a tick redraws the status.
pub const STATUS_REDRAW_PROBABILITY: f64 = 0.1;

/// Advances one unit by one tick.
///
/// Latitude and longitude each move by `(U - 0.5) * STEP_DEGREES`. With
/// probability `STATUS_REDRAW_PROBABILITY` the status is replaced by a uniform
/// pick from [`UnitStatus::ALL`]. No clamping is applied, so a unit can drift
/// arbitrarily far from its route over a long session.
///
/// `last_update` never moves backwards, even if the wall clock does.
pub fn advance(
    unit: &TrackedUnit,
    random: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> TrackedUnit {
    let mut next = unit.clone();
    next.position.lat += step(random);
    next.position.lng += step(random);
    if random.uniform() < STATUS_REDRAW_PROBABILITY {
        next.status = pick_status(random);
    }
    next.last_update = now.max(unit.last_update);
    next
}

/// Advances every unit, each with its own draws.
pub fn advance_all(
    units: &[TrackedUnit],
    random: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> Vec<TrackedUnit> {
    units.iter().map(|u| advance(u, random, now)).collect()
}

fn step(random: &mut dyn RandomSource) -> f64 {
    (random.uniform() - 0.5) * STEP_DEGREES
}

fn pick_status(random: &mut dyn RandomSource) -> UnitStatus {
    let count = UnitStatus::ALL.len();
    let index = ((random.uniform() * count as f64) as usize).min(count - 1);
    UnitStatus::ALL[index]
}
