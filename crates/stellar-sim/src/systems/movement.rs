//! Fleet movement system.
//!
//! Advances every fleet still under way along its origin→destination leg
//! and hands it to the trigger detector after each step.

use rand_chacha::ChaCha8Rng;

use stellar_core::constants::PROGRESS_COMPLETE;
use stellar_core::events::Journal;
use stellar_core::types::lerp_point;
use stellar_core::world::{MovingFleet, WorldState};

use super::triggers;

/// Outcome of advancing one fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Already at 100 before this step.
    Idle,
    InTransit,
    /// Reached the destination this step.
    Arrived,
}

/// Advance one fleet by `dt_secs`. Non-finite or negative time counts as zero.
pub fn advance(fleet: &mut MovingFleet, dt_secs: f64) -> Step {
    if fleet.has_arrived() {
        return Step::Idle;
    }
    let dt = if dt_secs.is_finite() && dt_secs > 0.0 {
        dt_secs
    } else {
        0.0
    };

    let total = fleet.total_distance();
    if total <= 0.0 {
        // Zero-length leg: nothing to travel.
        fleet.progress = PROGRESS_COMPLETE;
    } else if fleet.speed.is_finite() {
        fleet.progress += fleet.speed.max(0.0) * dt / total * 100.0;
    }

    if fleet.progress >= PROGRESS_COMPLETE {
        fleet.progress = PROGRESS_COMPLETE;
        fleet.position = fleet.destination;
        Step::Arrived
    } else {
        fleet.position = lerp_point(fleet.origin, fleet.destination, fleet.progress / 100.0);
        Step::InTransit
    }
}

/// Move all fleets, running the arrival or mid-flight trigger for each.
pub fn run(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
    dt_secs: f64,
) {
    for index in 0..world.fleets.len() {
        match advance(&mut world.fleets[index], dt_secs) {
            Step::Arrived => triggers::on_arrival(world, rng, journal, now_ms, index),
            Step::InTransit => triggers::mid_flight(world, rng, journal, now_ms, index),
            Step::Idle => {}
        }
    }
}
