//! Per-step movement for agents: pursuit, orbit and pirate wander.

use std::f64::consts::TAU;

use rand::Rng;

use stellar_core::components::Orbit;
use stellar_core::constants::*;
use stellar_core::types::{MapBounds, Point};

/// Bearing from `from` to `to` in radians.
pub fn bearing(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Move `speed` units from `from` toward `to`, stopping on the target.
pub fn step_toward(from: Point, to: Point, speed: f64) -> Point {
    let distance = from.distance(to);
    if distance <= speed || distance == 0.0 {
        return to;
    }
    let heading = bearing(from, to);
    from + Point::new(heading.cos(), heading.sin()) * speed
}

pub fn orbit_position(center: Point, radius: f64, angle: f64) -> Point {
    center + Point::new(angle.cos(), angle.sin()) * radius
}

/// Advance a defender one step along its orbit. Returns the new position,
/// or `None` while the orbit angle is unset.
pub fn orbit_step(orbit: &mut Orbit) -> Option<Point> {
    let angle = orbit.angle? + ORBIT_ANGULAR_SPEED;
    orbit.angle = Some(angle);
    Some(orbit_position(orbit.center, orbit.radius, angle))
}

/// One pirate wander step. Returns the new position and heading.
///
/// The heading is re-rolled with a small chance each step, and forced
/// toward the map centre once the pirate strays within the edge margin.
pub fn wander(
    position: Point,
    heading: f64,
    speed: f64,
    bounds: &MapBounds,
    rng: &mut impl Rng,
) -> (Point, f64) {
    let mut heading = heading;
    if rng.gen::<f64>() < PIRATE_HEADING_CHANGE_CHANCE {
        heading = rng.gen::<f64>() * TAU;
    }
    if !bounds.is_inside_margin(position, PIRATE_EDGE_MARGIN) {
        heading = bearing(position, bounds.center());
    }
    let next = position + Point::new(heading.cos(), heading.sin()) * speed;
    (next, heading)
}
