//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in world space (map units). x grows to the right, y grows down,
/// matching the galaxy map the frontend draws.
pub type Point = DVec2;

pub type SystemId = u32;
pub type OutpostId = u32;
pub type ShipId = u32;
pub type FleetId = u32;
pub type ConflictId = u32;
pub type AgentId = u32;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frame ticks processed.
    pub frame: u64,
    /// Elapsed simulation time in seconds (already time-scaled).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt_secs` simulated seconds.
    pub fn advance(&mut self, dt_secs: f64) {
        self.frame += 1;
        self.elapsed_secs += dt_secs;
    }

    /// Current simulated time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.elapsed_secs * 1000.0
    }
}

/// Rectangular map extent, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub width: f64,
    pub height: f64,
}

impl MapBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when `p` lies at least `margin` units inside every edge.
    pub fn is_inside_margin(&self, p: Point, margin: f64) -> bool {
        p.x >= margin && p.x <= self.width - margin && p.y >= margin && p.y <= self.height - margin
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self::new(crate::constants::MAP_WIDTH, crate::constants::MAP_HEIGHT)
    }
}

/// Linear interpolation between two points, `t` in [0, 1].
pub fn lerp_point(from: Point, to: Point, t: f64) -> Point {
    from.lerp(to, t)
}
