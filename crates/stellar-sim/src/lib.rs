//! Simulation engine for Stellar Dominion.
//!
//! Owns the galaxy world and the hecs ECS world of AI agents, runs the
//! movement, trigger, conflict and agent systems each tick, and produces
//! GalaxySnapshots for the frontend.

pub mod config;
pub mod engine;
pub mod galaxy;
pub mod orders;
pub mod scheduler;
pub mod systems;

pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use stellar_core as core;
