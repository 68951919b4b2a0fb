//! Simulation systems run by the engine each tick.
//!
//! Systems are plain functions over the world state (and the agent ECS
//! where needed). They do not own state.

pub mod agents;
pub mod battle;
pub mod movement;
pub mod population;
pub mod raids;
pub mod snapshot;
pub mod triggers;
