//! Core types and definitions for the Stellar Dominion simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! the world model, conflicts, agent components, commands, snapshots,
//! events and constants. It has no runtime or rendering dependency.

pub mod commands;
pub mod components;
pub mod conflict;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod world;

#[cfg(test)]
mod tests;
