//! Enemy agent AI for Stellar Dominion.
//!
//! Implements the pirate and defender state machine, per-step steering
//! and role-driven stat profiles.

pub mod fsm;
pub mod profiles;
pub mod steering;

pub use stellar_core as core;

#[cfg(test)]
mod tests;
