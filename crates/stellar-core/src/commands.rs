//! Player commands sent from the frontend to the simulation.
//!
//! Commands either apply immediately through `execute` or are queued for
//! processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ShipClass;
use crate::types::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Fleets ---
    /// Launch a docked ship toward a world coordinate.
    DispatchShip { ship_id: ShipId, destination: Point },
    /// Send a player fleet on a new leg from where it is now.
    RedirectFleet {
        fleet_id: FleetId,
        destination: Point,
    },
    /// Hop a docked ship to another system.
    MoveShip { ship_id: ShipId, system_id: SystemId },

    // --- Shipyard ---
    /// Build a ship, docked at the home system.
    BuildShip { class: ShipClass },
    /// Scrap a docked ship for part of its build cost.
    DismantleShip { ship_id: ShipId },

    // --- Systems ---
    /// Send docked ships to colonize (or attack) a system.
    Colonize {
        system_id: SystemId,
        ship_ids: Vec<ShipId>,
    },
    /// Resolve an assault on a system with the ships docked there.
    AssaultSystem { system_id: SystemId },
    UpgradeSystem { system_id: SystemId },

    // --- Outposts ---
    PlaceOutpost { position: Point },
    BuildOutpost { system_id: SystemId },
    UpgradeOutpost { outpost_id: OutpostId },
    RepairOutpost { outpost_id: OutpostId },
    DemolishOutpost { outpost_id: OutpostId },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 0.0 = frozen). Clamped to [0, 4].
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
