//! Reasons a player command can be rejected.

use thiserror::Error;

use crate::types::{FleetId, OutpostId, ShipId, SystemId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("ship {0} does not exist")]
    UnknownShip(ShipId),
    #[error("fleet {0} does not exist")]
    UnknownFleet(FleetId),
    #[error("system {0} does not exist")]
    UnknownSystem(SystemId),
    #[error("outpost {0} does not exist")]
    UnknownOutpost(OutpostId),
    #[error("{0} is not under player control")]
    NotOwned(String),
    #[error("ship {0} is not docked")]
    ShipUnavailable(ShipId),
    #[error(
        "insufficient resources: need {energy} energy, {materials} materials \
         and {crystals} crystals"
    )]
    InsufficientResources {
        energy: u32,
        materials: u32,
        crystals: u32,
    },
    #[error("outpost {0} is already at maximum level")]
    MaxLevel(OutpostId),
    #[error("system {0} is already at maximum development")]
    MaxDevelopment(SystemId),
    #[error("system {0} already belongs to the player")]
    AlreadyOwned(SystemId),
    #[error("no player ships available at system {0}")]
    NoShipsPresent(SystemId),
    #[error("system {0} already has an outpost")]
    AlreadyHasOutpost(SystemId),
    #[error("an outpost already stands near that position")]
    SiteOccupied,
    #[error("ship {0} is already at system {1}")]
    SameSystem(ShipId, SystemId),
    #[error("no player system left to build ships at")]
    NoShipyard,
    #[error("invalid destination")]
    InvalidDestination,
}
