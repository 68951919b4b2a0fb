//! Galaxy snapshot: the complete visible state handed to the UI each tick.

use serde::{Deserialize, Serialize};

use crate::conflict::Conflict;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::*;
use crate::world::{MovingFleet, Outpost, Ship, StarSystem, Treasury};

/// Read-only copy of the world for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalaxySnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub time_scale: f64,
    pub bounds: MapBounds,
    pub systems: Vec<StarSystem>,
    pub outposts: Vec<Outpost>,
    pub ships: Vec<Ship>,
    pub fleets: Vec<MovingFleet>,
    pub agents: Vec<AgentView>,
    pub conflicts: Vec<Conflict>,
    pub treasury: Treasury,
    /// Narration, oldest first.
    pub log: Vec<String>,
    /// Events raised since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// An AI agent as the map shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub role: AgentRole,
    pub position: Point,
    pub hp: f64,
    pub max_hp: f64,
    pub state: AgentState,
    pub target_ship: Option<ShipId>,
    /// Home system, defenders only.
    pub home_system: Option<SystemId>,
}
