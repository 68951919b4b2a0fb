//! ECS components for hecs agent entities.
//!
//! Components are plain data structs with no behaviour.
//! Agent logic lives in the AI crate and the sim systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::{AgentRole, AgentState};
use crate::types::{AgentId, Point, ShipId, SystemId};

/// World position of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Point);

/// Hit points of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hull {
    pub hp: f64,
    pub max_hp: f64,
}

/// Fixed combat and movement characteristics of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Distance covered per AI step.
    pub speed: f64,
    pub detection_range: f64,
    /// Damage dealt per strike.
    pub damage: f64,
}

/// Orbit parameters of a defender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub home_system: SystemId,
    pub center: Point,
    pub radius: f64,
    /// Current orbit angle in radians. `None` after leaving orbit, until
    /// the defender settles back in.
    pub angle: Option<f64>,
}

/// Kind-specific payload. Only defenders carry orbit data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentKind {
    Pirate {
        /// Current wander heading in radians.
        heading: f64,
    },
    Defender(Orbit),
}

impl AgentKind {
    pub fn role(&self) -> AgentRole {
        match self {
            AgentKind::Pirate { .. } => AgentRole::Pirate,
            AgentKind::Defender(_) => AgentRole::Defender,
        }
    }
}

/// A player ship an agent has locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentTarget {
    pub ship_id: ShipId,
    pub last_known: Point,
}

/// Behaviour state of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentBrain {
    pub state: AgentState,
    pub target: Option<AgentTarget>,
    /// Simulated time of the last strike, in AI-clock milliseconds.
    pub last_attack_ms: Option<f64>,
}
