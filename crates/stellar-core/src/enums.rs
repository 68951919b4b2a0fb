//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::{ConflictId, OutpostId, SystemId};
use crate::constants::{SALVAGE_ENERGY_PERCENT, SALVAGE_MATERIALS_PERCENT};
use crate::world::Cost;

/// Faction owning a system, outpost, ship or fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Player,
    Enemy,
    #[default]
    Neutral,
}

impl Owner {
    /// The side fighting against this one. Neutral has no opponent.
    pub fn opponent(self) -> Owner {
        match self {
            Owner::Player => Owner::Enemy,
            Owner::Enemy => Owner::Player,
            Owner::Neutral => Owner::Neutral,
        }
    }
}

/// Star colour, cosmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarType {
    #[default]
    Yellow,
    Red,
    Blue,
    White,
}

impl StarType {
    pub const ALL: [StarType; 4] = [
        StarType::Yellow,
        StarType::Red,
        StarType::Blue,
        StarType::White,
    ];
}

/// Hull size used to scale a fleet marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HullSize {
    #[default]
    Small,
    Medium,
    Large,
}

/// Base stats of a ship class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipStats {
    pub hp: f64,
    pub attack: f64,
    /// Strategic speed rating (1 = slow, 3 = fast).
    pub speed: f64,
}

/// Buildable ship classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    Scout,
    Fighter,
    Cruiser,
    Colony,
    Carrier,
    Stealth,
    Titan,
    Mining,
}

impl ShipClass {
    pub fn stats(self) -> ShipStats {
        let (hp, attack, speed) = match self {
            ShipClass::Scout => (30.0, 10.0, 3.0),
            ShipClass::Fighter => (60.0, 25.0, 2.0),
            ShipClass::Cruiser => (120.0, 50.0, 1.0),
            ShipClass::Colony => (80.0, 5.0, 1.0),
            ShipClass::Carrier => (200.0, 30.0, 1.0),
            ShipClass::Stealth => (40.0, 35.0, 3.0),
            ShipClass::Titan => (400.0, 100.0, 1.0),
            ShipClass::Mining => (100.0, 5.0, 1.0),
        };
        ShipStats { hp, attack, speed }
    }

    /// Shipyard price of one ship of this class.
    pub fn build_cost(self) -> Cost {
        match self {
            ShipClass::Scout => Cost::new(50, 20),
            ShipClass::Fighter => Cost::new(100, 50),
            ShipClass::Cruiser => Cost::new(200, 100),
            ShipClass::Colony => Cost::new(300, 200).with_crystals(50),
            ShipClass::Carrier => Cost::new(400, 300).with_crystals(100),
            ShipClass::Stealth => Cost::new(250, 150),
            ShipClass::Titan => Cost::new(800, 600).with_crystals(200),
            ShipClass::Mining => Cost::new(200, 250),
        }
    }

    /// Energy and materials recovered by dismantling a ship of this class.
    pub fn salvage(self) -> (u32, u32) {
        let cost = self.build_cost();
        (
            cost.energy * SALVAGE_ENERGY_PERCENT / 100,
            cost.materials * SALVAGE_MATERIALS_PERCENT / 100,
        )
    }

    pub fn hull_size(self) -> HullSize {
        match self {
            ShipClass::Cruiser | ShipClass::Carrier => HullSize::Medium,
            ShipClass::Titan => HullSize::Large,
            _ => HullSize::Small,
        }
    }
}

/// Where a location-based ship currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipStatus {
    /// Docked at its system, available for orders.
    #[default]
    Docked,
    /// Hopping to another system; docks when the scheduled arrival fires.
    InTransit,
    /// Converted into a moving fleet.
    Deployed,
}

/// What a mission is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRef {
    System(SystemId),
    Outpost(OutpostId),
    Conflict(ConflictId),
}

/// Fleet mission. The payload carries only what that mission needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FleetMission {
    /// Free flight; eligible for mid-flight triggers.
    #[default]
    Patrol,
    Attack { target: TargetRef },
    Defend { system: SystemId },
    Colonize { system: SystemId },
}

/// A trigger outcome that changes a fleet's mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionTrigger {
    JoinedConflict(ConflictId),
    EngagedSystem(SystemId),
    EngagedOutpost(OutpostId),
    Colonized(SystemId),
    ReachedFriendly(SystemId),
    ReachedOpenSpace,
}

impl FleetMission {
    /// Attack and colonize missions ignore mid-flight triggers.
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            FleetMission::Attack { .. } | FleetMission::Colonize { .. }
        )
    }

    /// The mission that follows a trigger. Every mission change goes
    /// through here.
    pub fn on_trigger(self, trigger: MissionTrigger) -> FleetMission {
        match trigger {
            MissionTrigger::JoinedConflict(id) => FleetMission::Attack {
                target: TargetRef::Conflict(id),
            },
            MissionTrigger::EngagedSystem(id) => FleetMission::Attack {
                target: TargetRef::System(id),
            },
            MissionTrigger::EngagedOutpost(id) => FleetMission::Attack {
                target: TargetRef::Outpost(id),
            },
            MissionTrigger::Colonized(id) => FleetMission::Colonize { system: id },
            MissionTrigger::ReachedFriendly(id) => FleetMission::Defend { system: id },
            MissionTrigger::ReachedOpenSpace => FleetMission::Patrol,
        }
    }
}

/// Conflict lifecycle. `Finished` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictState {
    #[default]
    Active,
    Finished,
}

/// Auxiliary unit types drawn for generated defender rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarrisonClass {
    Fighter,
    Bomber,
    Cruiser,
    Carrier,
}

impl GarrisonClass {
    /// Vocabulary for system garrisons.
    pub const SYSTEM_POOL: [GarrisonClass; 4] = [
        GarrisonClass::Fighter,
        GarrisonClass::Bomber,
        GarrisonClass::Cruiser,
        GarrisonClass::Carrier,
    ];

    /// Outposts only field light craft.
    pub const OUTPOST_POOL: [GarrisonClass; 2] = [GarrisonClass::Fighter, GarrisonClass::Bomber];
}

/// Agent behaviour state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    #[default]
    Patrol,
    Pursue,
    Attack,
    /// Defenders only: heading back to the home system.
    Return,
}

/// Agent kind without its payload, for views and profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Pirate,
    Defender,
}
