//! Conflict records and the board that holds them.
//!
//! The random parts of a battle (garrison draw, noise, resolution roll) live
//! in the sim crate. This module keeps the data and the deterministic math.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::*;

/// What a roster entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unit {
    Fleet { id: FleetId, class: ShipClass },
    Ship { id: ShipId, class: ShipClass },
    Agent { id: AgentId, role: AgentRole },
    System { id: SystemId },
    Outpost { id: OutpostId },
    Garrison { id: u32, class: GarrisonClass },
}

/// One roster entry. Missing stats fall back to side defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub unit: Unit,
    pub hp: Option<f64>,
    pub attack: Option<f64>,
}

impl Combatant {
    pub fn new(unit: Unit, hp: Option<f64>, attack: Option<f64>) -> Self {
        Self { unit, hp, attack }
    }

    /// Contribution to side power: attack · hp / 100.
    pub fn power(&self, default_attack: f64, default_hp: f64) -> f64 {
        self.attack.unwrap_or(default_attack) * self.hp.unwrap_or(default_hp) / 100.0
    }
}

/// Where a conflict is fought, and therefore what its outcome touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ConflictSite {
    System(SystemId),
    Outpost(OutpostId),
    /// Open-space fight with no territorial stake.
    Skirmish,
}

/// Recorded outcome of a finished conflict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Owner,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    /// Resources captured by the player; zero unless the player won.
    pub captured: u32,
}

/// A timed battle between two rosters at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: ConflictId,
    pub location: Point,
    pub site: ConflictSite,
    /// Faction on the attacking side. Defenders belong to its opponent.
    pub attacker_side: Owner,
    pub attackers: Vec<Combatant>,
    pub defenders: Vec<Combatant>,
    pub state: ConflictState,
    /// Percent elapsed, in [0, 100].
    pub progress: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
    /// Attacker win probability in percent, clamped to [5, 95].
    pub win_probability: f64,
    pub result: Option<BattleResult>,
}

impl Conflict {
    pub fn is_active(&self) -> bool {
        self.state == ConflictState::Active
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.attackers
            .iter()
            .chain(self.defenders.iter())
            .any(|c| &c.unit == unit)
    }

    /// Add `combatant` on the side matching `owner`. Returns false when the
    /// unit is already listed on either side.
    pub fn enlist(&mut self, combatant: Combatant, owner: Owner) -> bool {
        if self.contains(&combatant.unit) {
            return false;
        }
        if owner == self.attacker_side {
            self.attackers.push(combatant);
        } else {
            self.defenders.push(combatant);
        }
        true
    }

    pub fn attacker_power(&self) -> f64 {
        side_power(&self.attackers, ATTACKER_DEFAULT_ATTACK, ATTACKER_DEFAULT_HP)
    }

    pub fn defender_power(&self) -> f64 {
        side_power(&self.defenders, DEFENDER_DEFAULT_ATTACK, DEFENDER_DEFAULT_HP)
    }

    /// Progress implied by `now_ms`, capped at 100.
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return PROGRESS_COMPLETE;
        }
        ((now_ms - self.start_ms) / self.duration_ms * 100.0).clamp(0.0, PROGRESS_COMPLETE)
    }
}

/// Sum of roster power with side defaults.
pub fn side_power(roster: &[Combatant], default_attack: f64, default_hp: f64) -> f64 {
    roster
        .iter()
        .map(|c| c.power(default_attack, default_hp))
        .sum()
}

/// Attacker win probability in percent, clamped to [5, 95].
pub fn win_probability(attacker_power: f64, defender_power: f64, noise: f64) -> f64 {
    let defended = defender_power * noise;
    let total = attacker_power + defended;
    let p = if total > 0.0 && total.is_finite() {
        attacker_power / total * 100.0
    } else {
        50.0
    };
    p.clamp(WIN_PROBABILITY_MIN, WIN_PROBABILITY_MAX)
}

/// Whole ships lost from a roster of `roster_len` at `fraction`.
pub fn loss_count(roster_len: usize, fraction: f64) -> u32 {
    (roster_len as f64 * fraction).max(0.0).floor() as u32
}

/// All conflicts, keyed by id so iteration order is creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictBoard {
    conflicts: BTreeMap<ConflictId, Conflict>,
    next_id: ConflictId,
}

impl Default for ConflictBoard {
    fn default() -> Self {
        Self {
            conflicts: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl ConflictBoard {
    /// Reserve the id for the next conflict.
    pub fn allocate_id(&mut self) -> ConflictId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, conflict: Conflict) {
        self.conflicts.insert(conflict.id, conflict);
    }

    pub fn get(&self, id: ConflictId) -> Option<&Conflict> {
        self.conflicts.get(&id)
    }

    pub fn get_mut(&mut self, id: ConflictId) -> Option<&mut Conflict> {
        self.conflicts.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Conflict> {
        self.conflicts.values_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.values().filter(|c| c.is_active())
    }

    /// Oldest active conflict strictly closer than `radius` to `point`.
    pub fn active_near(&self, point: Point, radius: f64) -> Option<ConflictId> {
        self.active()
            .find(|c| c.location.distance(point) < radius)
            .map(|c| c.id)
    }

    /// Active conflict in the location cluster around `point`: anything
    /// closer than the join radius counts as the same place.
    pub fn active_in_cluster(&self, point: Point) -> Option<ConflictId> {
        self.active_near(point, CONFLICT_JOIN_RADIUS)
    }

    /// Enlist into conflict `id`. False if it is missing, finished, or
    /// already lists the unit.
    pub fn enlist(&mut self, id: ConflictId, combatant: Combatant, owner: Owner) -> bool {
        match self.conflicts.get_mut(&id) {
            Some(conflict) if conflict.is_active() => conflict.enlist(combatant, owner),
            _ => false,
        }
    }
}
