//! Events and narration emitted by the simulation for the UI.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictSite, Unit};
use crate::constants::LOG_CAPACITY;
use crate::enums::*;
use crate::types::*;

/// Structured events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    ConflictOpened {
        conflict_id: ConflictId,
        location: Point,
        site: ConflictSite,
    },
    /// A unit joined an already-running conflict.
    ConflictJoined { conflict_id: ConflictId, unit: Unit },
    ConflictResolved {
        conflict_id: ConflictId,
        winner: Owner,
        captured: u32,
    },
    SystemColonized { system_id: SystemId, owner: Owner },
    SystemConquered { system_id: SystemId, owner: Owner },
    OutpostDestroyed { outpost_id: OutpostId },
    ShipDocked { ship_id: ShipId, system_id: SystemId },
    ShipDestroyed { ship_id: ShipId },
    AgentStrike {
        agent_id: AgentId,
        ship_id: ShipId,
        damage: f64,
    },
    PirateSpawned { agent_id: AgentId },
    RaidLaunched {
        fleet_id: FleetId,
        from: SystemId,
        to: SystemId,
    },
    CommandRejected { reason: String },
}

/// Bounded narration log. The oldest line is dropped first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogBook {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for LogBook {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl LogBook {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

/// Narration plus pending structured events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    pub log: LogBook,
    events: Vec<SimEvent>,
}

impl Journal {
    pub fn note(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn pending(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
