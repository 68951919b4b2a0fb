//! Deferred effects keyed by simulated time.
//!
//! Events due at the same millisecond fire in the order they were
//! scheduled. Handlers must re-check every entity an event refers to.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use stellar_core::types::{ShipId, SystemId};

/// An effect waiting for its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduledEvent {
    /// A hopping ship docks at its new system.
    ShipArrival { ship_id: ShipId, system_id: SystemId },
    /// Top up the pirate population. Re-arms itself.
    PirateSweep,
    /// Roll for an enemy raid. Re-arms itself.
    EnemyRaid,
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: f64,
    seq: u64,
    event: ScheduledEvent,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest (due, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of scheduled events.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn schedule(&mut self, due_ms: f64, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry { due_ms, seq, event });
    }

    /// Pop the earliest event due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<ScheduledEvent> {
        if self.queue.peek()?.due_ms > now_ms {
            return None;
        }
        self.queue.pop().map(|entry| entry.event)
    }

    /// Due time of the next event, if any.
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|entry| entry.due_ms)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
