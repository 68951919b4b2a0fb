//! Pirate population upkeep: the periodic sweep tops the pirate count back
//! up by one while it is below the cap.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use stellar_core::components::AgentKind;
use stellar_core::events::{Journal, SimEvent};
use stellar_core::types::{AgentId, MapBounds};

use crate::galaxy;

/// Number of live pirates.
pub fn pirate_count(ecs: &World) -> usize {
    ecs.query::<&AgentKind>()
        .iter()
        .filter(|(_, kind)| matches!(kind, AgentKind::Pirate { .. }))
        .count()
}

/// Spawn one pirate when fewer than `max_pirates` remain. Returns the id of
/// the new pirate.
pub fn replenish_pirates(
    ecs: &mut World,
    rng: &mut ChaCha8Rng,
    bounds: &MapBounds,
    journal: &mut Journal,
    next_id: &mut AgentId,
    max_pirates: usize,
) -> Option<AgentId> {
    let count = pirate_count(ecs);
    if count >= max_pirates {
        return None;
    }
    let id = *next_id;
    *next_id += 1;
    galaxy::spawn_pirate(ecs, rng, bounds, id);
    debug!(agent_id = id, pirates = count + 1, "Pirate spawned");
    journal.emit(SimEvent::PirateSpawned { agent_id: id });
    Some(id)
}
