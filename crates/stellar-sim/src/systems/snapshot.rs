//! Snapshot system: copies the world and the agent ECS into a
//! GalaxySnapshot.
//!
//! Read-only apart from draining the journal's pending events.

use hecs::World;

use stellar_core::components::*;
use stellar_core::events::Journal;
use stellar_core::state::{AgentView, GalaxySnapshot};
use stellar_core::types::SimTime;
use stellar_core::world::WorldState;

/// Build a complete snapshot. Pending events move into the snapshot.
pub fn build_snapshot(
    world: &WorldState,
    agents: &World,
    time: &SimTime,
    paused: bool,
    time_scale: f64,
    journal: &mut Journal,
) -> GalaxySnapshot {
    GalaxySnapshot {
        time: *time,
        paused,
        time_scale,
        bounds: world.bounds,
        systems: world.systems.clone(),
        outposts: world.outposts.clone(),
        ships: world.ships.clone(),
        fleets: world.fleets.clone(),
        agents: build_agents(agents),
        conflicts: world.conflicts.iter().cloned().collect(),
        treasury: world.treasury,
        log: journal.log.to_vec(),
        events: journal.drain_events(),
    }
}

/// Agent views ordered by id.
fn build_agents(agents: &World) -> Vec<AgentView> {
    let mut views: Vec<AgentView> = agents
        .query::<(&Agent, &Position, &Hull, &AgentKind, &AgentBrain)>()
        .iter()
        .map(|(_, (agent, pos, hull, kind, brain))| AgentView {
            id: agent.id,
            role: kind.role(),
            position: pos.0,
            hp: hull.hp,
            max_hp: hull.max_hp,
            state: brain.state,
            target_ship: brain.target.map(|t| t.ship_id),
            home_system: match kind {
                AgentKind::Defender(orbit) => Some(orbit.home_system),
                AgentKind::Pirate { .. } => None,
            },
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
