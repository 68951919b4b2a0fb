//! Agent AI system: one fixed-interval step for every pirate and defender.
//!
//! Calls the FSM from stellar-ai, moves each agent according to its state
//! and carries out strikes against player ships.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use stellar_ai::fsm::{evaluate, nearest_contact, settle, AgentContext};
use stellar_ai::steering::{bearing, orbit_step, step_toward, wander};
use stellar_core::components::*;
use stellar_core::conflict::{Combatant, ConflictSite, Unit};
use stellar_core::enums::{AgentRole, AgentState, Owner, ShipStatus};
use stellar_core::events::{Journal, SimEvent};
use stellar_core::types::{Point, ShipId};
use stellar_core::world::WorldState;

use super::battle::{self, ConflictRequest};

/// Player ships agents can see: anything not converted into a moving fleet,
/// placed at its system's position.
pub fn visible_ships(world: &WorldState) -> Vec<(ShipId, Point)> {
    world
        .ships
        .iter()
        .filter(|s| s.owner == Owner::Player && s.status != ShipStatus::Deployed)
        .filter_map(|s| world.system(s.system_id).map(|sys| (s.id, sys.position)))
        .collect()
}

/// Run one AI step at AI-clock time `now_ms`.
pub fn run(
    ecs: &mut World,
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
) {
    let mut contacts = visible_ships(world);

    for (_entity, (agent, position, hull, kind, brain)) in
        ecs.query_mut::<(&Agent, &mut Position, &Hull, &mut AgentKind, &mut AgentBrain)>()
    {
        let role = kind.role();
        let target_position = brain
            .target
            .and_then(|t| contacts.iter().find(|(id, _)| *id == t.ship_id))
            .map(|(_, at)| *at);
        let ctx = AgentContext {
            role,
            state: brain.state,
            position: position.0,
            detection_range: agent.detection_range,
            target: brain.target,
            target_position,
            nearest: nearest_contact(position.0, agent.detection_range, contacts.iter().copied()),
            now_ms,
            last_attack_ms: brain.last_attack_ms,
        };
        let decision = evaluate(&ctx);
        if decision.state_changed {
            debug!(
                agent_id = agent.id,
                from = ?brain.state,
                to = ?decision.state,
                "Agent state change"
            );
        }
        brain.state = decision.state;
        brain.target = decision.target;

        if let Some(ship_id) = decision.strike {
            brain.last_attack_ms = Some(now_ms);
            let attacker = agent_combatant(agent, hull, role);
            if strike(world, rng, journal, now_ms, agent, attacker, ship_id) {
                contacts.retain(|(id, _)| *id != ship_id);
            }
        }

        // Move according to the current state.
        match (brain.state, &mut *kind) {
            (AgentState::Patrol, AgentKind::Pirate { heading }) => {
                let (next, new_heading) =
                    wander(position.0, *heading, agent.speed, &world.bounds, rng);
                position.0 = next;
                *heading = new_heading;
            }
            (AgentState::Patrol, AgentKind::Defender(orbit)) => {
                if let Some(next) = orbit_step(orbit) {
                    position.0 = next;
                }
            }
            (AgentState::Pursue, _) => {
                if let Some(target) = brain.target {
                    position.0 = step_toward(position.0, target.last_known, agent.speed);
                }
            }
            (AgentState::Return, AgentKind::Defender(orbit)) => {
                position.0 = step_toward(position.0, orbit.center, agent.speed);
            }
            _ => {}
        }

        // Leaving orbit clears the angle; settling back in re-derives it.
        let home = match &*kind {
            AgentKind::Defender(orbit) => Some(orbit.center),
            AgentKind::Pirate { .. } => None,
        };
        let settled = settle(
            role,
            brain.state,
            position.0,
            agent.detection_range,
            brain.target,
            home,
        );
        if let AgentKind::Defender(orbit) = &mut *kind {
            if settled != AgentState::Patrol {
                orbit.angle = None;
            } else if orbit.angle.is_none() {
                orbit.angle = Some(bearing(orbit.center, position.0));
            }
        }
        brain.state = settled;
    }
}

/// Hit `ship_id`: open (or extend) a skirmish at the ship's system, then
/// apply damage. Returns true when the ship was destroyed.
fn strike(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
    agent: &Agent,
    attacker: Combatant,
    ship_id: ShipId,
) -> bool {
    let Some(ship) = world.ship(ship_id) else {
        return false;
    };
    let Some(location) = world.system(ship.system_id).map(|s| s.position) else {
        return false;
    };
    let defender = Combatant::new(
        Unit::Ship {
            id: ship.id,
            class: ship.class,
        },
        Some(ship.hp),
        Some(ship.attack),
    );
    let request = ConflictRequest {
        location,
        site: ConflictSite::Skirmish,
        attacker_side: Owner::Enemy,
        attackers: vec![attacker],
        defenders: vec![defender],
        garrison: false,
    };
    battle::open_or_extend(world, rng, journal, now_ms, request);

    journal.emit(SimEvent::AgentStrike {
        agent_id: agent.id,
        ship_id,
        damage: agent.damage,
    });
    damage_ship(world, journal, ship_id, agent.damage)
}

fn agent_combatant(agent: &Agent, hull: &Hull, role: AgentRole) -> Combatant {
    Combatant::new(
        Unit::Agent { id: agent.id, role },
        Some(hull.hp),
        Some(agent.damage),
    )
}

/// Apply damage to a ship, removing it at zero hp. Returns true when destroyed.
pub fn damage_ship(
    world: &mut WorldState,
    journal: &mut Journal,
    ship_id: ShipId,
    damage: f64,
) -> bool {
    let Some(ship) = world.ship_mut(ship_id) else {
        return false;
    };
    ship.hp -= damage;
    if ship.hp > 0.0 {
        return false;
    }
    let class = ship.class;
    world.remove_ship(ship_id);
    info!(ship_id, ?class, "Ship destroyed");
    journal.note(format!("{class:?} destroyed in combat"));
    journal.emit(SimEvent::ShipDestroyed { ship_id });
    true
}
