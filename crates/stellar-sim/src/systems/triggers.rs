//! Collision and trigger detection.
//!
//! Three paths feed the conflict system:
//! - mid-flight: a patrolling fleet passes close to a hostile system or
//!   outpost, or an active conflict;
//! - arrival: a fleet reaches its destination;
//! - area: enemy fleets loiter near player systems and outposts.
//!
//! Every scan walks storage order and stops at the first match.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use stellar_core::conflict::{Combatant, ConflictSite, Unit};
use stellar_core::constants::*;
use stellar_core::enums::*;
use stellar_core::events::{Journal, SimEvent};
use stellar_core::types::{FleetId, Point, SystemId};
use stellar_core::world::{MovingFleet, WorldState};

use super::battle::{self, ConflictRequest};

/// Roster entry for a fleet.
pub fn fleet_combatant(fleet: &MovingFleet) -> Combatant {
    Combatant::new(
        Unit::Fleet {
            id: fleet.id,
            class: fleet.class,
        },
        fleet.hp,
        fleet.attack,
    )
}

/// Hand a neutral system to `owner`. Any other system is left untouched.
pub fn colonize(
    world: &mut WorldState,
    journal: &mut Journal,
    system_id: SystemId,
    owner: Owner,
) -> bool {
    let Some(system) = world.system_mut(system_id) else {
        return false;
    };
    if system.owner != Owner::Neutral {
        return false;
    }
    system.owner = owner;
    system.defense = system.defense.max(COLONY_MIN_DEFENSE);
    info!(system_id, owner = ?owner, "System colonized");
    journal.note(format!("{} colonized", system.name));
    journal.emit(SimEvent::SystemColonized { system_id, owner });
    true
}

/// What a fleet found at a site.
enum Encounter {
    Hostile(ConflictSite, Point),
    Neutral(SystemId, Point),
    Friendly(SystemId),
}

/// Mid-flight check for the fleet at `index`. Only patrolling fleets react.
pub fn mid_flight(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
    index: usize,
) {
    let fleet = &world.fleets[index];
    if fleet.mission != FleetMission::Patrol {
        return;
    }
    let (position, owner) = (fleet.position, fleet.owner);
    let combatant = fleet_combatant(fleet);

    // 1. A battle nearby pulls the fleet in.
    if let Some(conflict_id) = world.conflicts.active_near(position, CONFLICT_JOIN_RADIUS) {
        if battle::join(world, rng, journal, conflict_id, combatant, owner) {
            debug!(unit = ?combatant.unit, conflict_id, "Fleet joined conflict");
        }
        let fleet = &mut world.fleets[index];
        fleet.mission = fleet
            .mission
            .on_trigger(MissionTrigger::JoinedConflict(conflict_id));
        return;
    }

    // 2. Hostile or neutral systems.
    let encounter = world
        .first_system_within(position, MID_FLIGHT_SYSTEM_RADIUS, |s| s.owner != owner)
        .map(|s| match s.owner {
            Owner::Neutral => Encounter::Neutral(s.id, s.position),
            _ => Encounter::Hostile(ConflictSite::System(s.id), s.position),
        })
        // 3. Hostile outposts.
        .or_else(|| {
            world
                .first_outpost_within(position, MID_FLIGHT_OUTPOST_RADIUS, |o| o.owner != owner)
                .map(|o| Encounter::Hostile(ConflictSite::Outpost(o.id), o.position))
        });

    let Some(encounter) = encounter else {
        return;
    };
    let freeze_at = match encounter {
        Encounter::Hostile(_, at) | Encounter::Neutral(_, at) => at,
        Encounter::Friendly(_) => return,
    };
    resolve_encounter(world, rng, journal, now_ms, index, encounter);
    world.fleets[index].freeze_at(freeze_at);
}

/// Arrival check for the fleet at `index`, run once when it reaches 100.
pub fn on_arrival(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
    index: usize,
) {
    let fleet = &world.fleets[index];
    let (destination, owner) = (fleet.destination, fleet.owner);

    let encounter = world
        .system_at(destination, ARRIVAL_SYSTEM_TOLERANCE)
        .map(|s| {
            if s.owner == owner {
                Encounter::Friendly(s.id)
            } else if s.owner == Owner::Neutral {
                Encounter::Neutral(s.id, s.position)
            } else {
                Encounter::Hostile(ConflictSite::System(s.id), s.position)
            }
        })
        .or_else(|| {
            world
                .first_outpost_within(destination, ARRIVAL_OUTPOST_RADIUS, |o| o.owner != owner)
                .map(|o| Encounter::Hostile(ConflictSite::Outpost(o.id), o.position))
        });

    match encounter {
        Some(encounter) => resolve_encounter(world, rng, journal, now_ms, index, encounter),
        None => {
            let fleet = &mut world.fleets[index];
            fleet.mission = fleet.mission.on_trigger(MissionTrigger::ReachedOpenSpace);
        }
    }
}

fn resolve_encounter(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
    index: usize,
    encounter: Encounter,
) {
    let owner = world.fleets[index].owner;
    let trigger = match encounter {
        Encounter::Hostile(site, location) => {
            let request = ConflictRequest {
                location,
                site,
                attacker_side: owner,
                attackers: vec![fleet_combatant(&world.fleets[index])],
                defenders: Vec::new(),
                garrison: true,
            };
            battle::open_or_extend(world, rng, journal, now_ms, request);
            match site {
                ConflictSite::System(id) => MissionTrigger::EngagedSystem(id),
                ConflictSite::Outpost(id) => MissionTrigger::EngagedOutpost(id),
                ConflictSite::Skirmish => MissionTrigger::ReachedOpenSpace,
            }
        }
        Encounter::Neutral(system_id, _) => {
            colonize(world, journal, system_id, owner);
            MissionTrigger::Colonized(system_id)
        }
        Encounter::Friendly(system_id) => MissionTrigger::ReachedFriendly(system_id),
    };
    let fleet = &mut world.fleets[index];
    fleet.mission = fleet.mission.on_trigger(trigger);
}

/// Area trigger: enemy fleets near player systems (within 20) and inside
/// player outpost radii open or extend a conflict at that site. Fleets
/// already listed in a conflict at the site do not re-open it.
pub fn area(world: &mut WorldState, rng: &mut ChaCha8Rng, journal: &mut Journal, now_ms: f64) {
    let mut sites: Vec<(ConflictSite, Point, f64)> = world
        .systems
        .iter()
        .filter(|s| s.owner == Owner::Player)
        .map(|s| (ConflictSite::System(s.id), s.position, SYSTEM_AREA_RADIUS))
        .collect();
    sites.extend(
        world
            .outposts
            .iter()
            .filter(|o| o.owner == Owner::Player)
            .map(|o| (ConflictSite::Outpost(o.id), o.position, o.defense_radius)),
    );

    for (site, location, radius) in sites {
        let intruders: Vec<usize> = world
            .fleets
            .iter()
            .enumerate()
            .filter(|(_, f)| f.owner == Owner::Enemy && f.position.distance(location) <= radius)
            .filter(|(_, f)| !fought_at(world, location, f.id))
            .map(|(i, _)| i)
            .collect();
        if intruders.is_empty() {
            continue;
        }

        let attackers = intruders
            .iter()
            .map(|&i| fleet_combatant(&world.fleets[i]))
            .collect();
        let request = ConflictRequest {
            location,
            site,
            attacker_side: Owner::Enemy,
            attackers,
            defenders: Vec::new(),
            garrison: false,
        };
        battle::open_or_extend(world, rng, journal, now_ms, request);

        let trigger = match site {
            ConflictSite::System(id) => MissionTrigger::EngagedSystem(id),
            ConflictSite::Outpost(id) => MissionTrigger::EngagedOutpost(id),
            ConflictSite::Skirmish => continue,
        };
        for i in intruders {
            let fleet = &mut world.fleets[i];
            fleet.mission = fleet.mission.on_trigger(trigger);
        }
    }
}

/// True when fleet `fleet_id` is on a roster of any conflict in the
/// location cluster around `location`.
fn fought_at(world: &WorldState, location: Point, fleet_id: FleetId) -> bool {
    world.conflicts.iter().any(|c| {
        c.location.distance(location) < CONFLICT_JOIN_RADIUS
            && c.attackers
                .iter()
                .chain(c.defenders.iter())
                .any(|a| matches!(a.unit, Unit::Fleet { id, .. } if id == fleet_id))
    })
}
