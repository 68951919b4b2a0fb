//! Enemy raids: every raid interval an enemy system may send a fighter
//! fleet against one of the player's systems.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use stellar_core::enums::{FleetMission, Owner, ShipClass, TargetRef};
use stellar_core::events::{Journal, SimEvent};
use stellar_core::types::FleetId;
use stellar_core::world::{MovingFleet, WorldState};

/// Roll for a raid. Returns the new fleet id when one launched.
pub fn launch_raid(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    chance: f64,
    fleet_speed: f64,
) -> Option<FleetId> {
    if rng.gen::<f64>() >= chance {
        return None;
    }
    let sources: Vec<_> = world
        .systems
        .iter()
        .filter(|s| s.owner == Owner::Enemy)
        .map(|s| (s.id, s.position))
        .collect();
    let targets: Vec<_> = world
        .systems
        .iter()
        .filter(|s| s.owner == Owner::Player)
        .map(|s| (s.id, s.position, s.name.clone()))
        .collect();
    if sources.is_empty() || targets.is_empty() {
        return None;
    }
    let (from, origin) = sources[rng.gen_range(0..sources.len())];
    let (to, destination, name) = targets[rng.gen_range(0..targets.len())].clone();

    let class = ShipClass::Fighter;
    let stats = class.stats();
    let mut fleet = MovingFleet::new(0, class, Owner::Enemy, origin, destination, fleet_speed);
    fleet.hp = Some(stats.hp);
    fleet.attack = Some(stats.attack);
    fleet.mission = FleetMission::Attack {
        target: TargetRef::System(to),
    };
    let fleet_id = world.add_fleet(fleet);

    warn!(fleet_id, from, to, "Enemy raid launched");
    journal.note(format!("Enemy raid inbound to {name}"));
    journal.emit(SimEvent::RaidLaunched { fleet_id, from, to });
    Some(fleet_id)
}
