//! Galaxy setup: star systems, seed outposts, starting fleet and the
//! initial agent population.

use std::f64::consts::TAU;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use stellar_ai::profiles::roll_stats;
use stellar_ai::steering::orbit_position;
use stellar_core::components::*;
use stellar_core::constants::*;
use stellar_core::enums::*;
use stellar_core::types::{AgentId, MapBounds, Point, SystemId};
use stellar_core::world::{StarSystem, WorldState};

use crate::config::SimConfig;

const NAME_PREFIXES: [&str; 8] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta",
];
const NAME_SUFFIXES: [&str; 8] = [
    "Centauri",
    "Draconis",
    "Orionis",
    "Cassiopeia",
    "Vega",
    "Sirius",
    "Rigel",
    "Betelgeuse",
];

pub const HOME_SYSTEM_NAME: &str = "Terra Nova Prime";
pub const HOME_SYSTEM_ID: SystemId = 0;

/// Quadrant of the home system on the placement grid.
const HOME_QUADRANT: (u32, u32) = (1, 2);

fn random_name(rng: &mut ChaCha8Rng) -> String {
    let prefix = NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())];
    let suffix = NAME_SUFFIXES[rng.gen_range(0..NAME_SUFFIXES.len())];
    format!("{prefix} {suffix}")
}

/// Build the starting world from `config`.
pub fn generate(config: &SimConfig, rng: &mut ChaCha8Rng) -> WorldState {
    let bounds = MapBounds::new(config.map_width, config.map_height);
    let mut world = WorldState::new(bounds);
    world.treasury = config.starting_treasury;

    let quad_w = bounds.width / f64::from(GALAXY_QUADRANTS_H);
    let quad_h = bounds.height / f64::from(GALAXY_QUADRANTS_V);

    world.systems.push(StarSystem {
        id: HOME_SYSTEM_ID,
        name: HOME_SYSTEM_NAME.to_string(),
        position: Point::new(quad_w * 1.5, bounds.height / 2.0),
        owner: Owner::Player,
        population: 1000,
        resources: 200,
        development: 3,
        defense: 100,
        star_type: StarType::Blue,
        outpost_level: None,
    });

    // Occupancy per quadrant, row-major.
    let columns = GALAXY_QUADRANTS_H as usize;
    let mut occupancy = vec![0usize; columns * GALAXY_QUADRANTS_V as usize];
    occupancy[HOME_QUADRANT.1 as usize * columns + HOME_QUADRANT.0 as usize] += 1;

    for id in 1..config.system_count as u32 {
        let free: Vec<usize> = (0..occupancy.len())
            .filter(|&q| occupancy[q] < GALAXY_MAX_PER_QUADRANT)
            .collect();
        if free.is_empty() {
            break;
        }
        let quadrant = free[rng.gen_range(0..free.len())];
        occupancy[quadrant] += 1;

        let (h, v) = ((quadrant % columns) as f64, (quadrant / columns) as f64);
        let margin = GALAXY_QUADRANT_MARGIN.min(quad_w / 2.0).min(quad_h / 2.0);
        let x_min = h * quad_w + margin;
        let y_min = v * quad_h + margin;
        let x = x_min + rng.gen::<f64>() * (quad_w - 2.0 * margin);
        let y = y_min + rng.gen::<f64>() * (quad_h - 2.0 * margin);

        let star_type = StarType::ALL[rng.gen_range(0..StarType::ALL.len())];
        let owner = if rng.gen::<f64>() < GALAXY_NEUTRAL_CHANCE {
            Owner::Neutral
        } else {
            Owner::Enemy
        };
        world.systems.push(StarSystem {
            id,
            name: random_name(rng),
            position: Point::new(x, y),
            owner,
            population: rng.gen_range(100..600),
            resources: rng.gen_range(50..150),
            development: rng.gen_range(1..4),
            defense: rng.gen_range(50..150),
            star_type,
            outpost_level: None,
        });
    }

    for seed in &config.seed_outposts {
        world.add_outpost(seed.position, seed.owner, seed.level, None);
    }
    for &class in &config.starting_ships {
        world.add_ship(class, Owner::Player, HOME_SYSTEM_ID);
    }
    world
}

/// Spawn one pirate at a random map position.
pub fn spawn_pirate(
    ecs: &mut World,
    rng: &mut ChaCha8Rng,
    bounds: &MapBounds,
    id: AgentId,
) -> hecs::Entity {
    let stats = roll_stats(AgentRole::Pirate, rng);
    let position = Point::new(rng.gen::<f64>() * bounds.width, rng.gen::<f64>() * bounds.height);
    let heading = rng.gen::<f64>() * TAU;
    ecs.spawn((
        Agent {
            id,
            speed: stats.speed,
            detection_range: stats.detection_range,
            damage: stats.damage,
        },
        Position(position),
        Hull {
            hp: stats.hp,
            max_hp: stats.max_hp,
        },
        AgentKind::Pirate { heading },
        AgentBrain::default(),
    ))
}

/// Spawn one defender orbiting `home` at a random radius and angle.
pub fn spawn_defender(
    ecs: &mut World,
    rng: &mut ChaCha8Rng,
    home: SystemId,
    center: Point,
    id: AgentId,
) -> hecs::Entity {
    let stats = roll_stats(AgentRole::Defender, rng);
    let radius = rng.gen_range(ORBIT_RADIUS_MIN..ORBIT_RADIUS_MAX);
    let angle = rng.gen::<f64>() * TAU;
    ecs.spawn((
        Agent {
            id,
            speed: stats.speed,
            detection_range: stats.detection_range,
            damage: stats.damage,
        },
        Position(orbit_position(center, radius, angle)),
        Hull {
            hp: stats.hp,
            max_hp: stats.max_hp,
        },
        AgentKind::Defender(Orbit {
            home_system: home,
            center,
            radius,
            angle: Some(angle),
        }),
        AgentBrain::default(),
    ))
}

/// Initial agent population: `max_pirates` pirates plus 1..=`max_defenders`
/// defenders per enemy system. Returns the next free agent id.
pub fn populate_agents(
    ecs: &mut World,
    world: &WorldState,
    rng: &mut ChaCha8Rng,
    mut next_id: AgentId,
    max_pirates: usize,
    max_defenders: u32,
) -> AgentId {
    for _ in 0..max_pirates {
        spawn_pirate(ecs, rng, &world.bounds, next_id);
        next_id += 1;
    }

    let enemy_systems: Vec<(SystemId, Point)> = world
        .systems
        .iter()
        .filter(|s| s.owner == Owner::Enemy)
        .map(|s| (s.id, s.position))
        .collect();
    for (system_id, center) in enemy_systems {
        let count = rng.gen_range(1..=max_defenders.max(1));
        for _ in 0..count {
            spawn_defender(ecs, rng, system_id, center, next_id);
            next_id += 1;
        }
    }
    next_id
}
