//! Simulation constants and tuning parameters.

// --- World ---

/// Galaxy map width in world units.
pub const MAP_WIDTH: f64 = 8000.0;

/// Galaxy map height in world units.
pub const MAP_HEIGHT: f64 = 6000.0;

/// Quadrant grid used to spread systems across the map.
pub const GALAXY_QUADRANTS_H: u32 = 5;
pub const GALAXY_QUADRANTS_V: u32 = 4;

/// Maximum systems placed in one quadrant.
pub const GALAXY_MAX_PER_QUADRANT: usize = 2;

/// Distance kept from quadrant edges when placing a system.
pub const GALAXY_QUADRANT_MARGIN: f64 = 200.0;

/// Number of systems generated, home system included.
pub const GALAXY_SYSTEM_COUNT: usize = 30;

/// Chance a generated (non-home) system starts neutral; the rest are enemy.
pub const GALAXY_NEUTRAL_CHANCE: f64 = 0.8;

// --- Fleet movement ---

/// Default fleet cruise speed (units per second).
pub const FLEET_SPEED: f64 = 30.0;

/// Progress value of a fleet that has arrived (or been intercepted).
pub const PROGRESS_COMPLETE: f64 = 100.0;

// --- Trigger radii ---

/// Mid-flight detection radius against hostile systems.
pub const MID_FLIGHT_SYSTEM_RADIUS: f64 = 40.0;

/// Mid-flight detection radius against hostile outposts.
pub const MID_FLIGHT_OUTPOST_RADIUS: f64 = 40.0;

/// A patrolling fleet this close to an active conflict joins it.
pub const CONFLICT_JOIN_RADIUS: f64 = 50.0;

/// Per-axis tolerance for "the destination is this system".
pub const ARRIVAL_SYSTEM_TOLERANCE: f64 = 3.0;

/// Distance from the destination at which an outpost counts as the target.
pub const ARRIVAL_OUTPOST_RADIUS: f64 = 10.0;

/// Enemy fleets this close to a player system open a conflict there.
pub const SYSTEM_AREA_RADIUS: f64 = 20.0;

// --- Conflicts ---

/// Battle duration bounds (milliseconds).
pub const BATTLE_MIN_DURATION_MS: f64 = 30_000.0;
pub const BATTLE_MAX_DURATION_MS: f64 = 240_000.0;

/// Win probability clamp (percent).
pub const WIN_PROBABILITY_MIN: f64 = 5.0;
pub const WIN_PROBABILITY_MAX: f64 = 95.0;

/// Defaults used in power calculations when a combatant has no stats.
pub const ATTACKER_DEFAULT_ATTACK: f64 = 10.0;
pub const ATTACKER_DEFAULT_HP: f64 = 100.0;
pub const DEFENDER_DEFAULT_ATTACK: f64 = 5.0;
pub const DEFENDER_DEFAULT_HP: f64 = 50.0;

/// Noise applied to defender power.
pub const DEFENDER_NOISE_MIN: f64 = 0.7;
pub const DEFENDER_NOISE_MAX: f64 = 1.3;

/// Loss fraction bounds and winner/loser scaling.
pub const LOSS_FRACTION_MIN: f64 = 0.2;
pub const LOSS_FRACTION_MAX: f64 = 0.8;
pub const WINNER_LOSS_SCALE: f64 = 0.7;
pub const LOSER_LOSS_SCALE: f64 = 1.2;

/// Resources captured on a player victory, half-open range.
pub const CAPTURE_MIN: u32 = 50;
pub const CAPTURE_MAX: u32 = 150;

/// Garrison caps for generated defender rosters.
pub const SYSTEM_GARRISON_CAP: u32 = 5;
pub const OUTPOST_GARRISON_CAP: u32 = 3;

/// Fraction of population that survives a conquest.
pub const CONQUEST_POPULATION_FACTOR: f64 = 0.7;

// --- Outposts ---

pub const OUTPOST_MIN_LEVEL: u8 = 1;
pub const OUTPOST_MAX_LEVEL: u8 = 3;
pub const OUTPOST_BASE_RADIUS: f64 = 150.0;
pub const OUTPOST_RADIUS_PER_LEVEL: f64 = 50.0;
pub const OUTPOST_MAX_HEALTH: u32 = 100;

/// Closest two outposts may stand to each other.
pub const OUTPOST_MIN_SPACING: f64 = 50.0;

/// Minimum defense of a freshly colonized system.
pub const COLONY_MIN_DEFENSE: u32 = 5;

/// System development cap reachable through upgrades.
pub const SYSTEM_MAX_DEVELOPMENT: u32 = 5;
pub const SYSTEM_UPGRADE_DEFENSE: u32 = 25;
pub const SYSTEM_UPGRADE_POPULATION: u32 = 200;

// --- Ship transfers ---

/// Energy spent on a system-to-system hop.
pub const SHIP_MOVE_ENERGY: u32 = 20;

/// Delay before a hopping ship is docked at its new system.
pub const SHIP_MOVE_DELAY_MS: f64 = 2000.0;

/// Damage dealt to each ship when an assault is repelled (inclusive range).
pub const ASSAULT_REPEL_DAMAGE_MIN: u32 = 10;
pub const ASSAULT_REPEL_DAMAGE_MAX: u32 = 29;

// --- Shipyard ---

/// Share of a ship's build cost returned when it is dismantled.
pub const SALVAGE_ENERGY_PERCENT: u32 = 30;
pub const SALVAGE_MATERIALS_PERCENT: u32 = 50;

// --- Agents ---

/// Fixed AI step interval (milliseconds).
pub const AI_TICK_MS: f64 = 50.0;

/// Most AI steps run in one frame. A longer backlog is dropped.
pub const MAX_AI_STEPS_PER_TICK: u32 = 200;

/// Minimum time between two strikes by the same agent.
pub const AGENT_ATTACK_COOLDOWN_MS: f64 = 2000.0;

/// Fraction of detection range inside which an agent attacks.
pub const AGENT_ATTACK_RANGE_FACTOR: f64 = 0.5;

/// Per-tick chance that a patrolling pirate picks a new heading.
pub const PIRATE_HEADING_CHANGE_CHANCE: f64 = 0.1;

/// Pirates within this distance of a map edge turn back to the centre.
pub const PIRATE_EDGE_MARGIN: f64 = 50.0;

/// Pirate population ceiling and regeneration cadence.
pub const MAX_PIRATES: usize = 15;
pub const PIRATE_RESPAWN_MS: f64 = 10_000.0;

/// Defenders spawned per enemy system (upper bound, at least one).
pub const MAX_DEFENDERS_PER_SYSTEM: u32 = 3;

/// Defender orbit geometry.
pub const ORBIT_RADIUS_MIN: f64 = 80.0;
pub const ORBIT_RADIUS_MAX: f64 = 120.0;
pub const ORBIT_ANGULAR_SPEED: f64 = 0.001;

// --- Raids ---

pub const RAID_INTERVAL_MS: f64 = 45_000.0;
pub const RAID_CHANCE: f64 = 0.3;

// --- Log ---

/// Narration lines kept by the log book.
pub const LOG_CAPACITY: usize = 20;
