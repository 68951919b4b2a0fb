//! Conflict lifecycle system.
//!
//! Opens conflicts (or extends the one already at a location), draws the
//! defender garrison, keeps the win probability current, advances progress
//! with simulated time and resolves each conflict exactly once.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use stellar_core::conflict::*;
use stellar_core::constants::*;
use stellar_core::enums::*;
use stellar_core::events::{Journal, SimEvent};
use stellar_core::types::{ConflictId, Point};
use stellar_core::world::WorldState;

/// Everything needed to open or extend a conflict.
#[derive(Debug, Clone)]
pub struct ConflictRequest {
    pub location: Point,
    pub site: ConflictSite,
    pub attacker_side: Owner,
    pub attackers: Vec<Combatant>,
    /// Defenders known up front. The site unit is added automatically.
    pub defenders: Vec<Combatant>,
    /// Draw auxiliary garrison units for a fresh conflict.
    pub garrison: bool,
}

/// Combatant standing for the site itself, with stats from the world.
pub fn site_combatant(world: &WorldState, site: ConflictSite) -> Option<Combatant> {
    match site {
        ConflictSite::System(id) => world.system(id).map(|s| {
            let (hp, attack) = if s.defense > 0 {
                (f64::from(s.defense), f64::from(s.defense / 2))
            } else {
                (DEFENDER_DEFAULT_HP, DEFENDER_DEFAULT_ATTACK)
            };
            Combatant::new(Unit::System { id }, Some(hp), Some(attack))
        }),
        ConflictSite::Outpost(id) => world.outpost(id).map(|o| {
            let health = if o.health > 0 { o.health } else { OUTPOST_MAX_HEALTH };
            Combatant::new(
                Unit::Outpost { id },
                Some(f64::from(health)),
                Some(f64::from(health / 4)),
            )
        }),
        ConflictSite::Skirmish => None,
    }
}

/// Auxiliary defenders for a site. Count scales with system development or
/// outpost level, capped per site kind.
pub fn draw_garrison(
    world: &WorldState,
    rng: &mut ChaCha8Rng,
    site: ConflictSite,
) -> Vec<Combatant> {
    let (base_id, count, pool): (u32, u32, &[GarrisonClass]) = match site {
        ConflictSite::System(id) => {
            let Some(system) = world.system(id) else {
                return Vec::new();
            };
            let count = (rng.gen_range(0..3) + system.development).min(SYSTEM_GARRISON_CAP);
            (id, count, &GarrisonClass::SYSTEM_POOL[..])
        }
        ConflictSite::Outpost(id) => {
            let Some(outpost) = world.outpost(id) else {
                return Vec::new();
            };
            let count = (rng.gen_range(0..2) + u32::from(outpost.level)).min(OUTPOST_GARRISON_CAP);
            (id, count, &GarrisonClass::OUTPOST_POOL[..])
        }
        ConflictSite::Skirmish => return Vec::new(),
    };

    let light = matches!(site, ConflictSite::Outpost(_));
    (0..count)
        .map(|i| {
            let class = pool[rng.gen_range(0..pool.len())];
            let (hp, attack) = garrison_stats(class, light, rng);
            Combatant::new(
                Unit::Garrison {
                    id: base_id * 100 + i,
                    class,
                },
                Some(hp),
                Some(attack),
            )
        })
        .collect()
}

/// Stats for one garrison unit. Outpost crews are lighter than system ones.
fn garrison_stats(class: GarrisonClass, light: bool, rng: &mut ChaCha8Rng) -> (f64, f64) {
    let (hp_base, hp_spread, atk_base, atk_spread) = match (class, light) {
        (GarrisonClass::Fighter, true) => (20, 15, 5, 3),
        (GarrisonClass::Bomber, true) => (30, 20, 8, 5),
        (GarrisonClass::Fighter, false) => (30, 20, 8, 5),
        (GarrisonClass::Bomber, false) => (40, 30, 12, 8),
        (GarrisonClass::Cruiser, _) => (80, 40, 15, 10),
        (GarrisonClass::Carrier, _) => (120, 60, 20, 15),
    };
    let hp = hp_base + rng.gen_range(0..hp_spread);
    let attack = atk_base + rng.gen_range(0..atk_spread);
    (f64::from(hp), f64::from(attack))
}

/// Recompute the attacker win probability with fresh defender noise.
pub fn refresh_probability(conflict: &mut Conflict, rng: &mut ChaCha8Rng) {
    let noise = rng.gen_range(DEFENDER_NOISE_MIN..DEFENDER_NOISE_MAX);
    conflict.win_probability =
        win_probability(conflict.attacker_power(), conflict.defender_power(), noise);
}

/// Open a conflict at the request location, or extend the active one in
/// its location cluster (closer than the join radius).
///
/// Extending enlists every attacker on the attacking side and every
/// defender on the other, skipping units already listed. A site other than
/// the conflict's own joins as a defender.
pub fn open_or_extend(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    now_ms: f64,
    mut request: ConflictRequest,
) -> ConflictId {
    if let Some(id) = world.conflicts.active_in_cluster(request.location) {
        let other_site = world.conflicts.get(id).is_some_and(|c| c.site != request.site);
        if other_site {
            if let Some(site_unit) = site_combatant(world, request.site) {
                request.defenders.insert(0, site_unit);
            }
        }
        extend(world, rng, journal, id, &request);
        return id;
    }

    let mut defenders = Vec::new();
    if let Some(site_unit) = site_combatant(world, request.site) {
        defenders.push(site_unit);
    }
    defenders.extend(request.defenders.iter().copied());
    if request.garrison {
        defenders.extend(draw_garrison(world, rng, request.site));
    }

    let id = world.conflicts.allocate_id();
    let duration_ms = rng
        .gen_range(BATTLE_MIN_DURATION_MS..BATTLE_MAX_DURATION_MS)
        .floor();
    let mut conflict = Conflict {
        id,
        location: request.location,
        site: request.site,
        attacker_side: request.attacker_side,
        attackers: request.attackers,
        defenders,
        state: ConflictState::Active,
        progress: 0.0,
        start_ms: now_ms,
        duration_ms,
        win_probability: 50.0,
        result: None,
    };
    refresh_probability(&mut conflict, rng);

    info!(
        conflict_id = id,
        x = conflict.location.x,
        y = conflict.location.y,
        attackers = conflict.attackers.len(),
        defenders = conflict.defenders.len(),
        win_probability = conflict.win_probability,
        "Conflict opened"
    );
    journal.note(format!(
        "Battle begins at ({:.0}, {:.0}): {:.0}% chance for the attackers",
        conflict.location.x, conflict.location.y, conflict.win_probability
    ));
    journal.emit(SimEvent::ConflictOpened {
        conflict_id: id,
        location: conflict.location,
        site: conflict.site,
    });
    world.conflicts.insert(conflict);
    id
}

fn extend(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    id: ConflictId,
    request: &ConflictRequest,
) {
    let Some(conflict) = world.conflicts.get_mut(id) else {
        return;
    };
    let attacker_side = conflict.attacker_side;
    let mut joined = Vec::new();
    for combatant in &request.attackers {
        if conflict.enlist(*combatant, request.attacker_side) {
            joined.push(combatant.unit);
        }
    }
    for combatant in &request.defenders {
        if conflict.enlist(*combatant, request.attacker_side.opponent()) {
            joined.push(combatant.unit);
        }
    }
    if joined.is_empty() {
        return;
    }
    refresh_probability(conflict, rng);
    debug!(
        conflict_id = id,
        side = ?attacker_side,
        joined = joined.len(),
        win_probability = conflict.win_probability,
        "Conflict extended"
    );
    for unit in joined {
        journal.emit(SimEvent::ConflictJoined {
            conflict_id: id,
            unit,
        });
    }
}

/// Enlist a single combatant into an existing active conflict on `owner`'s
/// side. Returns true when the roster grew.
pub fn join(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    id: ConflictId,
    combatant: Combatant,
    owner: Owner,
) -> bool {
    if !world.conflicts.enlist(id, combatant, owner) {
        return false;
    }
    if let Some(conflict) = world.conflicts.get_mut(id) {
        refresh_probability(conflict, rng);
    }
    journal.emit(SimEvent::ConflictJoined {
        conflict_id: id,
        unit: combatant.unit,
    });
    true
}

/// Roll the outcome of a conflict. A finished conflict returns its stored
/// result without drawing anything.
pub fn resolve(conflict: &mut Conflict, rng: &mut ChaCha8Rng) -> BattleResult {
    if let (ConflictState::Finished, Some(result)) = (conflict.state, conflict.result) {
        return result;
    }

    let roll = rng.gen::<f64>() * 100.0;
    let attacker_wins = roll <= conflict.win_probability;
    let attacker_fraction = rng.gen_range(LOSS_FRACTION_MIN..LOSS_FRACTION_MAX);
    let defender_fraction = rng.gen_range(LOSS_FRACTION_MIN..LOSS_FRACTION_MAX);
    let (attacker_scale, defender_scale) = if attacker_wins {
        (WINNER_LOSS_SCALE, LOSER_LOSS_SCALE)
    } else {
        (LOSER_LOSS_SCALE, WINNER_LOSS_SCALE)
    };

    let winner = if attacker_wins {
        conflict.attacker_side
    } else {
        conflict.attacker_side.opponent()
    };
    let captured = if winner == Owner::Player {
        rng.gen_range(CAPTURE_MIN..CAPTURE_MAX)
    } else {
        0
    };

    let result = BattleResult {
        winner,
        attacker_losses: loss_count(conflict.attackers.len(), attacker_fraction * attacker_scale),
        defender_losses: loss_count(conflict.defenders.len(), defender_fraction * defender_scale),
        captured,
    };
    conflict.state = ConflictState::Finished;
    conflict.progress = PROGRESS_COMPLETE;
    conflict.result = Some(result);
    result
}

/// Resolve conflict `id` and apply its consequences to the world. Calling
/// this on a finished conflict returns the stored result and changes nothing.
pub fn settle_conflict(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
    id: ConflictId,
) -> Option<BattleResult> {
    let conflict = world.conflicts.get_mut(id)?;
    if !conflict.is_active() {
        return conflict.result;
    }
    let result = resolve(conflict, rng);
    let site = conflict.site;
    let attacker_side = conflict.attacker_side;

    info!(
        conflict_id = id,
        winner = ?result.winner,
        attacker_losses = result.attacker_losses,
        defender_losses = result.defender_losses,
        captured = result.captured,
        "Conflict resolved"
    );
    journal.emit(SimEvent::ConflictResolved {
        conflict_id: id,
        winner: result.winner,
        captured: result.captured,
    });
    journal.note(match result.winner {
        Owner::Player => format!(
            "Victory! {} resources captured, {} ships lost",
            result.captured,
            if attacker_side == Owner::Player {
                result.attacker_losses
            } else {
                result.defender_losses
            }
        ),
        _ => "Defeat. Our forces were driven back".to_string(),
    });

    apply_outcome(world, journal, site, attacker_side, &result);
    Some(result)
}

/// Territorial and treasury effects of a resolved conflict.
fn apply_outcome(
    world: &mut WorldState,
    journal: &mut Journal,
    site: ConflictSite,
    attacker_side: Owner,
    result: &BattleResult,
) {
    if result.captured > 0 {
        world.treasury.materials += result.captured;
    }
    if result.winner != attacker_side {
        return;
    }
    match site {
        ConflictSite::System(id) => {
            if let Some(system) = world.system_mut(id) {
                system.owner = attacker_side;
                system.population =
                    (f64::from(system.population) * CONQUEST_POPULATION_FACTOR).floor() as u32;
                journal.note(format!("{} has fallen to the {:?}", system.name, attacker_side));
                journal.emit(SimEvent::SystemConquered {
                    system_id: id,
                    owner: attacker_side,
                });
            }
        }
        ConflictSite::Outpost(id) => {
            if world.remove_outpost(id).is_some() {
                journal.note(format!("Outpost {id} destroyed"));
                journal.emit(SimEvent::OutpostDestroyed { outpost_id: id });
            }
        }
        ConflictSite::Skirmish => {}
    }
}

/// Advance progress of every active conflict and resolve those that are due.
pub fn run(world: &mut WorldState, rng: &mut ChaCha8Rng, journal: &mut Journal, now_ms: f64) {
    let mut due = Vec::new();
    for conflict in world.conflicts.iter_mut().filter(|c| c.is_active()) {
        conflict.progress = conflict.progress_at(now_ms);
        if conflict.progress >= PROGRESS_COMPLETE {
            due.push(conflict.id);
        }
    }
    for id in due {
        settle_conflict(world, rng, journal, id);
    }
}
