//! End-to-end runs through the public engine API.

use stellar_sim::core::commands::PlayerCommand;
use stellar_sim::core::constants::*;
use stellar_sim::core::events::SimEvent;
use stellar_sim::core::state::GalaxySnapshot;
use stellar_sim::core::types::Point;
use stellar_sim::{SimConfig, SimulationEngine};

fn check_invariants(snapshot: &GalaxySnapshot) {
    for fleet in &snapshot.fleets {
        assert!(
            (0.0..=PROGRESS_COMPLETE).contains(&fleet.progress),
            "fleet {} progress {}",
            fleet.id,
            fleet.progress
        );
    }
    let active: Vec<_> = snapshot.conflicts.iter().filter(|c| c.is_active()).collect();
    for conflict in &snapshot.conflicts {
        assert!((0.0..=PROGRESS_COMPLETE).contains(&conflict.progress));
        assert!((WIN_PROBABILITY_MIN..=WIN_PROBABILITY_MAX).contains(&conflict.win_probability));
    }
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            assert!(
                a.location.distance(b.location) >= CONFLICT_JOIN_RADIUS,
                "conflicts {} and {} share a location cluster",
                a.id,
                b.id
            );
        }
    }
    assert!(snapshot.log.len() <= LOG_CAPACITY);
}

#[test]
fn test_long_run_keeps_invariants() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 2024,
        raid_chance: 1.0,
        raid_interval_ms: 8000.0,
        ..Default::default()
    })
    .unwrap();

    let home = engine.world().systems[0].position;
    let ships: Vec<_> = engine.world().ships.iter().map(|s| s.id).collect();
    for (i, ship_id) in ships.iter().enumerate() {
        let angle = i as f64;
        engine.queue_command(PlayerCommand::DispatchShip {
            ship_id: *ship_id,
            destination: home + Point::new(angle.cos(), angle.sin()) * 1500.0,
        });
    }

    let mut raids = 0;
    for _ in 0..(180 * 30) {
        let snapshot = engine.tick(1.0 / 30.0);
        check_invariants(&snapshot);
        raids += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::RaidLaunched { .. }))
            .count();
    }
    assert!(raids > 0, "raids should launch at chance 1.0");
    assert!((engine.time().elapsed_secs - 180.0).abs() < 1e-6);
}

#[test]
fn test_engine_from_config_file() {
    let path = std::env::temp_dir().join("stellar-sim-config-test.json");
    std::fs::write(&path, r#"{ "seed": 5, "system_count": 12, "max_pirates": 3 }"#).unwrap();

    let config = SimConfig::from_file(&path).unwrap();
    let engine = SimulationEngine::new(config).unwrap();
    assert_eq!(engine.world().systems.len(), 12);
    assert_eq!(engine.config().max_pirates, 3);

    std::fs::remove_file(&path).ok();
}
