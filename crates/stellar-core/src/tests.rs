#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::conflict::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{Journal, LogBook, SimEvent};
    use crate::state::GalaxySnapshot;
    use crate::types::*;
    use crate::world::*;

    fn sample_conflict(attacker_side: Owner) -> Conflict {
        Conflict {
            id: 1,
            location: Point::new(100.0, 100.0),
            site: ConflictSite::System(7),
            attacker_side,
            attackers: vec![Combatant::new(
                Unit::Fleet {
                    id: 1,
                    class: ShipClass::Fighter,
                },
                None,
                None,
            )],
            defenders: vec![Combatant::new(Unit::System { id: 7 }, Some(100.0), Some(50.0))],
            state: ConflictState::Active,
            progress: 0.0,
            start_ms: 1000.0,
            duration_ms: 30_000.0,
            win_probability: 50.0,
            result: None,
        }
    }

    #[test]
    fn test_owner_opponent() {
        assert_eq!(Owner::Player.opponent(), Owner::Enemy);
        assert_eq!(Owner::Enemy.opponent(), Owner::Player);
        assert_eq!(Owner::Neutral.opponent(), Owner::Neutral);
    }

    #[test]
    fn test_ship_class_stats() {
        let titan = ShipClass::Titan.stats();
        assert_eq!(titan.hp, 400.0);
        assert_eq!(titan.attack, 100.0);
        assert_eq!(ShipClass::Titan.hull_size(), HullSize::Large);
        assert_eq!(ShipClass::Scout.hull_size(), HullSize::Small);
        assert_eq!(ShipClass::Carrier.hull_size(), HullSize::Medium);

        assert_eq!(ShipClass::Titan.build_cost().crystals, 200);
        assert_eq!(ShipClass::Fighter.build_cost(), Cost::new(100, 50));
        // 30% energy, 50% materials, rounded down.
        assert_eq!(ShipClass::Scout.salvage(), (15, 10));
        assert_eq!(ShipClass::Mining.salvage(), (60, 125));
    }

    #[test]
    fn test_mission_transitions() {
        let patrol = FleetMission::Patrol;
        assert!(!patrol.is_committed());

        let attack = patrol.on_trigger(MissionTrigger::EngagedSystem(3));
        assert_eq!(
            attack,
            FleetMission::Attack {
                target: TargetRef::System(3)
            }
        );
        assert!(attack.is_committed());

        let colonize = patrol.on_trigger(MissionTrigger::Colonized(4));
        assert!(colonize.is_committed());

        let defend = patrol.on_trigger(MissionTrigger::ReachedFriendly(5));
        assert_eq!(defend, FleetMission::Defend { system: 5 });
        assert!(!defend.is_committed());

        assert_eq!(
            attack.on_trigger(MissionTrigger::ReachedOpenSpace),
            FleetMission::Patrol
        );
    }

    #[test]
    fn test_fleet_mission_serde_is_tagged() {
        let mission = FleetMission::Attack {
            target: TargetRef::Conflict(9),
        };
        let json = serde_json::to_string(&mission).unwrap();
        assert!(json.contains("\"kind\":\"attack\""));
        let back: FleetMission = serde_json::from_str(&json).unwrap();
        assert_eq!(mission, back);
    }

    #[test]
    fn test_outpost_radius_grows_with_level() {
        assert_eq!(Outpost::radius_for_level(1), 150.0);
        assert_eq!(Outpost::radius_for_level(2), 200.0);
        assert_eq!(Outpost::radius_for_level(3), 250.0);

        let clamped = Outpost::new(1, Point::ZERO, Owner::Player, 9, None);
        assert_eq!(clamped.level, OUTPOST_MAX_LEVEL);
        let clamped = Outpost::new(2, Point::ZERO, Owner::Player, 0, None);
        assert_eq!(clamped.level, OUTPOST_MIN_LEVEL);
    }

    #[test]
    fn test_outpost_level_up_stops_at_max() {
        let mut outpost = Outpost::new(1, Point::ZERO, Owner::Player, 2, None);
        let radius = outpost.defense_radius;
        assert!(outpost.level_up());
        assert_eq!(outpost.level, 3);
        assert_eq!(outpost.defense_radius, radius + 50.0);

        let before = outpost.clone();
        assert!(!outpost.level_up());
        assert_eq!(outpost, before);
    }

    #[test]
    fn test_treasury_spend() {
        let mut treasury = Treasury::default();
        assert_eq!(treasury.energy, 1000);
        assert!(treasury.try_spend(Cost::new(150, 100)));
        assert_eq!(treasury.energy, 850);
        assert_eq!(treasury.materials, 400);

        let before = treasury;
        assert!(!treasury.try_spend(Cost::new(5000, 0)));
        assert!(!treasury.try_spend(Cost::new(0, 0).with_crystals(500)));
        assert_eq!(treasury, before);

        assert!(treasury.try_spend(Cost::new(0, 0).with_crystals(40)));
        assert_eq!(treasury.crystals, 60);
    }

    #[test]
    fn test_fleet_freeze_and_redirect() {
        let mut fleet = MovingFleet::new(
            0,
            ShipClass::Scout,
            Owner::Player,
            Point::ZERO,
            Point::new(100.0, 0.0),
            FLEET_SPEED,
        );
        assert_eq!(fleet.total_distance(), 100.0);
        fleet.freeze_at(Point::new(40.0, 10.0));
        assert!(fleet.has_arrived());
        assert!(fleet.intercepted);

        fleet.redirect(Point::new(40.0, 200.0));
        assert_eq!(fleet.origin, Point::new(40.0, 10.0));
        assert_eq!(fleet.progress, 0.0);
        assert!(!fleet.intercepted);
        assert_eq!(fleet.mission, FleetMission::Patrol);
    }

    #[test]
    fn test_world_lookups_and_outpost_link() {
        let mut world = WorldState::new(MapBounds::default());
        world.systems.push(StarSystem {
            id: 1,
            name: "Alpha Centauri".into(),
            position: Point::new(500.0, 500.0),
            owner: Owner::Player,
            population: 100,
            resources: 50,
            development: 1,
            defense: 10,
            star_type: StarType::Yellow,
            outpost_level: None,
        });

        let id = world.add_outpost(Point::new(500.0, 500.0), Owner::Player, 1, Some(1));
        assert_eq!(world.system(1).unwrap().outpost_level, Some(1));
        assert!(world.system_at(Point::new(502.0, 497.0), ARRIVAL_SYSTEM_TOLERANCE).is_some());
        assert!(world.system_at(Point::new(504.0, 500.0), ARRIVAL_SYSTEM_TOLERANCE).is_none());
        assert!(!world.is_free_site(Point::new(510.0, 500.0), 50.0));

        world.remove_outpost(id);
        assert!(world.outpost(id).is_none());
        assert_eq!(world.system(1).unwrap().outpost_level, None);

        let ship = world.add_ship(ShipClass::Fighter, Owner::Player, 1);
        assert_eq!(world.ship_position(ship), Some(Point::new(500.0, 500.0)));
    }

    #[test]
    fn test_first_system_within_respects_storage_order() {
        let mut world = WorldState::new(MapBounds::default());
        for (id, x) in [(1, 130.0), (2, 105.0)] {
            world.systems.push(StarSystem {
                id,
                name: format!("S{id}"),
                position: Point::new(x, 0.0),
                owner: Owner::Enemy,
                population: 0,
                resources: 0,
                development: 1,
                defense: 0,
                star_type: StarType::Red,
                outpost_level: None,
            });
        }
        // System 2 is nearer, but system 1 is first in storage.
        let hit = world
            .first_system_within(Point::new(100.0, 0.0), MID_FLIGHT_SYSTEM_RADIUS, |_| true)
            .unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_win_probability_clamped() {
        assert_eq!(win_probability(1000.0, 0.001, 1.0), WIN_PROBABILITY_MAX);
        assert_eq!(win_probability(0.001, 1000.0, 1.0), WIN_PROBABILITY_MIN);
        assert_eq!(win_probability(0.0, 0.0, 1.0), 50.0);
        let p = win_probability(10.0, 10.0, 1.0);
        assert!((p - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_power_uses_defaults() {
        let conflict = sample_conflict(Owner::Player);
        // Default attacker: 10 * 100 / 100.
        assert!((conflict.attacker_power() - 10.0).abs() < 1e-9);
        // System defender: 50 * 100 / 100.
        assert!((conflict.defender_power() - 50.0).abs() < 1e-9);

        let bare = [Combatant::new(Unit::Outpost { id: 1 }, None, None)];
        let power = side_power(&bare, DEFENDER_DEFAULT_ATTACK, DEFENDER_DEFAULT_HP);
        assert!((power - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_loss_count_floors() {
        assert_eq!(loss_count(5, 0.5), 2);
        assert_eq!(loss_count(1, 0.96), 0);
        assert_eq!(loss_count(0, 0.8), 0);
    }

    #[test]
    fn test_conflict_enlist_dedupes() {
        let mut conflict = sample_conflict(Owner::Player);
        let newcomer = Combatant::new(
            Unit::Fleet {
                id: 2,
                class: ShipClass::Cruiser,
            },
            Some(120.0),
            Some(50.0),
        );
        assert!(conflict.enlist(newcomer, Owner::Player));
        assert!(!conflict.enlist(newcomer, Owner::Player));
        assert_eq!(conflict.attackers.len(), 2);

        let guard = Combatant::new(Unit::Agent { id: 4, role: AgentRole::Defender }, None, None);
        assert!(conflict.enlist(guard, Owner::Enemy));
        assert_eq!(conflict.defenders.len(), 2);
    }

    #[test]
    fn test_conflict_progress_at() {
        let conflict = sample_conflict(Owner::Player);
        assert_eq!(conflict.progress_at(1000.0), 0.0);
        assert!((conflict.progress_at(16_000.0) - 50.0).abs() < 1e-9);
        assert_eq!(conflict.progress_at(1_000_000.0), 100.0);
    }

    #[test]
    fn test_board_active_queries() {
        let mut board = ConflictBoard::default();
        let id = board.allocate_id();
        let mut conflict = sample_conflict(Owner::Player);
        conflict.id = id;
        board.insert(conflict);

        assert_eq!(board.active_near(Point::new(130.0, 100.0), CONFLICT_JOIN_RADIUS), Some(id));
        assert_eq!(board.active_near(Point::new(150.0, 100.0), CONFLICT_JOIN_RADIUS), None);
        assert_eq!(board.active_in_cluster(Point::new(100.0, 149.0)), Some(id));
        assert_eq!(board.active_in_cluster(Point::new(100.0, 150.0)), None);

        board.get_mut(id).unwrap().state = ConflictState::Finished;
        assert_eq!(board.active_in_cluster(Point::new(100.0, 100.0)), None);
        let late = Combatant::new(Unit::Fleet { id: 9, class: ShipClass::Scout }, None, None);
        assert!(!board.enlist(id, late, Owner::Player));
    }

    #[test]
    fn test_log_book_caps_entries() {
        let mut log = LogBook::default();
        for i in 0..25 {
            log.push(format!("entry {i}"));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.entries().next(), Some("entry 5"));
        assert_eq!(log.latest(), Some("entry 24"));
    }

    #[test]
    fn test_journal_drains_events() {
        let mut journal = Journal::default();
        journal.emit(SimEvent::ShipDestroyed { ship_id: 3 });
        journal.note("Ship lost");
        assert_eq!(journal.pending().len(), 1);
        assert_eq!(journal.drain_events().len(), 1);
        assert!(journal.pending().is_empty());
        assert_eq!(journal.log.len(), 1);
    }

    #[test]
    fn test_player_command_serde() {
        let cmd = PlayerCommand::DispatchShip {
            ship_id: 4,
            destination: Point::new(10.0, 20.0),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"DispatchShip\""));
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);

        let pause: PlayerCommand = serde_json::from_str(r#"{"type":"Pause"}"#).unwrap();
        assert_eq!(pause, PlayerCommand::Pause);
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snapshot = GalaxySnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GalaxySnapshot = serde_json::from_str(&json).unwrap();
        assert!(back.systems.is_empty());
        assert_eq!(back.bounds.width, MAP_WIDTH);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(0.5);
        t.advance(0.25);
        assert_eq!(t.frame, 2);
        assert!((t.now_ms() - 750.0).abs() < 1e-9);
    }
}
