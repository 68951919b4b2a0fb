#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use stellar_core::components::{AgentTarget, Orbit};
    use stellar_core::constants::*;
    use stellar_core::enums::{AgentRole, AgentState};
    use stellar_core::types::{MapBounds, Point};

    use crate::fsm::*;
    use crate::profiles::{get_profile, roll_stats};
    use crate::steering::*;

    const RANGE: f64 = 200.0;

    fn make_context(role: AgentRole, state: AgentState) -> AgentContext {
        AgentContext {
            role,
            state,
            position: Point::ZERO,
            detection_range: RANGE,
            target: None,
            target_position: None,
            nearest: None,
            now_ms: 10_000.0,
            last_attack_ms: None,
        }
    }

    fn contact_at(ship_id: u32, x: f64) -> Contact {
        Contact {
            ship_id,
            position: Point::new(x, 0.0),
            distance: x,
        }
    }

    #[test]
    fn test_patrol_to_pursue_on_contact() {
        let mut ctx = make_context(AgentRole::Pirate, AgentState::Patrol);
        ctx.nearest = Some(contact_at(3, 150.0));
        let d = evaluate(&ctx);
        assert_eq!(d.state, AgentState::Pursue);
        assert!(d.state_changed);
        assert_eq!(d.target.map(|t| t.ship_id), Some(3));
        assert_eq!(d.strike, None);
    }

    #[test]
    fn test_contact_inside_half_range_attacks_immediately() {
        let mut ctx = make_context(AgentRole::Defender, AgentState::Patrol);
        ctx.nearest = Some(contact_at(5, 60.0));
        let d = evaluate(&ctx);
        assert_eq!(d.state, AgentState::Attack);
        assert_eq!(d.strike, Some(5));
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut ctx = make_context(AgentRole::Pirate, AgentState::Attack);
        ctx.target = Some(AgentTarget {
            ship_id: 1,
            last_known: Point::new(50.0, 0.0),
        });
        ctx.target_position = Some(Point::new(50.0, 0.0));
        ctx.last_attack_ms = Some(9_000.0);

        // 1000 ms since last hit: hold fire.
        let d = evaluate(&ctx);
        assert_eq!(d.state, AgentState::Attack);
        assert_eq!(d.strike, None);

        // Exactly 2000 ms: still holding.
        ctx.now_ms = 11_000.0;
        assert_eq!(evaluate(&ctx).strike, None);

        ctx.now_ms = 11_001.0;
        assert_eq!(evaluate(&ctx).strike, Some(1));
    }

    #[test]
    fn test_attack_target_leaves_half_range() {
        let mut ctx = make_context(AgentRole::Pirate, AgentState::Attack);
        ctx.target = Some(AgentTarget {
            ship_id: 1,
            last_known: Point::new(50.0, 0.0),
        });
        ctx.target_position = Some(Point::new(150.0, 0.0));
        let d = evaluate(&ctx);
        assert_eq!(d.state, AgentState::Pursue);
        assert_eq!(d.target.unwrap().last_known, Point::new(150.0, 0.0));
    }

    #[test]
    fn test_target_lost_by_role() {
        let mut pirate = make_context(AgentRole::Pirate, AgentState::Attack);
        pirate.target = Some(AgentTarget {
            ship_id: 1,
            last_known: Point::new(10.0, 0.0),
        });
        let d = evaluate(&pirate);
        assert_eq!(d.state, AgentState::Patrol);
        assert!(d.target.is_none());

        let mut defender = make_context(AgentRole::Defender, AgentState::Attack);
        defender.target = pirate.target;
        let d = evaluate(&defender);
        assert_eq!(d.state, AgentState::Return);
        assert!(d.target.is_none());
    }

    #[test]
    fn test_pursuit_continues_out_of_sensor_range() {
        let mut ctx = make_context(AgentRole::Pirate, AgentState::Pursue);
        ctx.target = Some(AgentTarget {
            ship_id: 2,
            last_known: Point::new(400.0, 0.0),
        });
        ctx.target_position = Some(Point::new(400.0, 0.0));
        let d = evaluate(&ctx);
        assert_eq!(d.state, AgentState::Pursue);
        assert!(!d.state_changed);

        ctx.target_position = None;
        assert_eq!(evaluate(&ctx).state, AgentState::Patrol);
    }

    #[test]
    fn test_settle_pursue_and_return() {
        let target = Some(AgentTarget {
            ship_id: 1,
            last_known: Point::new(90.0, 0.0),
        });
        assert_eq!(
            settle(AgentRole::Pirate, AgentState::Pursue, Point::ZERO, RANGE, target, None),
            AgentState::Attack
        );
        assert_eq!(
            settle(
                AgentRole::Pirate,
                AgentState::Pursue,
                Point::new(-50.0, 0.0),
                RANGE,
                target,
                None
            ),
            AgentState::Pursue
        );

        let home = Some(Point::new(0.0, 70.0));
        assert_eq!(
            settle(AgentRole::Defender, AgentState::Return, Point::ZERO, RANGE, None, home),
            AgentState::Patrol
        );
        let far_home = Some(Point::new(0.0, 500.0));
        assert_eq!(
            settle(AgentRole::Defender, AgentState::Return, Point::ZERO, RANGE, None, far_home),
            AgentState::Return
        );
    }

    #[test]
    fn test_nearest_contact_tie_keeps_first() {
        let candidates = vec![
            (1, Point::new(100.0, 0.0)),
            (2, Point::new(0.0, 100.0)),
            (3, Point::new(300.0, 0.0)),
        ];
        let c = nearest_contact(Point::ZERO, RANGE, candidates).unwrap();
        assert_eq!(c.ship_id, 1);

        let none = nearest_contact(Point::ZERO, RANGE, vec![(4, Point::new(200.0, 0.0))]);
        assert!(none.is_none(), "range is exclusive");
    }

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let p = step_toward(Point::ZERO, Point::new(10.0, 0.0), 3.0);
        assert!((p.x - 3.0).abs() < 1e-9);
        let p = step_toward(Point::new(9.0, 0.0), Point::new(10.0, 0.0), 3.0);
        assert_eq!(p, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_orbit_step_keeps_radius() {
        let mut orbit = Orbit {
            home_system: 1,
            center: Point::new(500.0, 500.0),
            radius: 100.0,
            angle: Some(0.0),
        };
        let p = orbit_step(&mut orbit).unwrap();
        assert!((p.distance(orbit.center) - 100.0).abs() < 1e-9);
        assert!((orbit.angle.unwrap() - ORBIT_ANGULAR_SPEED).abs() < 1e-12);

        orbit.angle = None;
        assert!(orbit_step(&mut orbit).is_none());
    }

    #[test]
    fn test_wander_turns_back_from_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let bounds = MapBounds::new(1000.0, 1000.0);
        // Heading straight out of the map near the left edge.
        let start = Point::new(10.0, 500.0);
        let (next, heading) = wander(start, std::f64::consts::PI, 1.0, &bounds, &mut rng);
        assert!(heading.abs() < 1e-9, "heading should point at the centre");
        assert!(next.x > 10.0);
    }

    #[test]
    fn test_rolled_stats_within_profile() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let pirate = roll_stats(AgentRole::Pirate, &mut rng);
            assert!((50.0..100.0).contains(&pirate.hp));
            assert!((5.0..15.0).contains(&pirate.damage));
            assert!((0.5..0.7).contains(&pirate.speed));
            assert!((200.0..250.0).contains(&pirate.detection_range));

            let defender = roll_stats(AgentRole::Defender, &mut rng);
            assert!((80.0..120.0).contains(&defender.hp));
            assert!((8.0..15.0).contains(&defender.damage));
            assert_eq!(defender.detection_range, 300.0);
        }
        assert_eq!(get_profile(AgentRole::Defender).max_hp, 120.0);
    }
}
