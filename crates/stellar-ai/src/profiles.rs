//! Role-specific agent profiles.
//!
//! Consolidates per-role stat ranges used when spawning agents.

use rand::Rng;

use stellar_core::enums::AgentRole;

/// Stat ranges for an agent role. Ranges are `[min, min + spread)`.
pub struct AgentProfile {
    pub hp_min: f64,
    pub hp_spread: u32,
    pub max_hp: f64,
    /// Distance per AI step.
    pub speed_min: f64,
    pub speed_spread: f64,
    pub range_min: f64,
    pub range_spread: f64,
    pub damage_min: f64,
    pub damage_spread: u32,
}

/// Concrete stats for one spawned agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolledStats {
    pub hp: f64,
    pub max_hp: f64,
    pub speed: f64,
    pub detection_range: f64,
    pub damage: f64,
}

/// Get the profile for a role.
pub fn get_profile(role: AgentRole) -> AgentProfile {
    match role {
        // Fast, short-sighted raiders.
        AgentRole::Pirate => AgentProfile {
            hp_min: 50.0,
            hp_spread: 50,
            max_hp: 100.0,
            speed_min: 0.5,
            speed_spread: 0.2,
            range_min: 200.0,
            range_spread: 50.0,
            damage_min: 5.0,
            damage_spread: 10,
        },
        // Slow guards with long sensors.
        AgentRole::Defender => AgentProfile {
            hp_min: 80.0,
            hp_spread: 40,
            max_hp: 120.0,
            speed_min: 0.3,
            speed_spread: 0.0,
            range_min: 300.0,
            range_spread: 0.0,
            damage_min: 8.0,
            damage_spread: 7,
        },
    }
}

/// Draw concrete stats for a new agent of `role`.
pub fn roll_stats(role: AgentRole, rng: &mut impl Rng) -> RolledStats {
    let profile = get_profile(role);
    let hp = profile.hp_min + f64::from(rng.gen_range(0..profile.hp_spread));
    let damage = profile.damage_min + f64::from(rng.gen_range(0..profile.damage_spread));
    RolledStats {
        hp,
        max_hp: profile.max_hp,
        speed: profile.speed_min + rng.gen::<f64>() * profile.speed_spread,
        detection_range: profile.range_min + rng.gen::<f64>() * profile.range_spread,
        damage,
    }
}
