//! Agent behaviour finite state machine.
//!
//! Pure functions that compute state transitions and strike decisions for
//! pirates and defenders. No ECS dependency; operates on plain data.
//!
//! Transitions:
//! - `Patrol`/`Pursue`/`Return` + contact in range → `Pursue`, or `Attack`
//!   when the contact is already inside half the detection range.
//! - `Pursue` → `Attack` once within half range (see [`settle`]).
//! - `Attack` → `Pursue` when the target leaves half range.
//! - `Attack`/`Pursue` with the target gone → `Patrol` (pirate) or
//!   `Return` (defender).
//! - `Return` → `Patrol` once inside the minimum orbit radius of home.

use stellar_core::components::AgentTarget;
use stellar_core::constants::*;
use stellar_core::enums::{AgentRole, AgentState};
use stellar_core::types::{Point, ShipId};

/// A player ship visible to an agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub ship_id: ShipId,
    pub position: Point,
    pub distance: f64,
}

/// Input to the agent FSM for a single entity.
pub struct AgentContext {
    pub role: AgentRole,
    pub state: AgentState,
    pub position: Point,
    pub detection_range: f64,
    pub target: Option<AgentTarget>,
    /// Where the locked target is now, if it still exists.
    pub target_position: Option<Point>,
    /// Nearest player ship inside detection range.
    pub nearest: Option<Contact>,
    pub now_ms: f64,
    pub last_attack_ms: Option<f64>,
}

/// Output from the agent FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentDecision {
    pub state: AgentState,
    pub target: Option<AgentTarget>,
    /// Ship to hit this step.
    pub strike: Option<ShipId>,
    pub state_changed: bool,
}

/// Distance inside which an agent attacks instead of closing in.
pub fn attack_range(detection_range: f64) -> f64 {
    detection_range * AGENT_ATTACK_RANGE_FACTOR
}

/// True once the cooldown since the last strike has fully elapsed.
pub fn can_strike(now_ms: f64, last_attack_ms: Option<f64>) -> bool {
    match last_attack_ms {
        Some(last) => now_ms - last > AGENT_ATTACK_COOLDOWN_MS,
        None => true,
    }
}

/// State an agent falls back to when it loses its target.
pub fn lost_target_state(role: AgentRole) -> AgentState {
    match role {
        AgentRole::Pirate => AgentState::Patrol,
        AgentRole::Defender => AgentState::Return,
    }
}

/// Nearest candidate strictly inside `range`. Ties keep the earlier candidate.
pub fn nearest_contact(
    position: Point,
    range: f64,
    candidates: impl IntoIterator<Item = (ShipId, Point)>,
) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    for (ship_id, at) in candidates {
        let distance = position.distance(at);
        if distance >= range {
            continue;
        }
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Contact {
                ship_id,
                position: at,
                distance,
            });
        }
    }
    best
}

/// Evaluate the FSM for one agent before it moves.
pub fn evaluate(ctx: &AgentContext) -> AgentDecision {
    let decision = match (ctx.state, ctx.nearest) {
        (AgentState::Attack, _) => evaluate_attack(ctx),
        (_, Some(contact)) => evaluate_contact(ctx, contact),
        (AgentState::Pursue, None) => evaluate_pursuit(ctx),
        _ => AgentDecision {
            state: ctx.state,
            target: ctx.target,
            strike: None,
            state_changed: false,
        },
    };
    AgentDecision {
        state_changed: decision.state != ctx.state,
        ..decision
    }
}

fn evaluate_contact(ctx: &AgentContext, contact: Contact) -> AgentDecision {
    let target = Some(AgentTarget {
        ship_id: contact.ship_id,
        last_known: contact.position,
    });
    if contact.distance < attack_range(ctx.detection_range) {
        let strike = can_strike(ctx.now_ms, ctx.last_attack_ms).then_some(contact.ship_id);
        return AgentDecision {
            state: AgentState::Attack,
            target,
            strike,
            state_changed: true,
        };
    }
    AgentDecision {
        state: AgentState::Pursue,
        target,
        strike: None,
        state_changed: true,
    }
}

fn evaluate_attack(ctx: &AgentContext) -> AgentDecision {
    let (Some(target), Some(at)) = (ctx.target, ctx.target_position) else {
        return lose_target(ctx);
    };
    let target = AgentTarget {
        ship_id: target.ship_id,
        last_known: at,
    };
    if ctx.position.distance(at) < attack_range(ctx.detection_range) {
        let strike = can_strike(ctx.now_ms, ctx.last_attack_ms).then_some(target.ship_id);
        AgentDecision {
            state: AgentState::Attack,
            target: Some(target),
            strike,
            state_changed: false,
        }
    } else {
        AgentDecision {
            state: AgentState::Pursue,
            target: Some(target),
            strike: None,
            state_changed: true,
        }
    }
}

/// Pursuit with nothing in sensor range: keep closing on the last known
/// position while the target exists.
fn evaluate_pursuit(ctx: &AgentContext) -> AgentDecision {
    match (ctx.target, ctx.target_position) {
        (Some(target), Some(_)) => AgentDecision {
            state: AgentState::Pursue,
            target: Some(target),
            strike: None,
            state_changed: false,
        },
        _ => lose_target(ctx),
    }
}

fn lose_target(ctx: &AgentContext) -> AgentDecision {
    AgentDecision {
        state: lost_target_state(ctx.role),
        target: None,
        strike: None,
        state_changed: true,
    }
}

/// State after the agent has moved this step.
///
/// `home` is the orbit centre for defenders and `None` for pirates.
pub fn settle(
    role: AgentRole,
    state: AgentState,
    position: Point,
    detection_range: f64,
    target: Option<AgentTarget>,
    home: Option<Point>,
) -> AgentState {
    match state {
        AgentState::Pursue => match target {
            Some(t) if position.distance(t.last_known) < attack_range(detection_range) => {
                AgentState::Attack
            }
            _ => state,
        },
        AgentState::Return => match (role, home) {
            (AgentRole::Defender, Some(center)) if position.distance(center) < ORBIT_RADIUS_MIN => {
                AgentState::Patrol
            }
            (AgentRole::Defender, Some(_)) => AgentState::Return,
            // Nothing to return to.
            _ => AgentState::Patrol,
        },
        _ => state,
    }
}
