//! Events emitted by the combat engine for rendering, audio, particles and spawning.
//!
//! Emission is fire-and-forget: the engine never reads anything back.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, TargetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Warning cue for an attack about to commit.
    TelegraphStarted {
        agent: AgentId,
        attack: String,
        kind: AttackKind,
        duration_ms: f64,
    },
    /// Telegraph finished, the attack is out.
    AttackStarted {
        agent: AgentId,
        attack: String,
        kind: AttackKind,
    },
    /// Damage landed on a target.
    AttackHit {
        agent: AgentId,
        attack: String,
        target: TargetId,
        damage: f64,
        target_alive: bool,
    },
    /// Projectile creation request for the external spawner.
    ProjectileFired {
        agent: AgentId,
        attack: String,
        origin: DVec2,
        direction: f64,
        damage: f64,
        range: f64,
    },
    /// Minion creation request for the external spawner.
    MinionSpawned {
        agent: AgentId,
        attack: String,
        position: DVec2,
        count: u32,
    },
    /// Shrink at `from`, reappear at `to`.
    Teleported {
        agent: AgentId,
        from: DVec2,
        to: DVec2,
    },
    /// Behavior state transition.
    StateChanged {
        agent: AgentId,
        from: BehaviorState,
        to: BehaviorState,
    },
    /// Boss phase transition; drives the external phase indicator.
    PhaseChanged {
        agent: AgentId,
        from: BossPhase,
        to: BossPhase,
        invulnerable_ms: f64,
    },
    /// Boss health reached zero.
    Defeated { agent: AgentId },
    /// Non-boss agent health reached zero.
    Died { agent: AgentId },
    /// Loot should drop at `position`.
    DroppedLoot { agent: AgentId, position: DVec2 },
}

impl CombatEvent {
    /// Agent that emitted the event.
    pub fn agent(&self) -> AgentId {
        match self {
            CombatEvent::TelegraphStarted { agent, .. }
            | CombatEvent::AttackStarted { agent, .. }
            | CombatEvent::AttackHit { agent, .. }
            | CombatEvent::ProjectileFired { agent, .. }
            | CombatEvent::MinionSpawned { agent, .. }
            | CombatEvent::Teleported { agent, .. }
            | CombatEvent::StateChanged { agent, .. }
            | CombatEvent::PhaseChanged { agent, .. }
            | CombatEvent::Defeated { agent }
            | CombatEvent::Died { agent }
            | CombatEvent::DroppedLoot { agent, .. } => *agent,
        }
    }
}
