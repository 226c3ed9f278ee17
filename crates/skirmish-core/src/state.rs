//! Read-only views of engine state for host UI and debug display.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{AgentId, Facing, SimTime, TargetId};

/// The attack an agent is currently running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAttackView {
    pub name: String,
    pub kind: AttackKind,
    pub phase: AttackPhase,
    /// Time spent in the current phase (ms).
    pub elapsed_ms: f64,
    /// Length of the current phase (ms).
    pub phase_duration_ms: f64,
    pub triggered: bool,
}

/// Boss-only overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub phase: BossPhase,
    pub invulnerable: bool,
    pub invulnerable_remaining_ms: f64,
    /// False once the death sequence has started.
    pub hud_visible: bool,
}

/// One agent as the HUD sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: AgentKind,
    pub archetype: String,
    pub position: DVec2,
    pub facing: Facing,
    pub health: f64,
    pub max_health: f64,
    pub state: BehaviorState,
    pub target: Option<TargetId>,
    pub active_attack: Option<ActiveAttackView>,
    pub available_attacks: Vec<String>,
    pub boss: Option<BossView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
}

/// Complete encounter state handed to the host after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub agents: Vec<AgentView>,
    pub targets: Vec<TargetView>,
    pub projectiles_in_flight: u32,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<CombatEvent>,
}
