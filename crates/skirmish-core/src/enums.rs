//! Enumeration types used throughout the combat engine.

use serde::{Deserialize, Serialize};

/// Per-agent behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Standing still, waiting to start a patrol.
    #[default]
    Idle,
    /// Walking back and forth, scanning for targets.
    Patrol,
    /// Closing the distance to the current target.
    Chase,
    /// Within attack range; selecting and running attacks.
    Attack,
    /// Running away from the target after heavy damage.
    Flee,
    /// Health reached zero. Terminal.
    Dead,
}

impl BehaviorState {
    pub fn is_terminal(self) -> bool {
        self == BehaviorState::Dead
    }
}

/// Attack type tag. Decides the default effect of the commit trigger
/// and feeds the selector's situational modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Melee,
    Charge,
    Projectile,
    Aoe,
    Summon,
    Teleport,
}

/// Phase of an in-flight attack instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Warning window before the attack commits.
    Telegraphing,
    /// The attack is out; its effect fires at the midpoint.
    Committing,
}

/// Boss encounter phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossPhase {
    /// Not yet engaged.
    #[default]
    Idle,
    Phase1,
    Phase2,
    Phase3,
    /// Death sequence running. Terminal.
    Dying,
}

/// Which strategy an agent was built with. Set once at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Standard,
    Boss,
}
