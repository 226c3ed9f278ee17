//! Host commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::ArchetypeConfig;
use crate::types::{AgentId, TargetId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Spawn an agent from a full archetype recipe.
    SpawnAgent {
        archetype: ArchetypeConfig,
        position: DVec2,
    },
    /// Spawn a target (player character).
    SpawnTarget { position: DVec2, health: f64 },
    /// Teleport a target; stands in for player movement.
    MoveTarget { target: TargetId, position: DVec2 },
    /// Deal damage to an agent; stands in for player attacks.
    DamageAgent { agent: AgentId, amount: f64 },
    /// Restore agent health.
    HealAgent { agent: AgentId, amount: f64 },
    /// Cancel the agent's in-flight attack and return it to idle.
    ResetAgent { agent: AgentId },
    Pause,
    Resume,
}
