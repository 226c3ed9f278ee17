//! ECS components for hecs entities.
//!
//! Components are plain data structs. Agents themselves are stored as
//! `skirmish_ai::Agent` components by the simulation crate.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::{AgentId, TargetId};

/// Something agents can detect and damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBody {
    pub id: TargetId,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
}

impl TargetBody {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Marks an agent raised by another agent's summon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summoned {
    pub by: AgentId,
}
