//! Physical state of an agent shared by all controllers.

use glam::DVec2;

use skirmish_core::types::{AgentId, Facing};

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: AgentId,
    pub position: DVec2,
    pub facing: Facing,
    pub health: f64,
    pub max_health: f64,
}

impl Body {
    pub fn new(id: AgentId, position: DVec2, max_health: f64) -> Self {
        Self {
            id,
            position,
            facing: Facing::default(),
            health: max_health,
            max_health,
        }
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }

    pub fn face(&mut self, point: DVec2) {
        self.facing = self.facing.toward(self.position, point);
    }
}
