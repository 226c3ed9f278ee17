//! Seams to the host: target queries, the damage sink and the event sink.
//!
//! The engine never touches rendering, physics or spawning directly. It reads
//! targets and applies damage through `CombatWorld`, and reports everything
//! else as `CombatEvent`s through `EventSink`.

use glam::DVec2;

use skirmish_core::events::CombatEvent;
use skirmish_core::types::TargetId;

/// Read-only snapshot of one candidate target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: TargetId,
    pub position: DVec2,
    pub health: f64,
}

impl TargetInfo {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Target provider and damage sink supplied by the host.
pub trait CombatWorld {
    /// Current candidate targets. Scan order is the returned order.
    fn candidates(&self) -> Vec<TargetInfo>;

    /// Look a target up by id. `None` once it has been removed.
    fn locate(&self, id: TargetId) -> Option<TargetInfo>;

    /// Apply damage to a target. Returns whether it is still alive.
    fn apply_damage(&mut self, id: TargetId, amount: f64) -> bool;
}

/// Fire-and-forget event emission.
pub trait EventSink {
    fn emit(&mut self, event: CombatEvent);
}

impl EventSink for Vec<CombatEvent> {
    fn emit(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

/// Where the controller wants the body to move this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// -1.0, 0.0 or 1.0 along x.
    pub direction: f64,
    /// Units per second.
    pub speed: f64,
}

impl MovementIntent {
    pub fn stop() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> f64 {
        self.direction * self.speed
    }
}
