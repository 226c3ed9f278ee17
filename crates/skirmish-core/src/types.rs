//! Fundamental identifier, geometric and timing types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identifier of a combat agent (enemy or boss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

/// Identifier of something an agent can attack.
///
/// The core only ever looks targets up by id; it never owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// Horizontal facing of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for `Left`, 1.0 for `Right`.
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing that looks from `from` toward `to`. Keeps `self` when they share an x.
    pub fn toward(self, from: DVec2, to: DVec2) -> Self {
        if to.x > from.x {
            Facing::Right
        } else if to.x < from.x {
            Facing::Left
        } else {
            self
        }
    }
}

/// Simulation time tracking. All timing is in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `delta_ms`.
    pub fn advance(&mut self, delta_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += delta_ms;
    }
}
