//! Projectile arena.
//!
//! Slots are referenced by index and reused through a free list, so a long
//! fight does not grow the arena past its peak number of live projectiles.

use glam::DVec2;

use skirmish_core::types::AgentId;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub owner: AgentId,
    pub attack: String,
    pub position: DVec2,
    /// -1.0 or 1.0 along x.
    pub direction: f64,
    /// Units per second.
    pub speed: f64,
    pub damage: f64,
    /// Distance left before the projectile fizzles.
    pub remaining_range: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    slots: Vec<Option<Projectile>>,
    free: Vec<usize>,
}

impl ProjectilePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Store a projectile, reusing a released slot when one exists.
    pub fn spawn(&mut self, projectile: Projectile) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(projectile);
                index
            }
            None => {
                self.slots.push(Some(projectile));
                self.slots.len() - 1
            }
        }
    }

    /// Free a slot. Releasing an empty slot is a no-op.
    pub fn release(&mut self, index: usize) -> Option<Projectile> {
        let projectile = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        Some(projectile)
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Projectile> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Indices of live projectiles in slot order.
    pub fn live_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slots allocated so far, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
