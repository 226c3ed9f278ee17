//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components, the projectile
//! pool and the engine's event buffer.

pub mod agent_ai;
pub mod cleanup;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod spawns;
