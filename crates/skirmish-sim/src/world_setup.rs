//! Entity spawn factories for setting up the encounter world.
//!
//! Agents are stored as `skirmish_ai::Agent` components; targets as
//! `TargetBody` components.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Summoned, TargetBody};
use skirmish_core::config::ArchetypeConfig;
use skirmish_core::constants::MINION_SPAWN_JITTER;
use skirmish_core::types::{AgentId, TargetId};

use skirmish_ai::profiles::{build_agent, get_profile, Archetype};

/// Spawn an agent built from `archetype` at `position`.
pub fn spawn_agent(
    world: &mut World,
    id: AgentId,
    archetype: &ArchetypeConfig,
    position: DVec2,
) -> hecs::Entity {
    world.spawn((build_agent(id, position, archetype),))
}

/// Spawn a target at full health.
pub fn spawn_target(world: &mut World, id: TargetId, position: DVec2, health: f64) -> hecs::Entity {
    world.spawn((TargetBody {
        id,
        position,
        health,
        max_health: health,
    },))
}

/// Spawn a grunt next to its summoner with a random horizontal offset.
pub fn spawn_minion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: AgentId,
    summoner: AgentId,
    origin: DVec2,
) -> hecs::Entity {
    let offset = rng.gen_range(-MINION_SPAWN_JITTER..=MINION_SPAWN_JITTER);
    let position = DVec2::new(origin.x + offset, origin.y);
    let agent = build_agent(id, position, &get_profile(Archetype::Grunt));
    world.spawn((agent, Summoned { by: summoner }))
}
