//! Cleanup system: removes agents whose death sequence has finished.

use hecs::{Entity, World};
use tracing::debug;

use skirmish_ai::Agent;

/// Despawn expired agents.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, agent) in world.query_mut::<&Agent>() {
        if agent.is_expired() {
            debug!(agent = agent.id().0, archetype = agent.archetype(), "agent despawned");
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_err() {
            debug!(?entity, "despawn skipped, entity already gone");
        }
    }
}
