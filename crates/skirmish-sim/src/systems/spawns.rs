//! Spawn system: turns spawn requests emitted this tick into entities.
//!
//! `MinionSpawned` raises grunts next to the summoner; `ProjectileFired`
//! allocates a projectile in the pool.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use skirmish_core::constants::PROJECTILE_SPEED;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::AgentId;

use crate::pool::{Projectile, ProjectilePool};
use crate::world_setup;

/// Handle the spawn requests found in `events`.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pool: &mut ProjectilePool,
    next_agent_id: &mut u64,
    events: &[CombatEvent],
) {
    for event in events {
        match event {
            CombatEvent::MinionSpawned {
                agent,
                position,
                count,
                ..
            } => {
                for _ in 0..*count {
                    let id = AgentId(*next_agent_id);
                    *next_agent_id += 1;
                    world_setup::spawn_minion(world, rng, id, *agent, *position);
                    debug!(summoner = agent.0, minion = id.0, "minion spawned");
                }
            }
            CombatEvent::ProjectileFired {
                agent,
                attack,
                origin,
                direction,
                damage,
                range,
            } => {
                let slot = pool.spawn(Projectile {
                    owner: *agent,
                    attack: attack.clone(),
                    position: *origin,
                    direction: *direction,
                    speed: PROJECTILE_SPEED,
                    damage: *damage,
                    remaining_range: *range,
                });
                debug!(owner = agent.0, slot, "projectile spawned");
            }
            _ => {}
        }
    }
}
