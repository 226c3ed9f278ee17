//! Snapshot system: queries the ECS world and builds a complete EncounterSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use skirmish_core::components::TargetBody;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::*;
use skirmish_core::types::SimTime;

use skirmish_ai::Agent;

use crate::pool::ProjectilePool;

/// Build a complete EncounterSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    paused: bool,
    pool: &ProjectilePool,
    events: Vec<CombatEvent>,
) -> EncounterSnapshot {
    EncounterSnapshot {
        time: *time,
        paused,
        agents: build_agents(world),
        targets: build_targets(world),
        projectiles_in_flight: pool.live_count() as u32,
        events,
    }
}

/// AgentView list ordered by agent id.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<&Agent>()
        .iter()
        .map(|(_, agent)| agent.view())
        .collect();
    agents.sort_by_key(|a| a.id);
    agents
}

fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<&TargetBody>()
        .iter()
        .map(|(_, t)| TargetView {
            id: t.id,
            position: t.position,
            health: t.health,
            max_health: t.max_health,
        })
        .collect();
    targets.sort_by_key(|t| t.id);
    targets
}
