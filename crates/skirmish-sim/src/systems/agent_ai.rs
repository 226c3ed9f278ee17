//! Agent AI system: runs every agent's combat update for one tick.
//!
//! Targets are copied into a `TickHost` before the agents run and written
//! back afterwards, so agents see each other's damage within the tick
//! without holding a borrow on the world.

use hecs::{Entity, World};

use skirmish_core::components::TargetBody;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::{AgentId, TargetId};

use skirmish_ai::host::{CombatWorld, TargetInfo};
use skirmish_ai::Agent;

/// Per-tick view of the targets, handed to agents as their `CombatWorld`.
pub struct TickHost {
    targets: Vec<(Entity, TargetBody)>,
}

impl TickHost {
    /// Copy all targets out of the world, ordered by id.
    pub fn capture(world: &World) -> Self {
        let mut targets: Vec<(Entity, TargetBody)> = world
            .query::<&TargetBody>()
            .iter()
            .map(|(entity, body)| (entity, *body))
            .collect();
        targets.sort_by_key(|(_, body)| body.id);
        Self { targets }
    }

    /// Write target state back into the world.
    pub fn write_back(self, world: &mut World) {
        for (entity, body) in self.targets {
            if let Ok(mut stored) = world.get::<&mut TargetBody>(entity) {
                *stored = body;
            }
        }
    }

    fn find(&self, id: TargetId) -> Option<&TargetBody> {
        self.targets.iter().map(|(_, t)| t).find(|t| t.id == id)
    }
}

fn info(body: &TargetBody) -> TargetInfo {
    TargetInfo {
        id: body.id,
        position: body.position,
        health: body.health,
    }
}

impl CombatWorld for TickHost {
    fn candidates(&self) -> Vec<TargetInfo> {
        self.targets.iter().map(|(_, t)| info(t)).collect()
    }

    fn locate(&self, id: TargetId) -> Option<TargetInfo> {
        self.find(id).map(info)
    }

    fn apply_damage(&mut self, id: TargetId, amount: f64) -> bool {
        let Some((_, target)) = self.targets.iter_mut().find(|(_, t)| t.id == id) else {
            return false;
        };
        target.health = (target.health - amount).max(0.0);
        target.is_alive()
    }
}

/// Agent entities ordered by id.
pub fn agents_by_id(world: &World) -> Vec<(AgentId, Entity)> {
    let mut agents: Vec<(AgentId, Entity)> = world
        .query::<&Agent>()
        .iter()
        .map(|(entity, agent)| (agent.id(), entity))
        .collect();
    agents.sort_by_key(|(id, _)| *id);
    agents
}

/// Run the AI system: update every agent in id order.
pub fn run(world: &mut World, delta_ms: f64, events: &mut Vec<CombatEvent>) {
    let mut host = TickHost::capture(world);
    for (_id, entity) in agents_by_id(world) {
        if let Ok(mut agent) = world.get::<&mut Agent>(entity) {
            agent.update(delta_ms, &mut host, events);
        }
    }
    host.write_back(world);
}
