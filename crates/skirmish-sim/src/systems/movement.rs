//! Kinematic integration system.
//!
//! Moves each agent along x by its movement intent: x += velocity * dt.

use hecs::World;

use skirmish_ai::Agent;

/// Run kinematic integration for all agents.
pub fn run(world: &mut World, delta_ms: f64) {
    let dt = delta_ms / 1000.0;
    for (_entity, agent) in world.query_mut::<&mut Agent>() {
        let velocity = agent.intent().velocity();
        if velocity != 0.0 {
            agent.body_mut().position.x += velocity * dt;
        }
    }
}
