//! Simulation engine: a headless host for the combat AI.
//!
//! `SimulationEngine` owns the hecs ECS world, processes host commands,
//! runs all systems, and produces `EncounterSnapshot`s. Same seed and same
//! command sequence give identical snapshots.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use skirmish_core::commands::HostCommand;
use skirmish_core::components::TargetBody;
use skirmish_core::config::ArchetypeConfig;
use skirmish_core::constants::{DEFAULT_TICK_MS, PROJECTILE_POOL_CAPACITY};
use skirmish_core::error::ConfigError;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::EncounterSnapshot;
use skirmish_core::types::{AgentId, SimTime, TargetId};

use skirmish_ai::Agent;

use crate::pool::ProjectilePool;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Fixed tick length (ms).
    pub tick_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    paused: bool,
    tick_ms: f64,
    rng: ChaCha8Rng,
    next_agent_id: u64,
    next_target_id: u64,
    command_queue: VecDeque<HostCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
    projectiles: ProjectilePool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            paused: false,
            tick_ms: config.tick_ms,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_agent_id: 1,
            next_target_id: 1,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            projectiles: ProjectilePool::with_capacity(PROJECTILE_POOL_CAPACITY),
        }
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EncounterSnapshot {
        self.process_commands();

        if !self.paused {
            self.run_systems();
            self.time.advance(self.tick_ms);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.paused, &self.projectiles, events)
    }

    /// Spawn an agent immediately. The archetype is validated first.
    pub fn spawn_agent(
        &mut self,
        archetype: &ArchetypeConfig,
        position: DVec2,
    ) -> Result<AgentId, ConfigError> {
        archetype.validate()?;
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        world_setup::spawn_agent(&mut self.world, id, archetype, position);
        info!(agent = id.0, archetype = %archetype.name, x = position.x, "agent spawned");
        Ok(id)
    }

    /// Spawn a target immediately.
    pub fn spawn_target(&mut self, position: DVec2, health: f64) -> TargetId {
        let id = TargetId(self.next_target_id);
        self.next_target_id += 1;
        world_setup::spawn_target(&mut self.world, id, position, health);
        info!(target = id.0, x = position.x, health, "target spawned");
        id
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tick_ms(&self) -> f64 {
        self.tick_ms
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    /// Entity holding the agent with `id`, if it is still in the world.
    pub fn agent_entity(&self, id: AgentId) -> Option<Entity> {
        self.world
            .query::<&Agent>()
            .iter()
            .find(|(_, agent)| agent.id() == id)
            .map(|(entity, _)| entity)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::SpawnAgent { archetype, position } => {
                if let Err(err) = self.spawn_agent(&archetype, position) {
                    warn!(archetype = %archetype.name, %err, "spawn rejected");
                }
            }
            HostCommand::SpawnTarget { position, health } => {
                self.spawn_target(position, health);
            }
            HostCommand::MoveTarget { target, position } => {
                for (_entity, body) in self.world.query_mut::<&mut TargetBody>() {
                    if body.id == target {
                        body.position = position;
                    }
                }
            }
            HostCommand::DamageAgent { agent, amount } => {
                if let Some(entity) = self.agent_entity(agent) {
                    if let Ok(mut agent) = self.world.get::<&mut Agent>(entity) {
                        agent.take_damage(amount, &mut self.events);
                    }
                }
            }
            HostCommand::HealAgent { agent, amount } => {
                if let Some(entity) = self.agent_entity(agent) {
                    if let Ok(mut agent) = self.world.get::<&mut Agent>(entity) {
                        agent.heal(amount);
                    }
                }
            }
            HostCommand::ResetAgent { agent } => {
                if let Some(entity) = self.agent_entity(agent) {
                    if let Ok(mut agent) = self.world.get::<&mut Agent>(entity) {
                        agent.reset(&mut self.events);
                    }
                }
            }
            HostCommand::Pause => {
                if !self.paused {
                    info!(tick = self.time.tick, "paused");
                    self.paused = true;
                }
            }
            HostCommand::Resume => {
                if self.paused {
                    info!(tick = self.time.tick, "resumed");
                    self.paused = false;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Agent AI
        systems::agent_ai::run(&mut self.world, self.tick_ms, &mut self.events);
        // 2. Movement integration
        systems::movement::run(&mut self.world, self.tick_ms);
        // 3. Minion and projectile spawn requests
        systems::spawns::run(
            &mut self.world,
            &mut self.rng,
            &mut self.projectiles,
            &mut self.next_agent_id,
            &self.events,
        );
        // 4. Projectile flight and hits
        systems::projectiles::run(&mut self.world, &mut self.projectiles, self.tick_ms, &mut self.events);
        // 5. Cleanup (expired agents)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
