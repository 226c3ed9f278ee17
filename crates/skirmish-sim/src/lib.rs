//! Simulation host for SKIRMISH.
//!
//! Owns the hecs ECS world, runs the combat AI at a fixed tick rate,
//! and produces EncounterSnapshots for the host.

pub mod engine;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skirmish_core as core;
