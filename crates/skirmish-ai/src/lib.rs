//! Combat AI for SKIRMISH.
//!
//! Implements target acquisition, the per-agent behavior state machine,
//! attack selection and execution, boss phase control, and the built-in
//! archetype profiles. Nothing here owns a world; hosts plug in through
//! the `host` traits.

pub mod agent;
pub mod attacks;
pub mod behavior;
pub mod body;
pub mod cooldown;
pub mod host;
pub mod locator;
pub mod phase;
pub mod pipeline;
pub mod profiles;
pub mod selector;

pub use agent::{Agent, Strategy};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
