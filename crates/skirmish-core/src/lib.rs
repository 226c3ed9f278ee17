//! Core types and definitions for the SKIRMISH combat engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, enums, events, constants, configuration and state views.
//! It has no dependency on any ECS or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
