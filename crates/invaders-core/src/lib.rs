//! Core types and definitions for the INVADERS simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, input frames, state snapshots, events, and constants.
//! It has no dependency on the ECS, persistence, or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
