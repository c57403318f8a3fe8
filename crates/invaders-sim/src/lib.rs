//! Simulation engine for INVADERS.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod progression;
pub mod scoring;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use invaders_core as core;
