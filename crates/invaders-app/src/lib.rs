//! INVADERS headless runner.
//!
//! Drives the simulation on its own thread at the fixed tick rate and
//! exposes the latest snapshot to whatever sits in front of it: a renderer,
//! or the built-in autopilot used by the command-line binary.

pub mod autopilot;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use invaders_core as core;
