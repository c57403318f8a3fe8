//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Advancing systems never look at other entities; everything that couples
//! two entities is found by `collision` and applied by `resolve`.

pub mod bonus;
pub mod cleanup;
pub mod collision;
pub mod effects;
pub mod enemies;
pub mod player;
pub mod projectiles;
pub mod resolve;
pub mod snapshot;
pub mod sweep;
