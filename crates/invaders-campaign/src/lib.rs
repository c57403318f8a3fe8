//! Progression tables and the persisted player profile.
//!
//! Pure lookups for level targets, tier compositions and unlock milestones,
//! plus the config and high-score records with their storage backends.

pub mod levels;
pub mod profile;
pub mod store;
pub mod unlocks;

pub use profile::{Config, HighScores, Profile};
pub use store::{load_profile, JsonProfileStore, MemoryStore, ProfileError, ProfileStore};

#[cfg(test)]
mod tests;
