//! Profile-backed progression: high scores, level advancement and unlocks.
//!
//! The in-memory [`Profile`] is authoritative. Every mutation is written
//! through to the store as a whole record; a failed write is logged and
//! play continues on the in-memory copy.

use log::{info, warn};

use invaders_campaign::unlocks::{level_milestones, unlocks_impossible, weapon_available};
use invaders_campaign::{load_profile, Config, HighScores, Profile, ProfileStore};
use invaders_core::enums::{GameMode, Unlock, WeaponKind, WeaponProgression};

/// Result of a game-over or quit high-score check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreOutcome {
    pub new_high_score: bool,
    pub unlocks: Vec<Unlock>,
}

/// Result of clearing a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOutcome {
    pub level: u32,
    pub next_level: u32,
    pub new_high_score: bool,
    pub new_max_level: bool,
    pub unlocks: Vec<Unlock>,
}

pub struct Progression {
    profile: Profile,
    store: Box<dyn ProfileStore + Send>,
}

impl Progression {
    /// Load the profile from `store`, falling back to defaults on any fault.
    pub fn load(mut store: Box<dyn ProfileStore + Send>) -> Self {
        let profile = load_profile(store.as_mut());
        Self { profile, store }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn config(&self) -> &Config {
        &self.profile.config
    }

    pub fn high_score(&self, mode: GameMode) -> u32 {
        self.profile.high_scores.get(mode)
    }

    pub fn weapon_available(&self, weapon: WeaponKind, model: WeaponProgression) -> bool {
        weapon_available(weapon, &self.profile.config, model)
    }

    /// Compare a finished run's score against the stored best for `mode`.
    ///
    /// A new Hard-tier best of at least 1000 also unlocks the Impossible tier.
    pub fn record_high_score(&mut self, mode: GameMode, score: u32) -> HighScoreOutcome {
        let mut outcome = HighScoreOutcome::default();
        if !self.profile.high_scores.record(mode, score) {
            return outcome;
        }
        info!("new high score {score} for {}", HighScores::key_for(mode));
        outcome.new_high_score = true;
        self.save_high_scores();

        if let GameMode::Tier(tier) = mode {
            if unlocks_impossible(tier, score) && self.profile.config.grant(Unlock::ImpossibleTier) {
                info!("impossible tier unlocked");
                outcome.unlocks.push(Unlock::ImpossibleTier);
                self.save_config();
            }
        }
        outcome
    }

    /// Record a cleared level and advance the maximum level reached.
    pub fn complete_level(&mut self, level: u32, score: u32) -> LevelOutcome {
        let new_high_score = self.profile.high_scores.record(GameMode::Level(level), score);
        if new_high_score {
            self.save_high_scores();
        }

        let next_level = level.saturating_add(1);
        let mut unlocks = Vec::new();
        let new_max_level = next_level > self.profile.config.max_level_reached;
        if new_max_level {
            self.profile.config.max_level_reached = next_level;
            for unlock in level_milestones(next_level) {
                if self.profile.config.grant(unlock) {
                    info!("unlocked {unlock:?} at level {next_level}");
                    unlocks.push(unlock);
                }
            }
            self.save_config();
        }

        info!("level {level} complete with {score} points");
        LevelOutcome {
            level,
            next_level,
            new_high_score,
            new_max_level,
            unlocks,
        }
    }

    /// Apply a settings change and persist the config if `change` reports one.
    pub fn update_config(&mut self, change: impl FnOnce(&mut Config) -> bool) -> bool {
        let changed = change(&mut self.profile.config);
        if changed {
            self.save_config();
        }
        changed
    }

    fn save_config(&mut self) {
        if let Err(e) = self.store.save_config(&self.profile.config) {
            warn!("config not saved: {e}");
        }
    }

    fn save_high_scores(&mut self) {
        if let Err(e) = self.store.save_high_scores(&self.profile.high_scores) {
            warn!("high scores not saved: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_campaign::MemoryStore;
    use invaders_core::enums::Tier;

    fn fresh() -> Progression {
        Progression::load(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_hard_tier_unlocks_impossible() {
        let mut progression = fresh();
        let outcome = progression.record_high_score(GameMode::Tier(Tier::Hard), 999);
        assert!(outcome.new_high_score);
        assert!(outcome.unlocks.is_empty());

        let outcome = progression.record_high_score(GameMode::Tier(Tier::Hard), 1000);
        assert_eq!(outcome.unlocks, vec![Unlock::ImpossibleTier]);
        assert!(progression.config().unlock_impossible);

        // Not beaten: no check, no unlock.
        let outcome = progression.record_high_score(GameMode::Tier(Tier::Hard), 1000);
        assert_eq!(outcome, HighScoreOutcome::default());
    }

    #[test]
    fn test_medium_tier_never_unlocks_impossible() {
        let mut progression = fresh();
        let outcome = progression.record_high_score(GameMode::Tier(Tier::Medium), 5000);
        assert!(outcome.new_high_score);
        assert!(!progression.config().unlock_impossible);
    }

    #[test]
    fn test_complete_level_advances_max_and_unlocks() {
        let mut progression = fresh();
        progression.update_config(|c| {
            c.max_level_reached = 5;
            true
        });

        let outcome = progression.complete_level(5, 300);
        assert_eq!(outcome.next_level, 6);
        assert!(outcome.new_max_level);
        assert_eq!(outcome.unlocks, vec![Unlock::SpreadWeapon]);
        assert!(progression.config().shotgun_unlocked);
        assert_eq!(progression.config().max_level_reached, 6);
        assert_eq!(progression.high_score(GameMode::Level(5)), 300);

        // Replaying an earlier level changes nothing but the score record.
        let outcome = progression.complete_level(2, 160);
        assert!(!outcome.new_max_level);
        assert!(outcome.unlocks.is_empty());
        assert_eq!(progression.config().max_level_reached, 6);
    }

    #[test]
    fn test_reaching_level_five_grants_skin() {
        let mut progression = fresh();
        progression.update_config(|c| {
            c.max_level_reached = 4;
            true
        });
        let outcome = progression.complete_level(4, 250);
        assert_eq!(outcome.unlocks, vec![Unlock::Level5Skin]);
        assert!(progression.config().unlocked_skins.iter().any(|s| s == "level5_skin"));
    }
}
