//! Persisted player configuration and high scores.
//!
//! Both records deserialize with container-level defaults, so a document with
//! missing keys loads with those keys filled in and every present key kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use invaders_core::enums::{GameMode, Tier, Unlock};
use invaders_core::state::ProfileView;

pub const DEFAULT_SKIN: &str = "default";
pub const LEVEL5_SKIN: &str = "level5_skin";

pub const SOUND_VOLUME_MAX: f32 = 1.0;
pub const SOUND_VOLUME_STEP: f32 = 0.1;
pub const MUSIC_VOLUME_MAX: f32 = 0.2;
pub const MUSIC_VOLUME_STEP: f32 = 0.01;

/// Unlocks, settings and level progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unlock_impossible: bool,
    pub unlocked_skins: Vec<String>,
    pub active_skin: String,
    pub max_level_reached: u32,
    pub shotgun_unlocked: bool,
    pub whip_unlocked: bool,
    pub sound_volume: f32,
    pub music_volume: f32,
    pub fullscreen_enabled: bool,
    pub mouse_control: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unlock_impossible: false,
            unlocked_skins: vec![DEFAULT_SKIN.to_string()],
            active_skin: DEFAULT_SKIN.to_string(),
            max_level_reached: 1,
            shotgun_unlocked: false,
            whip_unlocked: false,
            sound_volume: 0.5,
            music_volume: 0.07,
            fullscreen_enabled: false,
            mouse_control: false,
        }
    }
}

impl Config {
    /// Record an unlock. Returns `false` if it was already held.
    pub fn grant(&mut self, unlock: Unlock) -> bool {
        match unlock {
            Unlock::ImpossibleTier => !std::mem::replace(&mut self.unlock_impossible, true),
            Unlock::SpreadWeapon => !std::mem::replace(&mut self.shotgun_unlocked, true),
            Unlock::SweepWeapon => !std::mem::replace(&mut self.whip_unlocked, true),
            Unlock::Level5Skin => {
                if self.unlocked_skins.iter().any(|s| s == LEVEL5_SKIN) {
                    false
                } else {
                    self.unlocked_skins.push(LEVEL5_SKIN.to_string());
                    true
                }
            }
            // Run-scoped, never persisted.
            Unlock::ExplosiveShot => false,
        }
    }

    pub fn adjust_sound_volume(&mut self, up: bool) {
        self.sound_volume = step_volume(self.sound_volume, SOUND_VOLUME_STEP, SOUND_VOLUME_MAX, up);
    }

    pub fn adjust_music_volume(&mut self, up: bool) {
        self.music_volume = step_volume(self.music_volume, MUSIC_VOLUME_STEP, MUSIC_VOLUME_MAX, up);
    }

    /// Switch to an unlocked skin. Returns `false` for unknown or locked skins.
    pub fn select_skin(&mut self, skin: &str) -> bool {
        if self.unlocked_skins.iter().any(|s| s == skin) {
            self.active_skin = skin.to_string();
            true
        } else {
            false
        }
    }
}

fn step_volume(value: f32, step: f32, max: f32, up: bool) -> f32 {
    let next = if up { value + step } else { value - step };
    // Snap to the step grid so repeated presses do not drift.
    let snapped = (next / step).round() * step;
    snapped.clamp(0.0, max)
}

/// Best scores per tier and per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub impossible: u32,
    /// Keyed `"level_{n}"`.
    pub level_mode: BTreeMap<String, u32>,
}

impl HighScores {
    pub fn level_key(level: u32) -> String {
        format!("level_{level}")
    }

    /// Key under which `mode` records its high score.
    pub fn key_for(mode: GameMode) -> String {
        match mode {
            GameMode::Tier(tier) => tier.key().to_string(),
            GameMode::Level(level) => Self::level_key(level),
        }
    }

    pub fn get(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Tier(tier) => *self.tier_slot(tier),
            GameMode::Level(level) => self
                .level_mode
                .get(&Self::level_key(level))
                .copied()
                .unwrap_or(0),
        }
    }

    /// Record `score` for `mode` if it beats the stored one. A level with no
    /// entry yet always records. Returns whether anything changed.
    pub fn record(&mut self, mode: GameMode, score: u32) -> bool {
        match mode {
            GameMode::Tier(tier) => {
                let slot = self.tier_slot_mut(tier);
                if score > *slot {
                    *slot = score;
                    true
                } else {
                    false
                }
            }
            GameMode::Level(level) => {
                let key = Self::level_key(level);
                match self.level_mode.get(&key) {
                    Some(best) if *best >= score => false,
                    _ => {
                        self.level_mode.insert(key, score);
                        true
                    }
                }
            }
        }
    }

    fn tier_slot(&self, tier: Tier) -> &u32 {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
            Tier::Impossible => &self.impossible,
        }
    }

    fn tier_slot_mut(&mut self, tier: Tier) -> &mut u32 {
        match tier {
            Tier::Easy => &mut self.easy,
            Tier::Medium => &mut self.medium,
            Tier::Hard => &mut self.hard,
            Tier::Impossible => &mut self.impossible,
        }
    }
}

/// Everything persisted about the player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub config: Config,
    pub high_scores: HighScores,
}

impl Profile {
    pub fn view(&self) -> ProfileView {
        let c = &self.config;
        ProfileView {
            max_level_reached: c.max_level_reached,
            unlock_impossible: c.unlock_impossible,
            shotgun_unlocked: c.shotgun_unlocked,
            whip_unlocked: c.whip_unlocked,
            active_skin: c.active_skin.clone(),
            unlocked_skins: c.unlocked_skins.clone(),
            sound_volume: c.sound_volume,
            music_volume: c.music_volume,
            mouse_control: c.mouse_control,
            fullscreen_enabled: c.fullscreen_enabled,
        }
    }
}
