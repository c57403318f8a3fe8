//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase exposed to the UI layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
    LevelComplete,
    LevelSelect,
    QuitConfirm,
    Help,
    Settings,
}

impl GamePhase {
    /// Overlays freeze the world and return to the phase that opened them.
    pub fn is_overlay(self) -> bool {
        matches!(
            self,
            GamePhase::LevelSelect | GamePhase::QuitConfirm | GamePhase::Help | GamePhase::Settings
        )
    }
}

/// Fixed non-level difficulty presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Easy, Tier::Medium, Tier::Hard, Tier::Impossible];

    /// Tier number, 1 through 4.
    pub fn number(self) -> u8 {
        match self {
            Tier::Easy => 1,
            Tier::Medium => 2,
            Tier::Hard => 3,
            Tier::Impossible => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Tier> {
        Tier::ALL.into_iter().find(|tier| tier.number() == n)
    }

    /// Key of this tier in the persisted high-score record.
    pub fn key(self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
            Tier::Impossible => "impossible",
        }
    }
}

/// Active progression mode. Tier mode and level mode are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value")]
pub enum GameMode {
    Tier(Tier),
    Level(u32),
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Tier(Tier::Easy)
    }
}

impl GameMode {
    /// The tier whose speed and fire tables apply. Level mode plays at Medium.
    pub fn speed_tier(self) -> Tier {
        match self {
            GameMode::Tier(tier) => tier,
            GameMode::Level(_) => Tier::Medium,
        }
    }

    /// Enemy return fire is an Impossible-tier feature.
    pub fn enemies_fire(self) -> bool {
        matches!(self, GameMode::Tier(Tier::Impossible))
    }

    pub fn level(self) -> Option<u32> {
        match self {
            GameMode::Level(level) => Some(level),
            GameMode::Tier(_) => None,
        }
    }
}

/// Enemy variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Strong,
}

/// Weapons the player can select or fire through an override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Standard,
    Spread,
    Sweep,
}

/// Something the player earns once and keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unlock {
    ImpossibleTier,
    SpreadWeapon,
    SweepWeapon,
    Level5Skin,
    /// Legacy progression: standard shots turn explosive for the rest of the run.
    ExplosiveShot,
}

/// Which of the two weapon progression models is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponProgression {
    /// Spread and sweep unlock by maximum level reached.
    #[default]
    Unlockable,
    /// Single weapon that turns explosive once a run's score crosses a threshold.
    Legacy,
}

/// How destroyed enemies are replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementPolicy {
    /// Every replacement is a basic enemy.
    #[default]
    AlwaysBasic,
    /// Replacements are sometimes strong, more often at high tiers and levels.
    Probabilistic,
}
