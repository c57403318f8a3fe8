//! Unlock milestones and score-derived player appearance.

use invaders_core::constants::{APPEARANCE_THRESHOLDS, LEGACY_EXPLOSIVE_SCORE};
use invaders_core::enums::{Tier, Unlock, WeaponKind, WeaponProgression};

use crate::profile::Config;

/// Max level past which the spread weapon is available.
pub const SPREAD_UNLOCK_LEVEL: u32 = 5;
/// Max level from which the sweep weapon is available.
pub const SWEEP_UNLOCK_LEVEL: u32 = 10;
/// Reaching exactly this level grants the cosmetic skin.
pub const SKIN_UNLOCK_LEVEL: u32 = 5;
/// Hard-tier score that unlocks the Impossible tier.
pub const IMPOSSIBLE_UNLOCK_SCORE: u32 = 1000;

/// Appearance tier (0..=3) for a score.
pub fn appearance_tier(score: u32) -> u8 {
    APPEARANCE_THRESHOLDS
        .iter()
        .rposition(|threshold| score >= *threshold)
        .unwrap_or(0) as u8
}

/// Unlocks earned by raising the max level to `new_max`, in grant order.
/// Includes unlocks already held; [`Config::grant`] filters those.
pub fn level_milestones(new_max: u32) -> Vec<Unlock> {
    let mut unlocks = Vec::new();
    if new_max == SKIN_UNLOCK_LEVEL {
        unlocks.push(Unlock::Level5Skin);
    }
    if new_max > SPREAD_UNLOCK_LEVEL {
        unlocks.push(Unlock::SpreadWeapon);
    }
    if new_max >= SWEEP_UNLOCK_LEVEL {
        unlocks.push(Unlock::SweepWeapon);
    }
    unlocks
}

/// Whether a new tier high score unlocks the Impossible tier.
pub fn unlocks_impossible(tier: Tier, score: u32) -> bool {
    tier == Tier::Hard && score >= IMPOSSIBLE_UNLOCK_SCORE
}

/// Whether the legacy explosive upgrade triggers at `score`.
pub fn legacy_explosive_reached(score: u32) -> bool {
    score >= LEGACY_EXPLOSIVE_SCORE
}

/// Whether the player may use `weapon` under the given progression model.
pub fn weapon_available(weapon: WeaponKind, config: &Config, progression: WeaponProgression) -> bool {
    match (weapon, progression) {
        (WeaponKind::Standard, _) => true,
        (_, WeaponProgression::Legacy) => false,
        (WeaponKind::Spread, WeaponProgression::Unlockable) => {
            config.shotgun_unlocked || config.max_level_reached > SPREAD_UNLOCK_LEVEL
        }
        (WeaponKind::Sweep, WeaponProgression::Unlockable) => {
            config.whip_unlocked || config.max_level_reached >= SWEEP_UNLOCK_LEVEL
        }
    }
}
