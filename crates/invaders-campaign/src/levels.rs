//! Level targets and enemy compositions.

use serde::{Deserialize, Serialize};

use invaders_core::enums::{GameMode, Tier};

/// Enemy head-count for a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    /// Basic enemies.
    pub enemies: u32,
    /// Strong enemies, in addition to the basic ones.
    pub strong: u32,
}

/// Goal and composition of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequirements {
    pub target_score: u32,
    pub composition: Composition,
}

/// Hand-tuned opening levels: (target, enemies, strong).
const OPENING_LEVELS: [(u32, u32, u32); 5] = [
    (100, 3, 0),
    (150, 4, 0),
    (200, 4, 1),
    (250, 5, 1),
    (300, 5, 1),
];

/// Target growth per level past the opening table.
pub const TARGET_INCREMENT: u32 = 30;

const MID_BASE: u32 = 300;
const LATE_BASE: u32 = 450;
const ENDLESS_BASE: u32 = 750;
const ENDLESS_MAX_ENEMIES: u32 = 8;

/// Requirements for level `level`. Level 0 is treated as level 1.
pub fn level_requirements(level: u32) -> LevelRequirements {
    let level = level.max(1);
    let (target_score, enemies, strong) = match level {
        1..=5 => OPENING_LEVELS[(level - 1) as usize],
        6..=10 => (MID_BASE + (level - 5) * TARGET_INCREMENT, 5 + (level - 5) / 2, 1),
        11..=20 => (LATE_BASE + (level - 10) * TARGET_INCREMENT, 6, 1),
        _ => (
            ENDLESS_BASE.saturating_add((level - 20).saturating_mul(TARGET_INCREMENT)),
            ENDLESS_MAX_ENEMIES.min(6 + (level - 20) / 10),
            1,
        ),
    };
    LevelRequirements {
        target_score,
        composition: Composition { enemies, strong },
    }
}

/// Fixed composition of a tier-mode wave.
pub fn tier_composition(tier: Tier) -> Composition {
    let (enemies, strong) = match tier {
        Tier::Easy => (3, 0),
        Tier::Medium => (4, 1),
        Tier::Hard => (4, 3),
        Tier::Impossible => (5, 5),
    };
    Composition { enemies, strong }
}

/// Opening wave for a run in `mode`.
pub fn composition_for(mode: GameMode) -> Composition {
    match mode {
        GameMode::Tier(tier) => tier_composition(tier),
        GameMode::Level(level) => level_requirements(level).composition,
    }
}

/// Level-mode target score, `None` in tier mode.
pub fn target_score(mode: GameMode) -> Option<u32> {
    mode.level().map(|level| level_requirements(level).target_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_table_exact() {
        let expected = [(100, 3, 0), (150, 4, 0), (200, 4, 1), (250, 5, 1), (300, 5, 1)];
        for (i, (target, enemies, strong)) in expected.into_iter().enumerate() {
            let req = level_requirements(i as u32 + 1);
            assert_eq!(req.target_score, target);
            assert_eq!(req.composition, Composition { enemies, strong });
        }
    }

    #[test]
    fn test_level_seven_formula() {
        assert_eq!(
            level_requirements(7).target_score,
            level_requirements(5).target_score + 2 * TARGET_INCREMENT
        );
        assert_eq!(level_requirements(7).composition.enemies, 6);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(level_requirements(10).target_score, 450);
        assert_eq!(level_requirements(11).target_score, 480);
        assert_eq!(level_requirements(20).target_score, 750);
        assert_eq!(level_requirements(21).target_score, 780);
        assert_eq!(level_requirements(21).composition.enemies, 6);
        assert_eq!(level_requirements(30).composition.enemies, 7);
        assert_eq!(level_requirements(500).composition.enemies, 8);
        assert_eq!(level_requirements(500).composition.strong, 1);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        assert_eq!(level_requirements(0), level_requirements(1));
    }

    #[test]
    fn test_tier_compositions() {
        assert_eq!(tier_composition(Tier::Easy), Composition { enemies: 3, strong: 0 });
        assert_eq!(tier_composition(Tier::Impossible), Composition { enemies: 5, strong: 5 });
        assert_eq!(target_score(GameMode::Tier(Tier::Hard)), None);
        assert_eq!(target_score(GameMode::Level(5)), Some(300));
    }
}
