//! Autopilot: plays the game from snapshots alone.
//!
//! Pure decision function over plain data, plus a thin wrapper that only
//! reacts once per tick or phase change. Used by the headless binary to
//! exercise full runs without a human at the controls.

use invaders_campaign::unlocks::SWEEP_UNLOCK_LEVEL;
use invaders_core::commands::{FireIntent, InputFrame, PlayerCommand};
use invaders_core::enums::{GamePhase, WeaponKind};
use invaders_core::state::{EnemyView, GameStateSnapshot};

/// Horizontal offsets at or below this count as lined up.
const AIM_TOLERANCE: f32 = 4.0;

/// What to send to the game loop for one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    pub input: Option<InputFrame>,
    pub command: Option<PlayerCommand>,
}

/// Decide the input for one snapshot.
pub fn decide(snapshot: &GameStateSnapshot) -> Decision {
    match snapshot.phase {
        GamePhase::Playing => Decision {
            input: Some(steer(snapshot)),
            command: None,
        },
        GamePhase::LevelComplete => Decision {
            input: None,
            command: Some(PlayerCommand::Continue),
        },
        _ => Decision::default(),
    }
}

fn steer(snapshot: &GameStateSnapshot) -> InputFrame {
    let player = &snapshot.player;
    let profile = &snapshot.profile;
    let sweep_ready = player.charge_threshold > 0
        && player.charge >= player.charge_threshold
        && (profile.whip_unlocked || profile.max_level_reached >= SWEEP_UNLOCK_LEVEL);
    if sweep_ready {
        return InputFrame {
            select_weapon: Some(WeaponKind::Sweep),
            ..Default::default()
        };
    }

    let Some(target) = lowest_visible_enemy(&snapshot.enemies) else {
        return InputFrame::default();
    };
    let dx = target.position.x - player.position.x;
    let axis = if dx > AIM_TOLERANCE {
        1
    } else if dx < -AIM_TOLERANCE {
        -1
    } else {
        0
    };
    let frame = InputFrame::default().with_axis(axis);
    if dx.abs() < target.extent.w / 2.0 {
        InputFrame {
            fire: Some(FireIntent::default()),
            ..frame
        }
    } else {
        frame
    }
}

/// The enemy closest to the bottom edge that is already on screen.
fn lowest_visible_enemy(enemies: &[EnemyView]) -> Option<&EnemyView> {
    enemies
        .iter()
        .filter(|e| e.position.y + e.extent.h / 2.0 > 0.0)
        .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
}

/// Calls [`decide`] at most once per tick, and once per phase change while
/// the clock is stopped.
#[derive(Debug, Default)]
pub struct Autopilot {
    last_seen: Option<(GamePhase, u64)>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, snapshot: &GameStateSnapshot) -> Option<Decision> {
        let seen = (snapshot.phase, snapshot.time.tick);
        if self.last_seen == Some(seen) {
            return None;
        }
        self.last_seen = Some(seen);
        Some(decide(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::enums::EnemyKind;
    use invaders_core::state::PlayerView;
    use invaders_core::types::{Extent, Position};

    fn enemy(id: u64, x: f32, y: f32) -> EnemyView {
        EnemyView {
            id,
            kind: EnemyKind::Basic,
            position: Position::new(x, y),
            extent: Extent::square(30.0),
            rotation_deg: 0.0,
            hits_taken: 0,
            max_hits: 1,
        }
    }

    fn playing(player_x: f32, enemies: Vec<EnemyView>) -> GameStateSnapshot {
        GameStateSnapshot {
            phase: GamePhase::Playing,
            player: PlayerView {
                position: Position::new(player_x, 570.0),
                extent: Extent::new(50.0, 40.0),
                lives: 3,
                charge_threshold: 1000,
                ..Default::default()
            },
            enemies,
            ..Default::default()
        }
    }

    #[test]
    fn test_steers_toward_lowest_enemy() {
        let snapshot = playing(400.0, vec![enemy(1, 100.0, 200.0), enemy(2, 600.0, 350.0)]);
        let input = decide(&snapshot).input.unwrap();
        assert_eq!(input.axis, 1);
        assert!(input.fire.is_none());
    }

    #[test]
    fn test_fires_when_lined_up() {
        let snapshot = playing(400.0, vec![enemy(1, 410.0, 300.0)]);
        let input = decide(&snapshot).input.unwrap();
        assert_eq!(input.axis, 1);
        assert!(input.fire.is_some());

        let snapshot = playing(400.0, vec![enemy(1, 402.0, 300.0)]);
        let input = decide(&snapshot).input.unwrap();
        assert_eq!(input.axis, 0);
        assert!(input.fire.is_some());
    }

    #[test]
    fn test_ignores_enemies_above_the_playfield() {
        let snapshot = playing(400.0, vec![enemy(1, 100.0, -60.0)]);
        assert_eq!(decide(&snapshot).input, Some(InputFrame::default()));
    }

    #[test]
    fn test_discharges_sweep_when_charged_and_unlocked() {
        let mut snapshot = playing(400.0, vec![enemy(1, 100.0, 300.0)]);
        snapshot.player.charge = 1000;
        assert!(decide(&snapshot).input.unwrap().select_weapon.is_none());

        snapshot.profile.whip_unlocked = true;
        assert_eq!(
            decide(&snapshot).input.unwrap().select_weapon,
            Some(WeaponKind::Sweep)
        );
    }

    #[test]
    fn test_continues_after_level_complete() {
        let snapshot = GameStateSnapshot {
            phase: GamePhase::LevelComplete,
            ..Default::default()
        };
        assert_eq!(decide(&snapshot).command, Some(PlayerCommand::Continue));
    }

    #[test]
    fn test_observe_once_per_tick() {
        let mut pilot = Autopilot::new();
        let mut snapshot = playing(400.0, vec![]);
        assert!(pilot.observe(&snapshot).is_some());
        assert!(pilot.observe(&snapshot).is_none());
        snapshot.time.tick += 1;
        assert!(pilot.observe(&snapshot).is_some());
    }
}
