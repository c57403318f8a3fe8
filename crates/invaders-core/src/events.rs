//! Events emitted by the simulation for UI notification and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Gameplay events reported upward each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy was destroyed and scored.
    EnemyDestroyed {
        kind: EnemyKind,
        points: u32,
        multiplier_tenths: u32,
    },
    /// An enemy took a hit but survived.
    EnemyHit { kind: EnemyKind },
    /// A tracked shot left the playfield without hitting anything.
    ShotMissed,
    LifeLost { remaining: u32 },
    LifeGained { lives: u32 },
    LevelCompleted { level: u32, next_level: u32 },
    GameOver { score: u32, new_high_score: bool },
    Unlocked { unlock: Unlock },
    HighScore { key: String, score: u32 },
}

/// Fire-and-forget sound triggers for the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    Shoot,
    Explosion,
    Pickup,
    UnlockFanfare,
    SweepDischarge,
}
