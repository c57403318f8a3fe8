//! State shared between the game loop thread and its driver.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use invaders_core::commands::{InputFrame, PlayerCommand};
use invaders_core::enums::{GameMode, GamePhase, Unlock};
use invaders_core::events::GameEvent;
use invaders_core::state::GameStateSnapshot;

/// Messages sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A phase or settings request for the engine's command queue.
    Player(PlayerCommand),
    /// Replace the held input.
    Input(InputFrame),
    /// Stop the loop and hand back the run summary.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

/// Totals gathered from every snapshot the loop produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub score: u32,
    pub best_multiplier: f32,
    pub kills: u32,
    pub misses: u32,
    pub lives_lost: u32,
    pub lives_gained: u32,
    pub levels_completed: Vec<u32>,
    pub unlocks: Vec<Unlock>,
    pub new_high_scores: Vec<(String, u32)>,
}

impl RunSummary {
    pub fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        self.mode = snapshot.mode;
        self.phase = snapshot.phase;
        self.score = snapshot.score.score;
        self.best_multiplier = self.best_multiplier.max(snapshot.score.multiplier());

        for event in &snapshot.events {
            match event {
                GameEvent::EnemyDestroyed { .. } => self.kills += 1,
                GameEvent::ShotMissed => self.misses += 1,
                GameEvent::LifeLost { .. } => self.lives_lost += 1,
                GameEvent::LifeGained { .. } => self.lives_gained += 1,
                GameEvent::LevelCompleted { level, .. } => self.levels_completed.push(*level),
                GameEvent::Unlocked { unlock } => self.unlocks.push(*unlock),
                GameEvent::HighScore { key, score } => self.new_high_scores.push((key.clone(), *score)),
                GameEvent::EnemyHit { .. } | GameEvent::GameOver { .. } => {}
            }
        }
    }
}
