//! Game state snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::components::{EffectKind, ProjectileKind};
use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::types::{Extent, Position, SimTime};

/// Complete read-only game state after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: ScoreView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub sweeps: Vec<SweepView>,
    pub bonuses: Vec<BonusView>,
    pub effects: Vec<EffectView>,
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
    pub profile: ProfileView,
}

/// Score, multiplier and goal for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub multiplier_tenths: u32,
    pub consecutive_hits: u32,
    /// Persisted best for the active tier or level.
    pub high_score: u32,
    /// Level-mode target score.
    pub target_score: Option<u32>,
}

impl ScoreView {
    pub fn multiplier(&self) -> f32 {
        self.multiplier_tenths as f32 / 10.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub extent: Extent,
    pub lives: u32,
    pub weapon: WeaponKind,
    pub charge: u32,
    pub charge_threshold: u32,
    pub explosive: bool,
    pub appearance: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    /// Stable handle for the lifetime of the enemy.
    pub id: u64,
    pub kind: EnemyKind,
    pub position: Position,
    pub extent: Extent,
    pub rotation_deg: f32,
    pub hits_taken: u32,
    pub max_hits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub kind: ProjectileKind,
    pub position: Position,
    pub extent: Extent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepView {
    pub origin: Position,
    pub angle_deg: f32,
    pub length: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusView {
    pub position: Position,
    pub extent: Extent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub position: Position,
    pub ticks_left: u32,
}

/// Persisted settings and unlocks the menus need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileView {
    pub max_level_reached: u32,
    pub unlock_impossible: bool,
    pub shotgun_unlocked: bool,
    pub whip_unlocked: bool,
    pub active_skin: String,
    pub unlocked_skins: Vec<String>,
    pub sound_volume: f32,
    pub music_volume: f32,
    pub mouse_control: bool,
    pub fullscreen_enabled: bool,
}
