//! ECS components for hecs entities.
//!
//! Components are plain data. The few methods here only read or update the
//! component's own fields; anything touching other entities lives in systems.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::Position;

/// The single player ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lives: u32,
    pub speed: f32,
    /// Tick time of the last accepted shot. `None` until the first shot of a run.
    pub last_fire_ms: Option<u64>,
    /// Persistently selected weapon.
    pub weapon: WeaponKind,
    /// Sweep charge, `0..=SWEEP_CHARGE_THRESHOLD`.
    pub charge: u32,
    /// Legacy progression upgrade, reset every run.
    pub explosive: bool,
    /// Appearance tier (0..=3) derived from the current score.
    pub appearance: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lives: PLAYER_START_LIVES,
            speed: PLAYER_SPEED,
            last_fire_ms: None,
            weapon: WeaponKind::Standard,
            charge: 0,
            explosive: false,
            appearance: 0,
        }
    }
}

impl Player {
    pub fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            Some(last) => now_ms.saturating_sub(last) > FIRE_COOLDOWN_MS,
            None => true,
        }
    }

    /// Add earned points to the sweep charge, capped at the threshold.
    pub fn add_charge(&mut self, points: u32) {
        self.charge = self.charge.saturating_add(points).min(SWEEP_CHARGE_THRESHOLD);
    }
}

/// A descending enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hits_taken: u32,
    pub max_hits: u32,
    pub points: u32,
    /// Visual rotation in degrees. Strong enemies never rotate.
    pub rotation_deg: f32,
    pub spin_deg: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, spin_deg: f32) -> Self {
        match kind {
            EnemyKind::Basic => Self {
                kind,
                hits_taken: 0,
                max_hits: BASIC_ENEMY_MAX_HITS,
                points: BASIC_ENEMY_POINTS,
                rotation_deg: 0.0,
                spin_deg,
            },
            EnemyKind::Strong => Self {
                kind,
                hits_taken: 0,
                max_hits: STRONG_ENEMY_MAX_HITS,
                points: STRONG_ENEMY_POINTS,
                rotation_deg: 0.0,
                spin_deg: 0.0,
            },
        }
    }

    /// Count one hit. Returns `true` when this hit destroys the enemy.
    /// Hits past the threshold are not counted.
    pub fn register_hit(&mut self) -> bool {
        if self.hits_taken < self.max_hits {
            self.hits_taken += 1;
        }
        self.hits_taken >= self.max_hits
    }
}

/// Return-fire timer, attached only to enemies of the Impossible tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shooter {
    pub last_shot_ms: u64,
    pub delay_ms: u64,
    /// Per-tick probability of firing once the delay has elapsed.
    pub chance: f64,
}

/// Projectile variants, each carrying only its own extra state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProjectileKind {
    Standard,
    Explosive {
        radius: f32,
    },
    Spread {
        angle_deg: f32,
        travelled: f32,
        range: f32,
    },
    EnemyBolt,
}

impl ProjectileKind {
    pub fn is_hostile(&self) -> bool {
        matches!(self, ProjectileKind::EnemyBolt)
    }

    /// Whether leaving the playfield without a hit counts as a miss.
    /// Only the centre pellet of a spread volley is tracked.
    pub fn tracks_misses(&self) -> bool {
        match self {
            ProjectileKind::Standard => true,
            ProjectileKind::Spread { angle_deg, .. } => *angle_deg == 0.0,
            ProjectileKind::Explosive { .. } | ProjectileKind::EnemyBolt => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Once set, removal of this projectile never counts as a miss.
    pub has_hit: bool,
}

/// The rotating arc of a sweep discharge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SweepArc {
    pub origin: Position,
    pub angle_deg: f32,
    pub angular_speed_deg: f32,
    pub length: f32,
}

impl SweepArc {
    pub fn new(origin: Position) -> Self {
        Self {
            origin,
            angle_deg: 0.0,
            angular_speed_deg: SWEEP_ANGULAR_SPEED_DEG,
            length: SWEEP_LENGTH,
        }
    }

    /// Whether a target at `at` lies on the arm at its current angle.
    pub fn covers(&self, at: &Position) -> bool {
        if self.origin.distance_to(at) > self.length {
            return false;
        }
        let mut diff = (self.angle_deg - self.origin.screen_angle_to(at)).rem_euclid(360.0);
        if diff > 180.0 {
            diff = 360.0 - diff;
        }
        diff < SWEEP_TOLERANCE_DEG
    }
}

/// Extra-life pickup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bonus;

/// Visual-only effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EffectKind {
    Explosion,
    Detonation { radius: f32 },
    Particle,
    Spark,
    HitFlash,
    Banner { unlock: Unlock },
}

impl EffectKind {
    pub fn lifetime_ticks(&self) -> u32 {
        match self {
            EffectKind::Explosion => EXPLOSION_TICKS,
            EffectKind::Detonation { .. } => DETONATION_TICKS,
            EffectKind::Particle => PARTICLE_TICKS,
            EffectKind::Spark => SPARK_TICKS,
            EffectKind::HitFlash => HIT_FLASH_TICKS,
            EffectKind::Banner { .. } => BANNER_TICKS,
        }
    }
}

/// Timed visual effect. Never takes part in collision resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransientEffect {
    pub kind: EffectKind,
    pub ticks_left: u32,
}

impl TransientEffect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            ticks_left: kind.lifetime_ticks(),
        }
    }
}

/// Marks an entity for removal at the end of the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expired;
