//! Simulation constants and tuning parameters.
//!
//! Distances are playfield units, speeds are units per tick, and timers are
//! either ticks or milliseconds of tick time as their suffix says.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Playfield ---

/// Playfield width. x grows to the right.
pub const PLAYFIELD_WIDTH: f32 = 800.0;

/// Playfield height. y grows downward.
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

// --- Player ---

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 40.0;

/// Gap between the player's bottom edge and the playfield bottom.
pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

/// Horizontal keyboard speed.
pub const PLAYER_SPEED: f32 = 8.0;

/// Lives at the start of every run.
pub const PLAYER_START_LIVES: u32 = 3;

/// Fraction of the pointer offset covered per tick in pointer-control mode.
pub const POINTER_SPEED_FACTOR: f32 = 0.5;

/// Pointer offsets at or below this distance do not move the player.
pub const POINTER_DEADZONE: f32 = 2.0;

/// Minimum time between two shots, regardless of weapon.
pub const FIRE_COOLDOWN_MS: u64 = 150;

/// Score thresholds for the four player appearance tiers.
pub const APPEARANCE_THRESHOLDS: [u32; 4] = [0, 500, 1000, 1500];

// --- Standard / explosive shots ---

pub const STANDARD_SHOT_SPEED_EASY: f32 = 30.0;
pub const STANDARD_SHOT_SPEED: f32 = 10.0;
pub const STANDARD_SHOT_SIZE: (f32, f32) = (5.0, 15.0);
pub const EXPLOSIVE_SHOT_SIZE: (f32, f32) = (7.0, 18.0);

/// Blast radius of an explosive shot, centre to centre.
pub const EXPLOSION_RADIUS: f32 = 80.0;

/// Score at which the legacy progression turns standard shots explosive.
pub const LEGACY_EXPLOSIVE_SCORE: u32 = 1200;

// --- Spread shots ---

/// Launch angles of the seven pellets (degrees from vertical).
pub const SPREAD_ANGLES_DEG: [f32; 7] = [-45.0, -30.0, -15.0, 0.0, 15.0, 30.0, 45.0];
pub const SPREAD_SHOT_SPEED_EASY: f32 = 20.0;
pub const SPREAD_SHOT_SPEED: f32 = 8.0;

/// Lateral drift per tick is `sin(angle) * SPREAD_LATERAL_FACTOR`.
pub const SPREAD_LATERAL_FACTOR: f32 = 5.0;

/// Vertical travel after which a pellet burns out.
pub const SPREAD_RANGE: f32 = 200.0;
pub const SPREAD_SHOT_SIZE: (f32, f32) = (4.0, 10.0);

// --- Sweep (electric whip) ---

pub const SWEEP_CHARGE_THRESHOLD: u32 = 1000;
pub const SWEEP_ANGULAR_SPEED_DEG: f32 = 6.0;
pub const SWEEP_END_DEG: f32 = 180.0;

/// Reach of the sweep arm (1.5 x playfield width).
pub const SWEEP_LENGTH: f32 = 1200.0;

/// Enemies strictly closer than this to the arm's angle are struck.
pub const SWEEP_TOLERANCE_DEG: f32 = 15.0;

// --- Enemies ---

pub const BASIC_ENEMY_BASE_SIZE: f32 = 40.0;
pub const BASIC_ENEMY_SCALE: (f32, f32) = (0.7, 1.2);
pub const STRONG_ENEMY_BASE_SIZE: f32 = 50.0;
pub const STRONG_ENEMY_SCALE: (f32, f32) = (0.8, 1.3);

pub const BASIC_ENEMY_POINTS: u32 = 10;
pub const STRONG_ENEMY_POINTS: u32 = 25;
pub const BASIC_ENEMY_MAX_HITS: u32 = 1;
pub const STRONG_ENEMY_MAX_HITS: u32 = 2;

/// Basic enemies spin at up to this many degrees per tick, either direction.
pub const BASIC_ENEMY_MAX_SPIN_DEG: f32 = 2.0;

/// Enemies and bonuses enter with their top edge in `[min, max)`.
pub const SPAWN_TOP_RANGE: (i32, i32) = (-100, -40);

// --- Enemy return fire ---

/// Per-enemy delay between shots, drawn at spawn.
pub const ENEMY_FIRE_DELAY_MS: (u64, u64) = (3000, 8000);
pub const BASIC_ENEMY_FIRE_CHANCE: f64 = 0.01;
pub const STRONG_ENEMY_FIRE_CHANCE: f64 = 0.1;
pub const ENEMY_BOLT_SPEED: f32 = 7.0;
pub const ENEMY_BOLT_SIZE: (f32, f32) = (6.0, 15.0);

// --- Bonus ---

pub const BONUS_INTERVAL_MS: u64 = 15_000;
pub const BONUS_SIZE: f32 = 30.0;
pub const BONUS_SPEED: f32 = 3.0;

// --- Transient effects ---

pub const EXPLOSION_TICKS: u32 = 18;
pub const DETONATION_TICKS: u32 = 24;
pub const HIT_FLASH_TICKS: u32 = 6;
pub const BANNER_TICKS: u32 = 180;

pub const PICKUP_PARTICLES: usize = 10;
pub const PARTICLE_SPEED: (f32, f32) = (1.0, 3.0);
pub const PARTICLE_TICKS: u32 = 30;

pub const STRIKE_SPARKS: usize = 10;
pub const SPARK_SPEED: (f32, f32) = (2.0, 5.0);
pub const SPARK_TICKS: u32 = 15;

// --- Scoring ---

/// Multiplier bounds in tenths (1.0 and 5.0).
pub const MULTIPLIER_BASE_TENTHS: u32 = 10;
pub const MULTIPLIER_MAX_TENTHS: u32 = 50;

// --- Replacement policy ---

/// Chance of a strong replacement at tier 3 and above.
pub const TIER_STRONG_REPLACEMENT_CHANCE: f64 = 0.3;

/// Chance of a strong replacement per level number in level mode.
pub const LEVEL_STRONG_REPLACEMENT_STEP: f64 = 0.2;
