//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, enemy waves, projectiles, sweeps, bonuses and
//! transient effects with appropriate component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_campaign::levels::composition_for;
use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::*;
use invaders_core::types::{Extent, Position, Velocity};

use crate::systems::sweep::StrikeLog;
use crate::weapons::ShotSpec;

/// Centre y of the player ship.
pub const PLAYER_CENTER_Y: f32 = PLAYFIELD_HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT / 2.0;

/// Spawn the single player ship, centred at the bottom of the playfield.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        Player::default(),
        player_start_position(),
        Extent::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    ))
}

fn player_start_position() -> Position {
    Position::new(PLAYFIELD_WIDTH / 2.0, PLAYER_CENTER_Y)
}

/// Reposition the player and restore lives, charge and cooldown for a new run.
/// The weapon selection carries over.
pub fn reset_player(world: &mut World, player: Entity) {
    if let Ok((p, pos)) = world.query_one_mut::<(&mut Player, &mut Position)>(player) {
        *p = Player {
            weapon: p.weapon,
            ..Player::default()
        };
        *pos = player_start_position();
    }
}

/// Despawn everything except the player.
pub fn clear_run(world: &mut World, player: Entity, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.iter().map(|e| e.entity()).filter(|e| *e != player));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Spawn the opening wave for `mode`: the basic enemies first, then the strong ones.
pub fn spawn_wave(world: &mut World, rng: &mut ChaCha8Rng, mode: GameMode, now_ms: u64) {
    let composition = composition_for(mode);
    for _ in 0..composition.enemies {
        spawn_enemy(world, rng, EnemyKind::Basic, mode, now_ms);
    }
    for _ in 0..composition.strong {
        spawn_enemy(world, rng, EnemyKind::Strong, mode, now_ms);
    }
}

/// Spawn one enemy at a random position above the playfield.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: EnemyKind,
    mode: GameMode,
    now_ms: u64,
) -> Entity {
    let (base, scale) = match kind {
        EnemyKind::Basic => (BASIC_ENEMY_BASE_SIZE, BASIC_ENEMY_SCALE),
        EnemyKind::Strong => (STRONG_ENEMY_BASE_SIZE, STRONG_ENEMY_SCALE),
    };
    let side = (base * rng.gen_range(scale.0..scale.1)).floor();
    let extent = Extent::square(side);
    let position = random_top_position(rng, extent);
    let velocity = Velocity::new(0.0, enemy_speed(rng, kind, mode.speed_tier()));
    let spin = match kind {
        EnemyKind::Basic => rng.gen_range(-BASIC_ENEMY_MAX_SPIN_DEG..BASIC_ENEMY_MAX_SPIN_DEG),
        EnemyKind::Strong => 0.0,
    };

    let entity = world.spawn((Enemy::new(kind, spin), position, velocity, extent));
    if mode.enemies_fire() {
        let shooter = Shooter {
            last_shot_ms: now_ms,
            delay_ms: rng.gen_range(ENEMY_FIRE_DELAY_MS.0..=ENEMY_FIRE_DELAY_MS.1),
            chance: match kind {
                EnemyKind::Basic => BASIC_ENEMY_FIRE_CHANCE,
                EnemyKind::Strong => STRONG_ENEMY_FIRE_CHANCE,
            },
        };
        let _ = world.insert_one(entity, shooter);
    }
    entity
}

/// Draw a downward speed from the kind's speed table for `tier`.
pub fn enemy_speed(rng: &mut ChaCha8Rng, kind: EnemyKind, tier: Tier) -> f32 {
    let (lo, hi) = match (kind, tier) {
        (EnemyKind::Basic, Tier::Easy) => (1, 1),
        (EnemyKind::Basic, Tier::Medium) => (1, 2),
        (EnemyKind::Basic, _) => (1, 3),
        (EnemyKind::Strong, Tier::Hard) => (2, 3),
        (EnemyKind::Strong, Tier::Impossible) => (2, 4),
        (EnemyKind::Strong, _) => (1, 2),
    };
    rng.gen_range(lo..=hi) as f32
}

/// Kind of the enemy that replaces a destroyed one.
pub fn replacement_kind(policy: ReplacementPolicy, mode: GameMode, rng: &mut ChaCha8Rng) -> EnemyKind {
    match policy {
        ReplacementPolicy::AlwaysBasic => EnemyKind::Basic,
        ReplacementPolicy::Probabilistic => {
            let roll: f64 = rng.gen();
            let tier_roll = mode.level().is_none()
                && mode.speed_tier() >= Tier::Hard
                && roll < TIER_STRONG_REPLACEMENT_CHANCE;
            let level_roll = mode
                .level()
                .is_some_and(|level| roll < (LEVEL_STRONG_REPLACEMENT_STEP * level as f64).min(1.0));
            if tier_roll || level_roll {
                EnemyKind::Strong
            } else {
                EnemyKind::Basic
            }
        }
    }
}

/// Move an enemy that crossed the bottom back above the playfield with a fresh speed.
pub fn respawn_at_top(world: &mut World, rng: &mut ChaCha8Rng, enemy: Entity, mode: GameMode) {
    if let Ok((e, pos, vel, extent)) =
        world.query_one_mut::<(&Enemy, &mut Position, &mut Velocity, &Extent)>(enemy)
    {
        *pos = random_top_position(rng, *extent);
        vel.y = enemy_speed(rng, e.kind, mode.speed_tier());
    }
}

/// Centre of a box of `extent` whose left edge is in `[0, width - w)` and
/// whose top edge is in the spawn band above the playfield.
fn random_top_position(rng: &mut ChaCha8Rng, extent: Extent) -> Position {
    let max_left = ((PLAYFIELD_WIDTH - extent.w) as i32).max(1);
    let left = rng.gen_range(0..max_left) as f32;
    let top = rng.gen_range(SPAWN_TOP_RANGE.0..SPAWN_TOP_RANGE.1) as f32;
    Position::new(left + extent.w / 2.0, top + extent.h / 2.0)
}

/// Spawn an extra-life pickup above the playfield.
pub fn spawn_bonus(world: &mut World, rng: &mut ChaCha8Rng) -> Entity {
    let extent = Extent::square(BONUS_SIZE);
    let position = random_top_position(rng, extent);
    world.spawn((Bonus, position, Velocity::new(0.0, BONUS_SPEED), extent))
}

pub fn spawn_projectile(world: &mut World, shot: ShotSpec) -> Entity {
    world.spawn((
        Projectile {
            kind: shot.kind,
            has_hit: false,
        },
        shot.position,
        shot.velocity,
        shot.extent,
    ))
}

/// Spawn an enemy bolt whose top edge sits on `enemy_bottom`.
pub fn spawn_enemy_bolt(world: &mut World, x: f32, enemy_bottom: f32) -> Entity {
    let extent = Extent::from(ENEMY_BOLT_SIZE);
    world.spawn((
        Projectile {
            kind: ProjectileKind::EnemyBolt,
            has_hit: false,
        },
        Position::new(x, enemy_bottom + extent.h / 2.0),
        Velocity::new(0.0, ENEMY_BOLT_SPEED),
        extent,
    ))
}

pub fn spawn_sweep(world: &mut World, origin: Position) -> Entity {
    world.spawn((SweepArc::new(origin), StrikeLog::default()))
}

pub fn spawn_effect(world: &mut World, kind: EffectKind, at: Position) -> Entity {
    world.spawn((TransientEffect::new(kind), at))
}

/// Spawn `count` moving effects flying outward from `at` in random directions.
pub fn spawn_burst(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: EffectKind,
    at: Position,
    count: usize,
    speed: (f32, f32),
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..360.0);
        let velocity = Velocity::from_screen_angle(angle, rng.gen_range(speed.0..speed.1));
        world.spawn((TransientEffect::new(kind), at, velocity));
    }
}

/// Spawn an enemy at a fixed position and speed (for tests needing exact geometry).
#[cfg(test)]
pub fn spawn_test_enemy(
    world: &mut World,
    kind: EnemyKind,
    position: Position,
    side: f32,
    speed: f32,
) -> Entity {
    world.spawn((
        Enemy::new(kind, 0.0),
        position,
        Velocity::new(0.0, speed),
        Extent::square(side),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_enemy_sizes_and_spawn_band() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            spawn_enemy(&mut world, &mut rng, EnemyKind::Basic, GameMode::Tier(Tier::Hard), 0);
            spawn_enemy(&mut world, &mut rng, EnemyKind::Strong, GameMode::Tier(Tier::Hard), 0);
        }
        for (_, (enemy, pos, extent)) in world.query::<(&Enemy, &Position, &Extent)>().iter() {
            let (lo, hi) = match enemy.kind {
                EnemyKind::Basic => (27.0, 48.0),
                EnemyKind::Strong => (39.0, 65.0),
            };
            assert!(extent.w >= lo && extent.w <= hi, "side {}", extent.w);
            assert_eq!(extent.w, extent.w.floor());
            let top = pos.y - extent.h / 2.0;
            assert!((-100.0..-40.0).contains(&top));
            let left = pos.x - extent.w / 2.0;
            assert!(left >= 0.0 && left < PLAYFIELD_WIDTH - extent.w);
        }
    }

    #[test]
    fn test_speed_tables() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(enemy_speed(&mut rng, EnemyKind::Basic, Tier::Easy), 1.0);
            let strong_hard = enemy_speed(&mut rng, EnemyKind::Strong, Tier::Hard);
            assert!((2.0..=3.0).contains(&strong_hard));
            let strong_max = enemy_speed(&mut rng, EnemyKind::Strong, Tier::Impossible);
            assert!((2.0..=4.0).contains(&strong_max));
            let basic_medium = enemy_speed(&mut rng, EnemyKind::Basic, Tier::Medium);
            assert!((1.0..=2.0).contains(&basic_medium));
        }
    }

    #[test]
    fn test_shooters_only_at_impossible_tier() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        spawn_wave(&mut world, &mut rng, GameMode::Tier(Tier::Hard), 0);
        assert_eq!(world.query::<&Shooter>().iter().count(), 0);
        spawn_wave(&mut world, &mut rng, GameMode::Tier(Tier::Impossible), 500);
        let shooters: Vec<Shooter> = world.query::<&Shooter>().iter().map(|(_, s)| *s).collect();
        assert_eq!(shooters.len(), 10);
        for s in shooters {
            assert_eq!(s.last_shot_ms, 500);
            assert!((3000..=8000).contains(&s.delay_ms));
        }
    }

    #[test]
    fn test_always_basic_replacement() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(
                replacement_kind(ReplacementPolicy::AlwaysBasic, GameMode::Tier(Tier::Impossible), &mut rng),
                EnemyKind::Basic
            );
        }
    }

    #[test]
    fn test_probabilistic_replacement() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // Level 5 and above always rolls strong.
        for _ in 0..50 {
            assert_eq!(
                replacement_kind(ReplacementPolicy::Probabilistic, GameMode::Level(5), &mut rng),
                EnemyKind::Strong
            );
        }
        // Tiers below Hard never do.
        for _ in 0..50 {
            assert_eq!(
                replacement_kind(ReplacementPolicy::Probabilistic, GameMode::Tier(Tier::Medium), &mut rng),
                EnemyKind::Basic
            );
        }
        let strong = (0..1000)
            .filter(|_| {
                replacement_kind(ReplacementPolicy::Probabilistic, GameMode::Tier(Tier::Hard), &mut rng)
                    == EnemyKind::Strong
            })
            .count();
        assert!(strong > 200 && strong < 400, "strong = {strong}");
    }

    #[test]
    fn test_reset_player_keeps_weapon() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        {
            let mut p = world.get::<&mut Player>(player).unwrap();
            p.weapon = WeaponKind::Spread;
            p.lives = 0;
            p.charge = 700;
            p.explosive = true;
        }
        reset_player(&mut world, player);
        let p = world.get::<&Player>(player).unwrap();
        assert_eq!(p.weapon, WeaponKind::Spread);
        assert_eq!(p.lives, 3);
        assert_eq!(p.charge, 0);
        assert!(!p.explosive);
        assert_eq!(*world.get::<&Position>(player).unwrap(), Position::new(400.0, 570.0));
    }
}
