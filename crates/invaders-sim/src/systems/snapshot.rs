//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::{Entity, World};

use invaders_core::components::*;
use invaders_core::constants::SWEEP_CHARGE_THRESHOLD;
use invaders_core::enums::*;
use invaders_core::events::{AudioEvent, GameEvent};
use invaders_core::state::*;
use invaders_core::types::{Extent, Position, SimTime};

/// Per-tick values owned by the engine rather than the world.
pub struct SnapshotFrame {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: ScoreView,
    pub profile: ProfileView,
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, player: Entity, frame: SnapshotFrame) -> GameStateSnapshot {
    GameStateSnapshot {
        time: frame.time,
        phase: frame.phase,
        mode: frame.mode,
        score: frame.score,
        player: build_player(world, player),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        sweeps: build_sweeps(world),
        bonuses: build_bonuses(world),
        effects: build_effects(world),
        events: frame.events,
        audio_events: frame.audio_events,
        profile: frame.profile,
    }
}

/// Stable numeric handle for an entity.
fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

fn build_player(world: &World, player: Entity) -> PlayerView {
    let Ok(mut query) = world.query_one::<(&Player, &Position, &Extent)>(player) else {
        return PlayerView::default();
    };
    match query.get() {
        Some((p, pos, extent)) => PlayerView {
            position: *pos,
            extent: *extent,
            lives: p.lives,
            weapon: p.weapon,
            charge: p.charge,
            charge_threshold: SWEEP_CHARGE_THRESHOLD,
            explosive: p.explosive,
            appearance: p.appearance,
        },
        None => PlayerView::default(),
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Extent)>()
        .iter()
        .map(|(entity, (enemy, pos, extent))| EnemyView {
            id: entity_id(entity),
            kind: enemy.kind,
            position: *pos,
            extent: *extent,
            rotation_deg: enemy.rotation_deg,
            hits_taken: enemy.hits_taken,
            max_hits: enemy.max_hits,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Extent)>()
        .iter()
        .map(|(entity, (projectile, pos, extent))| ProjectileView {
            id: entity_id(entity),
            kind: projectile.kind,
            position: *pos,
            extent: *extent,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_sweeps(world: &World) -> Vec<SweepView> {
    let mut sweeps: Vec<(u64, SweepView)> = world
        .query::<&SweepArc>()
        .iter()
        .map(|(entity, arc)| {
            (
                entity_id(entity),
                SweepView {
                    origin: arc.origin,
                    angle_deg: arc.angle_deg,
                    length: arc.length,
                },
            )
        })
        .collect();
    sweeps.sort_by_key(|(id, _)| *id);
    sweeps.into_iter().map(|(_, view)| view).collect()
}

fn build_bonuses(world: &World) -> Vec<BonusView> {
    let mut bonuses: Vec<(u64, BonusView)> = world
        .query::<(&Bonus, &Position, &Extent)>()
        .iter()
        .map(|(entity, (_, pos, extent))| {
            (
                entity_id(entity),
                BonusView {
                    position: *pos,
                    extent: *extent,
                },
            )
        })
        .collect();
    bonuses.sort_by_key(|(id, _)| *id);
    bonuses.into_iter().map(|(_, view)| view).collect()
}

fn build_effects(world: &World) -> Vec<EffectView> {
    let mut effects: Vec<(u64, EffectView)> = world
        .query::<(&TransientEffect, &Position)>()
        .iter()
        .map(|(entity, (effect, pos))| {
            (
                entity_id(entity),
                EffectView {
                    kind: effect.kind,
                    position: *pos,
                    ticks_left: effect.ticks_left,
                },
            )
        })
        .collect();
    effects.sort_by_key(|(id, _)| *id);
    effects.into_iter().map(|(_, view)| view).collect()
}
