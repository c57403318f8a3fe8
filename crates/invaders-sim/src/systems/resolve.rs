//! Interaction reducer.
//!
//! Applies the interactions found by `collision::detect` in order. Every
//! enemy destruction, whatever caused it, goes through one destroy path:
//! one multiplier step, the point award, an explosion and a replacement.
//! Once the player runs out of lives the remaining interactions of the tick
//! are dropped.

use std::collections::HashSet;

use hecs::{Entity, World};
use log::debug;
use rand_chacha::ChaCha8Rng;

use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::{GameMode, ReplacementPolicy};
use invaders_core::events::{AudioEvent, GameEvent};
use invaders_core::types::Position;

use super::collision::Interaction;
use crate::scoring::ScoreState;
use crate::world_setup;

/// What caused a kill. Sweep kills do not feed the sweep charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KillSource {
    Projectile,
    Sweep,
}

/// Everything the reducer may touch during one tick.
pub struct Resolver<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub score: &'a mut ScoreState,
    pub player: Entity,
    pub mode: GameMode,
    pub policy: ReplacementPolicy,
    pub now_ms: u64,
    pub last_bonus_ms: &'a mut u64,
    pub events: &'a mut Vec<GameEvent>,
    pub audio_events: &'a mut Vec<AudioEvent>,
}

impl Resolver<'_> {
    /// Apply `interactions` in order. Returns `true` if the player lost their last life.
    pub fn apply(&mut self, interactions: Vec<Interaction>) -> bool {
        let mut destroyed: HashSet<Entity> = HashSet::new();
        let mut processed: HashSet<(Entity, Entity)> = HashSet::new();

        for interaction in interactions {
            match interaction {
                Interaction::ShotMissed => {
                    self.score.miss();
                    self.events.push(GameEvent::ShotMissed);
                }
                Interaction::Detonation {
                    projectile,
                    at,
                    radius,
                    victims,
                } => {
                    if let Some(projectile) = projectile {
                        self.consume_projectile(projectile);
                    }
                    world_setup::spawn_effect(self.world, EffectKind::Detonation { radius }, at);
                    self.audio_events.push(AudioEvent::Explosion);
                    for enemy in victims {
                        if !destroyed.contains(&enemy) {
                            self.hit_enemy(enemy, &mut destroyed);
                        }
                    }
                }
                Interaction::DirectHit { projectile, enemy } => {
                    self.consume_projectile(projectile);
                    if destroyed.contains(&enemy) || !processed.insert((projectile, enemy)) {
                        continue;
                    }
                    self.hit_enemy(enemy, &mut destroyed);
                }
                Interaction::BoltHitsPlayer { bolt } => {
                    let _ = self.world.insert_one(bolt, Expired);
                    if self.lose_life() {
                        return true;
                    }
                }
                Interaction::EnemyBreach { enemy } => {
                    if destroyed.contains(&enemy) {
                        continue;
                    }
                    world_setup::respawn_at_top(self.world, self.rng, enemy, self.mode);
                    if self.lose_life() {
                        return true;
                    }
                }
                Interaction::BonusDue => {
                    world_setup::spawn_bonus(self.world, self.rng);
                    *self.last_bonus_ms = self.now_ms;
                }
                Interaction::BonusPickup { bonus } => self.pick_up(bonus),
                Interaction::SweepStrike { enemy } => {
                    if destroyed.contains(&enemy) || self.world.get::<&Enemy>(enemy).is_err() {
                        continue;
                    }
                    if let Some(at) = self.position_of(enemy) {
                        world_setup::spawn_burst(
                            self.world,
                            self.rng,
                            EffectKind::Spark,
                            at,
                            STRIKE_SPARKS,
                            SPARK_SPEED,
                        );
                    }
                    self.destroy(enemy, KillSource::Sweep);
                    destroyed.insert(enemy);
                }
            }
        }
        false
    }

    /// Remove a projectile that touched an enemy. It can no longer miss.
    fn consume_projectile(&mut self, projectile: Entity) {
        if let Ok(mut p) = self.world.get::<&mut Projectile>(projectile) {
            p.has_hit = true;
        }
        let _ = self.world.insert_one(projectile, Expired);
    }

    /// Register one hit on `enemy`; destroy it or flash it.
    fn hit_enemy(&mut self, enemy: Entity, destroyed: &mut HashSet<Entity>) {
        let (kind, was_destroyed) = match self.world.get::<&mut Enemy>(enemy) {
            Ok(mut e) => (e.kind, e.register_hit()),
            Err(_) => return,
        };
        if was_destroyed {
            self.destroy(enemy, KillSource::Projectile);
            destroyed.insert(enemy);
        } else {
            if let Some(at) = self.position_of(enemy) {
                world_setup::spawn_effect(self.world, EffectKind::HitFlash, at);
            }
            self.events.push(GameEvent::EnemyHit { kind });
        }
    }

    /// The shared destroy path: score, charge, explosion, replacement.
    fn destroy(&mut self, enemy: Entity, source: KillSource) {
        let (kind, base_points) = match self.world.get::<&Enemy>(enemy) {
            Ok(e) => (e.kind, e.points),
            Err(_) => return,
        };
        let at = self.position_of(enemy).unwrap_or_default();

        let points = self.score.award_kill(base_points);
        self.events.push(GameEvent::EnemyDestroyed {
            kind,
            points,
            multiplier_tenths: self.score.multiplier_tenths(),
        });
        if source == KillSource::Projectile {
            if let Ok(mut player) = self.world.get::<&mut Player>(self.player) {
                player.add_charge(points);
            }
        }

        world_setup::spawn_effect(self.world, EffectKind::Explosion, at);
        self.audio_events.push(AudioEvent::Explosion);
        let _ = self.world.insert_one(enemy, Expired);

        let replacement = world_setup::replacement_kind(self.policy, self.mode, self.rng);
        world_setup::spawn_enemy(self.world, self.rng, replacement, self.mode, self.now_ms);
        debug!("{kind:?} destroyed for {points}, replaced by {replacement:?}");
    }

    /// Take one life. Returns `true` when none are left.
    fn lose_life(&mut self) -> bool {
        let remaining = match self.world.get::<&mut Player>(self.player) {
            Ok(mut player) => {
                player.lives = player.lives.saturating_sub(1);
                player.lives
            }
            Err(_) => return false,
        };
        self.events.push(GameEvent::LifeLost { remaining });
        remaining == 0
    }

    fn pick_up(&mut self, bonus: Entity) {
        let at = self.position_of(bonus).unwrap_or_default();
        let _ = self.world.insert_one(bonus, Expired);
        let lives = match self.world.get::<&mut Player>(self.player) {
            Ok(mut player) => {
                player.lives += 1;
                player.lives
            }
            Err(_) => return,
        };
        self.events.push(GameEvent::LifeGained { lives });
        self.audio_events.push(AudioEvent::Pickup);
        world_setup::spawn_burst(
            self.world,
            self.rng,
            EffectKind::Particle,
            at,
            PICKUP_PARTICLES,
            PARTICLE_SPEED,
        );
    }

    fn position_of(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }
}
