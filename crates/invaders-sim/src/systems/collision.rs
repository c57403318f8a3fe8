//! Collision detection.
//!
//! Reads the world after every entity has advanced and lists what happened
//! as [`Interaction`]s, in the order the resolver must apply them:
//! misses, detonations and projectile hits, bolts on the player, bottom
//! breaches, the bonus timer, bonus pickups, then sweep strikes.
//! Nothing here changes game state except draining the sweep strike logs.

use hecs::{Entity, World};

use invaders_core::components::{Bonus, Enemy, Expired, Player, Projectile, ProjectileKind};
use invaders_core::constants::PLAYFIELD_HEIGHT;
use invaders_core::types::{Aabb, Extent, Position};

use super::projectiles::ProjectileExit;
use super::sweep::StrikeLog;

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    ShotMissed,
    /// Blast at `at`. `projectile` is set when an explosive shot hit an enemy
    /// directly rather than crossing the top edge.
    Detonation {
        projectile: Option<Entity>,
        at: Position,
        radius: f32,
        victims: Vec<Entity>,
    },
    DirectHit {
        projectile: Entity,
        enemy: Entity,
    },
    BoltHitsPlayer {
        bolt: Entity,
    },
    EnemyBreach {
        enemy: Entity,
    },
    BonusDue,
    BonusPickup {
        bonus: Entity,
    },
    SweepStrike {
        enemy: Entity,
    },
}

struct Target {
    entity: Entity,
    center: Position,
    bounds: Aabb,
}

/// Collect this tick's interactions.
pub fn detect(world: &mut World, exits: &[ProjectileExit], player: Entity, bonus_due: bool) -> Vec<Interaction> {
    let mut interactions = Vec::new();

    let enemies: Vec<Target> = world
        .query::<(&Enemy, &Position, &Extent)>()
        .without::<&Expired>()
        .iter()
        .map(|(entity, (_, pos, extent))| Target {
            entity,
            center: *pos,
            bounds: Aabb::around(*pos, *extent),
        })
        .collect();

    // 1. Misses and top-edge detonations, then player projectiles x enemies.
    for exit in exits {
        match *exit {
            ProjectileExit::Missed => interactions.push(Interaction::ShotMissed),
            ProjectileExit::ReachedTop { at, radius } => interactions.push(Interaction::Detonation {
                projectile: None,
                at,
                radius,
                victims: within_radius(&enemies, at, radius),
            }),
        }
    }

    for (entity, (projectile, pos, extent)) in world
        .query::<(&Projectile, &Position, &Extent)>()
        .without::<&Expired>()
        .iter()
    {
        if projectile.kind.is_hostile() {
            continue;
        }
        let bounds = Aabb::around(*pos, *extent);
        let hits: Vec<Entity> = enemies
            .iter()
            .filter(|t| t.bounds.overlaps(&bounds))
            .map(|t| t.entity)
            .collect();
        if hits.is_empty() {
            continue;
        }
        match projectile.kind {
            ProjectileKind::Explosive { radius } => interactions.push(Interaction::Detonation {
                projectile: Some(entity),
                at: *pos,
                radius,
                victims: within_radius(&enemies, *pos, radius),
            }),
            _ => interactions.extend(hits.into_iter().map(|enemy| Interaction::DirectHit {
                projectile: entity,
                enemy,
            })),
        }
    }

    let player_bounds = world
        .query_one_mut::<(&Player, &Position, &Extent)>(player)
        .map(|(_, pos, extent)| Aabb::around(*pos, *extent))
        .ok();

    // 2. Enemy bolts x player.
    if let Some(player_bounds) = player_bounds {
        for (entity, (projectile, pos, extent)) in world
            .query::<(&Projectile, &Position, &Extent)>()
            .without::<&Expired>()
            .iter()
        {
            if projectile.kind.is_hostile() && Aabb::around(*pos, *extent).overlaps(&player_bounds) {
                interactions.push(Interaction::BoltHitsPlayer { bolt: entity });
            }
        }
    }

    // 3. Enemies past the bottom edge.
    for target in &enemies {
        if target.bounds.top > PLAYFIELD_HEIGHT {
            interactions.push(Interaction::EnemyBreach { enemy: target.entity });
        }
    }

    // 4. Bonus timer.
    if bonus_due {
        interactions.push(Interaction::BonusDue);
    }

    // 5. Player x bonus.
    if let Some(player_bounds) = player_bounds {
        for (entity, (_bonus, pos, extent)) in world
            .query::<(&Bonus, &Position, &Extent)>()
            .without::<&Expired>()
            .iter()
        {
            if Aabb::around(*pos, *extent).overlaps(&player_bounds) {
                interactions.push(Interaction::BonusPickup { bonus: entity });
            }
        }
    }

    // 6. Sweep strikes recorded during the advance step.
    for (_entity, log) in world.query_mut::<&mut StrikeLog>() {
        interactions.extend(
            log.take_pending()
                .into_iter()
                .map(|enemy| Interaction::SweepStrike { enemy }),
        );
    }

    interactions
}

/// Enemies whose centre lies within `radius` of `at`.
fn within_radius(enemies: &[Target], at: Position, radius: f32) -> Vec<Entity> {
    enemies
        .iter()
        .filter(|t| t.center.distance_to(&at) <= radius)
        .map(|t| t.entity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::enums::EnemyKind;
    use invaders_core::types::Velocity;

    use crate::world_setup::{spawn_player, spawn_test_enemy};

    fn shot(world: &mut World, kind: ProjectileKind, at: Position) -> Entity {
        world.spawn((
            Projectile { kind, has_hit: false },
            at,
            Velocity::default(),
            Extent::new(5.0, 15.0),
        ))
    }

    #[test]
    fn test_one_shot_credits_every_overlapping_enemy() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        let a = spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(390.0, 300.0), 30.0, 0.0);
        let b = spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(410.0, 300.0), 30.0, 0.0);
        let s = shot(&mut world, ProjectileKind::Standard, Position::new(400.0, 300.0));

        let found = detect(&mut world, &[], player, false);
        assert_eq!(
            found,
            vec![
                Interaction::DirectHit { projectile: s, enemy: a },
                Interaction::DirectHit { projectile: s, enemy: b },
            ]
        );
    }

    #[test]
    fn test_explosive_hit_becomes_detonation() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        let hit = spawn_test_enemy(&mut world, EnemyKind::Strong, Position::new(400.0, 300.0), 50.0, 0.0);
        let near = spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(470.0, 300.0), 30.0, 0.0);
        spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(490.0, 300.0), 30.0, 0.0);
        let s = shot(&mut world, ProjectileKind::Explosive { radius: 80.0 }, Position::new(400.0, 310.0));

        let found = detect(&mut world, &[], player, false);
        assert_eq!(
            found,
            vec![Interaction::Detonation {
                projectile: Some(s),
                at: Position::new(400.0, 310.0),
                radius: 80.0,
                victims: vec![hit, near],
            }]
        );
    }

    #[test]
    fn test_resolution_order() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        let breach = spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(100.0, 640.0), 40.0, 0.0);
        let bolt = shot(&mut world, ProjectileKind::EnemyBolt, Position::new(400.0, 560.0));
        let bonus = world.spawn((Bonus, Position::new(410.0, 570.0), Velocity::default(), Extent::square(30.0)));

        let found = detect(&mut world, &[ProjectileExit::Missed], player, true);
        assert_eq!(
            found,
            vec![
                Interaction::ShotMissed,
                Interaction::BoltHitsPlayer { bolt },
                Interaction::EnemyBreach { enemy: breach },
                Interaction::BonusDue,
                Interaction::BonusPickup { bonus },
            ]
        );
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        // Enemy bottom at 292.5, shot top at 292.5.
        spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(400.0, 272.5), 40.0, 0.0);
        shot(&mut world, ProjectileKind::Standard, Position::new(400.0, 300.0));
        assert!(detect(&mut world, &[], player, false).is_empty());
    }
}
