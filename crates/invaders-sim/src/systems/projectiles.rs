//! Projectile advance: motion, spread budgets and leaving the playfield.

use hecs::World;

use invaders_core::components::{Expired, Projectile, ProjectileKind};
use invaders_core::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use invaders_core::types::{Aabb, Extent, Position, Velocity};

/// How a projectile left play during the advance step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileExit {
    /// A miss-tracked shot left without hitting anything.
    Missed,
    /// An explosive shot crossed the top edge and detonates there.
    ReachedTop { at: Position, radius: f32 },
}

/// Advance every projectile and expire the ones that left play.
pub fn run(world: &mut World) -> Vec<ProjectileExit> {
    let mut exits = Vec::new();
    let mut expired = Vec::new();

    for (entity, (projectile, pos, vel, extent)) in
        world.query_mut::<(&mut Projectile, &mut Position, &Velocity, &Extent)>()
    {
        pos.translate(*vel);
        let bounds = Aabb::around(*pos, *extent);

        let gone = match &mut projectile.kind {
            ProjectileKind::Standard => bounds.bottom < 0.0,
            ProjectileKind::Explosive { radius } => {
                let gone = bounds.bottom < 0.0;
                if gone {
                    exits.push(ProjectileExit::ReachedTop {
                        at: *pos,
                        radius: *radius,
                    });
                }
                gone
            }
            ProjectileKind::Spread { travelled, range, .. } => {
                *travelled += vel.y.abs();
                *travelled > *range
                    || bounds.bottom < 0.0
                    || bounds.right < 0.0
                    || bounds.left > PLAYFIELD_WIDTH
            }
            ProjectileKind::EnemyBolt => bounds.top > PLAYFIELD_HEIGHT,
        };

        if gone {
            if projectile.kind.tracks_misses() && !projectile.has_hit {
                exits.push(ProjectileExit::Missed);
            }
            expired.push(entity);
        }
    }

    for entity in expired {
        let _ = world.insert_one(entity, Expired);
    }
    exits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(world: &mut World, kind: ProjectileKind, y: f32, vy: f32) -> hecs::Entity {
        world.spawn((
            Projectile { kind, has_hit: false },
            Position::new(400.0, y),
            Velocity::new(0.0, vy),
            Extent::new(5.0, 15.0),
        ))
    }

    #[test]
    fn test_standard_shot_leaving_top_is_a_miss() {
        let mut world = World::new();
        let shot = spawn(&mut world, ProjectileKind::Standard, 10.0, -10.0);
        assert!(run(&mut world).is_empty());
        assert!(world.get::<&Expired>(shot).is_err());
        assert_eq!(run(&mut world), vec![ProjectileExit::Missed]);
        assert!(world.get::<&Expired>(shot).is_ok());
    }

    #[test]
    fn test_hit_shot_never_misses() {
        let mut world = World::new();
        let shot = spawn(&mut world, ProjectileKind::Standard, 0.0, -10.0);
        world.get::<&mut Projectile>(shot).unwrap().has_hit = true;
        assert!(run(&mut world).is_empty());
        assert!(world.get::<&Expired>(shot).is_ok());
    }

    #[test]
    fn test_explosive_detonates_at_top() {
        let mut world = World::new();
        spawn(&mut world, ProjectileKind::Explosive { radius: 80.0 }, 0.0, -10.0);
        assert_eq!(
            run(&mut world),
            vec![ProjectileExit::ReachedTop {
                at: Position::new(400.0, -10.0),
                radius: 80.0
            }]
        );
    }

    #[test]
    fn test_spread_budget() {
        let mut world = World::new();
        let centre = spawn(
            &mut world,
            ProjectileKind::Spread {
                angle_deg: 0.0,
                travelled: 0.0,
                range: 200.0,
            },
            500.0,
            -8.0,
        );
        let side = spawn(
            &mut world,
            ProjectileKind::Spread {
                angle_deg: 30.0,
                travelled: 0.0,
                range: 200.0,
            },
            500.0,
            -8.0,
        );
        // Exactly 200 units after 25 ticks is still in range.
        for _ in 0..25 {
            assert!(run(&mut world).is_empty());
        }
        assert!(world.get::<&Expired>(centre).is_err());
        assert_eq!(run(&mut world), vec![ProjectileExit::Missed]);
        assert!(world.get::<&Expired>(centre).is_ok());
        assert!(world.get::<&Expired>(side).is_ok());
    }

    #[test]
    fn test_enemy_bolt_leaves_bottom() {
        let mut world = World::new();
        let bolt = spawn(&mut world, ProjectileKind::EnemyBolt, 605.0, 7.0);
        assert!(run(&mut world).is_empty());
        assert!(world.get::<&Expired>(bolt).is_ok());
    }
}
