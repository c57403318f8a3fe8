//! Sweep arc advance and strike detection.
//!
//! Each arc remembers every enemy it has struck so an enemy is struck at
//! most once per discharge. New strikes wait in `pending` until the
//! resolver scores them.

use std::collections::HashSet;

use hecs::{Entity, World};

use invaders_core::components::{Enemy, Expired, SweepArc};
use invaders_core::constants::SWEEP_END_DEG;
use invaders_core::types::Position;

/// Per-arc strike bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct StrikeLog {
    struck: HashSet<Entity>,
    pending: Vec<Entity>,
}

impl StrikeLog {
    /// Record a strike. Returns `false` if this arc already struck `enemy`.
    pub fn strike(&mut self, enemy: Entity) -> bool {
        let first = self.struck.insert(enemy);
        if first {
            self.pending.push(enemy);
        }
        first
    }

    /// Strikes not yet handed to the resolver, in strike order.
    pub fn take_pending(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.pending)
    }

    pub fn struck_count(&self) -> usize {
        self.struck.len()
    }
}

/// Rotate every arc one step and record the enemies under it.
/// An arc that reaches the end angle expires without striking.
pub fn run(world: &mut World) {
    let enemies: Vec<(Entity, Position)> = world
        .query::<(&Enemy, &Position)>()
        .without::<&Expired>()
        .iter()
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect();

    let mut finished = Vec::new();
    for (entity, (arc, log)) in world.query_mut::<(&mut SweepArc, &mut StrikeLog)>() {
        arc.angle_deg += arc.angular_speed_deg;
        if arc.angle_deg >= SWEEP_END_DEG {
            finished.push(entity);
            continue;
        }
        for (enemy, pos) in &enemies {
            if arc.covers(pos) {
                log.strike(*enemy);
            }
        }
    }

    for entity in finished {
        let _ = world.insert_one(entity, Expired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::enums::EnemyKind;

    use crate::world_setup::{spawn_sweep, spawn_test_enemy};

    #[test]
    fn test_sweep_strikes_each_enemy_once() {
        let mut world = World::new();
        let origin = Position::new(400.0, 550.0);
        let sweep = spawn_sweep(&mut world, origin);
        // Right of the origin, slightly above: on the arm from the first step.
        let right = spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(700.0, 530.0), 40.0, 0.0);
        // Straight up: reached around 90 degrees.
        let up = spawn_test_enemy(&mut world, EnemyKind::Strong, Position::new(400.0, 100.0), 50.0, 0.0);

        run(&mut world);
        let pending = world.get::<&mut StrikeLog>(sweep).unwrap().take_pending();
        assert_eq!(pending, vec![right]);

        let mut struck = vec![right];
        for _ in 0..28 {
            run(&mut world);
            struck.extend(world.get::<&mut StrikeLog>(sweep).unwrap().take_pending());
        }
        assert_eq!(struck, vec![right, up]);
        assert_eq!(world.get::<&StrikeLog>(sweep).unwrap().struck_count(), 2);
        assert!(world.get::<&Expired>(sweep).is_err());

        // The 30th step reaches 180 degrees and ends the arc.
        run(&mut world);
        assert!(world.get::<&Expired>(sweep).is_ok());
    }

    #[test]
    fn test_sweep_ignores_enemies_out_of_reach() {
        let mut world = World::new();
        let sweep = spawn_sweep(&mut world, Position::new(0.0, 590.0));
        spawn_test_enemy(&mut world, EnemyKind::Basic, Position::new(1300.0, 580.0), 40.0, 0.0);
        run(&mut world);
        assert_eq!(world.get::<&StrikeLog>(sweep).unwrap().struck_count(), 0);
    }
}
