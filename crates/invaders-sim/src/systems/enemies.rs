//! Enemy advance: descent, spin and Impossible-tier return fire.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::components::{Enemy, Shooter};
use invaders_core::types::{Extent, Position, Velocity};

use crate::world_setup;

/// Move every enemy one tick and let armed enemies roll for a shot.
///
/// A shooter whose delay has elapsed rolls its chance each tick. A successful
/// roll restarts the delay; the bolt only spawns if the enemy's bottom edge
/// is already inside the playfield.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, now_ms: u64) {
    let mut bolts = Vec::new();

    for (_entity, (enemy, pos, vel, extent, shooter)) in world.query_mut::<(
        &mut Enemy,
        &mut Position,
        &Velocity,
        &Extent,
        Option<&mut Shooter>,
    )>() {
        pos.translate(*vel);
        enemy.rotation_deg = (enemy.rotation_deg + enemy.spin_deg).rem_euclid(360.0);

        let Some(shooter) = shooter else {
            continue;
        };
        if now_ms.saturating_sub(shooter.last_shot_ms) > shooter.delay_ms && rng.gen_bool(shooter.chance) {
            shooter.last_shot_ms = now_ms;
            let bottom = pos.y + extent.h / 2.0;
            if bottom > 0.0 {
                bolts.push((pos.x, bottom));
            }
        }
    }

    for (x, bottom) in bolts {
        world_setup::spawn_enemy_bolt(world, x, bottom);
    }
}
