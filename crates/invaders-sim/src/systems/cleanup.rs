//! Cleanup system: despawns every entity marked `Expired` this tick.

use hecs::{Entity, World};

use invaders_core::components::Expired;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Expired>().into_iter().map(|(entity, _)| entity));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
