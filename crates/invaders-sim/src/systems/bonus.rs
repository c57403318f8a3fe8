//! Bonus pickups: fall at a fixed speed and expire past the bottom edge.

use hecs::World;

use invaders_core::components::{Bonus, Expired};
use invaders_core::constants::{BONUS_INTERVAL_MS, PLAYFIELD_HEIGHT};
use invaders_core::types::{Extent, Position, Velocity};

pub fn run(world: &mut World) {
    let mut expired = Vec::new();
    for (entity, (_bonus, pos, vel, extent)) in
        world.query_mut::<(&Bonus, &mut Position, &Velocity, &Extent)>()
    {
        pos.translate(*vel);
        if pos.y - extent.h / 2.0 > PLAYFIELD_HEIGHT {
            expired.push(entity);
        }
    }
    for entity in expired {
        let _ = world.insert_one(entity, Expired);
    }
}

/// Whether a new bonus is due, every 15 seconds of tick time.
pub fn due(now_ms: u64, last_bonus_ms: u64) -> bool {
    now_ms.saturating_sub(last_bonus_ms) >= BONUS_INTERVAL_MS
}
