//! Transient effects: count down, drift if they move, expire at zero.

use hecs::World;

use invaders_core::components::{Expired, TransientEffect};
use invaders_core::types::{Position, Velocity};

pub fn run(world: &mut World) {
    let mut expired = Vec::new();
    for (entity, (effect, pos, vel)) in
        world.query_mut::<(&mut TransientEffect, &mut Position, Option<&Velocity>)>()
    {
        if let Some(vel) = vel {
            pos.translate(*vel);
        }
        effect.ticks_left = effect.ticks_left.saturating_sub(1);
        if effect.ticks_left == 0 {
            expired.push(entity);
        }
    }
    for entity in expired {
        let _ = world.insert_one(entity, Expired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::components::EffectKind;

    #[test]
    fn test_hit_flash_lasts_six_ticks() {
        let mut world = World::new();
        let flash = world.spawn((TransientEffect::new(EffectKind::HitFlash), Position::default()));
        for _ in 0..5 {
            run(&mut world);
        }
        assert!(world.get::<&Expired>(flash).is_err());
        run(&mut world);
        assert!(world.get::<&Expired>(flash).is_ok());
    }

    #[test]
    fn test_particles_drift() {
        let mut world = World::new();
        let particle = world.spawn((
            TransientEffect::new(EffectKind::Particle),
            Position::new(10.0, 10.0),
            Velocity::new(1.0, -2.0),
        ));
        run(&mut world);
        assert_eq!(*world.get::<&Position>(particle).unwrap(), Position::new(11.0, 8.0));
        assert_eq!(world.get::<&TransientEffect>(particle).unwrap().ticks_left, 29);
    }
}
