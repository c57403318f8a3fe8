//! Player steering: keyboard axis with horizontal wrap, or pointer follow.

use hecs::{Entity, World};

use invaders_core::components::Player;
use invaders_core::constants::*;
use invaders_core::types::{Extent, Position};

/// Largest pointer-follow step per tick.
const POINTER_MAX_STEP: f32 = 2.0 * PLAYER_SPEED;

/// Move the player one tick.
///
/// In pointer mode the ship closes half the distance to the pointer each
/// tick, at least one unit and at most twice the keyboard speed, and stays
/// inside the playfield. Keyboard mode wraps past either edge.
pub fn run(world: &mut World, player: Entity, axis: i8, pointer_x: Option<f32>, mouse_control: bool) {
    let Ok((p, pos, extent)) = world.query_one_mut::<(&Player, &mut Position, &Extent)>(player) else {
        return;
    };
    let half_w = extent.w / 2.0;

    match pointer_x {
        Some(target) if mouse_control => {
            let target = target.clamp(half_w, PLAYFIELD_WIDTH - half_w);
            let dx = target - pos.x;
            if dx.abs() > POINTER_DEADZONE {
                let step = (dx.abs() * POINTER_SPEED_FACTOR).clamp(1.0, POINTER_MAX_STEP);
                pos.x += step.copysign(dx);
            }
            pos.x = pos.x.clamp(half_w, PLAYFIELD_WIDTH - half_w);
        }
        _ => {
            pos.x += f32::from(axis.signum()) * p.speed;
            if pos.x - half_w > PLAYFIELD_WIDTH {
                pos.x = -half_w;
            } else if pos.x + half_w < 0.0 {
                pos.x = PLAYFIELD_WIDTH + half_w;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::spawn_player;

    fn x_of(world: &World, player: Entity) -> f32 {
        world.get::<&Position>(player).unwrap().x
    }

    #[test]
    fn test_keyboard_moves_and_wraps() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        run(&mut world, player, 1, None, false);
        assert_eq!(x_of(&world, player), 408.0);
        run(&mut world, player, -1, None, false);
        run(&mut world, player, 0, None, false);
        assert_eq!(x_of(&world, player), 400.0);

        world.get::<&mut Position>(player).unwrap().x = 824.0;
        run(&mut world, player, 1, None, false);
        assert_eq!(x_of(&world, player), -25.0);
        run(&mut world, player, -1, None, false);
        assert_eq!(x_of(&world, player), 825.0);
    }

    #[test]
    fn test_pointer_follow() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        // Far pointer: capped step.
        run(&mut world, player, 0, Some(700.0), true);
        assert_eq!(x_of(&world, player), 416.0);
        // Close pointer: half the distance.
        world.get::<&mut Position>(player).unwrap().x = 400.0;
        run(&mut world, player, 0, Some(410.0), true);
        assert_eq!(x_of(&world, player), 405.0);
        // Inside the dead zone: no movement.
        run(&mut world, player, 0, Some(407.0), true);
        assert_eq!(x_of(&world, player), 405.0);
        // Pointer past the edge is clamped.
        world.get::<&mut Position>(player).unwrap().x = 770.0;
        run(&mut world, player, 0, Some(2000.0), true);
        assert_eq!(x_of(&world, player), 772.5);
    }

    #[test]
    fn test_pointer_ignored_without_mouse_control() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        run(&mut world, player, 0, Some(100.0), false);
        assert_eq!(x_of(&world, player), 400.0);
    }
}
