//! Weapon firing rules.
//!
//! `fire` turns one [`FireRequest`] into the shots or sweep it emits, or the
//! reason it was refused. It never touches the world; the engine spawns the
//! result and updates the player's cooldown and charge.

use invaders_core::components::{Player, ProjectileKind};
use invaders_core::constants::*;
use invaders_core::enums::{Tier, WeaponKind};
use invaders_core::types::{Extent, Position, Velocity};

/// One resolved fire attempt: the weapon to use and the charge on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequest {
    pub weapon: WeaponKind,
    pub charge_available: u32,
}

impl FireRequest {
    pub fn for_player(player: &Player, weapon_override: Option<WeaponKind>) -> Self {
        Self {
            weapon: weapon_override.unwrap_or(player.weapon),
            charge_available: player.charge,
        }
    }
}

/// A projectile ready to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub kind: ProjectileKind,
    pub position: Position,
    pub velocity: Velocity,
    pub extent: Extent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    Cooldown,
    Undercharged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    Shots(Vec<ShotSpec>),
    Sweep { origin: Position },
    Rejected(FireRejection),
}

/// Resolve a fire request.
///
/// `muzzle` is the player's mid-top point. Shots and spreads are gated by the
/// shared cooldown; the sweep is gated only by charge.
pub fn fire(
    request: FireRequest,
    player: &Player,
    muzzle: Position,
    speed_tier: Tier,
    now_ms: u64,
) -> FireOutcome {
    match request.weapon {
        WeaponKind::Sweep => {
            if request.charge_available >= SWEEP_CHARGE_THRESHOLD {
                FireOutcome::Sweep { origin: muzzle }
            } else {
                FireOutcome::Rejected(FireRejection::Undercharged)
            }
        }
        _ if !player.cooldown_elapsed(now_ms) => FireOutcome::Rejected(FireRejection::Cooldown),
        WeaponKind::Standard => FireOutcome::Shots(vec![straight_shot(player.explosive, muzzle, speed_tier)]),
        WeaponKind::Spread => FireOutcome::Shots(spread_volley(muzzle, speed_tier)),
    }
}

fn straight_shot(explosive: bool, muzzle: Position, speed_tier: Tier) -> ShotSpec {
    let (kind, extent) = if explosive {
        (
            ProjectileKind::Explosive {
                radius: EXPLOSION_RADIUS,
            },
            Extent::from(EXPLOSIVE_SHOT_SIZE),
        )
    } else {
        (ProjectileKind::Standard, Extent::from(STANDARD_SHOT_SIZE))
    };
    let speed = match speed_tier {
        Tier::Easy => STANDARD_SHOT_SPEED_EASY,
        _ => STANDARD_SHOT_SPEED,
    };
    ShotSpec {
        kind,
        position: above(muzzle, extent),
        velocity: Velocity::new(0.0, -speed),
        extent,
    }
}

fn spread_volley(muzzle: Position, speed_tier: Tier) -> Vec<ShotSpec> {
    let speed = match speed_tier {
        Tier::Easy => SPREAD_SHOT_SPEED_EASY,
        _ => SPREAD_SHOT_SPEED,
    };
    let extent = Extent::from(SPREAD_SHOT_SIZE);
    SPREAD_ANGLES_DEG
        .iter()
        .map(|&angle_deg| ShotSpec {
            kind: ProjectileKind::Spread {
                angle_deg,
                travelled: 0.0,
                range: SPREAD_RANGE,
            },
            position: above(muzzle, extent),
            velocity: Velocity::new(angle_deg.to_radians().sin() * SPREAD_LATERAL_FACTOR, -speed),
            extent,
        })
        .collect()
}

/// Centre of a box of `extent` whose bottom edge sits on `muzzle`.
fn above(muzzle: Position, extent: Extent) -> Position {
    Position::new(muzzle.x, muzzle.y - extent.h / 2.0)
}
