//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// Centre of an entity in playfield space.
/// x grows to the right, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Per-tick displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Width and height of an entity's axis-aligned collision box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub w: f32,
    pub h: f32,
}

/// Axis-aligned bounding box built from a centre and an extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    /// Direction to `other` in degrees, counter-clockwise from +x with the
    /// screen's y axis flipped, normalised to `[0, 360)`.
    pub fn screen_angle_to(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (-dy).atan2(dx).to_degrees().rem_euclid(360.0)
    }

    pub fn translate(&mut self, velocity: Velocity) {
        self.x += velocity.x;
        self.y += velocity.y;
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (units per tick).
    pub fn speed(&self) -> f32 {
        Vec2::new(self.x, self.y).length()
    }

    /// Velocity of `speed` along a screen angle (0° right, 90° up).
    pub fn from_screen_angle(degrees: f32, speed: f32) -> Self {
        let dir = Vec2::from_angle(degrees.to_radians()) * speed;
        Self { x: dir.x, y: -dir.y }
    }
}

impl Extent {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    pub fn square(side: f32) -> Self {
        Self { w: side, h: side }
    }
}

impl From<(f32, f32)> for Extent {
    fn from((w, h): (f32, f32)) -> Self {
        Self { w, h }
    }
}

impl Aabb {
    pub fn around(center: Position, extent: Extent) -> Self {
        let hw = extent.w / 2.0;
        let hh = extent.h / 2.0;
        Self {
            left: center.x - hw,
            top: center.y - hh,
            right: center.x + hw,
            bottom: center.y + hh,
        }
    }

    /// True when the two boxes share interior area. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

impl SimTime {
    /// Milliseconds of tick time elapsed since the run started.
    pub fn millis(&self) -> u64 {
        self.tick * 1000 / TICK_RATE as u64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
