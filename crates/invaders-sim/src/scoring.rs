//! Score and combo multiplier.
//!
//! The multiplier is kept in integer tenths so point awards are exact:
//! `points = floor(base * tenths / 10)`.

use invaders_core::constants::{MULTIPLIER_BASE_TENTHS, MULTIPLIER_MAX_TENTHS};

/// Running score state for one run.
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub score: u32,
    multiplier_tenths: u32,
    consecutive_hits: u32,
    /// Set by the first kill of a streak; later kills raise the multiplier.
    armed: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            multiplier_tenths: MULTIPLIER_BASE_TENTHS,
            consecutive_hits: 0,
            armed: false,
        }
    }
}

impl ScoreState {
    pub fn multiplier_tenths(&self) -> u32 {
        self.multiplier_tenths
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }

    /// One step up: `min(5.0, 1.0 + 0.1 * (hits + 1))`.
    pub fn increase(&mut self) {
        self.consecutive_hits = self.consecutive_hits.saturating_add(1);
        self.multiplier_tenths = MULTIPLIER_BASE_TENTHS
            .saturating_add(self.consecutive_hits)
            .min(MULTIPLIER_MAX_TENTHS);
    }

    /// A miss ends the streak.
    pub fn miss(&mut self) {
        self.multiplier_tenths = MULTIPLIER_BASE_TENTHS;
        self.consecutive_hits = 0;
        self.armed = false;
    }

    /// Score one destroyed enemy worth `base` points and return the points awarded.
    ///
    /// The opening kill of a streak scores at the current multiplier and arms
    /// the streak. Every later kill takes one multiplier step before scoring,
    /// so kills in the same tick compound in destruction order.
    pub fn award_kill(&mut self, base: u32) -> u32 {
        if self.armed {
            self.increase();
        } else {
            self.armed = true;
        }
        let points = base * self.multiplier_tenths / 10;
        self.score = self.score.saturating_add(points);
        points
    }
}
