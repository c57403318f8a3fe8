//! Player commands and per-tick input sent to the simulation.
//!
//! Commands are phase-transition and settings requests, queued and processed
//! at the next tick boundary. The engine accepts or rejects each one based on
//! the current phase. Continuous control arrives as an [`InputFrame`].

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Menu ---
    /// Start a tier-mode run. The Impossible tier must be unlocked.
    StartTier { tier: Tier },
    /// Open the level picker.
    OpenLevelSelect,
    /// Start a level-mode run at a level no higher than the maximum reached.
    SelectLevel { level: u32 },
    OpenHelp,
    OpenSettings,
    /// Close the current overlay and return to the phase that opened it.
    Back,

    // --- In game ---
    /// Ask to abandon the current run.
    RequestQuit,
    /// Abandon the run. Records a high score if one was set.
    ConfirmQuit,
    CancelQuit,
    /// Leave Game Over for the menu, or start the next level after Level Complete.
    Continue,

    // --- Settings ---
    AdjustSoundVolume { up: bool },
    AdjustMusicVolume { up: bool },
    ToggleMouseControl,
    ToggleFullscreen,
    SelectSkin { skin: String },
}

/// A request to fire, optionally with a weapon other than the selected one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireIntent {
    /// Fire this weapon without changing the persistent selection.
    pub weapon_override: Option<WeaponKind>,
}

/// One tick's worth of player input.
///
/// `axis` and `pointer_x` hold until replaced; `fire` and `select_weapon`
/// are consumed by the first tick that sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Horizontal intent: -1 left, 0 idle, 1 right.
    pub axis: i8,
    /// Pointer x position, used only in pointer-control mode.
    pub pointer_x: Option<f32>,
    pub fire: Option<FireIntent>,
    pub select_weapon: Option<WeaponKind>,
}

impl InputFrame {
    pub fn fire() -> Self {
        Self {
            fire: Some(FireIntent::default()),
            ..Default::default()
        }
    }

    pub fn with_axis(mut self, axis: i8) -> Self {
        self.axis = axis.signum();
        self
    }

    pub fn with_override(mut self, weapon: WeaponKind) -> Self {
        self.fire = Some(FireIntent {
            weapon_override: Some(weapon),
        });
        self
    }
}
