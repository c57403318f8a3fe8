//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands and
//! input, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use invaders_campaign::levels::target_score;
use invaders_campaign::unlocks::{appearance_tier, legacy_explosive_reached};
use invaders_campaign::{HighScores, MemoryStore, Profile, ProfileStore};
use invaders_core::commands::{InputFrame, PlayerCommand};
use invaders_core::components::{EffectKind, Player};
use invaders_core::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use invaders_core::enums::*;
use invaders_core::events::{AudioEvent, GameEvent};
use invaders_core::state::{GameStateSnapshot, ScoreView};
use invaders_core::types::{Extent, Position, SimTime};

use crate::progression::Progression;
use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::resolve::Resolver;
use crate::systems::snapshot::SnapshotFrame;
use crate::weapons::{self, FireOutcome, FireRequest};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub weapon_progression: WeaponProgression,
    pub replacement_policy: ReplacementPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            weapon_progression: WeaponProgression::default(),
            replacement_policy: ReplacementPolicy::default(),
        }
    }
}

/// Where unlock banners appear.
const BANNER_POSITION: Position = Position {
    x: PLAYFIELD_WIDTH / 2.0,
    y: PLAYFIELD_HEIGHT / 4.0,
};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    /// Phase to return to when the open overlay closes.
    overlay_return: GamePhase,
    mode: GameMode,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    input: InputFrame,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    audio_events: Vec<AudioEvent>,

    player: Entity,
    score: ScoreState,
    progression: Progression,
    last_bonus_ms: u64,
}

impl SimulationEngine {
    /// Create an engine with a fresh in-memory profile.
    pub fn new(config: SimConfig) -> Self {
        Self::with_store(config, Box::new(MemoryStore::new()))
    }

    /// Create an engine whose profile is loaded from and saved to `store`.
    pub fn with_store(config: SimConfig, store: Box<dyn ProfileStore + Send>) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world);
        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            overlay_return: GamePhase::Menu,
            mode: GameMode::default(),
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            input: InputFrame::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            audio_events: Vec::new(),
            player,
            score: ScoreState::default(),
            progression: Progression::load(store),
            last_bonus_ms: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Replace the current input. Fire and weapon-select requests are
    /// consumed by the next tick.
    pub fn set_input(&mut self, input: InputFrame) {
        self.input = input;
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        let input = self.take_input();

        if self.phase == GamePhase::Playing {
            self.run_systems(input);
            self.time.advance();
        }

        self.snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn profile(&self) -> &Profile {
        self.progression.profile()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Spawn an enemy at an exact position and speed (for tests needing exact geometry).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: EnemyKind, position: Position, side: f32, speed: f32) -> Entity {
        world_setup::spawn_test_enemy(&mut self.world, kind, position, side, speed)
    }

    /// Remove every enemy (for tests that need an empty sky).
    #[cfg(test)]
    pub fn clear_enemies(&mut self) {
        let enemies: Vec<Entity> = self
            .world
            .query::<&invaders_core::components::Enemy>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for entity in enemies {
            let _ = self.world.despawn(entity);
        }
    }

    #[cfg(test)]
    pub fn set_player_lives(&mut self, lives: u32) {
        if let Ok(mut p) = self.world.get::<&mut Player>(self.player) {
            p.lives = lives;
        }
    }

    #[cfg(test)]
    pub fn set_player_charge(&mut self, charge: u32) {
        if let Ok(mut p) = self.world.get::<&mut Player>(self.player) {
            p.charge = charge;
        }
    }

    /// Set the running score without touching the multiplier.
    #[cfg(test)]
    pub fn set_score(&mut self, score: u32) {
        self.score.score = score;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Requests the current phase does not
    /// allow are ignored.
    fn handle_command(&mut self, command: PlayerCommand) {
        let phase = self.phase;
        let accepted = match &command {
            PlayerCommand::StartTier { tier } => {
                let allowed = phase == GamePhase::Menu
                    && (*tier != Tier::Impossible || self.progression.config().unlock_impossible);
                if allowed {
                    self.start_run(GameMode::Tier(*tier));
                }
                allowed
            }
            PlayerCommand::OpenLevelSelect => self.open_overlay(GamePhase::LevelSelect, &[GamePhase::Menu]),
            PlayerCommand::SelectLevel { level } => {
                let max = self.progression.config().max_level_reached;
                let allowed = phase == GamePhase::LevelSelect && (1..=max).contains(level);
                if allowed {
                    self.start_run(GameMode::Level(*level));
                }
                allowed
            }
            PlayerCommand::OpenHelp => {
                self.open_overlay(GamePhase::Help, &[GamePhase::Menu, GamePhase::Playing])
            }
            PlayerCommand::OpenSettings => {
                self.open_overlay(GamePhase::Settings, &[GamePhase::Menu, GamePhase::Playing])
            }
            PlayerCommand::Back => {
                let allowed = phase.is_overlay();
                if allowed {
                    self.phase = self.overlay_return;
                }
                allowed
            }
            PlayerCommand::RequestQuit => {
                self.open_overlay(GamePhase::QuitConfirm, &[GamePhase::Menu, GamePhase::Playing])
            }
            PlayerCommand::ConfirmQuit => {
                let allowed = phase == GamePhase::QuitConfirm;
                if allowed {
                    // Quitting from the menu has no run to score.
                    if self.overlay_return == GamePhase::Playing {
                        self.record_high_score();
                    }
                    self.return_to_menu();
                }
                allowed
            }
            PlayerCommand::CancelQuit => {
                let allowed = phase == GamePhase::QuitConfirm;
                if allowed {
                    self.phase = self.overlay_return;
                }
                allowed
            }
            PlayerCommand::Continue => match phase {
                GamePhase::GameOver => {
                    self.return_to_menu();
                    true
                }
                // The mode already points at the next level.
                GamePhase::LevelComplete if self.mode.level().is_some() => {
                    self.start_run(self.mode);
                    true
                }
                _ => false,
            },
            PlayerCommand::AdjustSoundVolume { up } => self.change_settings(|c| {
                c.adjust_sound_volume(*up);
                true
            }),
            PlayerCommand::AdjustMusicVolume { up } => self.change_settings(|c| {
                c.adjust_music_volume(*up);
                true
            }),
            PlayerCommand::ToggleMouseControl => self.change_settings(|c| {
                c.mouse_control = !c.mouse_control;
                true
            }),
            PlayerCommand::ToggleFullscreen => self.change_settings(|c| {
                c.fullscreen_enabled = !c.fullscreen_enabled;
                true
            }),
            PlayerCommand::SelectSkin { skin } => self.change_settings(|c| c.select_skin(skin)),
        };

        if !accepted {
            debug!("ignored {command:?} during {phase:?}");
        }
    }

    fn open_overlay(&mut self, overlay: GamePhase, callers: &[GamePhase]) -> bool {
        let allowed = callers.contains(&self.phase);
        if allowed {
            self.overlay_return = self.phase;
            self.phase = overlay;
        }
        allowed
    }

    /// Settings commands apply only on the settings screen.
    fn change_settings(&mut self, change: impl FnOnce(&mut invaders_campaign::Config) -> bool) -> bool {
        self.phase == GamePhase::Settings && self.progression.update_config(change)
    }

    /// Begin a fresh run in `mode`: empty world, reset player and score,
    /// opening wave, clock at zero.
    fn start_run(&mut self, mode: GameMode) {
        world_setup::clear_run(&mut self.world, self.player, &mut self.despawn_buffer);
        world_setup::reset_player(&mut self.world, self.player);
        self.mode = mode;
        self.time = SimTime::default();
        self.score = ScoreState::default();
        self.last_bonus_ms = 0;
        self.input = InputFrame::default();
        world_setup::spawn_wave(&mut self.world, &mut self.rng, mode, self.time.millis());
        self.phase = GamePhase::Playing;
        info!("run started: {mode:?}");
    }

    fn return_to_menu(&mut self) {
        world_setup::clear_run(&mut self.world, self.player, &mut self.despawn_buffer);
        self.phase = GamePhase::Menu;
    }

    /// Hand out this tick's input, keeping only the held parts for the next tick.
    fn take_input(&mut self) -> InputFrame {
        let input = self.input;
        self.input.fire = None;
        self.input.select_weapon = None;
        input
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: InputFrame) {
        let now_ms = self.time.millis();

        // 1. Input: steering, weapon selection, fire
        systems::player::run(
            &mut self.world,
            self.player,
            input.axis,
            input.pointer_x,
            self.progression.config().mouse_control,
        );
        if let Some(weapon) = input.select_weapon {
            self.select_weapon(weapon, now_ms);
        }
        if let Some(intent) = input.fire {
            self.fire(intent.weapon_override, now_ms);
        }

        // 2. Advance enemies (with return fire), projectiles, sweeps, bonuses, effects
        systems::enemies::run(&mut self.world, &mut self.rng, now_ms);
        let exits = systems::projectiles::run(&mut self.world);
        systems::sweep::run(&mut self.world);
        systems::bonus::run(&mut self.world);
        systems::effects::run(&mut self.world);

        // 3. Collision detection and resolution
        let bonus_due = systems::bonus::due(now_ms, self.last_bonus_ms);
        let interactions = systems::collision::detect(&mut self.world, &exits, self.player, bonus_due);
        let out_of_lives = Resolver {
            world: &mut self.world,
            rng: &mut self.rng,
            score: &mut self.score,
            player: self.player,
            mode: self.mode,
            policy: self.config.replacement_policy,
            now_ms,
            last_bonus_ms: &mut self.last_bonus_ms,
            events: &mut self.events,
            audio_events: &mut self.audio_events,
        }
        .apply(interactions);

        // 4. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 5. Progression: appearance, legacy upgrade
        self.update_player_progress();

        // 6. Phase transition; game over wins over level complete
        if out_of_lives {
            self.game_over();
        } else {
            self.check_level_complete();
        }
    }

    /// Switch the persistent weapon. Choosing the sweep discharges it instead.
    fn select_weapon(&mut self, weapon: WeaponKind, now_ms: u64) {
        if weapon == WeaponKind::Sweep {
            self.fire(Some(WeaponKind::Sweep), now_ms);
            return;
        }
        if !self.progression.weapon_available(weapon, self.config.weapon_progression) {
            debug!("{weapon:?} is locked");
            return;
        }
        if let Ok(mut p) = self.world.get::<&mut Player>(self.player) {
            p.weapon = weapon;
        }
    }

    fn fire(&mut self, weapon_override: Option<WeaponKind>, now_ms: u64) {
        let Ok((player, pos, extent)) = self
            .world
            .query_one_mut::<(&Player, &Position, &Extent)>(self.player)
        else {
            return;
        };
        let request = FireRequest::for_player(player, weapon_override);
        if !self
            .progression
            .weapon_available(request.weapon, self.config.weapon_progression)
        {
            debug!("{:?} is locked", request.weapon);
            return;
        }
        let muzzle = Position::new(pos.x, pos.y - extent.h / 2.0);
        let outcome = weapons::fire(request, player, muzzle, self.mode.speed_tier(), now_ms);

        match outcome {
            FireOutcome::Shots(shots) => {
                for shot in shots {
                    world_setup::spawn_projectile(&mut self.world, shot);
                }
                if let Ok(mut p) = self.world.get::<&mut Player>(self.player) {
                    p.last_fire_ms = Some(now_ms);
                }
                self.audio_events.push(AudioEvent::Shoot);
            }
            FireOutcome::Sweep { origin } => {
                world_setup::spawn_sweep(&mut self.world, origin);
                if let Ok(mut p) = self.world.get::<&mut Player>(self.player) {
                    p.charge = 0;
                }
                self.audio_events.push(AudioEvent::SweepDischarge);
            }
            FireOutcome::Rejected(reason) => debug!("fire rejected: {reason:?}"),
        }
    }

    fn update_player_progress(&mut self) {
        let score = self.score.score;
        let legacy = self.config.weapon_progression == WeaponProgression::Legacy;
        let upgraded = match self.world.get::<&mut Player>(self.player) {
            Ok(mut p) => {
                p.appearance = appearance_tier(score);
                let upgrade = legacy && !p.explosive && legacy_explosive_reached(score);
                if upgrade {
                    p.explosive = true;
                }
                upgrade
            }
            Err(_) => false,
        };
        if upgraded {
            info!("explosive shots at {score} points");
            self.announce_unlock(Unlock::ExplosiveShot);
        }
    }

    fn announce_unlock(&mut self, unlock: Unlock) {
        self.events.push(GameEvent::Unlocked { unlock });
        world_setup::spawn_effect(&mut self.world, EffectKind::Banner { unlock }, BANNER_POSITION);
        self.audio_events.push(AudioEvent::UnlockFanfare);
    }

    /// The single high-score check for a finished run.
    fn record_high_score(&mut self) -> bool {
        let score = self.score.score;
        let outcome = self.progression.record_high_score(self.mode, score);
        if outcome.new_high_score {
            self.events.push(GameEvent::HighScore {
                key: HighScores::key_for(self.mode),
                score,
            });
        }
        for unlock in outcome.unlocks {
            self.announce_unlock(unlock);
        }
        outcome.new_high_score
    }

    fn game_over(&mut self) {
        let score = self.score.score;
        let new_high_score = self.record_high_score();
        self.events.push(GameEvent::GameOver { score, new_high_score });
        self.phase = GamePhase::GameOver;
        info!("game over with {score} points");
    }

    fn check_level_complete(&mut self) {
        let (Some(level), Some(target)) = (self.mode.level(), target_score(self.mode)) else {
            return;
        };
        let score = self.score.score;
        if score < target {
            return;
        }

        let outcome = self.progression.complete_level(level, score);
        if outcome.new_high_score {
            self.events.push(GameEvent::HighScore {
                key: HighScores::level_key(level),
                score,
            });
        }
        self.events.push(GameEvent::LevelCompleted {
            level,
            next_level: outcome.next_level,
        });
        for unlock in outcome.unlocks {
            self.announce_unlock(unlock);
        }
        self.mode = GameMode::Level(outcome.next_level);
        self.phase = GamePhase::LevelComplete;
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let frame = SnapshotFrame {
            time: self.time,
            phase: self.phase,
            mode: self.mode,
            score: ScoreView {
                score: self.score.score,
                multiplier_tenths: self.score.multiplier_tenths(),
                consecutive_hits: self.score.consecutive_hits(),
                high_score: self.progression.high_score(self.mode),
                target_score: target_score(self.mode),
            },
            profile: self.progression.profile().view(),
            events: std::mem::take(&mut self.events),
            audio_events: std::mem::take(&mut self.audio_events),
        };
        systems::snapshot::build_snapshot(&self.world, self.player, frame)
    }
}
