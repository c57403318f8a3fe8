//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside the thread so the profile store never
//! crosses threads after loading. Commands and input arrive via `mpsc`;
//! every snapshot is folded into the run summary and stored for polling.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use invaders_campaign::JsonProfileStore;
use invaders_core::constants::TICK_RATE;
use invaders_core::state::GameStateSnapshot;
use invaders_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, RunSummary, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop builds its engine and paces its ticks.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub sim: SimConfig,
    /// Directory for the config and high-score files. `None` keeps the profile in memory.
    pub data_dir: Option<PathBuf>,
    /// Speed multiplier; `0` runs ticks back to back.
    pub time_scale: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            data_dir: None,
            time_scale: 1.0,
        }
    }
}

impl LoopConfig {
    fn tick_duration(&self) -> Option<Duration> {
        (self.time_scale > 0.001).then(|| TICK_DURATION.div_f64(self.time_scale))
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary
/// once the loop stops.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("invaders-game-loop".into())
        .spawn(move || {
            let engine = build_engine(&config);
            run_game_loop(engine, &config, cmd_rx, &latest_snapshot)
        })?;

    Ok((cmd_tx, handle))
}

fn build_engine(config: &LoopConfig) -> SimulationEngine {
    match &config.data_dir {
        Some(dir) => {
            info!("profile directory {}", dir.display());
            SimulationEngine::with_store(config.sim, Box::new(JsonProfileStore::new(dir.clone())))
        }
        None => SimulationEngine::new(config.sim),
    }
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    config: &LoopConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let tick_duration = config.tick_duration();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        let mut queued = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    engine.queue_command(cmd);
                    queued = true;
                }
                Ok(GameLoopCommand::Input(input)) => engine.set_input(input),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    // Commands sent ahead of the shutdown still take effect.
                    if queued {
                        publish(engine.tick(), &mut summary, latest_snapshot);
                    }
                    debug!("game loop stopping after {} ticks", summary.ticks);
                    return summary;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine holds time outside the Playing phase)
        // 3. Store latest snapshot for polling
        publish(engine.tick(), &mut summary, latest_snapshot);

        // 4. Sleep until next tick
        let Some(tick_duration) = tick_duration else {
            std::thread::yield_now();
            continue;
        };
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

fn publish(snapshot: GameStateSnapshot, summary: &mut RunSummary, latest_snapshot: &SharedSnapshot) {
    summary.record(&snapshot);
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot);
    }
}
