use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use invaders_app::autopilot::Autopilot;
use invaders_app::game_loop::{spawn_game_loop, LoopConfig, TICK_DURATION};
use invaders_app::logging;
use invaders_app::state::{shared_snapshot, GameLoopCommand};
use invaders_core::commands::PlayerCommand;
use invaders_core::constants::TICK_RATE;
use invaders_core::enums::{GamePhase, ReplacementPolicy, Tier, WeaponProgression};
use invaders_sim::SimConfig;

const START_TIMEOUT: Duration = Duration::from_millis(500);

/// Headless arcade shooter run by the built-in autopilot.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed; the same seed and inputs replay the same run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory holding game_config.json and high_scores.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Difficulty tier, 1 (easy) to 4 (impossible)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4), conflicts_with = "level")]
    tier: u8,

    /// Play level mode from this level instead of a tier
    #[arg(long)]
    level: Option<u32>,

    /// Simulated seconds per run before quitting
    #[arg(long, default_value_t = 60)]
    seconds: u64,

    /// Speed multiplier; 0 runs as fast as possible
    #[arg(long, default_value_t = 0.0)]
    time_scale: f64,

    /// Score-triggered explosive shots instead of level-unlocked weapons
    #[arg(long)]
    legacy_weapons: bool,

    /// Let destroyed enemies come back as strong ones
    #[arg(long)]
    strong_replacements: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            sim: SimConfig {
                seed: self.seed,
                weapon_progression: if self.legacy_weapons {
                    WeaponProgression::Legacy
                } else {
                    WeaponProgression::Unlockable
                },
                replacement_policy: if self.strong_replacements {
                    ReplacementPolicy::Probabilistic
                } else {
                    ReplacementPolicy::AlwaysBasic
                },
            },
            data_dir: self.data_dir.clone(),
            time_scale: self.time_scale,
        }
    }

    fn start_commands(&self) -> Vec<PlayerCommand> {
        match self.level {
            Some(level) => vec![PlayerCommand::OpenLevelSelect, PlayerCommand::SelectLevel { level }],
            None => {
                let tier = Tier::from_number(self.tier).unwrap_or_default();
                vec![PlayerCommand::StartTier { tier }]
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let latest = shared_snapshot();
    let (tx, handle) = spawn_game_loop(args.loop_config(), latest.clone())?;
    for command in args.start_commands() {
        tx.send(GameLoopCommand::Player(command))?;
    }

    let tick_limit = args.seconds * TICK_RATE as u64;
    let poll = if args.time_scale > 0.001 {
        TICK_DURATION.div_f64(args.time_scale * 2.0)
    } else {
        Duration::from_micros(200)
    };
    let mut pilot = Autopilot::new();
    let mut started = false;
    let mut level_select_since: Option<Instant> = None;

    loop {
        std::thread::sleep(poll);
        let Some(snapshot) = latest.lock().ok().and_then(|s| s.clone()) else {
            continue;
        };
        match snapshot.phase {
            GamePhase::Playing | GamePhase::LevelComplete => started = true,
            GamePhase::GameOver => break,
            GamePhase::Menu if started => break,
            GamePhase::LevelSelect => {
                // A level above the maximum reached leaves the picker open.
                let since = *level_select_since.get_or_insert_with(Instant::now);
                if since.elapsed() > START_TIMEOUT {
                    return Err(format!("level {:?} is not unlocked in this profile", args.level).into());
                }
            }
            _ => {}
        }
        if snapshot.time.tick >= tick_limit {
            tx.send(GameLoopCommand::Player(PlayerCommand::RequestQuit))?;
            tx.send(GameLoopCommand::Player(PlayerCommand::ConfirmQuit))?;
            break;
        }
        if let Some(decision) = pilot.observe(&snapshot) {
            if let Some(input) = decision.input {
                tx.send(GameLoopCommand::Input(input))?;
            }
            if let Some(command) = decision.command {
                tx.send(GameLoopCommand::Player(command))?;
            }
        }
    }

    tx.send(GameLoopCommand::Shutdown)?;
    let summary = handle.join().map_err(|_| "game loop panicked")?;
    info!("run finished after {} ticks", summary.ticks);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
