//! Invaders headless runner.
//!
//! Drives the simulation core without a window: an autopilot stands in for
//! the keyboard, the render handle is a placeholder, and the run ends when
//! the state stack quits or the frame limit is reached. A summary is printed
//! at the end, as text or JSON.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 5000 --seed 7 --json
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use rustc_hash::FxHashSet;
use serde::Serialize;

use invaders::components::alien::Alien;
use invaders::components::deleted::Deleted;
use invaders::components::mapposition::MapPosition;
use invaders::components::player::{Controllable, Player};
use invaders::resources::gameconfig::GameConfig;
use invaders::resources::gamerng::GameRng;
use invaders::resources::gameresources::GameResources;
use invaders::resources::input::{InputSource, Key};
use invaders::resources::worldtime::WorldTime;
use invaders::states::machine::StateMachine;
use invaders::states::{MainMenuState, StateKind};
use invaders::systems::input::capture_input;

/// Headless space invaders simulation
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file; defaults are used if it cannot be read.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Stop after this many frames even if the game is still running.
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Override the configured random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Write the default configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

/// Stand-in render target; the core never looks inside it.
struct HeadlessFrame;

#[derive(Serialize, Debug, Default)]
struct RunSummary {
    frames: u64,
    seed: u64,
    score: u32,
    lives: u32,
    waves_cleared: u32,
    final_state: Option<String>,
    quit: bool,
}

/// Scripted player: starts a game, tracks the lowest alien while firing,
/// dismisses the death screen and exits from the game over menu.
#[derive(Default)]
struct Autopilot {
    held: FxHashSet<Key>,
    pressed: FxHashSet<Key>,
    state: Option<StateKind>,
    ticks_in_state: u64,
}

impl InputSource for Autopilot {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn is_just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

impl Autopilot {
    fn plan(&mut self, world: &mut World, top: Option<StateKind>) {
        self.held.clear();
        self.pressed.clear();
        if top == self.state {
            self.ticks_in_state += 1;
        } else {
            self.state = top;
            self.ticks_in_state = 0;
        }

        let ticks = self.ticks_in_state;
        match top {
            Some(StateKind::MainMenu) | Some(StateKind::PauseMenu) if ticks == 1 => {
                self.press(Key::Enter)
            }
            Some(StateKind::Death) if ticks == 60 => self.press(Key::Enter),
            Some(StateKind::GameOver) => match ticks {
                1 | 3 => self.press(Key::Down),
                5 => self.press(Key::Enter),
                _ => {}
            },
            Some(StateKind::Gameplay) => self.steer(world),
            _ => {}
        }
    }

    fn press(&mut self, key: Key) {
        self.held.insert(key);
        self.pressed.insert(key);
    }

    fn steer(&mut self, world: &mut World) {
        let ship = world
            .query_filtered::<(&MapPosition, &Controllable), (With<Player>, Without<Deleted>)>()
            .iter(world)
            .next()
            .map(|(position, ship)| position.x() + ship.width * 0.5);
        let target = world
            .query_filtered::<(&MapPosition, &Alien), Without<Deleted>>()
            .iter(world)
            .max_by(|a, b| a.0.y().total_cmp(&b.0.y()))
            .map(|(position, alien)| position.x() + alien.width * 0.5);

        if let (Some(ship), Some(target)) = (ship, target) {
            if target < ship - 2.0 {
                self.held.insert(Key::Left);
            } else if target > ship + 2.0 {
                self.held.insert(Key::Right);
            }
        }
        if self.ticks_in_state % 2 == 0 {
            self.press(Key::Space);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default configuration and quit
    if let Some(path) = cli.write_config {
        let config = GameConfig::with_path(path.clone());
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default configuration written to {}", path.display());
        return;
    }

    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let mut summary = RunSummary {
        seed: config.seed,
        ..RunSummary::default()
    };

    let mut world = World::new();
    world.insert_resource(GameRng::with_seed(config.seed));
    world.insert_resource(config);

    let mut machine = StateMachine::new();
    machine.start(&mut world, MainMenuState::default());

    let mut autopilot = Autopilot::default();
    let mut frame = HeadlessFrame;

    while machine.is_running() && summary.frames < cli.frames {
        autopilot.plan(&mut world, machine.top());
        capture_input(&mut world, &autopilot);

        if let Err(e) = machine.update(&mut world, &mut frame) {
            log::error!("Simulation aborted at frame {}: {}", summary.frames, e);
            std::process::exit(1);
        }
        summary.frames = world
            .get_resource::<WorldTime>()
            .map_or(summary.frames + 1, |time| time.frame_count);

        if let Some(game) = world.get_resource::<GameResources>() {
            summary.score = game.score;
            summary.lives = game.lives;
            summary.waves_cleared = game.wave;
        }
    }

    summary.quit = !machine.is_running();
    summary.final_state = machine.top().map(|kind| format!("{:?}", kind));
    log::info!("Run finished after {} frames", summary.frames);

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize run summary: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "frames={} seed={} score={} lives={} waves_cleared={} final_state={} quit={}",
            summary.frames,
            summary.seed,
            summary.score,
            summary.lives,
            summary.waves_cleared,
            summary.final_state.as_deref().unwrap_or("none"),
            summary.quit
        );
    }
}
