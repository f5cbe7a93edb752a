//! Game configuration resource.
//!
//! Manages tunable simulation settings loaded from an INI configuration
//! file. Provides defaults for safe startup and methods to load/save
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [field]
//! width = 640
//! height = 480
//!
//! [player]
//! speed = 4
//! lives = 3
//!
//! [alien]
//! rows = 5
//! cols = 11
//! speed = 1
//! acceleration = 3
//!
//! [enemy_fire]
//! probability = 0.0015
//! front_row_only = true
//! max_in_flight = 3
//!
//! [run]
//! seed = 24301
//! ```
//!
//! Every key of every section is optional; see [`GameConfig::save_to_file`]
//! for the full list.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_FIELD_WIDTH: f32 = 640.0;
const DEFAULT_FIELD_HEIGHT: f32 = 480.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Distances are in field units, speeds in field units per tick.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    // [field]
    pub field_width: f32,
    pub field_height: f32,

    // [player]
    pub player_speed: f32,
    pub player_lives: u32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the bottom of the field and the bottom of the ship.
    pub player_bottom_margin: f32,

    // [alien]
    pub alien_rows: u32,
    pub alien_cols: u32,
    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_spacing_x: f32,
    pub alien_spacing_y: f32,
    /// y of the first row of the first wave.
    pub alien_top: f32,
    pub alien_speed: f32,
    /// Extra speed multiplier reached when one alien is left.
    pub alien_acceleration: f32,
    pub alien_drop: f32,
    pub alien_score: u32,
    /// How much lower each new wave starts.
    pub wave_step: f32,
    pub max_wave_offset: f32,

    // [bullet]
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    /// Hits an enemy bullet absorbs before it is consumed.
    pub enemy_bullet_health: u32,

    // [enemy_fire]
    /// Per eligible alien, per tick.
    pub enemy_fire_probability: f32,
    /// Only the lowest alien of each column may fire.
    pub enemy_fire_front_row_only: bool,
    pub enemy_max_bullets: u32,

    // [bunker]
    pub bunker_count: u32,
    pub bunker_cols: u32,
    pub bunker_rows: u32,
    pub bunker_pixel_size: f32,
    pub bunker_y: f32,

    // [run]
    pub seed: u64,

    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    config.getfloat(section, key).ok().flatten().map(|v| v as f32)
}

fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    config.getuint(section, key).ok().flatten().map(|v| v as u32)
}

fn read_bool(config: &Ini, section: &str, key: &str) -> Option<bool> {
    config.getbool(section, key).ok().flatten()
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,

            player_speed: 4.0,
            player_lives: 3,
            player_width: 26.0,
            player_height: 16.0,
            player_bottom_margin: 24.0,

            alien_rows: 5,
            alien_cols: 11,
            alien_width: 24.0,
            alien_height: 16.0,
            alien_spacing_x: 36.0,
            alien_spacing_y: 28.0,
            alien_top: 64.0,
            alien_speed: 1.0,
            alien_acceleration: 3.0,
            alien_drop: 16.0,
            alien_score: 10,
            wave_step: 16.0,
            max_wave_offset: 96.0,

            bullet_width: 2.0,
            bullet_height: 8.0,
            player_bullet_speed: 8.0,
            enemy_bullet_speed: 4.0,
            enemy_bullet_health: 0,

            enemy_fire_probability: 0.0015,
            enemy_fire_front_row_only: true,
            enemy_max_bullets: 3,

            bunker_count: 4,
            bunker_cols: 22,
            bunker_rows: 16,
            bunker_pixel_size: 2.0,
            bunker_y: 368.0,

            seed: 24301,

            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        macro_rules! set {
            ($target:expr, $reader:ident, $section:literal, $key:literal) => {
                if let Some(value) = $reader(&config, $section, $key) {
                    $target = value;
                }
            };
        }

        set!(self.field_width, read_f32, "field", "width");
        set!(self.field_height, read_f32, "field", "height");

        set!(self.player_speed, read_f32, "player", "speed");
        set!(self.player_lives, read_u32, "player", "lives");
        set!(self.player_width, read_f32, "player", "width");
        set!(self.player_height, read_f32, "player", "height");
        set!(self.player_bottom_margin, read_f32, "player", "bottom_margin");

        set!(self.alien_rows, read_u32, "alien", "rows");
        set!(self.alien_cols, read_u32, "alien", "cols");
        set!(self.alien_width, read_f32, "alien", "width");
        set!(self.alien_height, read_f32, "alien", "height");
        set!(self.alien_spacing_x, read_f32, "alien", "spacing_x");
        set!(self.alien_spacing_y, read_f32, "alien", "spacing_y");
        set!(self.alien_top, read_f32, "alien", "top");
        set!(self.alien_speed, read_f32, "alien", "speed");
        set!(self.alien_acceleration, read_f32, "alien", "acceleration");
        set!(self.alien_drop, read_f32, "alien", "drop");
        set!(self.alien_score, read_u32, "alien", "score");
        set!(self.wave_step, read_f32, "alien", "wave_step");
        set!(self.max_wave_offset, read_f32, "alien", "max_wave_offset");

        set!(self.bullet_width, read_f32, "bullet", "width");
        set!(self.bullet_height, read_f32, "bullet", "height");
        set!(self.player_bullet_speed, read_f32, "bullet", "player_speed");
        set!(self.enemy_bullet_speed, read_f32, "bullet", "enemy_speed");
        set!(self.enemy_bullet_health, read_u32, "bullet", "enemy_health");

        set!(self.enemy_fire_probability, read_f32, "enemy_fire", "probability");
        set!(self.enemy_fire_front_row_only, read_bool, "enemy_fire", "front_row_only");
        set!(self.enemy_max_bullets, read_u32, "enemy_fire", "max_in_flight");

        set!(self.bunker_count, read_u32, "bunker", "count");
        set!(self.bunker_cols, read_u32, "bunker", "cols");
        set!(self.bunker_rows, read_u32, "bunker", "rows");
        set!(self.bunker_pixel_size, read_f32, "bunker", "pixel_size");
        set!(self.bunker_y, read_f32, "bunker", "y");

        if let Some(seed) = config.getuint("run", "seed").ok().flatten() {
            self.seed = seed;
        }

        info!(
            "Loaded config: {}x{} field, {} lives, {}x{} swarm, fire p={}, seed={}",
            self.field_width,
            self.field_height,
            self.player_lives,
            self.alien_cols,
            self.alien_rows,
            self.enemy_fire_probability,
            self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut put = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        put("field", "width", self.field_width.to_string());
        put("field", "height", self.field_height.to_string());

        put("player", "speed", self.player_speed.to_string());
        put("player", "lives", self.player_lives.to_string());
        put("player", "width", self.player_width.to_string());
        put("player", "height", self.player_height.to_string());
        put("player", "bottom_margin", self.player_bottom_margin.to_string());

        put("alien", "rows", self.alien_rows.to_string());
        put("alien", "cols", self.alien_cols.to_string());
        put("alien", "width", self.alien_width.to_string());
        put("alien", "height", self.alien_height.to_string());
        put("alien", "spacing_x", self.alien_spacing_x.to_string());
        put("alien", "spacing_y", self.alien_spacing_y.to_string());
        put("alien", "top", self.alien_top.to_string());
        put("alien", "speed", self.alien_speed.to_string());
        put("alien", "acceleration", self.alien_acceleration.to_string());
        put("alien", "drop", self.alien_drop.to_string());
        put("alien", "score", self.alien_score.to_string());
        put("alien", "wave_step", self.wave_step.to_string());
        put("alien", "max_wave_offset", self.max_wave_offset.to_string());

        put("bullet", "width", self.bullet_width.to_string());
        put("bullet", "height", self.bullet_height.to_string());
        put("bullet", "player_speed", self.player_bullet_speed.to_string());
        put("bullet", "enemy_speed", self.enemy_bullet_speed.to_string());
        put("bullet", "enemy_health", self.enemy_bullet_health.to_string());

        put("enemy_fire", "probability", self.enemy_fire_probability.to_string());
        put("enemy_fire", "front_row_only", self.enemy_fire_front_row_only.to_string());
        put("enemy_fire", "max_in_flight", self.enemy_max_bullets.to_string());

        put("bunker", "count", self.bunker_count.to_string());
        put("bunker", "cols", self.bunker_cols.to_string());
        put("bunker", "rows", self.bunker_rows.to_string());
        put("bunker", "pixel_size", self.bunker_pixel_size.to_string());
        put("bunker", "y", self.bunker_y.to_string());

        put("run", "seed", self.seed.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// y of the top edge of the ship. Also the row aliens must not reach.
    pub fn player_y(&self) -> f32 {
        self.field_height - self.player_bottom_margin - self.player_height
    }

    /// Total number of aliens in a wave.
    pub fn swarm_size(&self) -> usize {
        (self.alien_rows as usize).saturating_mul(self.alien_cols as usize)
    }
}
