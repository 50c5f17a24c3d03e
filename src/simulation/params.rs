//! Simulation and evolution parameters.
//!
//! Every constant of the game lives here with its documented default. A JSON
//! config file may override any subset of them; missing fields keep their
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for [`Config`].
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside of its valid range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Simulation parameters that control a single episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Visible area width.
    pub window_width: f32,
    /// Visible area height.
    pub window_height: f32,
    /// Horizontal position of every bird (fixed for the whole episode).
    pub bird_start_x: f32,
    /// Initial vertical position of every bird.
    pub bird_start_y: f32,
    /// Gravity coefficient `a` in `d = v0*t + 0.5*a*t^2`.
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is upward).
    pub jump_velocity: f32,
    /// Maximum downward displacement per tick.
    pub terminal_velocity: f32,
    /// Extra upward displacement applied while rising.
    pub rise_boost: f32,
    /// Maximum upward tilt in degrees.
    pub max_tilt: f32,
    /// Tilt decrease per tick in degrees once the bird starts diving.
    pub tilt_velocity: f32,
    /// Lowest tilt in degrees.
    pub min_tilt: f32,
    /// Distance below the jump height the bird may fall while keeping its nose up.
    pub tilt_hold_distance: f32,
    /// Tilt at or below which the wings stop flapping.
    pub dive_tilt: f32,
    /// Ticks each wing pose is held.
    pub animation_ticks: u32,
    /// Vertical size of the opening between two pipes.
    pub pipe_gap: f32,
    /// Horizontal distance pipes and ground scroll per tick.
    pub pipe_velocity: f32,
    /// Horizontal position new pipes spawn at.
    pub pipe_spawn_x: f32,
    /// Lower bound (inclusive) for the gap height draw.
    pub gap_min: i32,
    /// Upper bound (exclusive) for the gap height draw.
    pub gap_max: i32,
    /// Vertical position of the ground line.
    pub ground_y: f32,
    /// The episode ends once the score exceeds this value.
    pub score_cap: u32,
    /// Fitness added to every bird alive at the start of a tick.
    pub survival_reward: f32,
    /// Fitness added to every surviving bird when a pipe is passed.
    pub pass_reward: f32,
    /// Fitness removed from a bird that hits a pipe.
    pub collision_penalty: f32,
    /// Policy output above which the bird jumps.
    pub jump_threshold: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            window_width: 500.0,
            window_height: 800.0,
            bird_start_x: 230.0,
            bird_start_y: 350.0,
            gravity: 3.0,
            jump_velocity: -10.5,
            terminal_velocity: 16.0,
            rise_boost: 2.0,
            max_tilt: 25.0,
            tilt_velocity: 20.0,
            min_tilt: -90.0,
            tilt_hold_distance: 50.0,
            dive_tilt: -80.0,
            animation_ticks: 5,
            pipe_gap: 200.0,
            pipe_velocity: 5.0,
            pipe_spawn_x: 600.0,
            gap_min: 50,
            gap_max: 450,
            ground_y: 730.0,
            score_cap: 50,
            survival_reward: 0.1,
            pass_reward: 5.0,
            collision_penalty: 1.0,
            jump_threshold: 0.5,
        }
    }
}

impl Params {
    /// Checks that the parameters describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(ConfigError::Invalid("window size must be positive"));
        }
        if self.gap_min >= self.gap_max {
            return Err(ConfigError::Invalid("gap_min must be below gap_max"));
        }
        if self.pipe_gap <= 0.0 {
            return Err(ConfigError::Invalid("pipe_gap must be positive"));
        }
        if self.pipe_velocity <= 0.0 {
            return Err(ConfigError::Invalid("pipe_velocity must be positive"));
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::Invalid("jump_velocity must point upward"));
        }
        if self.terminal_velocity <= 0.0 {
            return Err(ConfigError::Invalid("terminal_velocity must be positive"));
        }
        if self.animation_ticks == 0 {
            return Err(ConfigError::Invalid("animation_ticks must be non-zero"));
        }
        if self.pipe_spawn_x <= self.bird_start_x {
            return Err(ConfigError::Invalid(
                "pipe_spawn_x must be ahead of bird_start_x",
            ));
        }
        Ok(())
    }
}

/// Parameters of the reference evolver that trains the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Number of genomes per generation.
    pub population_size: usize,
    /// Maximum number of generations to run.
    pub generations: u32,
    /// Training stops once the best genome reaches this fitness.
    pub fitness_threshold: f32,
    /// Width of the single hidden layer.
    pub hidden_size: usize,
    /// Range of the initial uniform weight draw.
    pub weight_scale: f32,
    /// Range of the uniform noise added on mutation.
    pub mutation_scale: f32,
    /// Number of best genomes copied unchanged into the next generation.
    pub elitism: usize,
    /// Fraction of the ranked population eligible as parents.
    pub survival_fraction: f32,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            fitness_threshold: 100.0,
            hidden_size: 4,
            weight_scale: 1.0,
            mutation_scale: 0.2,
            elitism: 2,
            survival_fraction: 0.2,
        }
    }
}

impl EvolutionParams {
    /// Layer sizes of every brain: three observations in, one decision out.
    pub fn layer_sizes(&self) -> [usize; 3] {
        [3, self.hidden_size, 1]
    }

    /// Checks that the evolver can breed with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be non-zero"));
        }
        if self.hidden_size == 0 {
            return Err(ConfigError::Invalid("hidden_size must be non-zero"));
        }
        if self.elitism > self.population_size {
            return Err(ConfigError::Invalid(
                "elitism cannot exceed population_size",
            ));
        }
        if !(self.survival_fraction > 0.0 && self.survival_fraction <= 1.0) {
            return Err(ConfigError::Invalid(
                "survival_fraction must be in (0, 1]",
            ));
        }
        if self.weight_scale <= 0.0 || self.mutation_scale < 0.0 {
            return Err(ConfigError::Invalid("weight scales must be positive"));
        }
        Ok(())
    }
}

/// Complete configuration: game constants plus evolver settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation constants.
    pub simulation: Params,
    /// Evolver settings.
    pub evolution: EvolutionParams,
}

impl Config {
    /// Validates both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.evolution.validate()
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
