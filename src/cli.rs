use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::simulation::params::{Config, ConfigError};

/// Train a population of neural networks to play flappy bird.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// JSON configuration file; missing fields keep their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of generations (overrides the config file).
    #[arg(short, long)]
    pub generations: Option<u32>,

    /// Genomes per generation (overrides the config file).
    #[arg(short, long)]
    pub population: Option<usize>,

    /// Seed for pipe placement and parent selection.
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,

    /// Simulated ticks per rendered frame in the windowed front end.
    #[arg(long, default_value_t = 1)]
    pub ticks_per_frame: u32,
}

impl Cli {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };

        if let Some(generations) = self.generations {
            config.evolution.generations = generations;
        }
        if let Some(population) = self.population {
            config.evolution.population_size = population;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Installs the global `tracing` subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
