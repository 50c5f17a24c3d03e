//! Trains the population without opening a window.

use anyhow::{Context, Result};
use clap::Parser;
use flappy_evo::cli::{Cli, init_tracing};
use flappy_evo::simulation::episode::{AbortHandle, NullRenderer};
use flappy_evo::simulation::evolution::Population;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli
        .resolve_config()
        .context("failed to load configuration")?;

    info!(
        population = config.evolution.population_size,
        generations = config.evolution.generations,
        seed = cli.seed,
        "starting headless training"
    );

    let mut population = Population::new(&config.evolution, cli.seed);
    let winner = population.run(&config.simulation, &mut NullRenderer, &AbortHandle::new());

    match winner {
        Some(genome) => info!(
            id = genome.id,
            fitness = genome.fitness,
            generation = population.generation(),
            "winner found"
        ),
        None => {
            let best = population.history().iter().map(|s| s.best_fitness).fold(f32::MIN, f32::max);
            info!(
                best_fitness = best,
                generations = population.history().len(),
                "no genome reached the fitness threshold"
            );
        }
    }
    Ok(())
}
