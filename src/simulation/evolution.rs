//! Generational neuroevolution of bird brains.
//!
//! The episode only sees each genome as a decision policy plus a fitness
//! accumulator; ranking, selection, crossover and mutation all happen here
//! between episodes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::brain::Brain;
use super::episode::{AbortHandle, EpisodeSummary, SceneRenderer, Termination, run_episode};
use super::params::{EvolutionParams, Params};

/// A brain and the fitness it earned in the last episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    /// Unique identifier across all generations.
    pub id: usize,
    /// Decision network.
    pub brain: Brain,
    /// Fitness accumulated during the last episode.
    pub fitness: f32,
}

impl Genome {
    /// Creates a genome with zero fitness.
    pub fn new(id: usize, brain: Brain) -> Self {
        Self {
            id,
            brain,
            fitness: 0.0,
        }
    }

    /// Splits the genome into its policy and its fitness accumulator.
    pub fn split(&mut self) -> (&Brain, &mut f32) {
        (&self.brain, &mut self.fitness)
    }
}

/// What one generation achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generation number.
    pub generation: u32,
    /// Highest fitness in the population.
    pub best_fitness: f32,
    /// Average fitness of the population.
    pub mean_fitness: f32,
    /// Pipes passed during the episode.
    pub score: u32,
    /// Ticks the episode lasted.
    pub ticks: u64,
    /// Why the episode ended.
    pub termination: Option<Termination>,
}

/// What happened when a generation was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The next generation was bred.
    Evolved(GenerationStats),
    /// A genome reached the fitness threshold; no new generation was bred.
    Solved {
        /// Statistics of the final generation.
        stats: GenerationStats,
        /// The fittest genome.
        winner: Genome,
    },
    /// The episode was aborted; training should stop.
    Aborted(GenerationStats),
}

impl GenerationOutcome {
    /// Statistics of the generation that was closed.
    pub fn stats(&self) -> GenerationStats {
        match self {
            GenerationOutcome::Evolved(stats)
            | GenerationOutcome::Aborted(stats)
            | GenerationOutcome::Solved { stats, .. } => *stats,
        }
    }
}

/// A population of genomes bred generation after generation.
#[derive(Debug, Clone)]
pub struct Population {
    genomes: Vec<Genome>,
    params: EvolutionParams,
    generation: u32,
    next_id: usize,
    seed: u64,
    rng: StdRng,
    history: Vec<GenerationStats>,
}

impl Population {
    /// Creates a population of random brains.
    ///
    /// `seed` drives parent selection and the pipe layout of every episode.
    pub fn new(params: &EvolutionParams, seed: u64) -> Self {
        let layer_sizes = params.layer_sizes();
        let genomes = (0..params.population_size)
            .map(|id| Genome::new(id, Brain::new(&layer_sizes, params.weight_scale)))
            .collect();

        Self {
            genomes,
            params: params.clone(),
            generation: 1,
            next_id: params.population_size,
            seed,
            rng: StdRng::seed_from_u64(seed),
            history: Vec::new(),
        }
    }

    /// Current generation number, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Genomes of the current generation.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Statistics of every concluded generation.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// The fittest genome of the current generation.
    pub fn best(&self) -> Option<&Genome> {
        self.genomes
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    /// Pipe layout seed for the current generation's episode.
    pub fn episode_seed(&self) -> u64 {
        self.seed.wrapping_add(u64::from(self.generation))
    }

    /// Resets every fitness to zero and hands out `(policy, fitness)` pairs for an episode.
    pub fn contestants(&mut self) -> impl Iterator<Item = (&Brain, &mut f32)> {
        self.genomes.iter_mut().map(|genome| {
            genome.fitness = 0.0;
            genome.split()
        })
    }

    /// Ranks the genomes by fitness and records the generation's statistics.
    pub fn conclude_generation(&mut self, summary: &EpisodeSummary) -> GenerationStats {
        self.genomes
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let best_fitness = self.genomes.first().map_or(0.0, |g| g.fitness);
        let mean_fitness = if self.genomes.is_empty() {
            0.0
        } else {
            self.genomes.iter().map(|g| g.fitness).sum::<f32>() / self.genomes.len() as f32
        };

        let stats = GenerationStats {
            generation: self.generation,
            best_fitness,
            mean_fitness,
            score: summary.score,
            ticks: summary.ticks,
            termination: summary.termination,
        };

        info!(
            generation = stats.generation,
            best_fitness = stats.best_fitness,
            mean_fitness = stats.mean_fitness,
            score = stats.score,
            ticks = stats.ticks,
            population = self.genomes.len(),
            pipe_deaths = summary.pipe_deaths,
            bounds_deaths = summary.bounds_deaths,
            "generation concluded"
        );

        self.history.push(stats);
        stats
    }

    /// Breeds the next generation from the ranked current one.
    ///
    /// The elite is copied unchanged; every other slot is filled by crossover
    /// of two top parents or by a mutated clone of one.
    pub fn evolve(&mut self) {
        if self.genomes.is_empty() {
            return;
        }
        self.genomes
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let size = self.params.population_size;
        let elite = self.params.elitism.min(size).min(self.genomes.len());
        let parents = ((self.genomes.len() as f32 * self.params.survival_fraction).ceil() as usize)
            .clamp(1, self.genomes.len());

        let mut next: Vec<Genome> = self.genomes[..elite]
            .iter()
            .map(|genome| Genome::new(genome.id, genome.brain.clone()))
            .collect();

        while next.len() < size {
            let mutation_scale = sample_mutation_scale(&mut self.rng, self.params.mutation_scale);

            let brain = if parents >= 2 && self.rng.random_bool(0.5) {
                let first = self.rng.random_range(0..parents);
                let mut second = self.rng.random_range(0..parents);
                while second == first {
                    second = self.rng.random_range(0..parents);
                }

                let weight = self.rng.random::<f32>();
                let mut child = Brain::crossover_weighted(
                    &self.genomes[first].brain,
                    &self.genomes[second].brain,
                    weight,
                );
                child.mutate(mutation_scale);
                child
            } else {
                let parent = self.rng.random_range(0..parents);
                let mut child = self.genomes[parent].brain.clone();
                child.mutate(mutation_scale);
                child
            };

            next.push(Genome::new(self.next_id, brain));
            self.next_id += 1;
        }

        self.genomes = next;
        self.generation += 1;
    }

    /// Closes the current generation after its episode.
    ///
    /// Records the statistics, then stops on abort or on reaching the fitness
    /// threshold, and otherwise breeds the next generation.
    pub fn finish_generation(&mut self, summary: &EpisodeSummary) -> GenerationOutcome {
        let stats = self.conclude_generation(summary);

        if summary.termination == Some(Termination::Aborted) {
            warn!(generation = stats.generation, "training aborted");
            return GenerationOutcome::Aborted(stats);
        }
        if stats.best_fitness >= self.params.fitness_threshold {
            if let Some(winner) = self.genomes.first().cloned() {
                info!(
                    generation = stats.generation,
                    fitness = stats.best_fitness,
                    "fitness threshold reached"
                );
                return GenerationOutcome::Solved { stats, winner };
            }
        }

        self.evolve();
        GenerationOutcome::Evolved(stats)
    }

    /// Trains for up to the configured number of generations.
    ///
    /// Returns the genome that first reached the fitness threshold, or `None`
    /// if training ran out of generations or was aborted.
    pub fn run<R>(&mut self, params: &Params, renderer: &mut R, abort: &AbortHandle) -> Option<Genome>
    where
        R: SceneRenderer + ?Sized,
    {
        for _ in 0..self.params.generations {
            let generation = self.generation;
            let seed = self.episode_seed();

            let summary = run_episode(params, self.contestants(), generation, seed, renderer, abort);
            match self.finish_generation(&summary) {
                GenerationOutcome::Evolved(_) => {}
                GenerationOutcome::Solved { winner, .. } => return Some(winner),
                GenerationOutcome::Aborted(_) => return None,
            }
        }
        None
    }
}

/// Samples a mutation scale log-uniformly between `max / 100` and `max`.
fn sample_mutation_scale(rng: &mut impl Rng, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let log_min = (max / 100.0).ln();
    let log_max = max.ln();
    rng.random_range(log_min..log_max).exp()
}
