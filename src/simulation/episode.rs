//! One episode of the game: a population of birds against an endless run of pipes.
//!
//! The episode owns every bird together with its decision policy and fitness
//! accumulator in a single slot map, so removing a bird removes all three at
//! once. It advances strictly tick by tick; rendering and frame pacing are the
//! caller's business.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, trace};

use super::bird::Bird;
use super::collision::collides;
use super::ground::Ground;
use super::params::Params;
use super::pipe::Pipe;
use super::policy::{DecisionPolicy, FitnessAccumulator, Observation};
use super::sprites::Silhouettes;

new_key_type! {
    /// Stable handle of a bird within one episode.
    pub struct AgentId;
}

/// A bird bound to the policy that flies it and the fitness it earns.
#[derive(Debug)]
pub struct Contestant<P, F> {
    /// Kinematic state.
    pub bird: Bird,
    policy: P,
    fitness: F,
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every bird died.
    Extinct,
    /// The score exceeded the cap.
    ScoreCap,
    /// The episode was cancelled from outside.
    Aborted,
}

/// Lifecycle state of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    /// Ticks are still being simulated.
    Running,
    /// No further ticks will be simulated.
    Terminated(Termination),
}

impl EpisodeStatus {
    /// Whether the episode still accepts ticks.
    pub fn is_running(self) -> bool {
        self == EpisodeStatus::Running
    }
}

/// Cloneable cancellation flag checked at every tick boundary.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    /// Creates an untriggered handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination before the next tick.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether termination was requested.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a finished (or interrupted) episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSummary {
    /// Generation this episode was run for.
    pub generation: u32,
    /// Pipes passed.
    pub score: u32,
    /// Ticks simulated.
    pub ticks: u64,
    /// Why the episode ended, if it did.
    pub termination: Option<Termination>,
    /// Birds removed by hitting a pipe.
    pub pipe_deaths: usize,
    /// Birds removed by hitting the ground or leaving the screen.
    pub bounds_deaths: usize,
}

/// Read-only view of the scene handed to a renderer.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Living birds in stable order.
    pub birds: Vec<&'a Bird>,
    /// Number of living birds.
    pub alive: usize,
    /// Pipes from left to right.
    pub pipes: &'a [Pipe],
    /// Ground tiles.
    pub ground: &'a Ground,
    /// Pipes passed so far.
    pub score: u32,
    /// Generation being played.
    pub generation: u32,
}

/// Draws frames; called once per simulated tick.
pub trait SceneRenderer {
    /// Presents the current scene.
    fn render(&mut self, frame: &Frame<'_>);
}

/// Renderer that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) {}
}

/// The simulation state of one generation.
#[derive(Debug)]
pub struct Episode<P, F> {
    params: Params,
    silhouettes: Silhouettes,
    contestants: SlotMap<AgentId, Contestant<P, F>>,
    /// Pipes from left to right.
    pub pipes: Vec<Pipe>,
    /// Scrolling ground.
    pub ground: Ground,
    /// Pipes passed so far.
    pub score: u32,
    generation: u32,
    ticks: u64,
    rng: StdRng,
    status: EpisodeStatus,
    abort: AbortHandle,
    pipe_deaths: usize,
    bounds_deaths: usize,
}

impl<P, F> Episode<P, F>
where
    P: DecisionPolicy,
    F: FitnessAccumulator,
{
    /// Creates an episode with one bird per `(policy, fitness)` pair.
    ///
    /// Birds start at the configured position and a first pipe is placed at the
    /// spawn distance. `seed` drives every gap height drawn in this episode.
    pub fn new(
        params: &Params,
        population: impl IntoIterator<Item = (P, F)>,
        generation: u32,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut contestants = SlotMap::with_key();
        for (policy, fitness) in population {
            contestants.insert(Contestant {
                bird: Bird::new(params.bird_start_x, params.bird_start_y),
                policy,
                fitness,
            });
        }

        let pipes = vec![Pipe::spawn(params.pipe_spawn_x, &mut rng, params)];

        Self {
            params: params.clone(),
            silhouettes: Silhouettes::new(),
            contestants,
            pipes,
            ground: Ground::new(params.ground_y),
            score: 0,
            generation,
            ticks: 0,
            rng,
            status: EpisodeStatus::Running,
            abort: AbortHandle::new(),
            pipe_deaths: 0,
            bounds_deaths: 0,
        }
    }

    /// Replaces the episode's cancellation flag with a shared one.
    #[must_use]
    pub fn with_abort_handle(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    /// A handle that cancels this episode at the next tick boundary.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Index of the pipe birds currently observe.
    ///
    /// The first pipe, unless the leading bird has fully cleared it and a
    /// second pipe exists. `None` without birds or pipes.
    pub fn active_pipe(&self) -> Option<usize> {
        let leader = self.contestants.values().next()?;
        match self.pipes.as_slice() {
            [] => None,
            [first, _, ..] if leader.bird.x > first.trailing_edge() => Some(1),
            _ => Some(0),
        }
    }

    /// Simulates one tick and returns the resulting status.
    ///
    /// Once terminated, further calls do nothing.
    pub fn tick(&mut self) -> EpisodeStatus {
        if !self.status.is_running() {
            return self.status;
        }
        if self.abort.is_aborted() {
            return self.terminate(Termination::Aborted);
        }

        if self.pipes.is_empty() {
            let pipe = Pipe::spawn(self.params.pipe_spawn_x, &mut self.rng, &self.params);
            self.pipes.push(pipe);
        }
        let Some(active) = self.active_pipe() else {
            return self.terminate(Termination::Extinct);
        };
        self.ticks += 1;

        self.think(active);

        let spawn_due = self.resolve_pipes();
        if self.contestants.is_empty() {
            return self.terminate(Termination::Extinct);
        }

        let retired: Vec<bool> = self.pipes.iter().map(Pipe::is_off_screen).collect();
        for pipe in &mut self.pipes {
            pipe.advance(&self.params);
        }

        if spawn_due {
            self.score += 1;
            for contestant in self.contestants.values_mut() {
                contestant.fitness.add(self.params.pass_reward);
            }
            let pipe = Pipe::spawn(self.params.pipe_spawn_x, &mut self.rng, &self.params);
            self.pipes.push(pipe);
        }

        let mut retired = retired.into_iter();
        self.pipes.retain(|_| !retired.next().unwrap_or(false));

        let params = &self.params;
        let before = self.contestants.len();
        self.contestants.retain(|id, contestant| {
            let inside = !contestant.bird.is_out_of_bounds(params);
            if !inside {
                trace!(?id, y = contestant.bird.y, "bird left the playfield");
            }
            inside
        });
        self.bounds_deaths += before - self.contestants.len();

        if self.score > self.params.score_cap {
            return self.terminate(Termination::ScoreCap);
        }

        self.ground.advance(&self.params);
        for contestant in self.contestants.values_mut() {
            contestant.bird.flap(&self.params);
        }
        self.status
    }

    /// Moves every bird, pays the survival reward and applies each policy's decision.
    fn think(&mut self, active: usize) {
        let pipe = &self.pipes[active];
        for contestant in self.contestants.values_mut() {
            contestant.bird.advance(&self.params);
            contestant.fitness.add(self.params.survival_reward);

            let observation = Observation::new(&contestant.bird, pipe);
            if contestant.policy.decide(observation) > self.params.jump_threshold {
                contestant.bird.jump(&self.params);
            }
        }
    }

    /// Removes birds that hit a pipe and marks pipes that have been flown past.
    ///
    /// Returns whether any pipe was passed for the first time this tick.
    fn resolve_pipes(&mut self) -> bool {
        let ids: Vec<AgentId> = self.contestants.keys().collect();
        let mut spawn_due = false;

        for pipe in &mut self.pipes {
            for &id in &ids {
                let Some(contestant) = self.contestants.get_mut(id) else {
                    continue;
                };
                let bird_x = contestant.bird.x;

                if collides(&contestant.bird, pipe, &self.silhouettes) {
                    contestant.fitness.add(-self.params.collision_penalty);
                    trace!(?id, pipe_x = pipe.x, "bird hit a pipe");
                    self.contestants.remove(id);
                    self.pipe_deaths += 1;
                }

                if !pipe.passed && pipe.x < bird_x {
                    pipe.passed = true;
                    spawn_due = true;
                    trace!(pipe_x = pipe.x, "pipe passed");
                }
            }
        }
        spawn_due
    }

    fn terminate(&mut self, termination: Termination) -> EpisodeStatus {
        self.status = EpisodeStatus::Terminated(termination);
        debug!(
            generation = self.generation,
            score = self.score,
            ticks = self.ticks,
            ?termination,
            "episode finished"
        );
        self.status
    }
}

impl<P, F> Episode<P, F> {
    /// Current lifecycle state.
    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// Parameters this episode runs with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Generation this episode was created for.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of living birds.
    pub fn alive(&self) -> usize {
        self.contestants.len()
    }

    /// Handles of the living birds in stable order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.contestants.keys()
    }

    /// Living birds in stable order.
    pub fn birds(&self) -> impl Iterator<Item = &Bird> + '_ {
        self.contestants.values().map(|c| &c.bird)
    }

    /// The bird behind `id`, if it is still alive.
    pub fn bird(&self, id: AgentId) -> Option<&Bird> {
        self.contestants.get(id).map(|c| &c.bird)
    }

    /// Mutable access to the bird behind `id`, if it is still alive.
    pub fn bird_mut(&mut self, id: AgentId) -> Option<&mut Bird> {
        self.contestants.get_mut(id).map(|c| &mut c.bird)
    }

    /// Snapshot of the scene for a renderer.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            birds: self.birds().collect(),
            alive: self.contestants.len(),
            pipes: &self.pipes,
            ground: &self.ground,
            score: self.score,
            generation: self.generation,
        }
    }

    /// Summary of the episode so far.
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            generation: self.generation,
            score: self.score,
            ticks: self.ticks,
            termination: match self.status {
                EpisodeStatus::Running => None,
                EpisodeStatus::Terminated(termination) => Some(termination),
            },
            pipe_deaths: self.pipe_deaths,
            bounds_deaths: self.bounds_deaths,
        }
    }
}

/// Plays one full episode, rendering after every tick, and returns its summary.
///
/// This is the entry point an evolutionary loop calls once per generation.
pub fn run_episode<P, F, R>(
    params: &Params,
    population: impl IntoIterator<Item = (P, F)>,
    generation: u32,
    seed: u64,
    renderer: &mut R,
    abort: &AbortHandle,
) -> EpisodeSummary
where
    P: DecisionPolicy,
    F: FitnessAccumulator,
    R: SceneRenderer + ?Sized,
{
    let mut episode =
        Episode::new(params, population, generation, seed).with_abort_handle(abort.clone());

    while episode.tick().is_running() {
        renderer.render(&episode.frame());
    }
    episode.summary()
}
