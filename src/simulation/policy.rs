//! Interfaces to the collaborators that decide and score.
//!
//! The simulation core only ever *asks* a [`DecisionPolicy`] for an action and
//! *adds* to a [`FitnessAccumulator`]; it never inspects either.

use ndarray::Array1;

use super::bird::Bird;
use super::brain::Brain;
use super::pipe::Pipe;

/// What a bird sees each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// The bird's vertical position.
    pub height: f32,
    /// Distance to the upper edge of the active opening.
    pub to_gap_top: f32,
    /// Distance to the lower edge of the active opening.
    pub to_gap_bottom: f32,
}

impl Observation {
    /// Observation of `bird` relative to the active `pipe`.
    pub fn new(bird: &Bird, pipe: &Pipe) -> Self {
        Self {
            height: bird.y,
            to_gap_top: (bird.y - pipe.gap_y).abs(),
            to_gap_bottom: (bird.y - pipe.bottom).abs(),
        }
    }

    /// The observation as network inputs.
    pub fn to_array(self) -> [f32; 3] {
        [self.height, self.to_gap_top, self.to_gap_bottom]
    }
}

/// Maps an observation to a jump signal.
///
/// Implementations must be pure: the same observation always yields the same output.
pub trait DecisionPolicy {
    /// Scalar decision; values above the jump threshold mean "jump".
    fn decide(&self, observation: Observation) -> f32;
}

impl<T: DecisionPolicy + ?Sized> DecisionPolicy for &T {
    fn decide(&self, observation: Observation) -> f32 {
        (**self).decide(observation)
    }
}

impl DecisionPolicy for Brain {
    fn decide(&self, observation: Observation) -> f32 {
        let inputs = Array1::from_vec(observation.to_array().to_vec());
        self.think(&inputs).first().copied().unwrap_or(0.0)
    }
}

/// Adapts a closure into a [`DecisionPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct FnPolicy<F>(pub F);

impl<F: Fn(Observation) -> f32> DecisionPolicy for FnPolicy<F> {
    fn decide(&self, observation: Observation) -> f32 {
        (self.0)(observation)
    }
}

/// Running fitness of one agent.
pub trait FitnessAccumulator {
    /// Adds `delta` (possibly negative) to the fitness.
    fn add(&mut self, delta: f32);
}

impl<T: FitnessAccumulator + ?Sized> FitnessAccumulator for &mut T {
    fn add(&mut self, delta: f32) {
        (**self).add(delta);
    }
}

impl FitnessAccumulator for f32 {
    fn add(&mut self, delta: f32) {
        *self += delta;
    }
}

impl FitnessAccumulator for f64 {
    fn add(&mut self, delta: f32) {
        *self += f64::from(delta);
    }
}
