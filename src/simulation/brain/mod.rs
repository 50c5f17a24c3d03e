//! Feed-forward neural network used as the birds' decision policy.
//!
//! A plain tanh multi-layer perceptron with the genetic operators the
//! evolver needs (mutation and crossover).

use ndarray::Array1;

pub mod mlp;

pub use mlp::Mlp;

/// Multi-layer perceptron with tanh activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a new brain with random weights in `[-scale, scale)`.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::new_random(pair[0], pair[1], scale))
            .collect();

        Self { layers }
    }

    /// Runs a forward pass through the brain.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Creates a new brain by averaging two parent brains.
    pub fn crossover(parent1: &Brain, parent2: &Brain) -> Self {
        Self::crossover_weighted(parent1, parent2, 0.5)
    }

    /// Creates a new brain by weighted averaging two parent brains.
    ///
    /// `weight1` is the share of `parent1`; `parent2` gets the rest. Parents with
    /// different shapes cannot be blended, so `parent1` is cloned instead.
    pub fn crossover_weighted(parent1: &Brain, parent2: &Brain, weight1: f32) -> Self {
        if parent1.layer_sizes() != parent2.layer_sizes() {
            return parent1.clone();
        }

        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Mlp::crossover_weighted(layer1, layer2, weight1))
            .collect();
        Self { layers }
    }

    /// Mutates all parameters in the brain.
    pub fn mutate(&mut self, mutation_scale: f32) {
        for layer in &mut self.layers {
            layer.mutate(mutation_scale);
        }
    }

    /// Layer sizes from input to output, as passed to [`Brain::new`].
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.layers.first().map(Mlp::input_size).into_iter().collect();
        sizes.extend(self.layers.iter().map(Mlp::output_size));
        sizes
    }
}
