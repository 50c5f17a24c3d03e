//! # Flappy Evo - Neuroevolved Flappy Bird
//!
//! A side-scrolling flappy bird game in which a population of birds, each
//! flown by its own neural network, is evolved generation after generation.
//!
//! ## Features
//!
//! - Tick-exact bird kinematics (jump impulse, gravity, terminal velocity, tilt)
//! - Procedurally placed pipes driven by a seedable RNG
//! - Pixel-exact collision between sprite silhouettes
//! - Identity-keyed agent bookkeeping (bird, policy and fitness live together)
//! - Reference neuroevolution of tanh MLP brains
//! - Real-time visualization with macroquad/egui, or headless training
//!
//! ## Core Modules
//!
//! - [`simulation::episode`] - Per-tick orchestration and the episode entry point
//! - [`simulation::bird`] - Bird kinematics
//! - [`simulation::pipe`] - Pipe placement and lifecycle
//! - [`simulation::collision`] - Silhouette overlap tests
//! - [`simulation::policy`] - Decision policy and fitness interfaces
//! - [`simulation::evolution`] - Population breeding between episodes

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bird kinematics and animation.
    pub mod bird;
    /// Neural network implementation for bird brains.
    pub mod brain;
    /// Pixel-exact collision between birds and pipes.
    pub mod collision;
    /// Episode orchestration, renderer interface and cancellation.
    pub mod episode;
    /// Population management and breeding.
    pub mod evolution;
    /// Scrolling ground tiles.
    pub mod ground;
    /// Simulation and evolution parameters.
    pub mod params;
    /// Pipe pairs and their lifecycle.
    pub mod pipe;
    /// Interfaces of the decision policy and fitness accumulator.
    pub mod policy;
    /// Occupied-pixel masks.
    pub mod silhouette;
    /// Procedural sprite art and derived silhouettes.
    pub mod sprites;
}

/// Command line arguments shared by the binaries.
pub mod cli;
