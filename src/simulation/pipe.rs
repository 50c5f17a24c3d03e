//! Pipe pairs: procedural placement, scrolling and retirement.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::Params;
use super::sprites::{PIPE_HEIGHT, PIPE_WIDTH};

/// A scrolling pair of pipes with an opening between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge of both pipes.
    pub x: f32,
    /// Upper edge of the opening.
    pub gap_y: f32,
    /// Top edge of the upper pipe sprite (`gap_y - PIPE_HEIGHT`).
    pub top: f32,
    /// Top edge of the lower pipe sprite (`gap_y + pipe_gap`).
    pub bottom: f32,
    /// Set once a bird has flown past this pipe; never cleared.
    pub passed: bool,
}

impl Pipe {
    /// Creates a pipe at `x` with its opening starting at `gap_y`.
    ///
    /// `gap_y` is clamped into `[gap_min, gap_max]` so the opening is always reachable.
    pub fn new(x: f32, gap_y: f32, params: &Params) -> Self {
        let low = params.gap_min as f32;
        let high = (params.gap_max as f32).max(low);
        let gap_y = gap_y.clamp(low, high);

        Self {
            x,
            gap_y,
            top: gap_y - PIPE_HEIGHT as f32,
            bottom: gap_y + params.pipe_gap,
            passed: false,
        }
    }

    /// Creates a pipe at `x` with a uniformly drawn opening height.
    pub fn spawn(x: f32, rng: &mut impl Rng, params: &Params) -> Self {
        let gap_y = if params.gap_min < params.gap_max {
            rng.random_range(params.gap_min..params.gap_max)
        } else {
            params.gap_min
        };
        Self::new(x, gap_y as f32, params)
    }

    /// Scrolls the pipe one tick to the left.
    pub fn advance(&mut self, params: &Params) {
        self.x -= params.pipe_velocity;
    }

    /// Whether the trailing edge has left the screen.
    pub fn is_off_screen(&self) -> bool {
        self.x + (PIPE_WIDTH as f32) < 0.0
    }

    /// Right edge of the pipe.
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH as f32
    }
}
