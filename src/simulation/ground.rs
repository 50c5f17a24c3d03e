//! Endlessly scrolling ground built from two tiles.

use serde::{Deserialize, Serialize};

use super::params::Params;
use super::sprites::GROUND_WIDTH;

/// Two ground tiles leapfrogging each other.
///
/// Whenever a tile scrolls fully off the left edge it is moved to the right
/// edge of the other tile, so together they always cover the visible width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    /// Top edge of the ground.
    pub y: f32,
    /// Left edge of the first tile.
    pub x1: f32,
    /// Left edge of the second tile.
    pub x2: f32,
}

impl Ground {
    /// Places the two tiles side by side starting at the left edge.
    pub fn new(y: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: Self::tile_width(),
        }
    }

    /// Width of one tile.
    pub fn tile_width() -> f32 {
        GROUND_WIDTH as f32
    }

    /// Scrolls both tiles one tick at pipe speed.
    pub fn advance(&mut self, params: &Params) {
        let width = Self::tile_width();
        self.x1 -= params.pipe_velocity;
        self.x2 -= params.pipe_velocity;

        if self.x1 + width < 0.0 {
            self.x1 = self.x2 + width;
        }
        if self.x2 + width < 0.0 {
            self.x2 = self.x1 + width;
        }
    }

    /// Whether the tiles jointly cover `[0, width]` without a hole.
    pub fn covers(&self, width: f32) -> bool {
        let tile = Self::tile_width();
        let (left, right) = if self.x1 <= self.x2 {
            (self.x1, self.x2)
        } else {
            (self.x2, self.x1)
        };
        left <= 0.0 && right <= left + tile && right + tile >= width
    }
}
