//! Bird kinematics: jump impulse, gravity, terminal velocity and tilt.
//!
//! All motion is expressed per tick. A bird accumulates ticks since its last
//! jump and derives its displacement from that count, so the trajectory after
//! every jump is the same parabola clamped at the terminal fall speed.

use serde::{Deserialize, Serialize};

use super::params::Params;
use super::silhouette::Silhouette;
use super::sprites::{self, Silhouettes};

/// Wing position of the current animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WingPose {
    /// Wings raised.
    Up,
    /// Wings level with the body.
    Level,
    /// Wings lowered.
    Down,
}

impl WingPose {
    /// All poses in sprite-sheet order.
    pub const ALL: [WingPose; 3] = [WingPose::Up, WingPose::Level, WingPose::Down];

    /// Position of this pose in [`WingPose::ALL`].
    pub fn index(self) -> usize {
        match self {
            WingPose::Up => 0,
            WingPose::Level => 1,
            WingPose::Down => 2,
        }
    }
}

/// Vertical displacement for the tick `ticks` after a jump with `velocity`.
///
/// Downward displacement is capped at the terminal velocity; upward
/// displacement gets the extra rise boost.
pub fn displacement(velocity: f32, ticks: u32, params: &Params) -> f32 {
    let t = ticks as f32;
    let mut d = velocity * t + 0.5 * params.gravity * t * t;

    if d >= params.terminal_velocity {
        d = params.terminal_velocity;
    }
    if d < 0.0 {
        d -= params.rise_boost;
    }
    d
}

/// A single agent's body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Horizontal position, fixed for the episode.
    pub x: f32,
    /// Vertical position of the sprite's top edge (y grows downward).
    pub y: f32,
    /// Velocity set by the last jump.
    pub velocity: f32,
    /// Ticks elapsed since the last jump (or since spawning).
    pub ticks_since_jump: u32,
    /// Height at the moment of the last jump.
    pub jump_height: f32,
    /// Visual tilt in degrees, positive is nose up.
    pub tilt: f32,
    /// Animation counter driving the wing pose.
    pub flap_ticks: u32,
    /// Current wing pose.
    pub pose: WingPose,
}

impl Bird {
    /// Creates a resting bird at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            ticks_since_jump: 0,
            jump_height: y,
            tilt: 0.0,
            flap_ticks: 0,
            pose: WingPose::Up,
        }
    }

    /// Applies the jump impulse.
    pub fn jump(&mut self, params: &Params) {
        self.velocity = params.jump_velocity;
        self.ticks_since_jump = 0;
        self.jump_height = self.y;
    }

    /// Moves the bird by one tick and returns the applied displacement.
    pub fn advance(&mut self, params: &Params) -> f32 {
        self.ticks_since_jump += 1;
        let d = displacement(self.velocity, self.ticks_since_jump, params);
        self.y += d;

        if d < 0.0 || self.y < self.jump_height + params.tilt_hold_distance {
            if self.tilt < params.max_tilt {
                self.tilt = params.max_tilt;
            }
        } else if self.tilt > params.min_tilt {
            self.tilt = (self.tilt - params.tilt_velocity).max(params.min_tilt);
        }
        d
    }

    /// Steps the wing animation: up, level, down, level, up again.
    ///
    /// Runs once at the end of a tick, so collisions during a tick use the pose
    /// left by the previous one.
    pub fn flap(&mut self, params: &Params) {
        let frame = params.animation_ticks;
        self.flap_ticks += 1;

        self.pose = if self.flap_ticks < frame {
            WingPose::Up
        } else if self.flap_ticks < frame * 2 {
            WingPose::Level
        } else if self.flap_ticks < frame * 3 {
            WingPose::Down
        } else if self.flap_ticks <= frame * 4 {
            WingPose::Level
        } else {
            self.flap_ticks = 0;
            WingPose::Up
        };

        // no flapping in a nose dive
        if self.tilt <= params.dive_tilt {
            self.pose = WingPose::Level;
            self.flap_ticks = frame * 2;
        }
    }

    /// Silhouette of the current animation frame.
    pub fn silhouette<'a>(&self, silhouettes: &'a Silhouettes) -> &'a Silhouette {
        silhouettes.bird(self.pose)
    }

    /// Whether the bird touched the ground or left the top of the screen.
    ///
    /// The ground test measures the sprite's width, not its height.
    pub fn is_out_of_bounds(&self, params: &Params) -> bool {
        self.y + sprites::BIRD_WIDTH as f32 >= params.ground_y || self.y < 0.0
    }
}
