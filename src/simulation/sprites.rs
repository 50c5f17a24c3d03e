//! Procedurally painted sprite art and the collision silhouettes derived from it.
//!
//! The renderer uploads the same RGBA buffers that the silhouettes are built
//! from, so what is drawn is exactly what collides.

use super::bird::WingPose;
use super::silhouette::Silhouette;

/// Bird frame width in pixels.
pub const BIRD_WIDTH: usize = 68;
/// Bird frame height in pixels.
pub const BIRD_HEIGHT: usize = 48;
/// Pipe sprite width in pixels.
pub const PIPE_WIDTH: usize = 104;
/// Pipe sprite height in pixels.
pub const PIPE_HEIGHT: usize = 640;
/// Ground tile width in pixels.
pub const GROUND_WIDTH: usize = 672;
/// Ground tile height in pixels.
pub const GROUND_HEIGHT: usize = 224;

const PIPE_CAP_HEIGHT: usize = 36;
const PIPE_INSET: usize = 6;
const GRASS_HEIGHT: usize = 18;

type Rgba = [u8; 4];

const BODY: Rgba = [245, 200, 66, 255];
const WING: Rgba = [215, 165, 35, 255];
const TAIL: Rgba = [225, 180, 50, 255];
const EYE: Rgba = [255, 255, 255, 255];
const PUPIL: Rgba = [20, 20, 20, 255];
const BEAK: Rgba = [225, 75, 35, 255];
const PIPE_DARK: Rgba = [74, 122, 26, 255];
const PIPE_MID: Rgba = [100, 170, 40, 255];
const PIPE_LIGHT: Rgba = [145, 215, 62, 255];
const CAP_EDGE: Rgba = [60, 100, 20, 255];
const GRASS: Rgba = [84, 168, 55, 255];
const GRASS_LIGHT: Rgba = [110, 200, 70, 255];
const DIRT: Rgba = [210, 185, 110, 255];
const DIRT_DARK: Rgba = [185, 160, 90, 255];

/// A tightly packed RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Row-major RGBA bytes, four per pixel.
    pub rgba: Vec<u8>,
}

impl Sprite {
    /// Creates a fully transparent sprite.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width * height * 4],
        }
    }

    fn put(&mut self, x: usize, y: usize, color: Rgba) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.rgba[idx..idx + 4].copy_from_slice(&color);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgba) {
        for py in y..y + h {
            for px in x..x + w {
                self.put(px, py, color);
            }
        }
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba) {
        for y in 0..self.height {
            for x in 0..self.width {
                let nx = (x as f32 + 0.5 - cx) / rx;
                let ny = (y as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Returns a copy mirrored top to bottom.
    pub fn flipped_vertically(&self) -> Self {
        let row = self.width * 4;
        let rgba = self
            .rgba
            .chunks_exact(row)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self {
            width: self.width,
            height: self.height,
            rgba,
        }
    }

    /// Occupied-pixel mask of this sprite.
    pub fn silhouette(&self) -> Silhouette {
        Silhouette::from_rgba(self.width, self.height, &self.rgba)
    }
}

/// Paints the bird frame for `pose`.
pub fn bird(pose: WingPose) -> Sprite {
    let mut sprite = Sprite::new(BIRD_WIDTH, BIRD_HEIGHT);

    sprite.fill_rect(2, 20, 10, 10, TAIL);
    sprite.fill_ellipse(34.0, 26.0, 26.0, 17.0, BODY);
    sprite.fill_rect(54, 26, 14, 8, BEAK);
    sprite.fill_ellipse(46.0, 18.0, 6.0, 6.0, EYE);
    sprite.fill_ellipse(48.0, 18.0, 2.0, 2.0, PUPIL);

    let wing_y = match pose {
        WingPose::Up => 9.0,
        WingPose::Level => 26.0,
        WingPose::Down => 40.0,
    };
    sprite.fill_ellipse(20.0, wing_y, 12.0, 7.0, WING);

    sprite
}

/// Paints a bottom pipe: opening cap on top, body running downward.
pub fn pipe() -> Sprite {
    let mut sprite = Sprite::new(PIPE_WIDTH, PIPE_HEIGHT);
    let body_width = PIPE_WIDTH - 2 * PIPE_INSET;

    for x in 0..body_width {
        let shade = match x * 4 / body_width {
            0 => PIPE_DARK,
            3 => PIPE_LIGHT,
            _ => PIPE_MID,
        };
        sprite.fill_rect(PIPE_INSET + x, PIPE_CAP_HEIGHT, 1, PIPE_HEIGHT - PIPE_CAP_HEIGHT, shade);
    }

    sprite.fill_rect(0, 0, PIPE_WIDTH, PIPE_CAP_HEIGHT, PIPE_MID);
    sprite.fill_rect(0, 0, PIPE_WIDTH, 3, CAP_EDGE);
    sprite.fill_rect(0, PIPE_CAP_HEIGHT - 3, PIPE_WIDTH, 3, CAP_EDGE);
    sprite.fill_rect(PIPE_WIDTH - 20, 3, 10, PIPE_CAP_HEIGHT - 6, PIPE_LIGHT);

    sprite
}

/// Paints one ground tile: grass strip over striped dirt.
pub fn ground() -> Sprite {
    let mut sprite = Sprite::new(GROUND_WIDTH, GROUND_HEIGHT);

    sprite.fill_rect(0, GRASS_HEIGHT, GROUND_WIDTH, GROUND_HEIGHT - GRASS_HEIGHT, DIRT);
    for x in 0..GROUND_WIDTH {
        let grass = if (x / 12) % 2 == 0 { GRASS } else { GRASS_LIGHT };
        sprite.fill_rect(x, 0, 1, GRASS_HEIGHT, grass);
        if (x + 7) % 24 < 3 {
            sprite.fill_rect(x, GRASS_HEIGHT + 6, 1, GROUND_HEIGHT - GRASS_HEIGHT - 6, DIRT_DARK);
        }
    }

    sprite
}

/// Collision silhouettes for every drawable frame.
#[derive(Debug, Clone)]
pub struct Silhouettes {
    birds: [Silhouette; 3],
    pipe_top: Silhouette,
    pipe_bottom: Silhouette,
}

impl Default for Silhouettes {
    fn default() -> Self {
        Self::new()
    }
}

impl Silhouettes {
    /// Paints every sprite and derives its silhouette.
    pub fn new() -> Self {
        let pipe_bottom = pipe().silhouette();
        Self {
            birds: WingPose::ALL.map(|pose| bird(pose).silhouette()),
            pipe_top: pipe_bottom.flipped_vertically(),
            pipe_bottom,
        }
    }

    /// Bird silhouette for `pose`.
    pub fn bird(&self, pose: WingPose) -> &Silhouette {
        &self.birds[pose.index()]
    }

    /// Silhouette of the upper, upside-down pipe.
    pub fn pipe_top(&self) -> &Silhouette {
        &self.pipe_top
    }

    /// Silhouette of the lower pipe.
    pub fn pipe_bottom(&self) -> &Silhouette {
        &self.pipe_bottom
    }
}
