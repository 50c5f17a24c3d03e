//! Pixel-exact occupancy masks used for collision testing.

/// Alpha value a pixel must exceed to count as occupied.
pub const ALPHA_THRESHOLD: u8 = 127;

const WORD_BITS: usize = 64;

/// The set of occupied pixels of one visual frame.
///
/// Stored as a row-major bitmask, one bit per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Silhouette {
    width: usize,
    height: usize,
    stride: usize,
    words: Vec<u64>,
}

impl Silhouette {
    /// Creates an empty silhouette of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width.div_ceil(WORD_BITS);
        Self {
            width,
            height,
            stride,
            words: vec![0; stride * height],
        }
    }

    /// Creates a silhouette with every pixel occupied.
    pub fn filled(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Creates a silhouette whose pixel `(x, y)` is occupied when `occupied(x, y)` holds.
    pub fn from_fn(width: usize, height: usize, occupied: impl Fn(usize, usize) -> bool) -> Self {
        let mut silhouette = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if occupied(x, y) {
                    silhouette.set(x, y);
                }
            }
        }
        silhouette
    }

    /// Derives a silhouette from tightly packed RGBA pixels.
    ///
    /// A pixel is occupied when its alpha exceeds [`ALPHA_THRESHOLD`]. Missing
    /// trailing pixels count as transparent.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        Self::from_fn(width, height, |x, y| {
            rgba.get((y * width + x) * 4 + 3)
                .is_some_and(|&alpha| alpha > ALPHA_THRESHOLD)
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether pixel `(x, y)` is occupied. Out-of-range pixels are empty.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.words[y * self.stride + x / WORD_BITS];
        word & (1 << (x % WORD_BITS)) != 0
    }

    /// Marks pixel `(x, y)` as occupied. Out-of-range pixels are ignored.
    pub fn set(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.words[y * self.stride + x / WORD_BITS] |= 1 << (x % WORD_BITS);
        }
    }

    /// Number of occupied pixels.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns a copy mirrored top to bottom.
    pub fn flipped_vertically(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x, self.height - 1 - y)
        })
    }

    /// Finds the first pixel occupied by both silhouettes.
    ///
    /// `offset` is the position of `other`'s top-left corner in this
    /// silhouette's coordinates. The returned point is in this silhouette's
    /// coordinates, scanning rows top to bottom.
    pub fn overlap(&self, other: &Silhouette, offset: (i32, i32)) -> Option<(usize, usize)> {
        let (dx, dy) = (i64::from(offset.0), i64::from(offset.1));

        let x_start = dx.max(0);
        let x_end = (dx + other.width as i64).min(self.width as i64);
        let y_start = dy.max(0);
        let y_end = (dy + other.height as i64).min(self.height as i64);
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            let row = y as usize * self.stride;
            if self.words[row..row + self.stride].iter().all(|&w| w == 0) {
                continue;
            }
            for x in x_start..x_end {
                if self.get(x as usize, y as usize)
                    && other.get((x - dx) as usize, (y - dy) as usize)
                {
                    return Some((x as usize, y as usize));
                }
            }
        }
        None
    }

    /// Returns whether the silhouettes share at least one occupied pixel.
    pub fn overlaps(&self, other: &Silhouette, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }
}
