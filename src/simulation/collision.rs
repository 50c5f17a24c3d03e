//! Pixel-exact bird/pipe collision.

use super::bird::Bird;
use super::pipe::Pipe;
use super::sprites::Silhouettes;

/// Returns whether `bird` touches either pipe of `pipe`.
///
/// The bird silhouette is taken from its current wing pose on every call.
/// Each pipe silhouette is offset by its position relative to the bird's
/// top-left corner (bird height rounded to whole pixels).
pub fn collides(bird: &Bird, pipe: &Pipe, silhouettes: &Silhouettes) -> bool {
    let mask = bird.silhouette(silhouettes);
    let bird_y = bird.y.round();
    let dx = (pipe.x - bird.x).round() as i32;

    let top_offset = (dx, (pipe.top - bird_y).round() as i32);
    let bottom_offset = (dx, (pipe.bottom - bird_y).round() as i32);

    mask.overlaps(silhouettes.pipe_bottom(), bottom_offset)
        || mask.overlaps(silhouettes.pipe_top(), top_offset)
}
