//! Collision tests between the bird and the world
//!
//! Stateless: every check takes the bird's bounds and returns a verdict.

use super::bird::Bounds;
use super::pipes::PipePair;

/// What the bird struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ground,
    Pipe { id: u32 },
}

/// Bird bottom below the top of the ground strip. The ceiling is open.
#[inline]
pub fn hits_ground(bird: &Bounds, sky_height: f32) -> bool {
    bird.bottom > sky_height
}

/// Horizontal extents of the bird and a pipe of `pipe_width` centred at `pipe_x` touch
#[inline]
pub fn overlaps_pipe_column(bird: &Bounds, pipe_x: f32, pipe_width: f32) -> bool {
    let half = pipe_width / 2.0;
    pipe_x + half >= bird.left && pipe_x - half <= bird.right
}

/// Bird touches either pipe body of `pair`.
///
/// Edges flush with the gap band count as a hit.
pub fn hits_pipe(bird: &Bounds, pair: &PipePair, pipe_width: f32) -> bool {
    if !overlaps_pipe_column(bird, pair.x, pipe_width) {
        return false;
    }
    bird.top <= pair.gap_top || bird.bottom >= pair.gap_bottom
}

/// First collision of the tick, ground before pipes
pub fn detect<'a>(
    bird: &Bounds,
    sky_height: f32,
    pairs: impl IntoIterator<Item = &'a PipePair>,
    pipe_width: f32,
) -> Option<Collision> {
    if hits_ground(bird, sky_height) {
        return Some(Collision::Ground);
    }
    pairs
        .into_iter()
        .find(|pair| hits_pipe(bird, pair, pipe_width))
        .map(|pair| Collision::Pipe { id: pair.id })
}
