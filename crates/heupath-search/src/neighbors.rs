use heupath_core::Coord;

use crate::traits::SearchSpace;

/// Offsets of the eight surrounding cells, in expansion order.
///
/// Row offset outer, column offset inner, each running `0, +1, -1`, with the
/// `(0, 0)` offset dropped. The order decides which of several equal-cost
/// paths is found, so it must stay fixed.
pub const OFFSETS: [Coord; 8] = [
    Coord::new(0, 1),
    Coord::new(0, -1),
    Coord::new(1, 0),
    Coord::new(1, 1),
    Coord::new(1, -1),
    Coord::new(-1, 0),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
];

/// Reusable buffer for the traversable neighbours of the cell being expanded.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Traversable neighbours of `c` in `space`.
    pub fn of<S: SearchSpace + ?Sized>(&mut self, space: &S, c: Coord) -> &[Coord] {
        self.buf.clear();
        space.neighbors(c, &mut self.buf);
        &self.buf
    }
}
