use heupath_core::{Bounds, Coord, Grid};

use crate::neighbors::OFFSETS;

/// What the search engine needs to know about the space it walks.
pub trait SearchSpace {
    /// Extents of the space.
    fn bounds(&self) -> Bounds;

    /// Whether `c` cannot be entered. Only called for in-bounds coordinates.
    fn is_blocked(&self, c: Coord) -> bool;

    /// Whether `c` lies inside the space.
    #[inline]
    fn in_bounds(&self, c: Coord) -> bool {
        self.bounds().contains(c)
    }

    /// Append the traversable 8-way neighbours of `c` into `buf`, in
    /// [`OFFSETS`] order. The caller clears `buf` before calling.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for d in OFFSETS {
            let n = c + d;
            if self.in_bounds(n) && !self.is_blocked(n) {
                buf.push(n);
            }
        }
    }
}

impl SearchSpace for Grid {
    #[inline]
    fn bounds(&self) -> Bounds {
        Grid::bounds(self)
    }

    #[inline]
    fn is_blocked(&self, c: Coord) -> bool {
        !matches!(self.is_barrier(c), Ok(false))
    }

    #[inline]
    fn in_bounds(&self, c: Coord) -> bool {
        Grid::in_bounds(self, c)
    }
}
