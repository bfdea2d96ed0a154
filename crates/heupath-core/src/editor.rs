//! Grid editing layer.
//!
//! [`GridEditor`] is the only way to change a grid. Every operation keeps the
//! grid invariants intact: the start and goal are distinct, and neither of
//! them is ever a barrier. Searches run against [`GridEditor::snapshot`], so
//! edits made while a search is in flight never reach it.

use rand::{Rng, RngExt};

use crate::error::GridError;
use crate::geom::Coord;
use crate::grid::{CellState, Grid};

/// Mutable owner of a [`Grid`].
#[derive(Debug, Clone)]
pub struct GridEditor {
    grid: Grid,
}

impl GridEditor {
    /// Create an editor over an empty `rows` × `cols` grid.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(rows, cols)?,
        })
    }

    /// Take ownership of an existing grid.
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }

    /// Borrow the current grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Immutable copy of the current grid, suitable for handing to a search.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Consume the editor, returning the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Mark `c` as a barrier (`true`) or free (`false`).
    pub fn set_barrier(&mut self, c: Coord, barrier: bool) -> Result<(), GridError> {
        let i = self.grid.index(c)?;
        if c == self.grid.start || c == self.grid.goal {
            return Err(GridError::ProtectedCell(c));
        }
        self.grid.cells[i] = if barrier {
            CellState::Barrier
        } else {
            CellState::Free
        };
        Ok(())
    }

    /// Flip the barrier state of `c`. Returns the new state.
    pub fn toggle_barrier(&mut self, c: Coord) -> Result<CellState, GridError> {
        let barrier = self.grid.is_barrier(c)?;
        self.set_barrier(c, !barrier)?;
        Ok(if barrier {
            CellState::Free
        } else {
            CellState::Barrier
        })
    }

    /// Move the start to `c`. A barrier at `c` is removed.
    pub fn move_start(&mut self, c: Coord) -> Result<(), GridError> {
        let i = self.grid.index(c)?;
        if c == self.grid.goal {
            return Err(GridError::ProtectedCell(c));
        }
        self.grid.cells[i] = CellState::Free;
        self.grid.start = c;
        Ok(())
    }

    /// Move the goal to `c`. A barrier at `c` is removed.
    pub fn move_goal(&mut self, c: Coord) -> Result<(), GridError> {
        let i = self.grid.index(c)?;
        if c == self.grid.start {
            return Err(GridError::ProtectedCell(c));
        }
        self.grid.cells[i] = CellState::Free;
        self.grid.goal = c;
        Ok(())
    }

    /// Remove every barrier. The start and goal stay where they are.
    pub fn clear(&mut self) {
        self.grid.cells.fill(CellState::Free);
    }

    /// Turn each cell other than the endpoints into a barrier with
    /// probability `density`. Existing barriers are kept.
    ///
    /// Returns the number of barriers placed.
    pub fn scatter_barriers<R: Rng>(
        &mut self,
        rng: &mut R,
        density: f64,
    ) -> Result<usize, GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity(density));
        }
        let mut placed = 0usize;
        for c in self.grid.bounds.iter() {
            if c == self.grid.start || c == self.grid.goal {
                continue;
            }
            let r: f64 = rng.random();
            if r < density {
                let i = self.grid.index(c)?;
                if self.grid.cells[i] == CellState::Free {
                    self.grid.cells[i] = CellState::Barrier;
                    placed += 1;
                }
            }
        }
        log::debug!(
            "scattered {} barriers over a {} grid (density {})",
            placed,
            self.grid.bounds,
            density
        );
        Ok(placed)
    }
}

impl From<Grid> for GridEditor {
    fn from(grid: Grid) -> Self {
        Self::from_grid(grid)
    }
}
