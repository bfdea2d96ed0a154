//! The [`Grid`] type — an immutable snapshot of a barrier layout with one
//! start and one goal cell.
//!
//! A `Grid` has no public mutation API; edits go through
//! [`GridEditor`](crate::editor::GridEditor), which upholds the invariants
//! (start ≠ goal, neither endpoint is a barrier) and hands out snapshots.
//!
//! Grids also read and write a small ASCII map format, one row per line:
//!
//! ```text
//! S..#
//! .#.#
//! ...G
//! ```
//!
//! `.` is free, `#` is a barrier, `S` the start and `G` the goal.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::geom::{Bounds, BoundsIter, Coord};

/// Whether a cell can be traversed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Barrier,
}

/// The role a cell plays in the next search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Normal,
    Start,
    Goal,
}

/// A single cell as seen through [`Grid::cell`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub state: CellState,
    pub role: Role,
}

impl Cell {
    #[inline]
    pub fn is_barrier(self) -> bool {
        self.state == CellState::Barrier
    }

    /// Map symbol used by the ASCII format.
    pub fn symbol(self) -> char {
        match (self.role, self.state) {
            (Role::Start, _) => 'S',
            (Role::Goal, _) => 'G',
            (Role::Normal, CellState::Barrier) => '#',
            (Role::Normal, CellState::Free) => '.',
        }
    }
}

/// A fixed-size rectangular barrier layout with a start and a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Grid {
    pub(crate) bounds: Bounds,
    pub(crate) cells: Vec<CellState>,
    pub(crate) start: Coord,
    pub(crate) goal: Coord,
}

impl Grid {
    /// Create an empty grid with the start in the top-left corner and the
    /// goal in the bottom-right corner.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 || (rows == 1 && cols == 1) {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let bounds = Bounds::new(rows, cols);
        Ok(Self {
            bounds,
            cells: vec![CellState::Free; bounds.len()],
            start: Coord::ZERO,
            goal: Coord::new(rows - 1, cols - 1),
        })
    }

    /// Parse a grid from the ASCII map format. Blank lines are ignored.
    pub fn parse(map: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut cols: Option<usize> = None;
        let mut rows = 0i32;
        let mut start = None;
        let mut goal = None;

        for (i, line) in map.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let width = line.chars().count();
            match cols {
                Some(w) if w != width => {
                    return Err(GridError::Parse {
                        line: line_no,
                        reason: format!("expected {w} columns, found {width}"),
                    });
                }
                Some(_) => {}
                None => cols = Some(width),
            }
            for (col, ch) in line.chars().enumerate() {
                let here = Coord::new(rows, col as i32);
                let state = match ch {
                    '.' => CellState::Free,
                    '#' => CellState::Barrier,
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(GridError::Parse {
                                line: line_no,
                                reason: format!("more than one '{ch}' in map"),
                            });
                        }
                        *slot = Some(here);
                        CellState::Free
                    }
                    other => {
                        return Err(GridError::Parse {
                            line: line_no,
                            reason: format!("unknown symbol {other:?} at column {col}"),
                        });
                    }
                };
                cells.push(state);
            }
            rows += 1;
        }

        let line = rows as usize;
        let (Some(start), Some(goal)) = (start, goal) else {
            return Err(GridError::Parse {
                line,
                reason: "map must contain exactly one 'S' and one 'G'".into(),
            });
        };

        Ok(Self {
            bounds: Bounds::new(rows, cols.unwrap_or(0) as i32),
            cells,
            start,
            goal,
        })
    }

    /// Extents of the grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// Whether `c` is a barrier.
    pub fn is_barrier(&self, c: Coord) -> Result<bool, GridError> {
        let i = self.index(c)?;
        Ok(self.cells[i] == CellState::Barrier)
    }

    /// State and role of the cell at `c`.
    pub fn cell(&self, c: Coord) -> Result<Cell, GridError> {
        let i = self.index(c)?;
        Ok(Cell {
            state: self.cells[i],
            role: self.role(c),
        })
    }

    /// Number of barrier cells.
    pub fn barrier_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&s| s == CellState::Barrier)
            .count()
    }

    /// Row-major iterator over `(Coord, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }

    #[inline]
    pub(crate) fn index(&self, c: Coord) -> Result<usize, GridError> {
        self.bounds.index(c).ok_or(GridError::OutOfBounds {
            coord: c,
            bounds: self.bounds,
        })
    }

    fn role(&self, c: Coord) -> Role {
        if c == self.start {
            Role::Start
        } else if c == self.goal {
            Role::Goal
        } else {
            Role::Normal
        }
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Grid {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Grid> for String {
    fn from(g: Grid) -> Self {
        g.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols() {
                let c = Coord::new(row, col);
                let i = (row as usize) * (self.cols() as usize) + col as usize;
                let cell = Cell {
                    state: self.cells[i],
                    role: self.role(c),
                };
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Coord, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Coord, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        let i = self.grid.bounds.index(c)?;
        Some((
            c,
            Cell {
                state: self.grid.cells[i],
                role: self.grid.role(c),
            },
        ))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
