//! **heupath-core** — grid model for weighted best-first search.
//!
//! This crate provides the types shared by the search engine and its
//! callers: `(row, col)` coordinates, an immutable barrier [`Grid`] with one
//! start and one goal, and the [`GridEditor`] that is the only way to change
//! a grid.

pub mod editor;
pub mod error;
pub mod geom;
pub mod grid;

pub use editor::GridEditor;
pub use error::GridError;
pub use geom::{Bounds, Coord};
pub use grid::{Cell, CellState, Grid, Role};
