//! Weighted best-first search on uniform 2-D grids.
//!
//! A single weight `w ∈ [0, 2]` interpolates between three classic
//! algorithms through the evaluation function
//! `f(n) = (2 - w)·g(n) + w·h(n)`:
//!
//! | `w` | Algorithm |
//! |---|---|
//! | `0` | uniform-cost search |
//! | `1` | A\* |
//! | `2` | greedy best-first search |
//!
//! Every step costs 1, orthogonal or diagonal, and the default heuristic is
//! straight-line distance. Because a diagonal step costs 1 rather than √2
//! the default heuristic can overestimate, so A\* mode is not guaranteed to
//! find a shortest path; [`Heuristic::Chebyshev`] restores admissibility.
//!
//! ```
//! use heupath_core::{Coord, Grid};
//! use heupath_search::{search, SearchOutcome};
//!
//! let grid = Grid::new(3, 3).unwrap();
//! let out = search(&grid, Coord::new(0, 0), Coord::new(2, 2), 1.0).unwrap();
//! assert_eq!(out.steps(), Some(2));
//! assert!(matches!(out, SearchOutcome::Found { .. }));
//! ```
//!
//! # Frontier policy
//!
//! By default a cheaper route to a cell that is already queued updates its
//! cost and predecessor but not its queued priority
//! ([`FrontierPolicy::KeepFirst`]). [`FrontierPolicy::DecreaseKey`] lowers the
//! queued priority as well.

mod config;
mod distance;
mod engine;
mod error;
mod frontier;
mod neighbors;
mod outcome;
mod path;
mod traits;

pub use config::{MAX_WEIGHT, MIN_WEIGHT, Mode, SearchConfig};
pub use distance::{Heuristic, chebyshev, euclidean};
pub use engine::{Search, Step, search, search_grid, search_with};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierEntry, FrontierPolicy};
pub use neighbors::{Neighbors, OFFSETS};
pub use outcome::{SearchOutcome, SearchStats};
pub use path::reconstruct;
pub use traits::SearchSpace;
