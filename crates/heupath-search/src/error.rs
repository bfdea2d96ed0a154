use heupath_core::{Bounds, Coord};

/// Errors that reject a search before it starts.
///
/// An unreachable goal is not an error; it is reported as
/// [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("{coord} is outside the {bounds} grid")]
    OutOfBounds { coord: Coord, bounds: Bounds },
    #[error("{0} is a barrier and cannot be a search endpoint")]
    BlockedEndpoint(Coord),
    #[error("weight must be a finite value within [0, 2], got {0}")]
    InvalidWeight(f64),
    #[error("unknown search mode {0:?} (expected uniform, astar or greedy)")]
    UnknownMode(String),
    #[error("unknown heuristic {0:?} (expected euclidean or chebyshev)")]
    UnknownHeuristic(String),
}
