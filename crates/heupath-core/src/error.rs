use crate::geom::{Bounds, Coord};

/// Errors raised by grid queries and by the editing layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("coordinate {coord} is outside the {bounds} grid")]
    OutOfBounds { coord: Coord, bounds: Bounds },
    #[error("grid must have positive dimensions and at least two cells, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("cell {0} holds the start or goal and cannot be changed this way")]
    ProtectedCell(Coord),
    #[error("barrier density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
    #[error("map line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
