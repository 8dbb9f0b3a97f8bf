use thiserror::Error;

use super::cell::Cell;

/// Errors raised while building a [`super::Grid`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid must be at least {min}x{min}, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize, min: usize },

    #[error("Obstacle {0} lies outside the grid")]
    ObstacleOutOfBounds(Cell),

    #[error("Map row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown map symbol {symbol:?} at {cell}")]
    UnknownSymbol { symbol: char, cell: Cell },

    #[error("Grid lists {found} cells, expected {expected}")]
    CellCountMismatch { expected: usize, found: usize },
}
