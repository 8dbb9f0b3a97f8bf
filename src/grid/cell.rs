//! Grid coordinates and the four cardinal moves between them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single addressable grid location, `(row, col)`, 0-indexed.
///
/// The derived ordering compares `row` first and `col` second; the planners
/// rely on it to break frontier ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Creates a new cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The cell one step away in `direction`, or `None` if that would
    /// underflow the coordinate space. Upper bounds are the grid's concern.
    pub fn step(&self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.offset();
        Some(Cell {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal moves.
///
/// [`Direction::ALL`] fixes the expansion order used everywhere a tie has to
/// be broken: east, west, south, north. The learned planner also uses the
/// position in that array as its action index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    East,
    West,
    South,
    North,
}

impl Direction {
    /// All directions in tie-break order.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// `(row_offset, col_offset)` for this direction.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
            Direction::South => 2,
            Direction::North => 3,
        }
    }

    /// Inverse of [`Direction::index`].
    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    /// The direction that takes `from` to the adjacent cell `to`, if any.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Self::ALL
            .into_iter()
            .find(|d| from.step(*d) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::East => write!(f, "right"),
            Direction::West => write!(f, "left"),
            Direction::South => write!(f, "down"),
            Direction::North => write!(f, "up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_order_by_row_then_col() {
        assert!(Cell::new(0, 5) < Cell::new(1, 0));
        assert!(Cell::new(2, 1) < Cell::new(2, 3));
    }

    #[test]
    fn step_underflow_is_none() {
        assert_eq!(Cell::new(0, 0).step(Direction::North), None);
        assert_eq!(Cell::new(0, 0).step(Direction::West), None);
        assert_eq!(Cell::new(0, 0).step(Direction::South), Some(Cell::new(1, 0)));
    }

    #[test]
    fn direction_index_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_index(d.index()), Some(d));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn between_names_the_move() {
        let c = Cell::new(1, 1);
        assert_eq!(Direction::between(c, Cell::new(1, 2)), Some(Direction::East));
        assert_eq!(Direction::between(c, Cell::new(0, 1)), Some(Direction::North));
        assert_eq!(Direction::between(c, Cell::new(2, 2)), None);
        assert_eq!(Direction::South.to_string(), "down");
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Cell::new(0, 0).manhattan(&Cell::new(3, 4)), 7);
        assert_eq!(Cell::new(3, 4).manhattan(&Cell::new(3, 4)), 0);
    }
}
