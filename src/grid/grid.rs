//! Immutable obstacle map.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::cell::{Cell, Direction};
use super::error::GridError;

/// Smallest accepted side length.
pub const MIN_DIMENSION: usize = 2;

/// Permanent classification of a cell.
///
/// Occupancy by agents is never stored here; it is derived from live agent
/// positions each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellKind {
    Free,
    Obstacle,
}

/// Fixed-size obstacle map. Read-only once built.
///
/// # Examples
///
/// ```
/// use gridwalk::grid::{Cell, Grid};
///
/// let grid: Grid = "..#\n...".parse().unwrap();
/// assert!(grid.is_free(Cell::new(0, 0)));
/// assert!(!grid.is_free(Cell::new(0, 2)));
/// assert!(!grid.in_bounds(Cell::new(2, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid", into = "RawGrid"))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

/// Wire form of [`Grid`]. Deserialized maps are rebuilt through
/// [`Grid::new`] so they meet the same checks as hand-built ones.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.cells.len()) {
            return Err(GridError::CellCountMismatch {
                expected: raw.rows.saturating_mul(raw.cols),
                found: raw.cells.len(),
            });
        }
        let mut grid = Self::open(raw.rows, raw.cols)?;
        grid.cells = raw.cells;
        Ok(grid)
    }
}

#[cfg(feature = "serde")]
impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            cells: grid.cells,
        }
    }
}

impl Grid {
    /// Builds a grid of `rows x cols` with the given obstacle cells.
    pub fn new<I>(rows: usize, cols: usize, obstacles: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Cell>,
    {
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(GridError::TooSmall {
                rows,
                cols,
                min: MIN_DIMENSION,
            });
        }

        let mut grid = Self {
            rows,
            cols,
            cells: vec![CellKind::Free; rows * cols],
        };
        for cell in obstacles {
            let idx = grid
                .index(cell)
                .ok_or(GridError::ObstacleOutOfBounds(cell))?;
            grid.cells[idx] = CellKind::Obstacle;
        }
        Ok(grid)
    }

    /// An obstacle-free grid.
    pub fn open(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::new(rows, cols, std::iter::empty())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, obstacles included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major index of `cell`, or `None` when out of bounds.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell).then(|| cell.row * self.cols + cell.col)
    }

    /// Inverse of [`Grid::index`].
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        (index < self.cells.len()).then(|| Cell::new(index / self.cols, index % self.cols))
    }

    /// Classification of `cell`, or `None` when out of bounds.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// False for obstacles and for anything outside the grid.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Free)
    }

    /// Free neighbors of `cell` in [`Direction::ALL`] order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            cell.step(d)
                .filter(|next| self.is_free(*next))
                .map(|next| (d, next))
        })
    }

    /// Iterates over all obstacle cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == CellKind::Obstacle)
            .filter_map(|(i, _)| self.cell_at(i))
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses a text map: `.` is free, `#` is an obstacle, one line per row.
    /// Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);

        let mut obstacles = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                match symbol {
                    '.' => {}
                    '#' => obstacles.push(Cell::new(row, col)),
                    _ => {
                        return Err(GridError::UnknownSymbol {
                            symbol,
                            cell: Cell::new(row, col),
                        })
                    }
                }
            }
        }
        Self::new(rows, cols, obstacles)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = match self.cells[row * self.cols + col] {
                    CellKind::Free => '.',
                    CellKind::Obstacle => '#',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
