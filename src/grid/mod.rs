//! Grid geometry: cells, cardinal directions and the immutable obstacle map.

mod cell;
mod error;
#[allow(clippy::module_inception)]
mod grid;

pub use cell::{Cell, Direction};
pub use error::GridError;
pub use grid::{CellKind, Grid, MIN_DIMENSION};
