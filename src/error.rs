use thiserror::Error;

use crate::grid::{Cell, GridError};

/// Errors that reject a run before its first tick.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("A run needs at least one agent")]
    NoAgents,

    #[error("Got {starts} start cells but {goals} goal cells")]
    MismatchedEndpoints { starts: usize, goals: usize },

    #[error("Endpoint {0} lies outside the grid")]
    EndpointOutOfBounds(Cell),

    #[error("Endpoint {0} is an obstacle")]
    EndpointOnObstacle(Cell),

    #[error("Cell {0} is used by more than one start or goal")]
    DuplicateEndpoint(Cell),

    #[error("Starvation threshold must be positive")]
    ZeroStarvationThreshold,

    #[error("Parameter {name} = {value} is outside its valid range")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Exploration floor {floor} exceeds the initial exploration rate {initial}")]
    ExplorationFloorAboveInitial { floor: f64, initial: f64 },
}
