//! Route planners.
//!
//! Two strategies share the [`Planner`] trait:
//! - [`astar`]: best-first search with a Manhattan heuristic; exact and
//!   deterministic.
//! - [`qlearning`]: a tabular value table refined by simulated episodes; the
//!   extracted route is only as good as the table's convergence.

pub mod astar;
pub mod qlearning;

pub use astar::AStarPlanner;
pub use qlearning::{LearnedPlanner, LearningConfig, QLearner};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{Cell, Grid};

/// Outcome of planning one start/goal pair.
///
/// Routes exclude the start cell and end at the last cell the planner
/// reached. An empty `Found` route means start and goal coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The route ends at the goal.
    Found(Vec<Cell>),
    /// The route stops short of the goal. The learned planner returns this
    /// when it hits its step cap, and also when its greedy action is rejected
    /// by an obstacle, the grid edge or an avoided cell, so a short route
    /// does not imply the cap was reached. Callers must not treat it as a
    /// guaranteed path.
    Partial(Vec<Cell>),
    /// Start and goal are disconnected.
    Unreachable,
}

impl Plan {
    /// Cells of the route, empty when unreachable.
    pub fn route(&self) -> &[Cell] {
        match self {
            Plan::Found(route) | Plan::Partial(route) => route,
            Plan::Unreachable => &[],
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Plan::Found(_))
    }

    pub fn into_route(self) -> Vec<Cell> {
        match self {
            Plan::Found(route) | Plan::Partial(route) => route,
            Plan::Unreachable => Vec::new(),
        }
    }
}

/// Strategy that turns a start/goal pair into a [`Plan`].
pub trait Planner {
    /// Plans a route on `grid`.
    ///
    /// # Arguments
    ///
    /// * `start` - Cell the agent currently stands on
    /// * `goal` - Destination cell
    /// * `occupied` - Cells held by other agents when planning happens. Only a
    ///   bias for planners that use it; runtime collisions are resolved by the
    ///   agents themselves.
    fn plan(&mut self, grid: &Grid, start: Cell, goal: Cell, occupied: &[Cell]) -> Plan;

    /// Human-readable planner name.
    fn name(&self) -> &str;
}

/// Planner selection for a run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlannerConfig {
    #[default]
    Deterministic,
    Learned(LearningConfig),
}

impl PlannerConfig {
    /// Instantiates the configured planner, validating its parameters.
    pub fn build(&self) -> Result<Box<dyn Planner>, ConfigError> {
        Ok(match self {
            PlannerConfig::Deterministic => Box::new(AStarPlanner),
            PlannerConfig::Learned(config) => Box::new(LearnedPlanner::new(config.clone())?),
        })
    }
}
