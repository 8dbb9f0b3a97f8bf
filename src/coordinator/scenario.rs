//! Run configuration and its up-front validation.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agent::DEFAULT_STARVATION_THRESHOLD;
use crate::algorithms::PlannerConfig;
use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::Id;

/// One agent's endpoints. Unnamed agents are called `A1`, `A2`, … in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentSpec {
    pub name: Option<Id>,
    pub start: Cell,
    pub goal: Cell,
}

/// Everything needed to start a run.
///
/// # Examples
///
/// ```
/// use gridwalk::coordinator::Scenario;
/// use gridwalk::grid::{Cell, Grid};
///
/// let grid: Grid = "....\n####".parse().unwrap();
/// let scenario = Scenario::new(grid)
///     .with_agent(Cell::new(0, 0), Cell::new(0, 3))
///     .with_agent(Cell::new(0, 1), Cell::new(0, 2));
/// assert!(scenario.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scenario {
    pub grid: Grid,
    /// Agents in evaluation order.
    pub agents: Vec<AgentSpec>,
    pub planner: PlannerConfig,
    pub starvation_threshold: u32,
}

impl Scenario {
    /// A scenario with no agents, the deterministic planner and the default
    /// starvation threshold.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            agents: Vec::new(),
            planner: PlannerConfig::default(),
            starvation_threshold: DEFAULT_STARVATION_THRESHOLD,
        }
    }

    /// Pairs starts with goals by position.
    pub fn from_endpoints(grid: Grid, starts: &[Cell], goals: &[Cell]) -> Result<Self, ConfigError> {
        if starts.len() != goals.len() {
            return Err(ConfigError::MismatchedEndpoints {
                starts: starts.len(),
                goals: goals.len(),
            });
        }
        Ok(starts
            .iter()
            .zip(goals)
            .fold(Self::new(grid), |s, (start, goal)| s.with_agent(*start, *goal)))
    }

    pub fn with_agent(mut self, start: Cell, goal: Cell) -> Self {
        self.agents.push(AgentSpec {
            name: None,
            start,
            goal,
        });
        self
    }

    pub fn with_named_agent(mut self, name: impl Into<Id>, start: Cell, goal: Cell) -> Self {
        self.agents.push(AgentSpec {
            name: Some(name.into()),
            start,
            goal,
        });
        self
    }

    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_starvation_threshold(mut self, threshold: u32) -> Self {
        self.starvation_threshold = threshold;
        self
    }

    /// Display name of the agent at `index`.
    pub fn agent_name(&self, index: usize) -> Id {
        self.agents
            .get(index)
            .and_then(|spec| spec.name.clone())
            .unwrap_or_else(|| format!("A{}", index + 1))
    }

    /// Rejects anything that would make the run ill-formed.
    ///
    /// Every start and goal must be an in-bounds free cell, and all of them
    /// must be pairwise distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        if self.starvation_threshold == 0 {
            return Err(ConfigError::ZeroStarvationThreshold);
        }
        if let PlannerConfig::Learned(config) = &self.planner {
            config.validate()?;
        }

        let mut seen = HashSet::new();
        for cell in self.agents.iter().flat_map(|a| [a.start, a.goal]) {
            if !self.grid.in_bounds(cell) {
                return Err(ConfigError::EndpointOutOfBounds(cell));
            }
            if !self.grid.is_free(cell) {
                return Err(ConfigError::EndpointOnObstacle(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::DuplicateEndpoint(cell));
            }
        }
        Ok(())
    }
}
