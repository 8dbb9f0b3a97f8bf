//! Learned planner: tabular Q-learning over grid cells.
//!
//! States are cells and actions are the four [`crate::grid::Direction`]s.
//! Each episode walks from the start cell with epsilon-greedy action
//! selection and applies a temporal-difference update per step:
//!
//! ```text
//! Q(s, a) += α × (r + γ × max_a' Q(s', a') − Q(s, a))
//! ```
//!
//! The goal is terminal, so its future term is zero. Bumping into an obstacle
//! or an avoided cell leaves the state unchanged.
//!
//! # Module Structure
//!
//! - [`config`] - Training and reward-shaping parameters
//! - [`reward`] - Transition kinds and their rewards
//! - [`table`] - The action-value table
//! - [`learner`] - Episode loop and greedy route extraction

pub mod config;
pub mod learner;
pub mod reward;
pub mod table;

pub use config::LearningConfig;
pub use learner::{QLearner, TrainingReport};
pub use reward::{RewardComputer, Transition};
pub use table::QTable;

use super::{Plan, Planner};
use crate::error::ConfigError;
use crate::grid::{Cell, Grid};

/// [`Planner`] adapter that trains a fresh [`QLearner`] per request.
///
/// Each call uses the next seed in sequence, so planning several agents from
/// one planner is reproducible but not identical across agents.
#[derive(Debug, Clone)]
pub struct LearnedPlanner {
    config: LearningConfig,
    next_seed: u64,
    last_report: Option<TrainingReport>,
}

impl LearnedPlanner {
    /// Fails if `config` does not pass [`LearningConfig::validate`].
    pub fn new(config: LearningConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            next_seed: config.seed,
            config,
            last_report: None,
        })
    }

    /// Report from the most recent training run.
    pub fn last_report(&self) -> Option<&TrainingReport> {
        self.last_report.as_ref()
    }
}

impl Planner for LearnedPlanner {
    fn plan(&mut self, grid: &Grid, start: Cell, goal: Cell, occupied: &[Cell]) -> Plan {
        let config = LearningConfig {
            seed: self.next_seed,
            ..self.config.clone()
        };
        self.next_seed = self.next_seed.wrapping_add(1);

        let mut learner = match QLearner::new(grid, start, goal, config) {
            Ok(learner) => learner,
            Err(e) => {
                tracing::error!(error = %e, "Learned planner holds an invalid config");
                return Plan::Unreachable;
            }
        };
        if self.config.collision_aware {
            learner = learner.avoiding(occupied.iter().copied());
        }
        self.last_report = Some(learner.train());
        learner.extract_route()
    }

    fn name(&self) -> &str {
        "q-learning"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_reaches_goal_and_reports() {
        let grid = Grid::open(3, 3).unwrap();
        let mut planner = LearnedPlanner::new(LearningConfig::default()).unwrap();
        let plan = planner.plan(&grid, Cell::new(0, 0), Cell::new(2, 2), &[]);
        assert!(plan.is_complete());
        assert_eq!(plan.route().len(), 4);
        let report = planner.last_report().unwrap();
        assert_eq!(report.episodes, 1000);
        assert!(report.final_exploration_rate >= 0.01);
    }

    #[test]
    fn occupied_cells_ignored_unless_collision_aware() {
        let grid = Grid::open(2, 3).unwrap();
        let peer = [Cell::new(0, 1)];

        let mut blind = LearnedPlanner::new(LearningConfig::default()).unwrap();
        let plan = blind.plan(&grid, Cell::new(0, 0), Cell::new(0, 2), &peer);
        assert_eq!(plan, Plan::Found(vec![Cell::new(0, 1), Cell::new(0, 2)]));

        let mut aware = LearnedPlanner::new(LearningConfig {
            episodes: 2000,
            collision_aware: true,
            ..LearningConfig::default()
        })
        .unwrap();
        let plan = aware.plan(&grid, Cell::new(0, 0), Cell::new(0, 2), &peer);
        assert!(plan.is_complete());
        assert!(!plan.route().contains(&Cell::new(0, 1)));
    }

    #[test]
    fn rejects_invalid_config_up_front() {
        let config = LearningConfig {
            exploration_rate: 1.5,
            ..LearningConfig::default()
        };
        assert!(matches!(
            LearnedPlanner::new(config),
            Err(ConfigError::InvalidParameter {
                name: "exploration_rate",
                ..
            })
        ));

        let config = LearningConfig {
            exploration_rate: f64::NAN,
            ..LearningConfig::default()
        };
        assert!(LearnedPlanner::new(config).is_err());
    }
}
