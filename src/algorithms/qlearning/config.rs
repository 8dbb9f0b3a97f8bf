//! Configuration for the learned planner.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;

/// Training and reward-shaping parameters for [`super::QLearner`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LearningConfig {
    // --- Training loop ---
    /// Number of simulated episodes.
    pub episodes: u32,
    /// Step bound for a single episode (None = 4 × cell count).
    pub max_episode_steps: Option<usize>,
    /// Hard cap on extracted route length (None = cell count).
    pub max_route_len: Option<usize>,
    /// Seed for the exploration RNG.
    pub seed: u64,

    // --- Temporal-difference update ---
    /// Weight of the new estimate, in (0, 1].
    pub learning_rate: f64,
    /// Discount applied to the next cell's best value, in [0, 1].
    pub discount_factor: f64,

    // --- Exploration ---
    /// Initial probability of a uniformly random action.
    pub exploration_rate: f64,
    /// Multiplicative decay applied after every episode.
    pub exploration_decay: f64,
    /// Floor the exploration rate never drops below.
    pub min_exploration_rate: f64,

    // --- Reward shaping ---
    /// Reward for entering the goal.
    pub reward_goal: f64,
    /// Reward for any other legal step (negative).
    pub reward_step: f64,
    /// Reward for bumping into an obstacle or the grid edge.
    pub reward_obstacle: f64,
    /// Reward for bumping into a cell held by another agent.
    pub reward_collision: f64,
    /// Whether cells held by other agents at planning time are penalized.
    pub collision_aware: bool,
}

impl LearningConfig {
    /// Episode step bound for `grid`.
    pub fn episode_steps_for(&self, grid: &Grid) -> usize {
        self.max_episode_steps.unwrap_or(4 * grid.len())
    }

    /// Route extraction cap for `grid`.
    pub fn route_cap_for(&self, grid: &Grid) -> usize {
        self.max_route_len.unwrap_or(grid.len())
    }

    /// Checks every rate lies in its valid range and the exploration floor
    /// does not exceed the initial rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f64, bool); 5] = [
            (
                "learning_rate",
                self.learning_rate,
                self.learning_rate > 0.0 && self.learning_rate <= 1.0,
            ),
            (
                "discount_factor",
                self.discount_factor,
                (0.0..=1.0).contains(&self.discount_factor),
            ),
            (
                "exploration_rate",
                self.exploration_rate,
                (0.0..=1.0).contains(&self.exploration_rate),
            ),
            (
                "exploration_decay",
                self.exploration_decay,
                self.exploration_decay > 0.0 && self.exploration_decay <= 1.0,
            ),
            (
                "min_exploration_rate",
                self.min_exploration_rate,
                (0.0..=1.0).contains(&self.min_exploration_rate),
            ),
        ];
        if let Some((name, value, _)) = checks.into_iter().find(|(_, _, ok)| !ok) {
            return Err(ConfigError::InvalidParameter { name, value });
        }
        if self.min_exploration_rate > self.exploration_rate {
            return Err(ConfigError::ExplorationFloorAboveInitial {
                floor: self.min_exploration_rate,
                initial: self.exploration_rate,
            });
        }
        Ok(())
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_episode_steps: None,
            max_route_len: None,
            seed: 42,
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 1.0,
            exploration_decay: 0.995,
            min_exploration_rate: 0.01,
            reward_goal: 100.0,
            reward_step: -1.0,
            reward_obstacle: -10.0,
            reward_collision: -5.0,
            collision_aware: false,
        }
    }
}
