//! Training loop and greedy route extraction.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::LearningConfig;
use super::reward::{RewardComputer, Transition};
use super::table::QTable;
use crate::algorithms::Plan;
use crate::error::ConfigError;
use crate::grid::{Cell, Direction, Grid};

/// Summary of a completed [`QLearner::train`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// Episodes simulated.
    pub episodes: u32,
    /// Episodes that entered the goal before their step bound.
    pub episodes_reaching_goal: u32,
    /// Exploration rate after the last decay.
    pub final_exploration_rate: f64,
}

/// Learns a route for one start/goal pair by simulated trial.
///
/// # Lifecycle
///
/// 1. Create with [`QLearner::new`], optionally [`QLearner::avoiding`] cells
///    held by other agents.
/// 2. Call [`QLearner::train`] to refine the value table.
/// 3. Call [`QLearner::extract_route`] to follow the greedy policy.
#[derive(Debug)]
pub struct QLearner<'a> {
    grid: &'a Grid,
    start: Cell,
    goal: Cell,
    config: LearningConfig,
    avoided: HashSet<Cell>,
    table: QTable,
    exploration_rate: f64,
    rng: StdRng,
}

impl<'a> QLearner<'a> {
    /// Fails if `config` does not pass [`LearningConfig::validate`].
    pub fn new(
        grid: &'a Grid,
        start: Cell,
        goal: Cell,
        config: LearningConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid,
            start,
            goal,
            exploration_rate: config.exploration_rate,
            rng: StdRng::seed_from_u64(config.seed),
            table: QTable::new(grid.len()),
            avoided: HashSet::new(),
            config,
        })
    }

    /// Penalizes entering `cells` during training and refuses them during
    /// extraction. The goal is never avoided.
    pub fn avoiding<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        self.avoided = cells.into_iter().filter(|c| *c != self.goal).collect();
        self
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Current probability of a random action.
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Simulates one action from `state`. Rejected moves leave the state
    /// unchanged.
    fn simulate(&self, state: Cell, direction: Direction) -> (Cell, Transition) {
        let Some(next) = state.step(direction).filter(|c| self.grid.is_free(*c)) else {
            return (state, Transition::Blocked);
        };
        if self.avoided.contains(&next) {
            (state, Transition::Collision)
        } else if next == self.goal {
            (next, Transition::Goal)
        } else {
            (next, Transition::Step)
        }
    }

    fn choose_action(&mut self, state_idx: usize) -> usize {
        if self.rng.gen_bool(self.exploration_rate) {
            self.rng.gen_range(0..Direction::ALL.len())
        } else {
            self.table.best_action(state_idx)
        }
    }

    /// Runs the configured number of episodes.
    ///
    /// Each episode starts at the start cell and ends on reaching the goal or
    /// after the episode step bound. The exploration rate decays once per
    /// episode and never drops below the configured floor.
    #[tracing::instrument(level = "trace", skip_all, fields(start = %self.start, goal = %self.goal))]
    pub fn train(&mut self) -> TrainingReport {
        let max_steps = self.config.episode_steps_for(self.grid);
        let mut reached = 0u32;

        for _ in 0..self.config.episodes {
            if self.run_episode(max_steps) {
                reached += 1;
            }
            self.exploration_rate = (self.exploration_rate * self.config.exploration_decay)
                .max(self.config.min_exploration_rate);
        }

        tracing::debug!(
            episodes = self.config.episodes,
            reached,
            exploration_rate = self.exploration_rate,
            "Training finished"
        );

        TrainingReport {
            episodes: self.config.episodes,
            episodes_reaching_goal: reached,
            final_exploration_rate: self.exploration_rate,
        }
    }

    /// One simulated episode. Returns true if it entered the goal.
    fn run_episode(&mut self, max_steps: usize) -> bool {
        let mut state = self.start;
        if state == self.goal {
            return true;
        }

        for _ in 0..max_steps {
            let Some(state_idx) = self.grid.index(state) else {
                return false;
            };
            let action = self.choose_action(state_idx);
            let Some(direction) = Direction::from_index(action) else {
                return false;
            };
            let (next, transition) = self.simulate(state, direction);
            let reward = RewardComputer::compute(transition, &self.config);

            let future = match (transition, self.grid.index(next)) {
                (Transition::Goal, _) | (_, None) => 0.0,
                (_, Some(next_idx)) => self.table.max_value(next_idx),
            };
            let old = self.table.get(state_idx, action);
            let target = reward + self.config.discount_factor * future;
            self.table
                .set(state_idx, action, old + self.config.learning_rate * (target - old));

            if transition == Transition::Goal {
                return true;
            }
            state = next;
        }
        false
    }

    /// Follows the greedy policy from the start cell.
    ///
    /// Stops at the goal, when the greedy action is rejected (the walk could
    /// only repeat the same cell), or at the route-length cap. There is no
    /// cycle detection: a table that cycles between cells runs until the cap.
    /// Anything that does not end at the goal comes back as [`Plan::Partial`].
    pub fn extract_route(&self) -> Plan {
        let cap = self.config.route_cap_for(self.grid);
        let mut route = Vec::new();
        let mut state = self.start;

        while state != self.goal && route.len() < cap {
            let Some(state_idx) = self.grid.index(state) else {
                break;
            };
            let Some(direction) = Direction::from_index(self.table.best_action(state_idx)) else {
                break;
            };
            let (next, transition) = self.simulate(state, direction);
            if transition.is_rejected() {
                tracing::trace!(cell = %state, "Greedy action rejected");
                break;
            }
            route.push(next);
            state = next;
        }

        if state == self.goal {
            Plan::Found(route)
        } else {
            tracing::trace!(len = route.len(), "Extracted route stops short of goal");
            Plan::Partial(route)
        }
    }
}
