//! Reward shaping for simulated episodes.

use super::config::LearningConfig;

/// What happened when an action was simulated from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Off-grid or into an obstacle; the state does not change.
    Blocked,
    /// Into a cell held by another tracked agent; the state does not change.
    Collision,
    /// Into the goal; ends the episode.
    Goal,
    /// Any other legal move.
    Step,
}

impl Transition {
    /// True when the agent stays where it was.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Transition::Blocked | Transition::Collision)
    }
}

/// Maps transitions to scalar rewards.
pub struct RewardComputer;

impl RewardComputer {
    /// Reward for a single transition.
    ///
    /// # Components
    ///
    /// 1. **Goal**: large positive `reward_goal`.
    /// 2. **Step cost**: small negative `reward_step`, pushes toward short routes.
    /// 3. **Obstacle**: large negative `reward_obstacle`.
    /// 4. **Collision**: moderate negative `reward_collision`.
    pub fn compute(transition: Transition, config: &LearningConfig) -> f64 {
        match transition {
            Transition::Blocked => config.reward_obstacle,
            Transition::Collision => config.reward_collision,
            Transition::Goal => config.reward_goal,
            Transition::Step => config.reward_step,
        }
    }
}
