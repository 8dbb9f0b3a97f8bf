use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Movement state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentStatus {
    /// Following its route.
    Moving,
    /// Blocked by another agent this tick.
    Waiting,
    /// Stepped off its route this tick to break a head-on conflict.
    GivingWay,
    /// Reached its destination. Terminal.
    AtDestination,
    /// Gave up. Terminal.
    Abandoned,
}

impl AgentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::AtDestination | AgentStatus::Abandoned)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Moving => write!(f, "moving"),
            AgentStatus::Waiting => write!(f, "waiting"),
            AgentStatus::GivingWay => write!(f, "giving way"),
            AgentStatus::AtDestination => write!(f, "at destination"),
            AgentStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}
