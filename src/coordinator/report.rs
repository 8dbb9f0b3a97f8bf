//! Read-only views handed to the presentation layer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentEvent, AgentStatus, Notice};
use crate::grid::Cell;
use crate::Id;

/// State of one agent after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentSnapshot {
    pub id: Id,
    pub status: AgentStatus,
    pub position: Cell,
    pub destination: Cell,
    pub waiting_streak: u32,
    pub ticks_elapsed: u32,
    pub total_waits: u32,
    /// What the agent did this tick.
    pub event: AgentEvent,
}

impl AgentSnapshot {
    pub(crate) fn capture(agent: &Agent, event: AgentEvent) -> Self {
        Self {
            id: agent.id().to_string(),
            status: agent.status(),
            position: agent.position(),
            destination: agent.destination(),
            waiting_streak: agent.waiting_streak(),
            ticks_elapsed: agent.ticks_elapsed(),
            total_waits: agent.total_waits(),
            event,
        }
    }
}

/// Everything observable about one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// One snapshot per agent, in evaluation order.
    pub agents: Vec<AgentSnapshot>,
    /// Abandonment notices raised this tick.
    pub notices: Vec<Notice>,
    /// True once every agent is terminal.
    pub complete: bool,
}

impl TickReport {
    /// Number of agents currently in `status`.
    pub fn count(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status == status).count()
    }

    /// Agents still moving, waiting or giving way.
    pub fn active(&self) -> usize {
        self.agents.iter().filter(|a| !a.status.is_terminal()).count()
    }

    pub fn position_of(&self, id: &str) -> Option<Cell> {
        self.agents.iter().find(|a| a.id == id).map(|a| a.position)
    }
}

/// Final state of one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentOutcome {
    pub id: Id,
    pub status: AgentStatus,
    pub position: Cell,
    pub destination: Cell,
    pub moves: u32,
    pub total_waits: u32,
}

/// Result of [`super::Coordinator::run_to_completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    pub ticks: u64,
    pub complete: bool,
    pub outcomes: Vec<AgentOutcome>,
    pub notices: Vec<Notice>,
}

impl RunSummary {
    pub fn arrived(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == AgentStatus::AtDestination)
            .count()
    }

    pub fn outcome(&self, id: &str) -> Option<&AgentOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Run Summary ({} ticks, {}) ===",
            self.ticks,
            if self.complete { "complete" } else { "incomplete" }
        )?;
        for o in &self.outcomes {
            writeln!(
                f,
                "  {:<6} {:<15} at {} (goal {})  moves: {}  waiting: {}",
                o.id,
                o.status.to_string(),
                o.position,
                o.destination,
                o.moves,
                o.total_waits
            )?;
        }
        for notice in &self.notices {
            writeln!(f, "  ! {}", notice)?;
        }
        Ok(())
    }
}
