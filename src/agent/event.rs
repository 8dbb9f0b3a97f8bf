//! Per-tick observations produced by an agent.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Direction};
use crate::Id;

/// What an agent did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentEvent {
    /// Committed a route step.
    Moved {
        from: Cell,
        to: Cell,
        direction: Direction,
    },
    /// Committed the final route step.
    Arrived { from: Cell, at: Cell },
    /// Next cell held by another agent.
    Waited { blocked_at: Cell },
    /// Stepped aside to break a head-on conflict.
    GaveWay { from: Cell, to: Cell },
    /// Head-on conflict with no free cell to step into.
    HeldPosition { at: Cell },
    /// Nothing to do: already terminal, or abandoned this tick without moving.
    Idle,
}

impl AgentEvent {
    /// True for events that changed the agent's cell.
    pub fn is_move(&self) -> bool {
        matches!(
            self,
            AgentEvent::Moved { .. } | AgentEvent::Arrived { .. } | AgentEvent::GaveWay { .. }
        )
    }
}

/// Why an agent stopped pursuing its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbandonReason {
    /// The planner found no route at all.
    NoRoute,
    /// The planned route ran out before the destination.
    RouteExhausted,
    /// Too many consecutive ticks without progress.
    Starved { waiting_streak: u32 },
}

/// User-facing notice that an agent cannot reach its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Notice {
    pub agent: Id,
    pub position: Cell,
    pub destination: Cell,
    pub reason: AbandonReason,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cannot reach its destination {} from {}: ",
            self.agent, self.destination, self.position
        )?;
        match self.reason {
            AbandonReason::NoRoute => write!(f, "path is blocked by obstacles"),
            AbandonReason::RouteExhausted => write!(f, "planned route ends short of the goal"),
            AbandonReason::Starved { waiting_streak } => {
                write!(f, "waited {} consecutive ticks", waiting_streak)
            }
        }
    }
}

/// Result of [`super::Agent::advance_one_tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTick {
    pub event: AgentEvent,
    /// Set on the tick the agent is abandoned.
    pub notice: Option<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_events() {
        let from = Cell::new(0, 0);
        let to = Cell::new(0, 1);
        assert!(AgentEvent::Moved {
            from,
            to,
            direction: Direction::East
        }
        .is_move());
        assert!(AgentEvent::GaveWay { from, to }.is_move());
        assert!(!AgentEvent::Waited { blocked_at: to }.is_move());
        assert!(!AgentEvent::Idle.is_move());
    }

    #[test]
    fn starvation_notice_display() {
        let notice = Notice {
            agent: "A2".into(),
            position: Cell::new(0, 0),
            destination: Cell::new(0, 3),
            reason: AbandonReason::Starved { waiting_streak: 6 },
        };
        assert_eq!(
            notice.to_string(),
            "A2 cannot reach its destination (0, 3) from (0, 0): waited 6 consecutive ticks"
        );
    }
}
