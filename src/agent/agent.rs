//! Per-tick movement state machine.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::event::{AbandonReason, AgentEvent, AgentTick, Notice};
use super::status::AgentStatus;
use crate::algorithms::Plan;
use crate::grid::{Cell, Direction, Grid};
use crate::Id;

/// Consecutive non-progressing ticks tolerated before an agent gives up.
pub const DEFAULT_STARVATION_THRESHOLD: u32 = 5;

/// What an agent can see of another agent during its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerView {
    /// Where the peer stands right now (already updated if it moved earlier
    /// in the same tick).
    pub position: Cell,
    /// The peer's next route cell, `None` once it is terminal.
    pub intent: Option<Cell>,
}

/// An agent walking a planned route on the shared grid.
///
/// Each tick the agent, in order:
/// 1. does nothing if terminal, or gives up if its route is spent away from
///    the destination;
/// 2. steps aside if it is in a head-on swap with a peer and has no evasive
///    move outstanding;
/// 3. waits if its next cell is held by a peer;
/// 4. otherwise commits the step;
/// 5. gives up once its waiting streak exceeds the starvation threshold.
#[derive(Debug, Clone)]
pub struct Agent {
    id: Id,
    start: Cell,
    destination: Cell,
    position: Cell,
    route: VecDeque<Cell>,
    planned: bool,
    status: AgentStatus,
    waiting_streak: u32,
    ticks_elapsed: u32,
    total_waits: u32,
    gave_way: bool,
    starvation_threshold: u32,
}

impl Agent {
    /// Creates an agent at `start` that will follow `plan` to `destination`.
    ///
    /// An agent whose start is its destination is created already arrived.
    pub fn new(id: impl Into<Id>, start: Cell, destination: Cell, plan: Plan) -> Self {
        let planned = !matches!(plan, Plan::Unreachable);
        let status = if start == destination {
            AgentStatus::AtDestination
        } else {
            AgentStatus::Moving
        };
        Self {
            id: id.into(),
            start,
            destination,
            position: start,
            route: plan.into_route().into(),
            planned,
            status,
            waiting_streak: 0,
            ticks_elapsed: 0,
            total_waits: 0,
            gave_way: false,
            starvation_threshold: DEFAULT_STARVATION_THRESHOLD,
        }
    }

    pub fn with_starvation_threshold(mut self, threshold: u32) -> Self {
        self.starvation_threshold = threshold;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn destination(&self) -> Cell {
        self.destination
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Remaining route, head first.
    pub fn route(&self) -> &VecDeque<Cell> {
        &self.route
    }

    /// Whether the planner returned any route for this agent.
    pub fn has_route(&self) -> bool {
        self.planned
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    /// Consecutive ticks without progress.
    pub fn waiting_streak(&self) -> u32 {
        self.waiting_streak
    }

    /// Committed route steps.
    pub fn ticks_elapsed(&self) -> u32 {
        self.ticks_elapsed
    }

    /// All ticks without progress over the whole run.
    pub fn total_waits(&self) -> u32 {
        self.total_waits
    }

    /// Whether an evasive move is outstanding.
    pub fn gave_way(&self) -> bool {
        self.gave_way
    }

    pub fn starvation_threshold(&self) -> u32 {
        self.starvation_threshold
    }

    /// Next cell this agent means to enter, `None` once terminal.
    pub fn intent(&self) -> Option<Cell> {
        if self.status.is_terminal() {
            None
        } else {
            self.route.front().copied()
        }
    }

    /// How peers see this agent.
    pub fn view(&self) -> PeerView {
        PeerView {
            position: self.position,
            intent: self.intent(),
        }
    }

    /// Attempts one step given the live state of every other agent.
    ///
    /// Position and route changes are visible to any peer evaluated after
    /// this call in the same tick.
    pub fn advance_one_tick(&mut self, grid: &Grid, peers: &[PeerView]) -> AgentTick {
        if self.status.is_terminal() {
            return self.idle();
        }

        let Some(next) = self.route.front().copied() else {
            let reason = if self.planned {
                AbandonReason::RouteExhausted
            } else {
                AbandonReason::NoRoute
            };
            let notice = self.abandon(reason);
            return AgentTick {
                event: AgentEvent::Idle,
                notice: Some(notice),
            };
        };

        // A give-way lasts one tick; this tick re-runs the full policy.
        if self.status == AgentStatus::GivingWay {
            self.status = AgentStatus::Moving;
        }

        let occupied = |cell: Cell| peers.iter().any(|p| p.position == cell);
        let head_on = peers
            .iter()
            .any(|p| p.position == next && p.intent == Some(self.position));

        let event = if head_on && !self.gave_way {
            self.give_way(grid, &occupied)
        } else if occupied(next) {
            self.status = AgentStatus::Waiting;
            self.record_wait();
            debug!(agent = %self.id, at = %self.position, "Waits for {} to clear", next);
            AgentEvent::Waited { blocked_at: next }
        } else {
            self.commit(next)
        };

        let notice = (self.waiting_streak > self.starvation_threshold).then(|| {
            self.abandon(AbandonReason::Starved {
                waiting_streak: self.waiting_streak,
            })
        });

        AgentTick { event, notice }
    }

    fn idle(&self) -> AgentTick {
        AgentTick {
            event: AgentEvent::Idle,
            notice: None,
        }
    }

    fn record_wait(&mut self) {
        self.waiting_streak += 1;
        self.total_waits += 1;
    }

    /// Steps into the first free, unoccupied neighbor. The vacated cell goes
    /// back on the head of the route so the walk stays connected.
    fn give_way(&mut self, grid: &Grid, occupied: &impl Fn(Cell) -> bool) -> AgentEvent {
        self.record_wait();
        let from = self.position;
        match grid.neighbors(from).find(|(_, cell)| !occupied(*cell)) {
            Some((_, to)) => {
                self.route.push_front(from);
                self.position = to;
                self.gave_way = true;
                self.status = AgentStatus::GivingWay;
                debug!(agent = %self.id, "Gives way from {} to {}", from, to);
                AgentEvent::GaveWay { from, to }
            }
            None => {
                self.status = AgentStatus::Waiting;
                debug!(agent = %self.id, at = %from, "Head-on conflict with nowhere to step aside");
                AgentEvent::HeldPosition { at: from }
            }
        }
    }

    fn commit(&mut self, next: Cell) -> AgentEvent {
        let from = self.position;
        self.route.pop_front();
        self.position = next;
        self.ticks_elapsed += 1;
        self.waiting_streak = 0;
        self.gave_way = false;

        if next == self.destination {
            self.status = AgentStatus::AtDestination;
            self.route.clear();
            info!(agent = %self.id, ticks = self.ticks_elapsed, "Reached destination {}", next);
            return AgentEvent::Arrived { from, at: next };
        }

        self.status = AgentStatus::Moving;
        let direction = match Direction::between(from, next) {
            Some(direction) => direction,
            None => {
                warn!(
                    agent = %self.id,
                    "Route step from {} to {} is not a single move", from, next
                );
                Direction::East
            }
        };
        debug!(agent = %self.id, "Moves from {} to {} ({})", from, next, direction);
        AgentEvent::Moved {
            from,
            to: next,
            direction,
        }
    }

    fn abandon(&mut self, reason: AbandonReason) -> Notice {
        self.status = AgentStatus::Abandoned;
        let notice = Notice {
            agent: self.id.clone(),
            position: self.position,
            destination: self.destination,
            reason,
        };
        warn!(agent = %self.id, "{}", notice);
        notice
    }
}
