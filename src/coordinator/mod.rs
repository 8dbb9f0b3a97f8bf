//! Turn-based driver for a set of agents on one grid.
//!
//! # Evaluation order
//!
//! Agents are evaluated one at a time in construction order. Each agent sees
//! its peers exactly as they are at that moment, so a peer evaluated earlier
//! in the same tick is seen at its new cell, and a peer evaluated later at
//! its old one. An earlier agent therefore has movement priority over a
//! later one. This asymmetry is part of the contract.

mod report;
mod scenario;

#[cfg(test)]
mod tests;

pub use report::{AgentOutcome, AgentSnapshot, RunSummary, TickReport};
pub use scenario::{AgentSpec, Scenario};

use tracing::{debug, info, warn};

use crate::agent::{Agent, AgentStatus, Notice, PeerView};
use crate::algorithms::Plan;
use crate::error::ConfigError;
use crate::grid::{Cell, Grid};

/// Owns the grid and every agent; advances them one tick at a time.
#[derive(Debug, Clone)]
pub struct Coordinator {
    grid: Grid,
    agents: Vec<Agent>,
    tick: u64,
    any_route_found: bool,
    notices: Vec<Notice>,
}

impl Coordinator {
    /// Validates `scenario` and plans a route for every agent.
    ///
    /// Each agent is planned with the other agents' start cells as occupied;
    /// only planners that opt in make use of them. Unreachable goals are not
    /// an error: the agent is created without a route and abandons on its
    /// first turn.
    pub fn new(scenario: Scenario) -> Result<Self, ConfigError> {
        scenario.validate()?;

        let mut planner = scenario.planner.build()?;
        let starts: Vec<Cell> = scenario.agents.iter().map(|a| a.start).collect();
        let mut agents = Vec::with_capacity(scenario.agents.len());

        for (i, spec) in scenario.agents.iter().enumerate() {
            let name = scenario.agent_name(i);
            let occupied: Vec<Cell> = starts
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, c)| *c)
                .collect();

            let plan = planner.plan(&scenario.grid, spec.start, spec.goal, &occupied);
            match &plan {
                Plan::Found(route) => {
                    info!(agent = %name, planner = planner.name(), len = route.len(), "Starts at {}", spec.start)
                }
                Plan::Partial(route) => {
                    warn!(agent = %name, len = route.len(), "Planned route for {} stops short of its goal", name)
                }
                Plan::Unreachable => warn!(agent = %name, "Path for {} is not found due to obstacles", name),
            }

            agents.push(
                Agent::new(name, spec.start, spec.goal, plan)
                    .with_starvation_threshold(scenario.starvation_threshold),
            );
        }

        Ok(Self::from_agents(scenario.grid, agents))
    }

    /// Wraps agents planned from a validated scenario. Evaluation order is
    /// the order given.
    fn from_agents(grid: Grid, agents: Vec<Agent>) -> Self {
        let any_route_found = agents.iter().any(Agent::has_route);
        if !any_route_found {
            warn!("Paths for all agents are blocked by obstacles");
        }
        Self {
            grid,
            agents,
            tick: 0,
            any_route_found,
            notices: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Agents in evaluation order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Whether the planner produced a route for at least one agent.
    pub fn any_route_found(&self) -> bool {
        self.any_route_found
    }

    /// Every notice raised so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// True once every agent is terminal.
    pub fn is_complete(&self) -> bool {
        self.agents.iter().all(|a| a.status().is_terminal())
    }

    /// Number of agents currently in `status`.
    pub fn count(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status() == status).count()
    }

    /// Offers every agent one step, in construction order.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut snapshots = Vec::with_capacity(self.agents.len());
        let mut notices = Vec::new();

        for i in 0..self.agents.len() {
            let peers: Vec<PeerView> = self
                .agents
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, a)| a.view())
                .collect();

            let agent = &mut self.agents[i];
            let outcome = agent.advance_one_tick(&self.grid, &peers);
            snapshots.push(AgentSnapshot::capture(agent, outcome.event));
            notices.extend(outcome.notice);
        }

        let complete = self.is_complete();
        debug!(
            tick = self.tick,
            moving = self.count(AgentStatus::Moving),
            waiting = self.count(AgentStatus::Waiting),
            giving_way = self.count(AgentStatus::GivingWay),
            complete,
            "Tick finished"
        );
        self.notices.extend(notices.iter().cloned());

        TickReport {
            tick: self.tick,
            agents: snapshots,
            notices,
            complete,
        }
    }

    /// Ticks until every agent is terminal or `max_ticks` more ticks have run.
    pub fn run_to_completion(&mut self, max_ticks: u64) -> RunSummary {
        let mut remaining = max_ticks;
        while !self.is_complete() && remaining > 0 {
            self.tick();
            remaining -= 1;
        }

        let summary = self.summary();
        info!(
            ticks = summary.ticks,
            arrived = summary.arrived(),
            complete = summary.complete,
            "Run finished"
        );
        summary
    }

    /// Current per-agent outcomes.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.tick,
            complete: self.is_complete(),
            outcomes: self
                .agents
                .iter()
                .map(|a| AgentOutcome {
                    id: a.id().to_string(),
                    status: a.status(),
                    position: a.position(),
                    destination: a.destination(),
                    moves: a.ticks_elapsed(),
                    total_waits: a.total_waits(),
                })
                .collect(),
            notices: self.notices.clone(),
        }
    }
}
