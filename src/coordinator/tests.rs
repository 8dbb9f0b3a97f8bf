//! Multi-agent scenarios with fixed evaluation order.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;
use crate::agent::{AbandonReason, AgentEvent};
use crate::algorithms::{LearningConfig, PlannerConfig};

fn c(row: usize, col: usize) -> Cell {
    Cell::new(row, col)
}

fn corridor() -> Grid {
    "....\n####".parse().unwrap()
}

/// Vertical corridor down column 0 with a side pocket at (1, 1).
fn pocket_corridor() -> Grid {
    ".#\n..\n.#\n.#".parse().unwrap()
}

fn positions(report: &TickReport) -> Vec<Cell> {
    report.agents.iter().map(|a| a.position).collect()
}

#[cfg(test)]
mod evaluation_order {
    use super::*;

    #[test]
    fn earlier_agent_sees_peer_before_it_moves() {
        let scenario = Scenario::new(corridor())
            .with_named_agent("A", c(0, 0), c(0, 2))
            .with_named_agent("B", c(0, 1), c(0, 3));
        let mut coord = Coordinator::new(scenario).unwrap();

        let report = coord.tick();
        assert_eq!(report.agents[0].event, AgentEvent::Waited { blocked_at: c(0, 1) });
        assert_eq!(report.agents[0].status, AgentStatus::Waiting);
        assert_eq!(positions(&report), vec![c(0, 0), c(0, 2)]);

        let summary = coord.run_to_completion(10);
        assert!(summary.complete);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.arrived(), 2);
        assert_eq!(summary.outcome("A").map(|o| o.total_waits), Some(1));
    }

    #[test]
    fn later_agent_sees_peer_after_it_moves() {
        let scenario = Scenario::new(corridor())
            .with_named_agent("B", c(0, 1), c(0, 3))
            .with_named_agent("A", c(0, 0), c(0, 2));
        let mut coord = Coordinator::new(scenario).unwrap();

        let report = coord.tick();
        assert_eq!(positions(&report), vec![c(0, 2), c(0, 1)]);
        assert!(report.agents.iter().all(|a| a.waiting_streak == 0));

        let summary = coord.run_to_completion(10);
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.outcome("A").map(|o| o.total_waits), Some(0));
    }
}

#[cfg(test)]
mod head_on {
    use super::*;

    #[test]
    fn swap_resolves_through_side_pocket() {
        let scenario = Scenario::new(pocket_corridor())
            .with_named_agent("A", c(1, 0), c(3, 0))
            .with_named_agent("B", c(2, 0), c(0, 0));
        let mut coord = Coordinator::new(scenario).unwrap();

        let t1 = coord.tick();
        assert_eq!(t1.agents[0].event, AgentEvent::GaveWay { from: c(1, 0), to: c(1, 1) });
        assert_eq!(t1.agents[0].status, AgentStatus::GivingWay);
        assert_eq!(t1.count(AgentStatus::GivingWay), 1);
        assert_eq!(positions(&t1), vec![c(1, 1), c(1, 0)]);

        let t2 = coord.tick();
        assert_eq!(t2.agents[0].event, AgentEvent::Waited { blocked_at: c(1, 0) });
        assert_eq!(t2.agents[0].waiting_streak, 2);
        assert_eq!(t2.agents[1].status, AgentStatus::AtDestination);
        assert_eq!(positions(&t2), vec![c(1, 1), c(0, 0)]);

        let expected = [c(1, 0), c(2, 0), c(3, 0)];
        for cell in expected {
            let report = coord.tick();
            assert_eq!(report.position_of("A"), Some(cell));
        }

        assert!(coord.is_complete());
        assert_eq!(coord.tick_count(), 5);
        let a = coord.agent("A").unwrap();
        assert_eq!(a.status(), AgentStatus::AtDestination);
        assert_eq!(a.ticks_elapsed(), 3);
        assert_eq!(a.total_waits(), 2);
        assert!(coord.notices().is_empty());
    }
}

#[cfg(test)]
mod starvation {
    use super::*;

    #[test]
    fn walker_behind_parked_peer_abandons_on_sixth_wait() {
        let scenario = Scenario::new(corridor())
            .with_named_agent("blocker", c(0, 2), c(0, 1))
            .with_named_agent("walker", c(0, 0), c(0, 3));
        let mut coord = Coordinator::new(scenario).unwrap();

        let mut streaks = Vec::new();
        for tick in 1..=6 {
            let report = coord.tick();
            let walker = &report.agents[1];
            streaks.push(walker.waiting_streak);
            assert_eq!(walker.position, c(0, 0));
            if tick < 6 {
                assert_eq!(walker.status, AgentStatus::Waiting);
                assert!(report.notices.is_empty());
            } else {
                assert_eq!(walker.status, AgentStatus::Abandoned);
                assert_eq!(report.notices.len(), 1);
                assert_eq!(
                    report.notices[0].reason,
                    AbandonReason::Starved { waiting_streak: 6 }
                );
                assert!(report.complete);
            }
        }
        assert_eq!(streaks, vec![1, 2, 3, 4, 5, 6]);

        for _ in 0..5 {
            let report = coord.tick();
            assert_eq!(report.position_of("walker"), Some(c(0, 0)));
            assert_eq!(report.agents[1].event, AgentEvent::Idle);
        }
    }

    #[test]
    fn threshold_is_configurable() {
        let scenario = Scenario::new(corridor())
            .with_named_agent("blocker", c(0, 2), c(0, 1))
            .with_named_agent("walker", c(0, 0), c(0, 3))
            .with_starvation_threshold(2);
        let mut coord = Coordinator::new(scenario).unwrap();
        let summary = coord.run_to_completion(20);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.notices.len(), 1);
        assert!(summary.to_string().contains("waited 3 consecutive ticks"));
    }
}

#[cfg(test)]
mod unreachable {
    use super::*;

    #[test]
    fn blocked_agent_abandons_while_other_arrives() {
        let grid: Grid = "..#.\n..#.".parse().unwrap();
        let scenario = Scenario::new(grid)
            .with_agent(c(0, 0), c(0, 3))
            .with_agent(c(1, 0), c(1, 1));
        let mut coord = Coordinator::new(scenario).unwrap();
        assert!(coord.any_route_found());
        assert!(!coord.agent("A1").unwrap().has_route());

        let report = coord.tick();
        assert_eq!(report.agents[0].status, AgentStatus::Abandoned);
        assert_eq!(report.notices[0].reason, AbandonReason::NoRoute);
        assert_eq!(report.notices[0].agent, "A1");
        assert_eq!(report.agents[1].status, AgentStatus::AtDestination);
        assert!(report.complete);
    }

    #[test]
    fn all_blocked_run_finishes_after_one_tick() {
        let grid: Grid = "..#.\n..#.".parse().unwrap();
        let scenario =
            Scenario::from_endpoints(grid, &[c(0, 0), c(1, 0)], &[c(0, 3), c(1, 3)]).unwrap();
        let mut coord = Coordinator::new(scenario).unwrap();
        assert!(!coord.any_route_found());
        let summary = coord.run_to_completion(100);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.arrived(), 0);
        assert_eq!(summary.notices.len(), 2);
    }
}

#[cfg(test)]
mod runs {
    use super::*;

    #[test]
    fn invalid_scenario_is_rejected_before_running() {
        let scenario = Scenario::new(corridor()).with_agent(c(0, 0), c(1, 0));
        assert_eq!(
            Coordinator::new(scenario).unwrap_err(),
            ConfigError::EndpointOnObstacle(c(1, 0))
        );
    }

    #[test]
    fn agents_on_obstacles_or_shared_cells_never_start() {
        let on_wall = Scenario::new(corridor()).with_agent(c(1, 1), c(0, 3));
        assert_eq!(
            Coordinator::new(on_wall).unwrap_err(),
            ConfigError::EndpointOnObstacle(c(1, 1))
        );

        let shared = Scenario::new(corridor())
            .with_agent(c(0, 0), c(0, 3))
            .with_agent(c(0, 0), c(0, 2));
        assert_eq!(
            Coordinator::new(shared).unwrap_err(),
            ConfigError::DuplicateEndpoint(c(0, 0))
        );
    }

    #[test]
    fn invalid_learning_config_is_rejected_before_running() {
        let scenario = Scenario::new(corridor())
            .with_agent(c(0, 0), c(0, 3))
            .with_planner(PlannerConfig::Learned(LearningConfig {
                exploration_rate: 1.5,
                ..LearningConfig::default()
            }));
        assert!(matches!(
            Coordinator::new(scenario).unwrap_err(),
            ConfigError::InvalidParameter {
                name: "exploration_rate",
                ..
            }
        ));
    }

    #[test]
    fn max_ticks_bounds_the_run() {
        let grid: Grid = "........\n########".parse().unwrap();
        let scenario = Scenario::new(grid).with_agent(c(0, 0), c(0, 7));
        let mut coord = Coordinator::new(scenario).unwrap();
        let summary = coord.run_to_completion(2);
        assert!(!summary.complete);
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.outcomes[0].position, c(0, 2));
        assert_eq!(coord.count(AgentStatus::Moving), 1);

        let summary = coord.run_to_completion(10);
        assert!(summary.complete);
        assert_eq!(summary.ticks, 7);
    }

    #[test]
    fn learned_planner_drives_agent_home() {
        let scenario = Scenario::new(Grid::open(3, 3).unwrap())
            .with_agent(c(0, 0), c(2, 2))
            .with_planner(PlannerConfig::Learned(LearningConfig::default()));
        let mut coord = Coordinator::new(scenario).unwrap();
        let summary = coord.run_to_completion(20);
        assert!(summary.complete);
        assert_eq!(summary.outcomes[0].status, AgentStatus::AtDestination);
        assert_eq!(summary.outcomes[0].moves, 4);
    }

    #[test]
    fn agents_never_share_a_cell() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..30 {
            let rows = rng.gen_range(3..8);
            let cols = rng.gen_range(3..8);
            let obstacles: Vec<Cell> = (0..rows)
                .flat_map(|r| (0..cols).map(move |col| c(r, col)))
                .filter(|_| rng.gen_bool(0.15))
                .collect();
            let grid = Grid::new(rows, cols, obstacles).unwrap();

            let mut free: Vec<Cell> = (0..grid.len())
                .filter_map(|i| grid.cell_at(i))
                .filter(|cell| grid.is_free(*cell))
                .collect();
            free.shuffle(&mut rng);
            let n_agents = (free.len() / 2).min(4);
            if n_agents == 0 {
                continue;
            }
            let starts = &free[..n_agents];
            let goals = &free[n_agents..2 * n_agents];

            let scenario = Scenario::from_endpoints(grid.clone(), starts, goals).unwrap();
            let mut coord = Coordinator::new(scenario).unwrap();
            for _ in 0..60 {
                let report = coord.tick();
                let cells = positions(&report);
                let distinct: HashSet<Cell> = cells.iter().copied().collect();
                assert_eq!(distinct.len(), cells.len(), "collision on\n{}", grid);
                assert!(cells.iter().all(|cell| grid.is_free(*cell)));
                if report.complete {
                    break;
                }
            }
        }
    }

    #[test]
    fn moves_are_single_steps() {
        let grid: Grid = "....\n.#..\n....".parse().unwrap();
        let scenario = Scenario::new(grid)
            .with_agent(c(0, 0), c(2, 3))
            .with_agent(c(2, 0), c(0, 3));
        let mut coord = Coordinator::new(scenario).unwrap();
        let mut last: Vec<Cell> = coord.agents().iter().map(|a| a.position()).collect();
        while !coord.is_complete() && coord.tick_count() < 30 {
            let report = coord.tick();
            for (snap, prev) in report.agents.iter().zip(&last) {
                assert!(snap.position.manhattan(prev) <= 1);
                assert_eq!(snap.event.is_move(), snap.position != *prev);
            }
            last = positions(&report);
        }
        assert!(coord.is_complete());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tick_report_roundtrip() {
        let scenario = Scenario::new(corridor()).with_agent(c(0, 0), c(0, 3));
        let mut coord = Coordinator::new(scenario).unwrap();
        let report = coord.tick();
        let json = serde_json::to_string(&report).unwrap();
        let restored: TickReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn scenario_roundtrip() {
        let scenario = Scenario::new(corridor())
            .with_agent(c(0, 0), c(0, 3))
            .with_planner(PlannerConfig::Learned(LearningConfig::default()));
        let json = serde_json::to_string_pretty(&scenario).unwrap();
        let restored: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scenario);
    }

    #[test]
    fn scenario_with_malformed_grid_fails_to_load() {
        let scenario = Scenario::new(Grid::open(3, 3).unwrap()).with_agent(c(2, 2), c(0, 0));
        let mut value = serde_json::to_value(&scenario).unwrap();
        value["grid"]["cells"] = serde_json::json!(["free"]);
        assert!(serde_json::from_value::<Scenario>(value).is_err());
    }
}
