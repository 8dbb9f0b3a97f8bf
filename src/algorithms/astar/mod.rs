//! A* shortest-path planner over the 4-connected grid.
//!
//! Every step costs 1 and the heuristic is Manhattan distance, which never
//! overestimates on a 4-connected grid, so the first time the goal is popped
//! its cost is optimal.
//!
//! Determinism comes from two fixed orders:
//! - frontier ties (equal `g + h`) pop the smaller cell first, see [`frontier`]
//! - neighbors are expanded in [`crate::grid::Direction::ALL`] order

mod frontier;


use std::collections::BinaryHeap;

use super::{Plan, Planner};
use crate::grid::{Cell, Grid};
use frontier::Node;

/// Deterministic shortest-path planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl Planner for AStarPlanner {
    fn plan(&mut self, grid: &Grid, start: Cell, goal: Cell, _occupied: &[Cell]) -> Plan {
        match shortest_path(grid, start, goal) {
            Some(route) => Plan::Found(route),
            None => Plan::Unreachable,
        }
    }

    fn name(&self) -> &str {
        "a*"
    }
}

/// Finds a minimal-length route from `start` to `goal`.
///
/// The returned route excludes `start` and includes `goal`; it is empty when
/// they coincide. Returns `None` when the goal cannot be reached, including
/// when either endpoint is not a free cell.
#[tracing::instrument(level = "trace", skip_all, fields(start = %start, goal = %goal))]
pub fn shortest_path(grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !grid.is_free(start) || !grid.is_free(goal) {
        tracing::trace!("Endpoint is not a free cell");
        return None;
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: Vec<Option<Cell>> = vec![None; grid.len()];
    let mut g_score: Vec<usize> = vec![usize::MAX; grid.len()];
    let mut closed: Vec<bool> = vec![false; grid.len()];

    let start_idx = grid.index(start)?;
    g_score[start_idx] = 0;
    open_set.push(Node {
        cell: start,
        f_score: start.manhattan(&goal),
    });

    let mut expansions = 0usize;
    while let Some(Node { cell: current, .. }) = open_set.pop() {
        if current == goal {
            tracing::trace!(expansions, "Path found");
            return Some(reconstruct_route(grid, &came_from, start, goal));
        }

        let current_idx = grid.index(current)?;
        if closed[current_idx] {
            continue;
        }
        closed[current_idx] = true;
        expansions += 1;

        let tentative_g = g_score[current_idx] + 1;
        for (_, neighbor) in grid.neighbors(current) {
            let Some(neighbor_idx) = grid.index(neighbor) else {
                continue;
            };
            if closed[neighbor_idx] || tentative_g >= g_score[neighbor_idx] {
                continue;
            }
            came_from[neighbor_idx] = Some(current);
            g_score[neighbor_idx] = tentative_g;
            open_set.push(Node {
                cell: neighbor,
                f_score: tentative_g + neighbor.manhattan(&goal),
            });
        }
    }

    tracing::trace!(expansions, "No path found");
    None
}

/// Walks predecessor links back from `goal`, then reverses. `start` itself
/// is left out.
fn reconstruct_route(grid: &Grid, came_from: &[Option<Cell>], start: Cell, goal: Cell) -> Vec<Cell> {
    let mut route = Vec::new();
    let mut current = goal;
    while current != start {
        route.push(current);
        match grid.index(current).and_then(|i| came_from[i]) {
            Some(prev) => current = prev,
            None => break,
        }
    }
    route.reverse();
    route
}
