//! Tabular action values, one row per grid cell.

use crate::grid::Direction;

const ACTIONS: usize = Direction::ALL.len();

/// Action-value table indexed by row-major cell index and action index.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<[f64; ACTIONS]>,
}

impl QTable {
    /// Zero-initialized table for `n_cells` cells.
    pub fn new(n_cells: usize) -> Self {
        Self {
            values: vec![[0.0; ACTIONS]; n_cells],
        }
    }

    pub fn n_cells(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, cell: usize, action: usize) -> f64 {
        self.values[cell][action]
    }

    pub fn set(&mut self, cell: usize, action: usize, value: f64) {
        self.values[cell][action] = value;
    }

    /// Highest-valued action at `cell`. Ties go to the lowest index.
    pub fn best_action(&self, cell: usize) -> usize {
        let row = &self.values[cell];
        let mut best = 0;
        for action in 1..ACTIONS {
            if row[action] > row[best] {
                best = action;
            }
        }
        best
    }

    /// Value of the best action at `cell`.
    pub fn max_value(&self, cell: usize) -> f64 {
        self.values[cell][self.best_action(cell)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_table_prefers_first_action() {
        let table = QTable::new(4);
        assert_eq!(table.n_cells(), 4);
        assert_eq!(table.best_action(2), 0);
        assert_eq!(table.max_value(2), 0.0);
    }

    #[test]
    fn best_action_breaks_ties_low() {
        let mut table = QTable::new(1);
        table.set(0, 1, 3.0);
        table.set(0, 3, 3.0);
        assert_eq!(table.best_action(0), 1);
        table.set(0, 2, 4.0);
        assert_eq!(table.best_action(0), 2);
        assert_eq!(table.max_value(0), 4.0);
    }

    #[test]
    fn negative_rows_still_pick_maximum() {
        let mut table = QTable::new(1);
        for (a, v) in [-5.0, -1.0, -3.0, -2.0].into_iter().enumerate() {
            table.set(0, a, v);
        }
        assert_eq!(table.best_action(0), 1);
        assert_eq!(table.get(0, 3), -2.0);
    }
}
