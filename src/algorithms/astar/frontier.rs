//! Frontier entries for the best-first search.

use std::cmp::Ordering;

use crate::grid::Cell;

/// A frontier entry keyed by `f = g + h`.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the smallest `f`
/// wins, and among equal `f` the smallest cell (row, then column) wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Node {
    pub cell: Cell,
    pub f_score: usize,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn lowest_f_pops_first() {
        let mut heap = BinaryHeap::new();
        heap.push(Node {
            cell: Cell::new(0, 0),
            f_score: 5,
        });
        heap.push(Node {
            cell: Cell::new(3, 3),
            f_score: 2,
        });
        assert_eq!(heap.pop().map(|n| n.cell), Some(Cell::new(3, 3)));
    }

    #[test]
    fn ties_pop_in_cell_order() {
        let mut heap = BinaryHeap::new();
        for cell in [Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)] {
            heap.push(Node { cell, f_score: 4 });
        }
        let order: Vec<Cell> = std::iter::from_fn(|| heap.pop().map(|n| n.cell)).collect();
        assert_eq!(order, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }
}
