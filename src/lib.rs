//! gridwalk - collision-free multi-agent movement on a 2D occupancy grid.
//!
//! Plans a route per agent (A* or tabular Q-learning) and advances all agents
//! tick by tick, resolving contested cells and head-on swaps in a fixed,
//! reproducible evaluation order.
//!
//! ```
//! use gridwalk::coordinator::{Coordinator, Scenario};
//! use gridwalk::grid::{Cell, Grid};
//!
//! let grid: Grid = "....\n####".parse().unwrap();
//! let scenario = Scenario::new(grid)
//!     .with_agent(Cell::new(0, 1), Cell::new(0, 3))
//!     .with_agent(Cell::new(0, 0), Cell::new(0, 2));
//! let mut coordinator = Coordinator::new(scenario).unwrap();
//! let summary = coordinator.run_to_completion(20);
//! assert_eq!(summary.arrived(), 2);
//! ```

pub mod agent;
pub mod algorithms;
pub mod coordinator;
pub mod error;
pub mod grid;

pub use error::ConfigError;

/// Identifier type used for agents.
pub type Id = String;
