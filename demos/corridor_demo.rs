// Demonstration: two agents swap ends of a corridor with a single side pocket.
//
// Build/run from this repo root:
//   RUST_LOG=debug cargo run --example corridor_demo -- --max-ticks 20

use std::env;

use gridwalk::coordinator::{Coordinator, Scenario};
use gridwalk::grid::{Cell, Grid};
use tracing_subscriber::EnvFilter;

const MAP: &str = "
    #.###
    .....
    ##.##
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let max_ticks: u64 = arg_value(&args, "--max-ticks")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);

    let grid: Grid = match MAP.parse() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Bad map: {}", e);
            std::process::exit(2);
        }
    };
    println!("{}", grid);

    let scenario = Scenario::new(grid)
        .with_agent(Cell::new(1, 1), Cell::new(1, 4))
        .with_agent(Cell::new(1, 3), Cell::new(1, 0));

    let mut coordinator = match Coordinator::new(scenario) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Cannot start run: {}", e);
            std::process::exit(2);
        }
    };

    while !coordinator.is_complete() && coordinator.tick_count() < max_ticks {
        let report = coordinator.tick();
        for a in &report.agents {
            println!(
                "tick {:>2}  {}  {:<15} at {}  waiting: {}",
                report.tick,
                a.id,
                a.status.to_string(),
                a.position,
                a.waiting_streak
            );
        }
        for notice in &report.notices {
            println!("  ! {}", notice);
        }
    }

    println!("{}", coordinator.summary());
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
