// Demonstration: plan with the learned planner and compare against A*.
//
// Build/run from this repo root:
//   cargo run --example learned_demo -- --episodes 2000 --seed 7

use std::env;

use gridwalk::algorithms::{AStarPlanner, LearnedPlanner, LearningConfig, Planner};
use gridwalk::grid::{Cell, Grid};
use tracing_subscriber::EnvFilter;

const MAP: &str = "
    ......
    .####.
    ......
    .#..#.
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let episodes: u32 = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let grid: Grid = match MAP.parse() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Bad map: {}", e);
            std::process::exit(2);
        }
    };
    let start = Cell::new(3, 0);
    let goal = Cell::new(0, 5);

    let exact = AStarPlanner.plan(&grid, start, goal, &[]);
    println!("{:<10} {} steps, complete: {}", "a*", exact.route().len(), exact.is_complete());

    let mut learned = match LearnedPlanner::new(LearningConfig {
        episodes,
        seed,
        ..LearningConfig::default()
    }) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Bad learning config: {}", e);
            std::process::exit(2);
        }
    };
    let plan = learned.plan(&grid, start, goal, &[]);
    println!(
        "{:<10} {} steps, complete: {}",
        learned.name(),
        plan.route().len(),
        plan.is_complete()
    );
    if let Some(report) = learned.last_report() {
        println!(
            "  {} of {} episodes reached the goal, final exploration rate {:.3}",
            report.episodes_reaching_goal, report.episodes, report.final_exploration_rate
        );
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
