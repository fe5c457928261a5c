use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use corral::{budget_from_signed, Grid, Solver, SolverConfig};
use itertools::Itertools;
use tracing::Level;

#[derive(Parser)]
#[command(name = "corral")]
#[command(about = "Trap the agent (H) in the largest possible enclosure using at most k walls")]
struct Cmd {
    /// Number of walls available
    #[arg(short, default_value_t = 6, allow_negative_numbers = true)]
    k: i64,

    /// Grid file, one row per line; read from stdin if omitted
    input: Option<PathBuf>,

    /// Refuse puzzles where the agent can reach more than this many cells
    #[arg(long)]
    max_cells: Option<usize>,

    /// Stop after this many search states and print the best enclosure found so far
    #[arg(long)]
    state_limit: Option<usize>,

    /// Log more; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let started = Instant::now();
    let k = budget_from_signed(cmd.k)?;

    let text = match &cmd.input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading grid from stdin")?;
            text
        }
    };
    let grid: Grid = text.parse().context("parsing grid")?;
    let (rows, cols) = grid.dims();
    tracing::info!(rows, cols, k, "solving");

    let solver = Solver::with_config(SolverConfig {
        max_cells: cmd.max_cells,
        state_limit: cmd.state_limit,
    });
    let solution = solver.solve(k, &grid)?;

    println!("Time taken: {:.3} seconds", started.elapsed().as_secs_f64());
    println!("max enclosed area: {}", solution.area);
    println!("walls: [{}]", solution.walls.iter().join(", "));
    if !solution.exhaustive {
        println!("(state limit reached, the area may not be optimal)");
    }
    print!("{}", grid.render(&solution));

    Ok(())
}
