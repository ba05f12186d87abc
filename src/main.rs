use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use rush_hour_solver::parse_cases;
use rush_hour_solver::solve::{self, Limits, Outcome, Solution};

/// Solves Rush Hour puzzles with A* search.
#[derive(Debug, Parser)]
#[command(name = "rush-hour-solver", version)]
struct Args {
    /// Puzzle file: a case count followed by the cases. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Give up on a case after expanding this many nodes.
    #[arg(long, value_name = "N")]
    max_expansions: Option<u64>,

    /// Give up on a case after this many seconds.
    #[arg(long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Print the moves of every solution.
    #[arg(short, long)]
    moves: bool,

    /// Print every board along each solution.
    #[arg(short, long)]
    boards: bool,

    /// Number of cases solved in parallel. Defaults to one per core.
    #[arg(short, long)]
    jobs: Option<usize>,

    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    let cases = parse_cases(&input).context("Failed to parse the puzzles")?;

    let limits = Limits {
        max_expansions: args.max_expansions,
        time_limit: args
            .time_limit
            .map(Duration::try_from_secs_f64)
            .transpose()
            .context("Invalid time limit")?,
    };

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to set up the thread pool")?;
    }

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(cases.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {wide_bar} {pos}/{len} cases")
            .context("Invalid progress template")?,
    );

    let outcomes = cases
        .into_par_iter()
        .enumerate()
        .map(|(i, board)| {
            let (outcome, stats) = solve::astar(board, limits.monitor());
            info!(
                "Test #{}: {} expanded, {} generated, {} stale",
                i + 1,
                stats.expanded,
                stats.generated,
                stats.stale,
            );
            outcome
        })
        .progress_with(progress.clone())
        .collect::<Vec<_>>();
    progress.finish_and_clear();

    for (outcome, i) in outcomes.iter().zip(1..) {
        print!("Test #{i}: ");
        match outcome {
            Outcome::Solved(solution) => {
                println!("{}", solution.move_count());
                print_solution(solution, &args);
            }
            Outcome::Exhausted => println!("{}", style("No solution found.").red()),
            Outcome::Aborted => println!("{}", style("Search aborted.").yellow()),
        }
    }

    Ok(())
}

fn print_solution(solution: &Solution, args: &Args) {
    for (board, mv) in solution.steps() {
        if args.moves {
            if let Some(mv) = mv {
                println!("  {mv}");
            }
        }
        if args.boards {
            println!("{board}");
        }
    }
}
