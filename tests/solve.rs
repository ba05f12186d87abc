use std::fmt::Write;

use anyhow::{ensure, Context};
use rush_hour_solver::solve::{self, Limits, Outcome};
use rush_hour_solver::Board;

use crate::common::*;

mod common;

fn main() {
    run_tests("solve", |content| {
        let map = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let mut board = map.parse::<Board>().context("Invalid map")?;

        let (outcome, _) = solve::astar(board.clone(), Limits::unlimited().monitor());
        let mut got = format!("{map}\n\n{SEPARATOR}");
        match outcome {
            Outcome::Solved(solution) => {
                // Validate.
                ensure!(solution.boards()[0] == board, "Solution does not start at the map");
                for (next, mv) in solution.steps().skip(1) {
                    let mv = mv.context("Unlabelled step")?;
                    ensure!(
                        mv.distance > 0 && mv.distance <= board.max_distance(mv.car, mv.direction),
                        "Invalid move: {mv}",
                    );
                    board = board.apply(mv);
                    ensure!(board == *next, "Move does not reach the next board: {mv}");
                }
                ensure!(board.is_goal(), "Invalid solution");

                writeln!(got, "{}", solution.move_count()).unwrap();
                write!(got, "{solution}").unwrap();
            }
            Outcome::Exhausted => got.push_str("No solution found.\n"),
            Outcome::Aborted => unreachable!("Unlimited search aborted"),
        }

        Ok(got)
    });
}
