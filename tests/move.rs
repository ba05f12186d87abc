use std::fmt::Write;

use anyhow::{ensure, Context};
use common::*;
use rush_hour_solver::Board;

mod common;

fn main() {
    run_tests("move", |content| {
        let input = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let (slides, map) = input.split_once('\n').context("No slides")?;
        ensure!(!slides.trim().is_empty(), "No slides");

        let mut board = map.parse::<Board>().context("Invalid map")?;
        let mut got = format!("{input}\n\n{SEPARATOR}");
        for (token, i) in slides.split_whitespace().zip(1..) {
            (|| {
                let (car, dir, distance) = parse_slide(token)?;
                ensure!(car.index() < board.cars().len(), "No such car");
                ensure!(distance > 0, "Empty slide");
                let max = board.max_distance(car, dir);
                ensure!(distance <= max, "Blocked after {max}");
                board = board.go(car, dir, distance);
                Ok(())
            })()
            .with_context(|| format!("Failed to perform slide {i} {token}"))?;
            write!(got, "{board}heuristic: {}\n{SEPARATOR}", board.heuristic()).unwrap();
        }

        Ok(got)
    });
}
