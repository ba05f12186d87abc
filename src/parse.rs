use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Board, Car, Orientation};

impl FromStr for Board {
    type Err = anyhow::Error;

    /// Parses a single case: a `rows cols numCars` header followed by one
    /// `row col orientation length` line per car, with 1-indexed coordinates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = content_lines(s);
        let board = parse_case(&mut lines)?;
        ensure!(lines.next().is_none(), "Trailing lines after the last car");
        Ok(board)
    }
}

/// Parses a case count followed by that many cases.
pub fn parse_cases(s: &str) -> Result<Vec<Board>> {
    let mut lines = content_lines(s);
    let count = lines
        .next()
        .context("Missing case count")?
        .parse::<usize>()
        .context("Invalid case count")?;
    let cases = (1..=count)
        .map(|i| parse_case(&mut lines).with_context(|| format!("Failed to parse case #{i}")))
        .collect::<Result<Vec<_>>>()?;
    ensure!(lines.next().is_none(), "Trailing lines after case #{count}");
    Ok(cases)
}

fn content_lines(s: &str) -> impl Iterator<Item = &str> {
    s.lines().map(|line| line.trim()).filter(|line| !line.is_empty())
}

fn fields<const N: usize>(line: &str) -> Result<[&str; N]> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    fields
        .try_into()
        .map_err(|fields: Vec<_>| {
            anyhow::anyhow!("Expecting {N} fields, got {}: {line:?}", fields.len())
        })
}

fn parse_case<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<Board> {
    let header = lines.next().context("Missing case header")?;
    let [rows, cols, num_cars] = fields::<3>(header).context("Invalid case header")?;
    let rows = rows.parse::<u8>().context("Invalid row count")?;
    let cols = cols.parse::<u8>().context("Invalid column count")?;
    let num_cars = num_cars.parse::<usize>().context("Invalid car count")?;
    ensure!(rows > 0 && cols > 0, "Empty grid {rows}x{cols}");
    ensure!(num_cars > 0, "Missing the target car");
    ensure!(num_cars <= 256, "Too many cars: {num_cars}");

    let mut occupied = vec![None; rows as usize * cols as usize];
    let mut cars = Vec::with_capacity(num_cars);
    for i in 0..num_cars {
        let line = lines.next().with_context(|| format!("Missing car {i}"))?;
        let car = parse_car(line, rows, cols).with_context(|| format!("Invalid car {i}"))?;
        for (row, col) in car.cells() {
            let cell = &mut occupied[row as usize * cols as usize + col as usize];
            if let Some(other) = *cell {
                bail!(
                    "Car {i} overlaps car {other} at ({}, {})",
                    row as u16 + 1,
                    col as u16 + 1,
                );
            }
            *cell = Some(i);
        }
        cars.push(car);
    }

    Ok(Board::new(rows, cols, cars))
}

fn parse_car(line: &str, rows: u8, cols: u8) -> Result<Car> {
    let [row, col, orientation, length] = fields::<4>(line)?;
    let row = row.parse::<u8>().context("Invalid row")?;
    let col = col.parse::<u8>().context("Invalid column")?;
    let orientation = match orientation {
        "h" | "H" => Orientation::Horizontal,
        "v" | "V" => Orientation::Vertical,
        _ => bail!("Invalid orientation: {orientation:?}"),
    };
    let length = length.parse::<u8>().context("Invalid length")?;
    ensure!(row >= 1 && col >= 1, "Coordinates are 1-indexed, got ({row}, {col})");
    ensure!(length >= 1, "Empty car");

    let (height, width) = match orientation {
        Orientation::Horizontal => (1, length as u16),
        Orientation::Vertical => (length as u16, 1),
    };
    ensure!(
        (row - 1) as u16 + height <= rows as u16 && (col - 1) as u16 + width <= cols as u16,
        "Out of the {rows}x{cols} grid at ({row}, {col}) {orientation} {length}",
    );
    Ok(Car::new(row - 1, col - 1, orientation, length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CarId;

    #[test]
    fn converts_to_zero_indexed() -> Result<()> {
        let board = "6 6 2\n3 1 h 2\n1 3 v 3\n".parse::<Board>()?;
        assert_eq!((board.rows(), board.cols()), (6, 6));
        let target = board[CarId::TARGET];
        assert_eq!((target.row(), target.col()), (2, 0));
        assert_eq!(target.orientation(), Orientation::Horizontal);
        let other = board[CarId(1)];
        assert_eq!((other.row(), other.col(), other.length()), (0, 2, 3));
        Ok(())
    }

    #[test]
    fn parses_counted_cases() -> Result<()> {
        let cases = parse_cases("2\n\n4 4 1\n1 1 v 2\n\n3 5 1\n2 2 H 1\n")?;
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].target().orientation(), Orientation::Horizontal);
        assert_eq!(cases[1].target().col(), 1);
        Ok(())
    }

    #[test]
    fn rejects_invalid_cases() {
        for (input, what) in [
            ("6 6 1\n3 5 h 3\n", "out of bounds"),
            ("6 6 2\n3 1 h 2\n2 2 v 2\n", "overlap"),
            ("6 6 1\n0 1 h 2\n", "zero-indexed row"),
            ("6 6 1\n1 1 d 2\n", "orientation"),
            ("6 6 1\n1 1 h 0\n", "empty car"),
            ("6 6 2\n1 1 h 2\n", "missing car"),
            ("6 6 1\n1 1 h 2 7\n", "extra field"),
            ("6 0 1\n1 1 h 2\n", "empty grid"),
            ("6 6 0\n", "no target"),
            ("6 6 1\n1 1 h 2\n1 4 h 2\n", "trailing car"),
        ] {
            assert!(input.parse::<Board>().is_err(), "accepted {what}");
        }
        assert!(parse_cases("2\n4 4 1\n1 1 v 2\n").is_err());
    }
}
