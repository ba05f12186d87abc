use std::fmt;

use crate::solve::Solution;
use crate::{Board, CarId, Direction, Move, Orientation};

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        for row in grid.chunks(self.cols.max(1) as usize) {
            for cell in row {
                match cell {
                    Some(id) => id.symbol().fmt(f)?,
                    None => ".".fmt(f)?,
                }
            }
            "\n".fmt(f)?;
        }
        Ok(())
    }
}

impl CarId {
    /// Grid symbol: `X` for the target, then `a..z`, then `A..W`.
    fn symbol(self) -> char {
        match self.0 {
            0 => 'X',
            i @ 1..=26 => (b'a' + i - 1) as char,
            i @ 27..=49 => (b'A' + i - 27) as char,
            _ => '?',
        }
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => "h".fmt(f),
            Orientation::Vertical => "v".fmt(f),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => "up".fmt(f),
            Direction::Down => "down".fmt(f),
            Direction::Left => "left".fmt(f),
            Direction::Right => "right".fmt(f),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.from;
        write!(
            f,
            "Car {} at ({row}, {col}) moved {} {} spaces.",
            self.car, self.direction, self.distance,
        )
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in self.moves().iter().flatten() {
            writeln!(f, "{mv}")?;
        }
        Ok(())
    }
}
