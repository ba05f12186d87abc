use std::hash::{Hash, Hasher};
use std::ops::Index;

use arrayvec::ArrayVec;

mod fmt;
mod parse;
pub mod solve;

pub use parse::parse_cases;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The two directions a car of this orientation may slide in, in the order successors are
    /// generated.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Orientation::Vertical => [Direction::Up, Direction::Down],
            Orientation::Horizontal => [Direction::Left, Direction::Right],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Vertical,
            Direction::Left | Direction::Right => Orientation::Horizontal,
        }
    }
}

/// Position of a car in its board. Car 0 is the target car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarId(pub u8);

impl CarId {
    pub const TARGET: Self = Self(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A rigid car. Only the position changes between boards of one puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Car {
    row: u8,
    col: u8,
    orientation: Orientation,
    length: u8,
}

impl Car {
    pub fn new(row: u8, col: u8, orientation: Orientation, length: u8) -> Self {
        Self {
            row,
            col,
            orientation,
            length,
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    /// The exclusive trailing edge along the car's own axis.
    pub fn front(&self) -> u8 {
        match self.orientation {
            Orientation::Vertical => self.row + self.length,
            Orientation::Horizontal => self.col + self.length,
        }
    }

    /// Exclusive bottom edge.
    fn bottom(&self) -> u8 {
        match self.orientation {
            Orientation::Vertical => self.row + self.length,
            Orientation::Horizontal => self.row + 1,
        }
    }

    /// Exclusive right edge.
    fn right(&self) -> u8 {
        match self.orientation {
            Orientation::Vertical => self.col + 1,
            Orientation::Horizontal => self.col + self.length,
        }
    }

    fn spans_row(&self, row: u8) -> bool {
        (self.row..self.bottom()).contains(&row)
    }

    fn spans_col(&self, col: u8) -> bool {
        (self.col..self.right()).contains(&col)
    }

    pub fn covers(&self, row: u8, col: u8) -> bool {
        self.spans_row(row) && self.spans_col(col)
    }

    /// Occupied cells as `(row, col)`, leading cell first.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Vertical => (self.row + i, self.col),
            Orientation::Horizontal => (self.row, self.col + i),
        })
    }

    /// The part of a car that identifies a board state. Length never changes within a puzzle.
    fn placement(&self) -> (u8, u8, Orientation) {
        (self.row, self.col, self.orientation)
    }
}

/// A single slide action. Costs one move regardless of `distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub car: CarId,
    /// `(row, col)` of the car before the slide.
    pub from: (u8, u8),
    pub direction: Direction,
    pub distance: u8,
}

/// A game state: the cars and the grid they live in.
///
/// Construction is unchecked. Cars are expected to be pairwise disjoint, inside the grid, and
/// the target car must be present at index 0; [`parse_cases`] enforces this for textual input.
#[derive(Debug, Clone)]
pub struct Board {
    rows: u8,
    cols: u8,
    cars: Box<[Car]>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cars.len() == other.cars.len()
            && self
                .cars
                .iter()
                .zip(other.cars.iter())
                .all(|(a, b)| a.placement() == b.placement())
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cars.len().hash(state);
        for car in self.cars.iter() {
            car.placement().hash(state);
        }
    }
}

impl Index<CarId> for Board {
    type Output = Car;
    fn index(&self, id: CarId) -> &Self::Output {
        &self.cars[id.index()]
    }
}

impl Board {
    pub fn new(rows: u8, cols: u8, cars: impl Into<Box<[Car]>>) -> Self {
        Self {
            rows,
            cols,
            cars: cars.into(),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn car_ids(&self) -> impl Iterator<Item = CarId> {
        (0..self.cars.len()).map(|i| CarId(i as u8))
    }

    pub fn target(&self) -> &Car {
        &self[CarId::TARGET]
    }

    fn others(&self, id: CarId) -> impl Iterator<Item = &Car> + '_ {
        self.cars
            .iter()
            .enumerate()
            .filter(move |&(i, _)| i != id.index())
            .map(|(_, car)| car)
    }

    /// The car covering a cell, if any.
    pub fn occupant(&self, row: u8, col: u8) -> Option<CarId> {
        self.car_ids().find(|&id| self[id].covers(row, col))
    }

    /// Row-major occupancy of every cell.
    pub fn grid(&self) -> Vec<Option<CarId>> {
        let mut grid = vec![None; self.rows as usize * self.cols as usize];
        for id in self.car_ids() {
            for (row, col) in self[id].cells() {
                grid[row as usize * self.cols as usize + col as usize] = Some(id);
            }
        }
        grid
    }

    /// Whether the target car has reached its exit.
    ///
    /// A horizontal target exits once its trailing edge reaches the last column. A vertical target
    /// exits once it sits in the leftmost column, whatever its row.
    pub fn is_goal(&self) -> bool {
        let target = self.target();
        match target.orientation {
            Orientation::Horizontal => target.front() >= self.cols.saturating_sub(1),
            Orientation::Vertical => target.col == 0,
        }
    }

    /// Blocking-car estimate of the remaining moves: 0 at the goal, otherwise one for the target
    /// itself plus one per car standing on its escape path.
    pub fn heuristic(&self) -> u32 {
        if self.is_goal() {
            return 0;
        }

        let target = self.target();
        let exit_col = self.cols.saturating_sub(1);
        let blocking = self
            .others(CarId::TARGET)
            .filter(|car| match target.orientation {
                // Cars in the exit column never have to move for the target to reach the goal.
                Orientation::Horizontal => {
                    car.col >= target.col
                        && car.col < exit_col
                        && match car.orientation {
                            Orientation::Horizontal => car.row == target.row,
                            Orientation::Vertical => car.spans_row(target.row),
                        }
                }
                Orientation::Vertical => {
                    car.row <= target.front()
                        && match car.orientation {
                            Orientation::Vertical => car.col == target.col,
                            Orientation::Horizontal => car.spans_col(target.col),
                        }
                }
            })
            .count();
        1 + blocking as u32
    }

    /// How far a car can slide in `dir` before it hits the grid edge or another car. Zero when the
    /// direction does not match the car's orientation.
    pub fn max_distance(&self, id: CarId, dir: Direction) -> u8 {
        let car = self[id];
        if dir.orientation() != car.orientation {
            return 0;
        }

        let others = self.others(id);
        match dir {
            Direction::Up => others
                .filter(|other| other.spans_col(car.col) && other.bottom() <= car.row)
                .map(|other| car.row - other.bottom())
                .min()
                .unwrap_or(car.row),
            Direction::Down => others
                .filter(|other| other.spans_col(car.col) && other.row >= car.bottom())
                .map(|other| other.row - car.bottom())
                .min()
                .unwrap_or(self.rows - car.bottom()),
            Direction::Left => others
                .filter(|other| other.spans_row(car.row) && other.right() <= car.col)
                .map(|other| car.col - other.right())
                .min()
                .unwrap_or(car.col),
            Direction::Right => others
                .filter(|other| other.spans_row(car.row) && other.col >= car.right())
                .map(|other| other.col - car.right())
                .min()
                .unwrap_or(self.cols - car.right()),
        }
    }

    pub fn max_up(&self, id: CarId) -> u8 {
        self.max_distance(id, Direction::Up)
    }

    pub fn max_down(&self, id: CarId) -> u8 {
        self.max_distance(id, Direction::Down)
    }

    pub fn max_left(&self, id: CarId) -> u8 {
        self.max_distance(id, Direction::Left)
    }

    pub fn max_right(&self, id: CarId) -> u8 {
        self.max_distance(id, Direction::Right)
    }

    /// The cell right next to a car in `dir`, or `None` past the grid edge.
    fn adjacent_cell(&self, car: &Car, dir: Direction) -> Option<(u8, u8)> {
        match dir {
            Direction::Up => Some((car.row.checked_sub(1)?, car.col)),
            Direction::Down => (car.bottom() < self.rows).then_some((car.bottom(), car.col)),
            Direction::Left => Some((car.row, car.col.checked_sub(1)?)),
            Direction::Right => (car.right() < self.cols).then_some((car.row, car.right())),
        }
    }

    /// Directions of the car's axis that are blocked at distance 1, by the edge or by a car.
    pub fn blocked_directions(&self, id: CarId) -> ArrayVec<Direction, 2> {
        let car = &self[id];
        car.orientation
            .directions()
            .into_iter()
            .filter(|&dir| match self.adjacent_cell(car, dir) {
                None => true,
                Some((row, col)) => self.occupant(row, col).is_some(),
            })
            .collect()
    }

    /// A copy of this board with one car shifted by `moves` cells.
    ///
    /// # Panics
    ///
    /// Panics if the shift would take the car to a negative coordinate. Staying within
    /// [`Board::max_distance`] keeps the board valid.
    pub fn go(&self, id: CarId, dir: Direction, moves: u8) -> Board {
        let mut cars = self.cars.clone();
        let car = &mut cars[id.index()];
        match dir {
            Direction::Up => car.row -= moves,
            Direction::Down => car.row += moves,
            Direction::Left => car.col -= moves,
            Direction::Right => car.col += moves,
        }
        Board {
            rows: self.rows,
            cols: self.cols,
            cars,
        }
    }

    pub fn go_up(&self, id: CarId, moves: u8) -> Board {
        self.go(id, Direction::Up, moves)
    }

    pub fn go_down(&self, id: CarId, moves: u8) -> Board {
        self.go(id, Direction::Down, moves)
    }

    pub fn go_left(&self, id: CarId, moves: u8) -> Board {
        self.go(id, Direction::Left, moves)
    }

    pub fn go_right(&self, id: CarId, moves: u8) -> Board {
        self.go(id, Direction::Right, moves)
    }

    pub fn apply(&self, mv: &Move) -> Board {
        self.go(mv.car, mv.direction, mv.distance)
    }

    /// Every slide action from this board, each car moved as far as it goes.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        self.car_ids().flat_map(move |id| {
            let car = self[id];
            let blocked = self.blocked_directions(id);
            car.orientation
                .directions()
                .into_iter()
                .filter(move |dir| !blocked.contains(dir))
                .filter_map(move |dir| {
                    let distance = self.max_distance(id, dir);
                    if distance == 0 {
                        return None;
                    }
                    let mv = Move {
                        car: id,
                        from: (car.row, car.col),
                        direction: dir,
                        distance,
                    };
                    Some((mv, self.go(id, dir, distance)))
                })
        })
    }
}
