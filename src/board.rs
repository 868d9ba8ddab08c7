use rand::{seq::SliceRandom, Rng};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Width and height of the grid.
pub const SIZE: usize = 4;
/// Number of tiles on the grid.
pub const CELLS: usize = SIZE * SIZE;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 16 numbers, found {0}")]
    WrongCount(usize),

    #[error("`{0}` is not an integer")]
    InvalidToken(String),

    #[error("{0} is outside the range 1..=16")]
    OutOfRange(i64),

    #[error("{0} appears more than once")]
    Duplicate(u8),

    #[error("`{0}` is not a move (expected L, R, U or D followed by 1..=4)")]
    InvalidMove(String),
}

/// Which way the tiles of a line travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    TowardStart,
    TowardEnd,
}

impl Shift {
    pub fn reversed(&self) -> Self {
        match self {
            Shift::TowardStart => Shift::TowardEnd,
            Shift::TowardEnd => Shift::TowardStart,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn new(is_row: bool, shift: Shift) -> Self {
        match (is_row, shift) {
            (true, Shift::TowardStart) => Direction::Left,
            (true, Shift::TowardEnd) => Direction::Right,
            (false, Shift::TowardStart) => Direction::Up,
            (false, Shift::TowardEnd) => Direction::Down,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn shift(&self) -> Shift {
        match self {
            Direction::Left | Direction::Up => Shift::TowardStart,
            Direction::Right | Direction::Down => Shift::TowardEnd,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }
}

/// A single rotation: a direction and the 0-based row or column it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    direction: Direction,
    line: usize,
}

impl Move {
    /// Every move, in the order successors are generated.
    pub const ALL: [Move; 16] = {
        let mut all = [Move {
            direction: Direction::Right,
            line: 0,
        }; 16];
        let mut line = 0;
        while line < SIZE {
            all[line * 2] = Move { direction: Direction::Right, line };
            all[line * 2 + 1] = Move { direction: Direction::Left, line };
            all[8 + line * 2] = Move { direction: Direction::Down, line };
            all[8 + line * 2 + 1] = Move { direction: Direction::Up, line };
            line += 1;
        }
        all
    };

    /// # Panics
    ///
    /// Panics if `row` is not a valid row index.
    pub fn row(row: usize, shift: Shift) -> Self {
        assert!(row < SIZE, "row {row} out of range");
        Self {
            direction: Direction::new(true, shift),
            line: row,
        }
    }

    /// # Panics
    ///
    /// Panics if `col` is not a valid column index.
    pub fn column(col: usize, shift: Shift) -> Self {
        assert!(col < SIZE, "column {col} out of range");
        Self {
            direction: Direction::new(false, shift),
            line: col,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The move that undoes this one, e.g. `U3` for `D3`.
    pub fn inverse(&self) -> Self {
        Self {
            direction: self.direction.opposite(),
            line: self.line,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.letter(), self.line + 1)
    }
}

impl FromStr for Move {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidMove(s.to_string());
        let mut chars = s.chars();
        let direction = match chars.next() {
            Some('L') => Direction::Left,
            Some('R') => Direction::Right,
            Some('U') => Direction::Up,
            Some('D') => Direction::Down,
            _ => return Err(invalid()),
        };
        let line = chars
            .as_str()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=SIZE).contains(n))
            .ok_or_else(invalid)?;
        Ok(Self {
            direction,
            line: line - 1,
        })
    }
}

/// A 4x4 arrangement of the numbers 1 to 16 in row-major order.
///
/// Every `Board` is a permutation of `1..=16`: the constructors validate
/// their input and rotations only reorder tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    pub fn solved() -> Self {
        let mut cells = [0; CELLS];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = i as u8 + 1;
        }
        Self { cells }
    }

    pub fn from_cells(cells: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        for &value in &cells {
            if value == 0 || value as usize > CELLS {
                return Err(BoardError::OutOfRange(value.into()));
            }
            if std::mem::replace(&mut seen[value as usize - 1], true) {
                return Err(BoardError::Duplicate(value));
            }
        }
        Ok(Self { cells })
    }

    /// Builds a board from arbitrary integers, rejecting anything that is
    /// not exactly a permutation of `1..=16`.
    pub fn from_values(values: &[i64]) -> Result<Self, BoardError> {
        if values.len() != CELLS {
            return Err(BoardError::WrongCount(values.len()));
        }
        let mut cells = [0; CELLS];
        for (cell, &value) in cells.iter_mut().zip(values) {
            if !(1..=CELLS as i64).contains(&value) {
                return Err(BoardError::OutOfRange(value));
            }
            *cell = value as u8;
        }
        Self::from_cells(cells)
    }

    /// Applies `moves` random rotations to the solved board.
    ///
    /// The result is always solvable since it is reached from the goal.
    pub fn scramble<R: Rng + ?Sized>(moves: usize, rng: &mut R) -> (Self, Vec<Move>) {
        let mut board = Self::solved();
        let mut applied = Vec::with_capacity(moves);
        for _ in 0..moves {
            // `ALL` is never empty
            if let Some(&mv) = Move::ALL.choose(rng) {
                board = board.apply(mv);
                applied.push(mv);
            }
        }
        (board, applied)
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIZE + col]
    }

    pub fn is_goal(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, &value)| value as usize == i + 1)
    }

    /// Whether the tile at `index` sits on its home cell.
    pub fn is_home(&self, index: usize) -> bool {
        self.cells[index] as usize == index + 1
    }

    pub fn rotate_row(&self, row: usize, shift: Shift) -> (Self, Move) {
        let mv = Move::row(row, shift);
        (self.apply(mv), mv)
    }

    pub fn rotate_column(&self, col: usize, shift: Shift) -> (Self, Move) {
        let mv = Move::column(col, shift);
        (self.apply(mv), mv)
    }

    pub fn apply(&self, mv: Move) -> Self {
        let mut cells = self.cells;
        if mv.direction.is_row() {
            let row = &mut cells[mv.line * SIZE..(mv.line + 1) * SIZE];
            match mv.direction.shift() {
                Shift::TowardStart => row.rotate_left(1),
                Shift::TowardEnd => row.rotate_right(1),
            }
        } else {
            let mut column = [0; SIZE];
            for (r, slot) in column.iter_mut().enumerate() {
                *slot = cells[r * SIZE + mv.line];
            }
            match mv.direction.shift() {
                Shift::TowardStart => column.rotate_left(1),
                Shift::TowardEnd => column.rotate_right(1),
            }
            for (r, value) in column.into_iter().enumerate() {
                cells[r * SIZE + mv.line] = value;
            }
        }
        Self { cells }
    }

    pub fn apply_all<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> Self {
        moves.into_iter().fold(*self, |board, &mv| board.apply(mv))
    }

    /// Every board one rotation away, paired with the rotation. Rows come
    /// first, then columns; no two entries share a move but boards may repeat.
    pub fn successors(&self) -> impl Iterator<Item = (Self, Move)> + '_ {
        Move::ALL.iter().map(move |&mv| (self.apply(mv), mv))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses whitespace separated integers in row-major order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| BoardError::InvalidToken(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_values(&values)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            for (col, val) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:3}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
