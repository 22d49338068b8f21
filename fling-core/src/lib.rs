//! Fling puzzle engine with a bit-packed board representation.
//!
//! # Board Encoding (64-bit)
//!
//! ```text
//! Bits 0-55:  one bit per cell (1 = unit, 0 = empty)
//! Bits 56-63: unused (always zero)
//!
//! Cell index = y * 7 + x, row-major, 7 columns by 8 rows:
//!
//!    0  1  2  3  4  5  6      <- y = 0 (top)
//!    7  8  9 10 11 12 13
//!   14 15 16 17 18 19 20
//!   21 22 23 24 25 26 27
//!   28 29 30 31 32 33 34
//!   35 36 37 38 39 40 41
//!   42 43 44 45 46 47 48
//!   49 50 51 52 53 54 55      <- y = 7 (bottom)
//! ```
//!
//! # Rules
//!
//! A move flings one unit toward a neighbour in the same row or column. The unit
//! slides until it rests against the first unit in its way; that unit is then flung
//! on in the same direction, and so on down the line. Whichever unit finds nothing
//! ahead of it leaves the grid. The puzzle is solved when a single unit remains.

pub mod movegen;
pub mod solver;
mod text;
#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use movegen::{legal_moves, MoveGenerator};
pub use solver::{solve, SearchOutcome, SearchStats, Solution, Solver};
pub use text::MoveParseError;

/// Errors raised when building a board from external input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("bits {0:#018x} lie outside the 7x8 grid")]
    OutOfGrid(u64),
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// Direction a unit is flung in.
///
/// `Up` decreases y, `Down` increases y, `Left` decreases x, `Right` increases x.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Get the direction pointing the other way along the same axis.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Step along this direction as (dx, dy).
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Check if this direction moves along a column.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Get all directions as an iterator.
    pub fn all() -> impl Iterator<Item = Direction> {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right].into_iter()
    }
}

/// A cell on the 7x8 grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: u8,
    pub y: u8,
}

impl Location {
    /// Create a location, or None if (x, y) is off the grid.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Option<Location> {
        if x < Board::WIDTH && y < Board::HEIGHT {
            Some(Location { x, y })
        } else {
            None
        }
    }

    /// Create a location the caller knows is on the grid.
    #[inline]
    pub fn at(x: u8, y: u8) -> Location {
        debug_assert!(x < Board::WIDTH && y < Board::HEIGHT, "({x},{y}) is off the grid");
        Location { x, y }
    }

    /// Get the bit index (0-55) of this cell.
    #[inline]
    pub const fn index(self) -> u32 {
        self.y as u32 * Board::WIDTH as u32 + self.x as u32
    }

    /// Create a location from a bit index (0-55).
    #[inline]
    pub fn from_index(index: u32) -> Location {
        debug_assert!(index < Board::CELLS);
        Location::at((index % Board::WIDTH as u32) as u8, (index / Board::WIDTH as u32) as u8)
    }

    /// Get the neighbouring cell in a direction, or None past the edge.
    #[inline]
    pub fn step(self, direction: Direction) -> Option<Location> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Location::new(x, y)
    }

    /// Iterate over all 56 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..Board::CELLS).map(Location::from_index)
    }
}

/// A move: fling the unit at `unit` in `direction`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub unit: Location,
    pub direction: Direction,
}

impl Move {
    #[inline]
    pub const fn new(unit: Location, direction: Direction) -> Move {
        Move { unit, direction }
    }
}

/// Upper bound on moves from any board.
///
/// A column of 8 cells holds at most 3 gap-separated pairs, as does a row of 7, so a
/// board yields at most 2 × 3 × (7 + 8) = 90 moves.
pub const MAX_MOVES: usize = 96;

/// A fixed-size move list that avoids heap allocation.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: u8,
}

impl MoveList {
    /// Create an empty move list.
    #[inline]
    pub const fn new() -> MoveList {
        MoveList {
            moves: [Move::new(Location { x: 0, y: 0 }, Direction::Up); MAX_MOVES],
            len: 0,
        }
    }

    /// Add a move to the list.
    #[inline]
    pub fn push(&mut self, mov: Move) {
        debug_assert!((self.len as usize) < MAX_MOVES);
        self.moves[self.len as usize] = mov;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a move by index.
    #[inline]
    pub const fn get(&self, idx: usize) -> Move {
        self.moves[idx]
    }

    /// Check if the list holds a move.
    pub fn contains(&self, mov: &Move) -> bool {
        self.as_slice().contains(mov)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut list = MoveList::new();
        for mov in iter {
            list.push(mov);
        }
        list
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Single-bit mask for every cell, indexed `[y][x]`.
pub const CELL_MASKS: [[u64; Board::WIDTH as usize]; Board::HEIGHT as usize] = {
    let mut masks = [[0; Board::WIDTH as usize]; Board::HEIGHT as usize];
    let mut y = 0;
    while y < Board::HEIGHT as usize {
        let mut x = 0;
        while x < Board::WIDTH as usize {
            masks[y][x] = 1 << (y * Board::WIDTH as usize + x);
            x += 1;
        }
        y += 1;
    }
    masks
};

/// Compact board state - fits in a single u64.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Board(u64);

impl Board {
    pub const WIDTH: u8 = 7;
    pub const HEIGHT: u8 = 8;
    /// Number of cells on the grid.
    pub const CELLS: u32 = Self::WIDTH as u32 * Self::HEIGHT as u32;
    /// Mask of the 56 bits that map to cells.
    pub const GRID_MASK: u64 = (1 << Self::CELLS) - 1;

    /// Create an empty board.
    #[inline]
    pub const fn new() -> Board {
        Board(0)
    }

    /// Create a board from raw bits, rejecting bits beyond the grid.
    pub fn from_bits(bits: u64) -> Result<Board, BoardError> {
        if bits & !Self::GRID_MASK != 0 {
            return Err(BoardError::OutOfGrid(bits));
        }
        Ok(Board(bits))
    }

    /// Get the raw u64 encoding.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Create a board with a unit on each of the given cells.
    pub fn from_locations<I: IntoIterator<Item = Location>>(units: I) -> Board {
        units
            .into_iter()
            .fold(Board::new(), |board, loc| board.with_unit_at(loc, true))
    }

    #[inline]
    fn mask(x: u8, y: u8) -> u64 {
        debug_assert!(x < Self::WIDTH && y < Self::HEIGHT, "({x},{y}) is off the grid");
        CELL_MASKS[y as usize][x as usize]
    }

    /// Check if the cell at (x, y) holds a unit.
    #[inline]
    pub fn is_occupied(self, x: u8, y: u8) -> bool {
        self.0 & Self::mask(x, y) != 0
    }

    /// Return a copy of this board with the cell at (x, y) set or cleared.
    #[inline]
    pub fn with_unit(self, x: u8, y: u8, occupied: bool) -> Board {
        let mask = Self::mask(x, y);
        if occupied {
            Board(self.0 | mask)
        } else {
            Board(self.0 & !mask)
        }
    }

    #[inline]
    pub fn is_occupied_at(self, loc: Location) -> bool {
        self.is_occupied(loc.x, loc.y)
    }

    #[inline]
    pub fn with_unit_at(self, loc: Location, occupied: bool) -> Board {
        self.with_unit(loc.x, loc.y, occupied)
    }

    /// Number of units on the board.
    #[inline]
    pub const fn unit_count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if at most one unit remains.
    ///
    /// The search never reaches an empty board, so this is the solved test.
    #[inline]
    pub const fn is_solved(self) -> bool {
        self.0 & self.0.wrapping_sub(1) == 0
    }

    /// Iterate over occupied cells in row-major order.
    pub fn units(self) -> impl Iterator<Item = Location> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros();
            bits &= bits - 1;
            Some(Location::from_index(index))
        })
    }

    /// Find where a unit leaving `from` in `direction` comes to rest.
    ///
    /// Returns `(rest, blocker)`: the cell just before the first unit ahead, and that
    /// unit's cell. `rest == from` when the blocker is adjacent. None when nothing lies
    /// ahead before the edge.
    pub fn collision(self, from: Location, direction: Direction) -> Option<(Location, Location)> {
        let mut rest = from;
        while let Some(next) = rest.step(direction) {
            if self.is_occupied_at(next) {
                return Some((rest, next));
            }
            rest = next;
        }
        None
    }

    // ========== Move Resolution ==========

    /// Resolve a move and return the resulting board.
    ///
    /// The flung unit comes to rest against the first unit ahead of it, and that unit
    /// is flung on in the same direction against the updated board. The chain ends with
    /// the unit that finds nothing ahead, which leaves the grid.
    ///
    /// Only defined for moves produced by the generator for this board.
    pub fn apply_move(self, mov: Move) -> Board {
        debug_assert!(self.is_occupied_at(mov.unit), "no unit at {}", mov.unit);

        let mut board = self;
        let mut unit = mov.unit;
        loop {
            let collision = board.collision(unit, mov.direction);
            board = board.with_unit_at(unit, false);
            match collision {
                None => return board,
                Some((rest, blocker)) => {
                    board = board.with_unit_at(rest, true);
                    unit = blocker;
                }
            }
        }
    }
}

impl TryFrom<u64> for Board {
    type Error = BoardError;

    fn try_from(bits: u64) -> Result<Self, Self::Error> {
        Board::from_bits(bits)
    }
}

impl From<Board> for u64 {
    fn from(board: Board) -> u64 {
        board.0
    }
}

/// Resolve a single move. See [`Board::apply_move`].
#[inline]
pub fn apply_move(board: Board, mov: Move) -> Board {
    board.apply_move(mov)
}

/// Apply moves in order, returning the board after each one.
pub fn replay(board: Board, moves: &[Move]) -> Vec<Board> {
    moves
        .iter()
        .scan(board, |current, &mov| {
            *current = current.apply_move(mov);
            Some(*current)
        })
        .collect()
}
