//! Lazy move generator.
//!
//! Produces moves one at a time, tracking its place in the scan so it can resume
//! where it left off. Moves come out in a fixed order:
//! 1. Columns, x = 0..7, each scanned top to bottom
//! 2. Rows, y = 0..8, each scanned left to right
//!
//! Within a line, every pair of neighbouring units with at least one empty cell
//! between them yields two moves: the near unit flung toward the far one, then the
//! far unit flung back toward the near one. Only nearest neighbours pair up, since a
//! unit flung past its neighbour would stop against it first.

use std::iter::FusedIterator;

use crate::{Board, Direction, Location, Move, MoveList};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MoveGenPhase {
    Columns,
    Rows,
    Done,
}

impl MoveGenPhase {
    /// Number of lines scanned in this phase.
    fn line_count(self) -> u8 {
        match self {
            MoveGenPhase::Columns => Board::WIDTH,
            MoveGenPhase::Rows => Board::HEIGHT,
            MoveGenPhase::Done => 0,
        }
    }

    /// Number of cells along each line.
    fn line_len(self) -> u8 {
        match self {
            MoveGenPhase::Columns => Board::HEIGHT,
            MoveGenPhase::Rows => Board::WIDTH,
            MoveGenPhase::Done => 0,
        }
    }

    /// Direction the near unit of a pair is flung in.
    fn forward(self) -> Direction {
        match self {
            MoveGenPhase::Columns => Direction::Down,
            _ => Direction::Right,
        }
    }

    fn next(self) -> MoveGenPhase {
        match self {
            MoveGenPhase::Columns => MoveGenPhase::Rows,
            _ => MoveGenPhase::Done,
        }
    }
}

/// Lazy move generator that produces moves on demand.
#[derive(Clone, Debug)]
pub struct MoveGenerator {
    board: Board,
    phase: MoveGenPhase,
    /// Column (x) or row (y) being scanned
    line: u8,
    /// Position along the line where the next scan starts
    cursor: u8,
    /// Far-unit move of the last pair, emitted right after the near-unit move
    pending: Option<Move>,
}

impl MoveGenerator {
    /// Create a new move generator for the given board.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: MoveGenPhase::Columns,
            line: 0,
            cursor: 0,
            pending: None,
        }
    }

    /// Cell at `pos` along the current line.
    #[inline]
    fn cell(&self, pos: u8) -> Location {
        match self.phase {
            MoveGenPhase::Columns => Location::at(self.line, pos),
            _ => Location::at(pos, self.line),
        }
    }

    /// Find the next gap-separated pair of neighbours at or after the cursor.
    fn next_pair(&self) -> Option<(u8, u8)> {
        let mut near: Option<u8> = None;
        for pos in self.cursor..self.phase.line_len() {
            if !self.board.is_occupied_at(self.cell(pos)) {
                continue;
            }
            match near {
                Some(n) if pos > n + 1 => return Some((n, pos)),
                _ => near = Some(pos),
            }
        }
        None
    }
}

impl Iterator for MoveGenerator {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if let Some(mov) = self.pending.take() {
            return Some(mov);
        }

        loop {
            if self.phase == MoveGenPhase::Done {
                return None;
            }
            if self.line >= self.phase.line_count() {
                self.phase = self.phase.next();
                self.line = 0;
                self.cursor = 0;
                continue;
            }

            if let Some((near, far)) = self.next_pair() {
                // The far unit becomes the near unit of the next pair.
                self.cursor = far;
                let forward = self.phase.forward();
                self.pending = Some(Move::new(self.cell(far), forward.opposite()));
                return Some(Move::new(self.cell(near), forward));
            }

            self.line += 1;
            self.cursor = 0;
        }
    }
}

impl FusedIterator for MoveGenerator {}

/// Lazily enumerate the legal moves of a board, in generator order.
#[inline]
pub fn legal_moves(board: Board) -> MoveGenerator {
    MoveGenerator::new(board)
}

impl Board {
    /// Lazily enumerate legal moves. See [`MoveGenerator`].
    #[inline]
    pub fn moves(self) -> MoveGenerator {
        MoveGenerator::new(self)
    }

    /// Generate all legal moves as a MoveList (no heap allocation).
    pub fn legal_moves(self) -> MoveList {
        self.moves().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(cells: &[(u8, u8)]) -> Board {
        Board::from_locations(cells.iter().map(|&(x, y)| Location::at(x, y)))
    }

    fn mv(x: u8, y: u8, direction: Direction) -> Move {
        Move::new(Location::at(x, y), direction)
    }

    #[test]
    fn test_empty_and_single_boards_have_no_moves() {
        assert_eq!(Board::new().moves().count(), 0);
        assert_eq!(board_of(&[(3, 3)]).moves().count(), 0);
    }

    #[test]
    fn test_two_units_in_a_row() {
        let board = board_of(&[(0, 3), (3, 3)]);
        let moves: Vec<Move> = legal_moves(board).collect();
        assert_eq!(
            moves,
            vec![mv(0, 3, Direction::Right), mv(3, 3, Direction::Left)]
        );
    }

    #[test]
    fn test_adjacent_units_have_no_moves() {
        assert_eq!(board_of(&[(2, 2), (3, 2)]).moves().count(), 0);
        assert_eq!(board_of(&[(2, 2), (2, 3)]).moves().count(), 0);
    }

    #[test]
    fn test_units_without_a_partner_have_no_moves() {
        assert_eq!(board_of(&[(0, 0), (0, 7), (6, 3)]).moves().count(), 2);
        assert_eq!(board_of(&[(1, 1), (6, 6)]).moves().count(), 0);
    }

    #[test]
    fn test_columns_before_rows() {
        // (3,3) pairs with (0,3) along row 3 and with (3,6) along column 3.
        let board = board_of(&[(0, 3), (3, 3), (3, 6)]);
        let moves: Vec<Move> = board.moves().collect();
        assert_eq!(
            moves,
            vec![
                mv(3, 3, Direction::Down),
                mv(3, 6, Direction::Up),
                mv(0, 3, Direction::Right),
                mv(3, 3, Direction::Left),
            ]
        );
    }

    #[test]
    fn test_nearest_neighbours_only() {
        let board = board_of(&[(0, 3), (3, 3), (6, 3)]);
        let moves: Vec<Move> = board.moves().collect();
        assert_eq!(
            moves,
            vec![
                mv(0, 3, Direction::Right),
                mv(3, 3, Direction::Left),
                mv(3, 3, Direction::Right),
                mv(6, 3, Direction::Left),
            ]
        );
    }

    #[test]
    fn test_nearest_neighbours_only_across_axes() {
        // (0,3)-(3,3) share a row and (3,3)-(3,6) a column; (0,3) and (3,6) share neither.
        let board = board_of(&[(0, 3), (3, 3), (3, 6), (3, 0)]);
        let moves: Vec<Move> = board.moves().collect();
        assert_eq!(
            moves,
            vec![
                mv(3, 0, Direction::Down),
                mv(3, 3, Direction::Up),
                mv(3, 3, Direction::Down),
                mv(3, 6, Direction::Up),
                mv(0, 3, Direction::Right),
                mv(3, 3, Direction::Left),
            ]
        );
    }

    #[test]
    fn test_adjacent_run_pairs_from_its_last_unit() {
        // (0,5)-(1,5) are adjacent, so the pair is (1,5)-(4,5).
        let board = board_of(&[(0, 5), (1, 5), (4, 5)]);
        let moves: Vec<Move> = board.moves().collect();
        assert_eq!(
            moves,
            vec![mv(1, 5, Direction::Right), mv(4, 5, Direction::Left)]
        );
    }

    #[test]
    fn test_column_order_top_to_bottom() {
        let board = board_of(&[(5, 0), (5, 2), (5, 7)]);
        let moves: Vec<Move> = board.moves().collect();
        assert_eq!(
            moves,
            vec![
                mv(5, 0, Direction::Down),
                mv(5, 2, Direction::Up),
                mv(5, 2, Direction::Down),
                mv(5, 7, Direction::Up),
            ]
        );
    }

    #[test]
    fn test_dense_lattice_stays_within_move_list() {
        // Units on every even (x, y): 4 columns and 4 rows with 3 pairs each.
        let board = Board::from_locations(
            Location::all().filter(|loc| loc.x % 2 == 0 && loc.y % 2 == 0),
        );
        let list = board.legal_moves();
        assert_eq!(list.len(), 48);
        assert_eq!(list.as_slice(), board.moves().collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_generator_is_fused() {
        let mut gen = board_of(&[(0, 0), (2, 0)]).moves();
        assert!(gen.next().is_some());
        assert!(gen.next().is_some());
        assert_eq!(gen.next(), None);
        assert_eq!(gen.next(), None);
    }

    #[test]
    fn test_every_move_starts_on_a_unit() {
        let board = board_of(&[(0, 0), (2, 0), (2, 4), (6, 4), (6, 7), (0, 7)]);
        for mov in board.moves() {
            assert!(board.is_occupied_at(mov.unit), "{mov:?} starts on an empty cell");
        }
    }
}
