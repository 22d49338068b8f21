//! Text notation for boards and moves.
//!
//! Boards are 8 rows of 7 cells, top row first. `o`, `O`, `x`, `X` or `#` mark a
//! unit and `.` or `_` an empty cell. Rows are separated by newlines or `/`, and
//! whitespace inside or around rows is ignored:
//!
//! ```text
//! .......
//! .......
//! .......
//! o..o...
//! .......
//! .......
//! .......
//! .......
//! ```
//!
//! Moves are written `(x,y) direction`, e.g. `(0,3) right`. Parsing also accepts
//! `x,y,direction` and single-letter directions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Board, BoardError, Direction, Location, Move};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("expected `x,y,direction`, got {0:?}")]
    Format(String),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
    #[error("({x},{y}) is off the 7x8 grid")]
    OffGrid { x: u8, y: u8 },
    #[error("unknown direction {0:?}")]
    Direction(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit, self.direction)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..Board::HEIGHT {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..Board::WIDTH {
                f.write_str(if self.is_occupied(x, y) { "o" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl FromStr for Direction {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(MoveParseError::Direction(s.to_string())),
        }
    }
}

fn parse_coordinate(s: &str) -> Result<u8, MoveParseError> {
    s.parse()
        .map_err(|_| MoveParseError::Coordinate(s.to_string()))
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .map(|c| if matches!(c, '(' | ')' | ',') { ' ' } else { c })
            .collect();
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        let [x, y, direction] = parts.as_slice() else {
            return Err(MoveParseError::Format(s.to_string()));
        };

        let x = parse_coordinate(x)?;
        let y = parse_coordinate(y)?;
        let unit = Location::new(x, y).ok_or(MoveParseError::OffGrid { x, y })?;
        Ok(Move::new(unit, direction.parse()?))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['\n', '/'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != Board::HEIGHT as usize {
            return Err(BoardError::RowCount {
                expected: Board::HEIGHT as usize,
                found: rows.len(),
            });
        }

        let mut board = Board::new();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != Board::WIDTH as usize {
                return Err(BoardError::RowLength {
                    row: y,
                    expected: Board::WIDTH as usize,
                    found: cells.len(),
                });
            }
            for (x, &ch) in cells.iter().enumerate() {
                match ch {
                    'o' | 'O' | 'x' | 'X' | '#' => board = board.with_unit(x as u8, y as u8, true),
                    '.' | '_' => {}
                    _ => return Err(BoardError::InvalidCell { row: y, col: x, ch }),
                }
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_IN_A_ROW: &str = "
        .......
        .......
        .......
        o..o...
        .......
        .......
        .......
        .......
    ";

    #[test]
    fn test_parse_board() {
        let board: Board = TWO_IN_A_ROW.parse().unwrap();
        assert_eq!(board.unit_count(), 2);
        assert!(board.is_occupied(0, 3));
        assert!(board.is_occupied(3, 3));
    }

    #[test]
    fn test_parse_board_slash_separated() {
        let board: Board = "......./......./......./#..#.../......./......./......./......."
            .parse()
            .unwrap();
        assert_eq!(board, TWO_IN_A_ROW.parse().unwrap());
    }

    #[test]
    fn test_parse_board_spaced_cells() {
        let text = "o . . . . . o\n".repeat(8);
        let board: Board = text.parse().unwrap();
        assert_eq!(board.unit_count(), 16);
    }

    #[test]
    fn test_display_board() {
        let board: Board = TWO_IN_A_ROW.parse().unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().nth(3), Some("o..o..."));
        assert!(!text.ends_with('\n'));
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_board_errors() {
        assert_eq!(
            ".......".parse::<Board>(),
            Err(BoardError::RowCount { expected: 8, found: 1 })
        );

        let short = format!("{}......", ".......\n".repeat(7));
        assert_eq!(
            short.parse::<Board>(),
            Err(BoardError::RowLength { row: 7, expected: 7, found: 6 })
        );

        let bad = format!("..?....\n{}", ".......\n".repeat(7));
        assert_eq!(
            bad.parse::<Board>(),
            Err(BoardError::InvalidCell { row: 0, col: 2, ch: '?' })
        );
    }

    #[test]
    fn test_move_notation() {
        let mov = Move::new(Location::at(0, 3), Direction::Right);
        assert_eq!(mov.to_string(), "(0,3) right");
        assert_eq!("(0,3) right".parse::<Move>(), Ok(mov));
        assert_eq!("0,3,right".parse::<Move>(), Ok(mov));
        assert_eq!("0 3 R".parse::<Move>(), Ok(mov));
    }

    #[test]
    fn test_move_parse_errors() {
        assert!(matches!("0,3".parse::<Move>(), Err(MoveParseError::Format(_))));
        assert!(matches!("a,3,up".parse::<Move>(), Err(MoveParseError::Coordinate(_))));
        assert_eq!("7,0,up".parse::<Move>(), Err(MoveParseError::OffGrid { x: 7, y: 0 }));
        assert!(matches!("1,1,sideways".parse::<Move>(), Err(MoveParseError::Direction(_))));
    }
}
