//! Printing solutions: step-by-step text replay or a single JSON document.

use std::io::{self, Write};

use fling_core::{replay, Board, Move, SearchStats};
use serde::Serialize;

/// JSON output of `fling solve --json`.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    /// Starting board as its raw encoding
    pub board: Board,
    pub units: u32,
    pub solvable: bool,
    /// Present only when a solution was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<Move>>,
    /// Board after each move, as raw encodings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boards: Vec<Board>,
    pub stats: SearchStats,
}

impl SolveReport {
    pub fn new(board: Board, solution: Option<&[Move]>, stats: SearchStats) -> Self {
        Self {
            board,
            units: board.unit_count(),
            solvable: solution.is_some(),
            moves: solution.map(<[Move]>::to_vec),
            boards: solution.map(|moves| replay(board, moves)).unwrap_or_default(),
            stats,
        }
    }
}

/// Write the solution one move at a time, with the board after each move unless `quiet`.
pub fn write_solution<W: Write>(
    out: &mut W,
    board: Board,
    moves: &[Move],
    quiet: bool,
) -> io::Result<()> {
    if moves.is_empty() {
        writeln!(out, "Already solved.")?;
        return Ok(());
    }

    writeln!(out, "Solved in {} moves.", moves.len())?;
    if !quiet {
        writeln!(out, "\n{board}")?;
    }
    for (i, (mov, after)) in moves.iter().zip(replay(board, moves)).enumerate() {
        if quiet {
            writeln!(out, "{:>2}. {mov}", i + 1)?;
        } else {
            writeln!(out, "\n{:>2}. {mov}\n{after}", i + 1)?;
        }
    }
    Ok(())
}

/// Write the legal moves, one per line, in the order the solver tries them.
pub fn write_moves<W: Write>(out: &mut W, board: Board) -> io::Result<()> {
    let mut count = 0;
    for mov in board.moves() {
        count += 1;
        writeln!(out, "{mov}")?;
    }
    if count == 0 {
        writeln!(out, "No legal moves.")?;
    }
    Ok(())
}
