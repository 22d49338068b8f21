//! Loading the starting board from the command line, a file, or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use fling_core::Board;
use log::debug;

use crate::config::BoardSource;

/// Read the board named by `source`. With no source given, the board is read from stdin.
pub fn load_board(source: &BoardSource) -> Result<Board> {
    if let Some(bits) = source.bits {
        return Board::from_bits(bits).context("invalid --bits");
    }
    if let Some(text) = &source.board {
        return text.parse().context("invalid --board");
    }

    match source.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            debug!("reading board from {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            text.parse()
                .with_context(|| format!("invalid board in {}", path.display()))
        }
        _ => {
            debug!("reading board from stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read board from stdin")?;
            text.parse().context("invalid board on stdin")
        }
    }
}
