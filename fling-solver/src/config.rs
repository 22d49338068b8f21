use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fling_core::Move;
use log::LevelFilter;

/// Parse a log level name.
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level {s:?}, expected off/error/warn/info/debug/trace"))
}

/// Parse a raw board encoding, decimal or `0x` hex.
pub fn parse_bits(s: &str) -> Result<u64, std::num::ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "fling", author, version, about = "Solve Fling puzzles on the 7x8 grid")]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", env = "FLING_LOG", default_value = "info", global = true, value_parser = parse_level)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for a move sequence that leaves one unit
    Solve {
        #[command(flatten)]
        source: BoardSource,

        /// Skip boards already proven unsolvable
        #[arg(long = "dead-end-cache", default_value_t = false)]
        dead_end_cache: bool,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Print only the moves, without the board after each one
        #[arg(long, short, default_value_t = false)]
        quiet: bool,

        /// Log search progress every N boards
        #[arg(long = "progress-every", env = "FLING_PROGRESS_EVERY", default_value_t = 1_000_000u64)]
        progress_every: u64,
    },
    /// List the legal moves in the order the solver tries them
    Moves {
        #[command(flatten)]
        source: BoardSource,
    },
    /// Apply one move and print the resulting board
    Apply {
        #[command(flatten)]
        source: BoardSource,

        /// Move as `x,y,direction`, e.g. `0,3,right`
        #[arg(long = "move", value_name = "X,Y,DIR")]
        mov: Move,
    },
}

/// Where to read the starting board from. Defaults to stdin.
#[derive(Args, Debug, Clone, Default)]
pub struct BoardSource {
    /// Board file, 8 rows of 7 cells (`o` unit, `.` empty); `-` reads stdin
    #[arg(conflicts_with_all = ["board", "bits"])]
    pub file: Option<PathBuf>,

    /// Inline board, rows separated by `/`
    #[arg(long, conflicts_with = "bits")]
    pub board: Option<String>,

    /// Raw 56-bit encoding (bit y*7+x), decimal or 0x hex
    #[arg(long, value_parser = parse_bits)]
    pub bits: Option<u64>,
}
