//! Fling Solver
//!
//! Finds a sequence of flings that leaves a single unit on the board, using
//! depth-first search over the legal moves in generator order.

mod config;
mod puzzle;
mod report;
mod stats;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fling_core::{Board, SearchOutcome, Solver};
use log::{debug, info, warn};

use crate::config::{Cli, Command};
use crate::puzzle::load_board;
use crate::report::SolveReport;

/// Exit code when the board has no solution.
const EXIT_UNSOLVABLE: u8 = 2;
/// Exit code after Ctrl-C, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Command::Solve {
            source,
            dead_end_cache,
            json,
            quiet,
            progress_every,
        } => {
            let board = load_board(&source)?;
            solve(board, dead_end_cache, json, quiet, progress_every)
        }
        Command::Moves { source } => {
            let board = load_board(&source)?;
            let mut out = io::stdout().lock();
            report::write_moves(&mut out, board)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Apply { source, mov } => {
            let board = load_board(&source)?;
            if !board.legal_moves().contains(&mov) {
                bail!("{mov} is not a legal move on this board");
            }
            let after = board.apply_move(mov);
            debug!("{} -> {} units", board.unit_count(), after.unit_count());
            println!("{after}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn solve(
    board: Board,
    dead_end_cache: bool,
    json: bool,
    quiet: bool,
    progress_every: u64,
) -> Result<ExitCode> {
    // SIGINT stops the search at the next board
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl-C handler")?;

    info!(
        "solving {} units (dead-end cache {})",
        board.unit_count(),
        if dead_end_cache { "on" } else { "off" }
    );

    let mut solver = Solver::new()
        .with_interrupt(running)
        .with_dead_end_cache(dead_end_cache)
        .with_progress_interval(progress_every);

    let start = Instant::now();
    let outcome = solver.run(board);
    let elapsed = start.elapsed();

    stats::log_summary(&solver.stats, elapsed, solver.dead_end_count());

    if outcome == SearchOutcome::Interrupted {
        warn!("search interrupted after {} boards", solver.stats.nodes);
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }

    let solution = outcome.solution();
    let mut out = io::stdout().lock();
    if json {
        let report = SolveReport::new(board, solution, solver.stats);
        serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
        writeln!(out)?;
    } else {
        match solution {
            Some(moves) => report::write_solution(&mut out, board, moves, quiet)?,
            None => writeln!(out, "Unsolvable.")?,
        }
    }

    Ok(match solution {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::from(EXIT_UNSOLVABLE),
    })
}
