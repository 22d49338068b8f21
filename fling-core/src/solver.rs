//! Depth-first backtracking search for a move sequence that leaves one unit.
//!
//! The search tries moves in generator order and stops at the first solution, so the
//! result is deterministic but not necessarily the shortest. Failure is an ordinary
//! return value: a board with no solution yields [`SearchOutcome::Unsolvable`].

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::{Board, Move, MoveList};

/// Moves that reduce a board to one unit, first move first.
pub type Solution = Vec<Move>;

/// Result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A solution was found. Empty if the board was already solved.
    Solved(Solution),
    /// Every branch was exhausted without reaching a single unit.
    Unsolvable,
    /// The interrupt flag was cleared before the search finished.
    Interrupted,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&[Move]> {
        match self {
            SearchOutcome::Solved(moves) => Some(moves),
            _ => None,
        }
    }

    /// Convert to a solution, treating an interrupted search as no solution.
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(moves) => Some(moves),
            _ => None,
        }
    }
}

/// Statistics collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Boards visited, including the root
    pub nodes: u64,
    /// Moves applied
    pub moves_tried: u64,
    /// Boards whose every move failed
    pub dead_ends: u64,
    /// Boards skipped because they were already known dead ends
    pub cache_hits: u64,
    /// Longest move sequence explored
    pub max_depth: u64,
}

/// Stack frame for iterative DFS.
struct Frame {
    board: Board,
    /// Moves to explore, in generator order
    moves: MoveList,
    /// Index of the next move to explore
    move_idx: usize,
}

impl Frame {
    fn new(board: Board) -> Frame {
        Frame {
            board,
            moves: board.legal_moves(),
            move_idx: 0,
        }
    }

    /// Advance to the next move, or None when exhausted.
    #[inline]
    fn next_move(&mut self) -> Option<Move> {
        if self.move_idx < self.moves.len() {
            let mov = self.moves.get(self.move_idx);
            self.move_idx += 1;
            Some(mov)
        } else {
            None
        }
    }

    /// The move this frame is currently exploring.
    #[inline]
    fn current_move(&self) -> Move {
        debug_assert!(self.move_idx > 0);
        self.moves.get(self.move_idx - 1)
    }
}

/// Backtracking solver.
pub struct Solver {
    pub stats: SearchStats,
    running: Option<Arc<AtomicBool>>,
    /// Raw bits of boards proven unsolvable, when enabled
    dead_ends: Option<HashSet<u64>>,
    progress_interval: u64,
}

impl Solver {
    pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

    pub fn new() -> Self {
        Self {
            stats: SearchStats::default(),
            running: None,
            dead_ends: None,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Stop the search with [`SearchOutcome::Interrupted`] once `running` is cleared.
    pub fn with_interrupt(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    /// Remember boards proven unsolvable and skip them when they come up again.
    ///
    /// The search is deterministic, so the returned solution is the same either way.
    pub fn with_dead_end_cache(mut self, enabled: bool) -> Self {
        self.dead_ends = enabled.then(HashSet::new);
        self
    }

    /// Log progress every `nodes` visited boards (0 disables).
    pub fn with_progress_interval(mut self, nodes: u64) -> Self {
        self.progress_interval = nodes;
        self
    }

    /// Number of boards currently held in the dead-end cache.
    pub fn dead_end_count(&self) -> usize {
        self.dead_ends.as_ref().map_or(0, HashSet::len)
    }

    #[inline]
    fn interrupted(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.load(Ordering::SeqCst))
    }

    #[inline]
    fn is_known_dead_end(&self, board: Board) -> bool {
        self.dead_ends
            .as_ref()
            .is_some_and(|cache| cache.contains(&board.bits()))
    }

    fn record_dead_end(&mut self, board: Board) {
        self.stats.dead_ends += 1;
        if let Some(cache) = self.dead_ends.as_mut() {
            cache.insert(board.bits());
        }
    }

    fn visit(&mut self, depth: usize) {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth as u64);
        if self.progress_interval > 0 && self.stats.nodes % self.progress_interval == 0 {
            debug!(
                "nodes={} moves={} depth={} max_depth={} dead_ends={} cache_hits={}",
                self.stats.nodes,
                self.stats.moves_tried,
                depth,
                self.stats.max_depth,
                self.stats.dead_ends,
                self.stats.cache_hits,
            );
        }
    }

    /// Search for a solution from `board`.
    pub fn run(&mut self, board: Board) -> SearchOutcome {
        self.visit(0);
        if board.is_solved() {
            return SearchOutcome::Solved(Vec::new());
        }

        // Each successful move removes a unit, so depth is bounded by the unit count.
        let mut stack: Vec<Frame> = Vec::with_capacity(board.unit_count() as usize);
        stack.push(Frame::new(board));

        while let Some(frame) = stack.last_mut() {
            if self.interrupted() {
                debug!("search interrupted after {} nodes", self.stats.nodes);
                return SearchOutcome::Interrupted;
            }

            let parent = frame.board;
            let Some(mov) = frame.next_move() else {
                stack.pop();
                self.record_dead_end(parent);
                continue;
            };

            self.stats.moves_tried += 1;
            let child = parent.apply_move(mov);
            if self.is_known_dead_end(child) {
                self.stats.cache_hits += 1;
                continue;
            }

            self.visit(stack.len());
            if child.is_solved() {
                let solution: Solution = stack.iter().map(Frame::current_move).collect();
                debug!(
                    "solved in {} moves after {} nodes",
                    solution.len(),
                    self.stats.nodes
                );
                return SearchOutcome::Solved(solution);
            }

            stack.push(Frame::new(child));
        }

        SearchOutcome::Unsolvable
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// Find a move sequence that reduces `board` to a single unit.
///
/// Returns `Some(vec![])` if the board is already solved and `None` if no sequence
/// exists.
pub fn solve(board: Board) -> Option<Solution> {
    Solver::new().run(board).into_solution()
}
