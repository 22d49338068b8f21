//! Property checks over randomly generated boards.
//!
//! Boards that get searched exhaustively are kept small (at most 6 units).

use fling_core::{
    apply_move, legal_moves, replay, solve, Board, Direction, Location, Move, SearchOutcome,
    Solver,
};
use rand::prelude::*;
use rand::rngs::StdRng;

const SEED: u64 = 0x5eed_f115;

fn random_board(rng: &mut StdRng, units: usize) -> Board {
    let mut board = Board::new();
    while (board.unit_count() as usize) < units {
        let x = rng.random_range(0..Board::WIDTH);
        let y = rng.random_range(0..Board::HEIGHT);
        board = board.with_unit(x, y, true);
    }
    board
}

/// Random boards where every unit shares a row or column with another, so most have
/// moves.
fn random_connected_board(rng: &mut StdRng, units: usize) -> Board {
    let mut board = Board::from_locations([Location::at(
        rng.random_range(0..Board::WIDTH),
        rng.random_range(0..Board::HEIGHT),
    )]);
    while (board.unit_count() as usize) < units {
        let anchors: Vec<Location> = board.units().collect();
        let anchor = anchors[rng.random_range(0..anchors.len())];
        let loc = if rng.random_bool(0.5) {
            Location::at(rng.random_range(0..Board::WIDTH), anchor.y)
        } else {
            Location::at(anchor.x, rng.random_range(0..Board::HEIGHT))
        };
        board = board.with_unit_at(loc, true);
    }
    board
}

#[test]
fn moves_never_add_units() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..2000 {
        let units = rng.random_range(1..=30);
        let board = random_board(&mut rng, units);
        for mov in legal_moves(board) {
            let after = apply_move(board, mov);
            assert!(
                after.unit_count() <= board.unit_count(),
                "{mov} added units to\n{board}"
            );
        }
    }
}

#[test]
fn every_generated_move_removes_exactly_one_unit() {
    // The last unit of every chain has nothing ahead of it and leaves the grid.
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..2000 {
        let units = rng.random_range(2..=30);
        let board = random_board(&mut rng, units);
        for mov in board.moves() {
            assert_eq!(board.apply_move(mov).unit_count() + 1, board.unit_count());
        }
    }
}

#[test]
fn moves_stay_on_the_grid() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for _ in 0..1000 {
        let units = rng.random_range(1..=40);
        let board = random_board(&mut rng, units);
        for mov in board.moves() {
            let after = board.apply_move(mov);
            assert_eq!(after.bits() & !Board::GRID_MASK, 0);
            assert_eq!(Board::from_bits(after.bits()), Ok(after));
        }
    }
}

#[test]
fn generated_moves_point_at_another_unit() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    for _ in 0..1000 {
        let units = rng.random_range(2..=20);
        let board = random_board(&mut rng, units);
        for mov in board.moves() {
            assert!(board.is_occupied_at(mov.unit));
            let (rest, _) = board
                .collision(mov.unit, mov.direction)
                .expect("generated move has a unit ahead");
            assert_ne!(rest, mov.unit, "{mov} has no room to slide");
        }
    }
}

#[test]
fn solutions_replay_to_a_single_unit() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let mut solved = 0;
    for _ in 0..300 {
        let units = rng.random_range(2..=6);
        let board = random_connected_board(&mut rng, units);
        let Some(solution) = solve(board) else {
            continue;
        };
        solved += 1;

        // One unit leaves per move.
        assert_eq!(solution.len() as u32 + 1, board.unit_count());

        let mut current = board;
        for &mov in &solution {
            assert!(
                current.legal_moves().contains(&mov),
                "{mov} is not legal on\n{current}"
            );
            current = current.apply_move(mov);
        }
        assert!(current.is_solved());
        assert_eq!(current.unit_count(), 1);
        assert_eq!(replay(board, &solution).last(), Some(&current));
    }
    assert!(solved > 0, "no random board was solvable");
}

#[test]
fn solve_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(SEED + 5);
    for _ in 0..100 {
        let units = rng.random_range(2..=6);
        let board = random_connected_board(&mut rng, units);
        assert_eq!(solve(board), solve(board));
    }
}

#[test]
fn dead_end_cache_finds_the_same_solution() {
    let mut rng = StdRng::seed_from_u64(SEED + 6);
    for _ in 0..100 {
        let units = rng.random_range(2..=6);
        let board = random_connected_board(&mut rng, units);
        let mut plain = Solver::new();
        let mut cached = Solver::new().with_dead_end_cache(true);
        assert_eq!(plain.run(board), cached.run(board));
        assert!(cached.stats.nodes <= plain.stats.nodes);
    }
}

#[test]
fn solver_and_solve_agree() {
    let mut rng = StdRng::seed_from_u64(SEED + 7);
    for _ in 0..100 {
        let units = rng.random_range(1..=6);
        let board = random_connected_board(&mut rng, units);
        let outcome = Solver::new().run(board);
        assert_ne!(outcome, SearchOutcome::Interrupted);
        assert_eq!(outcome.into_solution(), solve(board));
    }
}

#[test]
fn single_units_are_solved() {
    for loc in Location::all() {
        let board = Board::from_locations([loc]);
        assert!(board.is_solved());
        assert_eq!(solve(board), Some(Vec::new()));
    }
}

#[test]
fn serialized_shapes() {
    let mov = Move::new(Location::at(0, 3), Direction::Right);
    assert_eq!(
        serde_json::to_string(&mov).unwrap(),
        r#"{"unit":{"x":0,"y":3},"direction":"right"}"#
    );

    let board = Board::from_locations([Location::at(0, 3), Location::at(3, 3)]);
    let json = serde_json::to_string(&board).unwrap();
    assert_eq!(json, board.bits().to_string());
    assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

    // Stray bits beyond the grid are rejected.
    assert!(serde_json::from_str::<Board>(&(1u64 << 60).to_string()).is_err());
}
