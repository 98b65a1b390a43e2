//! The sequential backtracker and the parallel, task-spawning backtracker
//! built on top of it.

use log::{debug, trace};
use rayon::prelude::*;

use crate::board::Board;
use crate::cell;
use crate::rules::propagate;

/// Search depth below which [`solve_parallel`] still spawns one task per
/// candidate digit. At or past this depth, branches fall back to the
/// sequential search.
const DEPTH_THRESHOLD: usize = 2;

fn first_empty_cell(board: &Board) -> Option<usize> {
    (0..board.len()).find(|&idx| cell::value(board.cell(idx)) == 0)
}

fn candidates_of(board: &Board, idx: usize) -> Vec<u32> {
    let mask = cell::candidate_mask(board.cell(idx));
    (1..=board.size() as u32)
        .filter(|&d| mask & (1 << d) != 0)
        .collect()
}

/// Try resolving `idx` to `digit` on a fresh clone of `board`, propagate to
/// a fixed point, and return the clone if both steps stay consistent.
fn branch(board: &Board, idx: usize, digit: u32) -> Option<Board> {
    let mut clone = board.clone();
    clone.place(idx, digit);
    if clone.eliminate_peers_inner(idx).is_err() {
        return None;
    }
    if propagate(&mut clone).is_err() {
        return None;
    }
    Some(clone)
}

/// Linear-scan, single-threaded depth-first search. Clones the board
/// before each speculative assignment; clones that don't lead to a solution
/// are simply dropped.
pub(crate) fn solve_sequential(board: &Board) -> Option<Board> {
    let Some(idx) = first_empty_cell(board) else {
        return Some(board.clone());
    };

    for digit in candidates_of(board, idx) {
        if let Some(next) = branch(board, idx, digit) {
            if let Some(solution) = solve_sequential(&next) {
                return Some(solution);
            }
        }
    }
    None
}

/// Task-parallel depth-first search: below [`DEPTH_THRESHOLD`], every
/// candidate digit becomes an independent task operating on its own board
/// clone, raced via `rayon`'s `find_map_any` (first solution found wins;
/// siblings are left to run to completion uncollected, a cooperative and
/// advisory cancellation). At or past the threshold, the remaining search
/// is handed off to the sequential backtracker.
pub(crate) fn solve_parallel(board: &Board, depth: usize) -> Option<Board> {
    if depth >= DEPTH_THRESHOLD {
        return solve_sequential(board);
    }

    let Some(idx) = first_empty_cell(board) else {
        return Some(board.clone());
    };

    let candidates = candidates_of(board, idx);
    trace!("depth {depth}: spawning {} branches", candidates.len());

    candidates.par_iter().find_map_any(|&digit| {
        branch(board, idx, digit).and_then(|next| solve_parallel(&next, depth + 1))
    })
}

/// Entry point for the solver facade: run the sequential or parallel
/// search depending on caller preference. The public API always goes
/// through [`solve_parallel`] at depth 0; [`solve_sequential`] is exposed to
/// tests so the two search strategies can be checked against each other.
pub(crate) fn solve(board: &Board) -> Option<Board> {
    debug!(
        "starting search over a board with {} empty cells",
        (0..board.len())
            .filter(|&idx| cell::value(board.cell(idx)) == 0)
            .count()
    );
    solve_parallel(board, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn seed_and_propagate(board: &mut Board) -> Result<(), ()> {
        for idx in board.clue_indices().collect::<Vec<_>>() {
            board.eliminate_peers_inner(idx).map_err(|_| ())?;
        }
        propagate(board).map_err(|_| ())
    }

    #[test]
    fn sequential_and_parallel_agree_on_easy_puzzle() {
        let digits: Vec<u32> = "53..7....\
                                 6..195...\
                                 .98....6.\
                                 8...6...3\
                                 4..8.3..1\
                                 7...2...6\
                                 .6....28.\
                                 ...419..5\
                                 ....8..79"
            .chars()
            .map(|c| if c == '.' { 0 } else { c.to_digit(10).unwrap() })
            .collect();
        let mut board = Board::from_digits(3, &digits).unwrap();
        seed_and_propagate(&mut board).unwrap();

        let seq = solve_sequential(&board).unwrap();
        let par = solve_parallel(&board, 0).unwrap();
        assert!(seq.is_solved());
        assert!(par.is_solved());
        assert_eq!(seq.digits(), par.digits());
    }

    #[test]
    fn solves_four_by_four_empty_board() {
        let board = Board::new(2).unwrap();
        let solved = solve(&board).unwrap();
        assert!(solved.is_solved());
        assert_eq!(solved.digits().len(), 16);
    }

    #[test]
    fn unsolvable_board_returns_none() {
        let mut digits = vec![0u32; 81];
        digits[0] = 5;
        digits[1] = 5;
        let mut board = Board::from_digits(3, &digits).unwrap();
        if seed_and_propagate(&mut board).is_ok() {
            assert!(solve(&board).is_none());
        }
    }

    #[test]
    fn fully_filled_board_is_returned_unchanged_without_branching() {
        // A valid, fully solved 4x4 board: no empty cells, so the search
        // should return it immediately with no cloning/branching needed.
        let digits = vec![
            1, 2, 3, 4, //
            3, 4, 1, 2, //
            2, 1, 4, 3, //
            4, 3, 2, 1,
        ];
        let mut board = Board::from_digits(2, &digits).unwrap();
        seed_and_propagate(&mut board).unwrap();
        let solved = solve_sequential(&board).unwrap();
        assert_eq!(solved.digits(), board.digits());
    }
}
