//! Engine for generalized `N^2 x N^2` sudoku puzzles: a bit-packed board
//! representation, a fixed-point logical propagator, and a parallel
//! backtracking search.
//!
//! The hard core is three layers:
//! - [`cell`] packs a resolved digit and a candidate bitmap into one
//!   `u32` per cell.
//! - [`Board`] holds the flat grid and the row/column/box peer
//!   relationships, including peer elimination.
//! - the (crate-private) `rules`/`search` modules run the five deduction
//!   rules to a fixed point and then a parallel, depth-bounded backtracking
//!   search over whatever the propagator leaves undetermined.
//!
//! [`solve`] is the facade tying all of it together.

#![warn(missing_docs)]

pub mod cell;

mod board;
mod error;
mod rules;
mod search;

pub use board::Board;
pub use error::SolverError;

use log::info;

/// Build a board from a flat, row-major list of `size*size` digits, run
/// initial peer elimination for every clue, and solve it.
///
/// Returns `Ok(None)` if the puzzle has no solution (either the initial
/// clues are already contradictory, or the search exhausts every branch).
///
/// # Errors
/// Returns [`SolverError::BadSize`] or [`SolverError::ValueTooLarge`] if
/// `digits` does not describe a valid `n x n` box-side grid.
pub fn solve_digits(n: usize, digits: &[u32]) -> Result<Option<Board>, SolverError> {
    let board = Board::from_digits(n, digits)?;
    Ok(solve(board))
}

/// Run the full solver facade on an already-built board: seed peer
/// exclusions for every given clue, propagate to a fixed point, then search.
///
/// Returns `None` if the board is inconsistent or has no solution.
#[must_use]
pub fn solve(mut board: Board) -> Option<Board> {
    for idx in board.clue_indices().collect::<Vec<_>>() {
        if board.eliminate_peers(idx).is_err() {
            info!("initial clues are contradictory");
            return None;
        }
    }

    if rules::propagate(&mut board).is_err() {
        info!("initial propagation found a contradiction");
        return None;
    }

    let solution = search::solve(&board);
    if solution.is_none() {
        info!("search exhausted every branch with no solution");
    }
    solution
}
