//! Error taxonomy for creating and solving sudoku boards.

use thiserror::Error;

/// Errors that can arise while building or mutating a [`crate::Board`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The requested board size has a candidate set too wide for the
    /// `u32` cell representation (`boardSize` must fit in the bits above
    /// [`crate::cell::VALUE_BITS`]).
    #[error("board size {0} is too large for the cell representation")]
    MaxTooLarge(usize),

    /// A digit bigger than the board's `boardSize` was supplied.
    #[error("value {0} is too large for this board")]
    ValueTooLarge(usize),

    /// An index outside `0..len()` was used to address a cell.
    #[error("index out of bounds")]
    OutOfBounds,

    /// Placing or eliminating a digit produced an empty candidate mask.
    #[error("board is inconsistent")]
    Contradiction,

    /// The input does not describe a square `N^2 x N^2` grid.
    #[error("input is not a valid square sudoku grid")]
    BadSize,

    /// A character or token could not be parsed as a valid digit.
    #[error("invalid digit in puzzle input")]
    BadDigit,

    /// The input file could not be opened, or the output path could not
    /// be created.
    #[error("I/O error: {0}")]
    Io(String),

    /// The input file's contents did not match the documented text format.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Marks that a rule application found a board-level contradiction (an
/// empty candidate mask). Carries no data; rules convert it `?`-style into
/// [`SolverError::Contradiction`] at the public boundary.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Contradiction;

impl From<Contradiction> for SolverError {
    fn from(_: Contradiction) -> Self {
        SolverError::Contradiction
    }
}

/// Whether a rule or elimination call actually narrowed the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Elimination {
    /// At least one candidate bit was cleared or a cell was resolved.
    Eliminated,
    /// Nothing changed.
    Same,
}

impl Elimination {
    /// Combine two outcomes: `Eliminated` dominates.
    pub(crate) fn combine(self, rhs: Self) -> Self {
        if self == Elimination::Eliminated {
            Elimination::Eliminated
        } else {
            rhs
        }
    }

    pub(crate) fn changed(self) -> bool {
        self == Elimination::Eliminated
    }
}
