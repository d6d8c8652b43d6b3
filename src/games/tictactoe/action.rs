//! First-class action types for tic-tac-toe.
//!
//! A move is the caller's intent expressed as raw coordinates. It is
//! validated against a state before anything is written.

use super::Position;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A requested move: place the current player's mark at `(row, col)`.
///
/// Coordinates are signed so that out-of-range input such as `-1`
/// reaches the engine and is rejected there instead of at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Row, expected in `0..=2`.
    pub row: i64,
    /// Column, expected in `0..=2`.
    pub col: i64,
}

impl Move {
    /// Resolves the coordinates to a board position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidCoordinates`] if either coordinate is outside `0..=2`.
    pub fn position(&self) -> Result<Position, MoveError> {
        Position::from_coords(self.row, self.col).ok_or(MoveError::InvalidCoordinates {
            row: self.row,
            col: self.col,
        })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Reason a move was rejected. The state it was applied to is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Row or column outside the board.
    #[display("Position ({row}, {col}) is out of bounds")]
    InvalidCoordinates {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },

    /// The game already ended in a win or tie.
    #[display("Game already over")]
    GameAlreadyOver,

    /// The target cell holds a mark.
    #[display("Cell {_0} is occupied")]
    CellOccupied(#[error(not(source))] Position),
}
