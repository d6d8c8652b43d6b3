//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold for every reachable
//! [`GameState`]. The engine checks them as postconditions in debug builds,
//! and they are testable on their own.

use super::rules::{check_winner, is_full};
use super::{GameState, GameStatus, Player};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: &'static str,
}

/// Invariant: `moves_count` equals the number of occupied squares.
pub struct MoveCountMatchesBoard;

impl Invariant<GameState> for MoveCountMatchesBoard {
    fn holds(state: &GameState) -> bool {
        usize::from(state.moves_count()) == state.board().filled()
    }

    fn description() -> &'static str {
        "Move count equals the number of occupied squares"
    }
}

/// Invariant: X moves first and turns alternate.
///
/// While in progress the player to move is X after an even number of
/// moves. Once over, the current player is the one who made the last move.
pub struct AlternatingTurn;

impl Invariant<GameState> for AlternatingTurn {
    fn holds(state: &GameState) -> bool {
        let even = state.moves_count() % 2 == 0;
        let expected = match (state.is_over(), even) {
            (false, true) | (true, false) => Player::X,
            (false, false) | (true, true) => Player::O,
        };
        state.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}

/// Invariant: the status agrees with the board.
///
/// A winner exists only when the status says so, a tie needs a full board,
/// and an in-progress game has neither a line nor a full board.
pub struct StatusMatchesBoard;

impl Invariant<GameState> for StatusMatchesBoard {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        match state.status() {
            GameStatus::InProgress => check_winner(board).is_none() && !is_full(board),
            GameStatus::Won(player) => check_winner(board) == Some(player),
            GameStatus::Tie => is_full(board) && check_winner(board).is_none(),
        }
    }

    fn description() -> &'static str {
        "Game status agrees with the board"
    }
}

/// Checks every state invariant, collecting all violations.
pub fn check_all(state: &GameState) -> Result<(), Vec<InvariantViolation>> {
    let checks: [(fn(&GameState) -> bool, &'static str); 3] = [
        (
            MoveCountMatchesBoard::holds,
            MoveCountMatchesBoard::description(),
        ),
        (AlternatingTurn::holds, AlternatingTurn::description()),
        (StatusMatchesBoard::holds, StatusMatchesBoard::description()),
    ];

    let violations: Vec<_> = checks
        .iter()
        .filter(|(holds, _)| !holds(state))
        .map(|(_, description)| InvariantViolation {
            description: *description,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
