//! Pure state-transition engine for tic-tac-toe.
//!
//! The engine holds no state of its own. Every operation takes a
//! [`GameState`] by reference and returns a new one, so the caller decides
//! where sessions live and a rejected move can never leave a half-written
//! state behind.

use super::action::{Move, MoveError};
use super::invariants;
use super::rules::{has_won, is_full};
use super::types::{GameState, GameStatus};
use tracing::{debug, instrument, warn};

/// Tic-tac-toe game engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Game;

impl Game {
    /// Returns a fresh game: empty board, X to move.
    #[instrument]
    pub fn initialize() -> GameState {
        GameState::new()
    }

    /// Applies a move for the current player.
    ///
    /// Checks run in order and the first failure wins: coordinates,
    /// then game over, then occupancy. On success the mover's mark is
    /// placed, the move count increments and the terminal condition is
    /// evaluated; the turn passes only if the game continues.
    ///
    /// # Errors
    ///
    /// - [`MoveError::InvalidCoordinates`] if `row` or `col` is outside `0..=2`
    /// - [`MoveError::GameAlreadyOver`] if the game already ended
    /// - [`MoveError::CellOccupied`] if the target square holds a mark
    #[instrument(skip(state), fields(player = %state.current_player(), moves = state.moves_count()))]
    pub fn apply_move(state: &GameState, row: i64, col: i64) -> Result<GameState, MoveError> {
        let mv = Move::new(row, col);
        let pos = mv.position().inspect_err(|e| warn!(%e, "Rejected move"))?;

        if state.is_over() {
            warn!(%mv, "Rejected move on finished game");
            return Err(MoveError::GameAlreadyOver);
        }

        if !state.board().is_empty(pos) {
            warn!(%pos, "Rejected move on occupied cell");
            return Err(MoveError::CellOccupied(pos));
        }

        let mover = state.current_player();
        let mut next = state.clone();
        next.place(pos);

        // Only the mover can have completed a line, and a win on the
        // ninth placement outranks the full board.
        if has_won(next.board(), mover) {
            next.set_status(GameStatus::Won(mover));
        } else if is_full(next.board()) {
            next.set_status(GameStatus::Tie);
        } else {
            next.pass_turn();
        }

        debug_assert!(
            invariants::check_all(&next).is_ok(),
            "postcondition failed: {:?}",
            invariants::check_all(&next)
        );

        debug!(%pos, status = ?next.status(), board = %next.board().display(), "Move applied");
        Ok(next)
    }

    /// Returns the initial state, discarding `state`.
    ///
    /// Resetting is legal from any state, finished or not.
    #[instrument(skip(state), fields(moves = state.moves_count()))]
    pub fn reset(state: &GameState) -> GameState {
        debug!(status = ?state.status(), "Resetting game");
        Self::initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Player, Position, Square, Winner};

    fn play(moves: &[(i64, i64)]) -> GameState {
        moves.iter().fold(Game::initialize(), |state, (row, col)| {
            Game::apply_move(&state, *row, *col).expect("legal move")
        })
    }

    #[test]
    fn test_first_move_places_x_and_passes_turn() {
        let state = Game::apply_move(&Game::initialize(), 1, 1).unwrap();
        assert_eq!(
            state.board().get(Position::Center),
            Square::Occupied(Player::X)
        );
        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.moves_count(), 1);
    }

    #[test]
    fn test_bounds_checked_before_game_over() {
        let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(won.is_over());
        assert_eq!(
            Game::apply_move(&won, 3, 0),
            Err(MoveError::InvalidCoordinates { row: 3, col: 0 })
        );
    }

    #[test]
    fn test_game_over_checked_before_occupancy() {
        let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(
            Game::apply_move(&won, 0, 0),
            Err(MoveError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_winner_keeps_turn() {
        let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(won.winner(), Some(Winner::Player(Player::X)));
        assert_eq!(won.current_player(), Player::X);
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let state = play(&[(0, 0), (1, 1)]);
        assert_eq!(Game::reset(&state), Game::initialize());
    }
}
