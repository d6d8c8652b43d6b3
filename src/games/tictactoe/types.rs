//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Wire symbol for this square: `""`, `"X"` or `"O"`.
    pub fn symbol(self) -> &'static str {
        match self {
            Square::Empty => "",
            Square::Occupied(Player::X) => "X",
            Square::Occupied(Player::O) => "O",
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns the board as three rows of wire symbols.
    pub fn rows(&self) -> [[&'static str; 3]; 3] {
        let mut rows = [[""; 3]; 3];
        for pos in Position::ALL {
            rows[pos.row()][pos.col()] = self.get(pos).symbol();
        }
        rows
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => ".".to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Board filled with no line for either player.
    Tie,
}

/// Outcome of a finished game, as reported in `winner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Winner {
    /// A player completed a line.
    #[display("{_0}")]
    Player(Player),
    /// Nobody completed a line.
    #[display("tie")]
    Tie,
}

/// Complete state of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    moves_count: u8,
}

impl GameState {
    /// Creates the initial state: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            moves_count: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move, or the last mover once the game is over.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of accepted moves.
    pub fn moves_count(&self) -> u8 {
        self.moves_count
    }

    /// True once the game reached a win or a tie.
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Winner of a finished game; `None` while in progress.
    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(Winner::Player(player)),
            GameStatus::Tie => Some(Winner::Tie),
        }
    }

    /// Places the current player's mark (unchecked - use `Game::apply_move` for validation).
    pub(super) fn place(&mut self, pos: Position) {
        self.board.set(pos, Square::Occupied(self.current_player));
        self.moves_count += 1;
    }

    /// Passes the turn to the opponent.
    pub(super) fn pass_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Sets the game status.
    pub(super) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.filled(), 0);
        assert!(Position::ALL.iter().all(|p| board.is_empty(*p)));
    }

    #[test]
    fn test_rows_use_wire_symbols() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::Center, Square::Occupied(Player::O));
        assert_eq!(
            board.rows(),
            [["X", "", ""], ["", "O", ""], ["", "", ""]]
        );
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(Position::BottomRight, Square::Occupied(Player::O));
        assert_eq!(board.display(), ".|.|.\n-+-+-\n.|.|.\n-+-+-\n.|.|O");
    }

    #[test]
    fn test_winner_display() {
        assert_eq!(Winner::Player(Player::O).to_string(), "O");
        assert_eq!(Winner::Tie.to_string(), "tie");
    }

    #[test]
    fn test_in_progress_has_no_winner() {
        let state = GameState::new();
        assert!(!state.is_over());
        assert_eq!(state.winner(), None);
    }
}
