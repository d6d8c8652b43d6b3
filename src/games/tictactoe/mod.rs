//! Tic-tac-toe: board types, rules and the pure move engine.

mod action;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::Game;
pub use position::Position;
pub use types::{Board, GameState, GameStatus, Player, Square, Winner};
