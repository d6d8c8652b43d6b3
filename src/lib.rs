//! Tic-tac-toe session server.
//!
//! A pure game engine, a keyed session store, a coordinator that serializes
//! moves per session, and a REST API on top.
//!
//! # Architecture
//!
//! - **Games**: board types, rules and the [`Game`] engine (no I/O)
//! - **Store**: the [`SessionStore`] contract and an in-memory implementation
//! - **Session**: [`SessionManager`], the fetch-apply-persist coordinator
//! - **Server**: axum router exposing sessions over HTTP
//! - **Client**: reqwest client for the same API
//!
//! # Example
//!
//! ```
//! use tictactoe_server::{Game, Player, Winner};
//!
//! let mut state = Game::initialize();
//! for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
//!     state = Game::apply_move(&state, row, col).unwrap();
//! }
//! assert_eq!(state.winner(), Some(Winner::Player(Player::X)));
//! assert_eq!(state.moves_count(), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod config;
mod games;
mod server;
mod session;
mod store;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Game, GameState, GameStatus, Move, MoveError, Player, Position, Square, Winner,
    invariants, rules,
};

// Crate-level exports - Session storage
pub use store::{InMemorySessionStore, SessionId, SessionStore, StoreError};

// Crate-level exports - Session management
pub use session::{SessionError, SessionManager};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - HTTP server
pub use server::{
    ApiError, AppState, ErrorResponse, GameStateResponse, HealthResponse, MoveRequest,
    NewGameResponse, create_router, serve,
};

// Crate-level exports - HTTP client
pub use client::{ClientError, GameClient, render};
