//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are separated from
//! board storage so the engine and the invariant checks share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, has_won};
