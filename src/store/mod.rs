//! Keyed storage for game sessions.
//!
//! The store knows nothing about game rules: it maps a [`SessionId`] to the
//! last [`GameState`](crate::GameState) written under it.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::InMemorySessionStore;

use crate::games::tictactoe::GameState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque session identifier.
///
/// Minted from a random UUID (v4) so collisions between live sessions are
/// not a practical concern. Nothing outside the store inspects its shape.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Contract for session persistence.
///
/// `put` replaces an existing record and never creates one; only `create`
/// mints identifiers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session in the initial state and returns its identifier.
    async fn create(&self) -> (SessionId, GameState);

    /// Fetches the state stored under `id`.
    async fn get(&self, id: &SessionId) -> Result<GameState, StoreError>;

    /// Replaces the state stored under `id`.
    async fn put(&self, id: &SessionId, state: GameState) -> Result<(), StoreError>;

    /// Removes the session stored under `id`.
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Lists the identifiers of all live sessions.
    async fn ids(&self) -> Vec<SessionId>;
}
