//! Game session coordination.
//!
//! [`SessionManager`] ties the pure engine to a [`SessionStore`]: it fetches
//! a session, applies the engine and writes the result back. Each
//! fetch-apply-write runs under a per-session lock, so two requests on the
//! same session never interleave while requests on different sessions
//! proceed independently.

use crate::games::tictactoe::{Game, GameState, MoveError};
use crate::store::{InMemorySessionStore, SessionId, SessionStore, StoreError};
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

/// Error from a coordinated session operation.
///
/// Not-found and rejected moves stay distinct so the transport can report
/// them differently.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The session identifier is unknown.
    #[display("Game not found")]
    NotFound(#[error(not(source))] SessionId),

    /// The engine refused the move.
    #[display("{_0}")]
    Rejected(MoveError),
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Rejected(err)
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => SessionError::NotFound(id),
        }
    }
}

/// Manages all game sessions.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    locks: Arc<Mutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager backed by an in-memory store.
    #[instrument]
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemorySessionStore::new()))
    }

    /// Creates a session manager over the given store.
    #[instrument(skip(store))]
    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        info!("Creating session manager");
        Self {
            store,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Acquires the lock serializing writes to `id`.
    ///
    /// The table lock is held only long enough to find or insert the entry.
    async fn lock(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().await;
            locks.entry(id.clone()).or_default().clone()
        };
        entry.lock_owned().await
    }

    /// Starts a new game and returns its identifier and initial state.
    #[instrument(skip(self))]
    pub async fn new_game(&self) -> (SessionId, GameState) {
        let (id, state) = self.store.create().await;
        info!(session_id = %id, "New game started");
        (id, state)
    }

    /// Returns the current state of a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if the session does not exist.
    #[instrument(skip(self), fields(session_id = %id))]
    pub async fn state(&self, id: &SessionId) -> Result<GameState, SessionError> {
        debug!("Fetching session state");
        Ok(self.store.get(id).await?)
    }

    /// Runs `transition` on the stored state of `id` and writes the result.
    ///
    /// The whole read-modify-write happens under the session lock. A lock
    /// entry created for an unknown identifier is dropped again.
    async fn update<F>(&self, id: &SessionId, transition: F) -> Result<GameState, SessionError>
    where
        F: FnOnce(&GameState) -> Result<GameState, MoveError>,
    {
        let guard = self.lock(id).await;
        let result: Result<GameState, SessionError> = async {
            let state = self.store.get(id).await?;
            let next = transition(&state)?;
            self.store.put(id, next.clone()).await?;
            Ok(next)
        }
        .await;
        drop(guard);

        if let Err(SessionError::NotFound(_)) = &result {
            self.locks.lock().await.remove(id);
        }
        result
    }

    /// Applies a move to a session and persists the result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if the session does not exist and
    /// [`SessionError::Rejected`] if the engine refuses the move. A rejected
    /// move writes nothing.
    #[instrument(skip(self), fields(session_id = %id))]
    pub async fn make_move(
        &self,
        id: &SessionId,
        row: i64,
        col: i64,
    ) -> Result<GameState, SessionError> {
        let next = self
            .update(id, |state| Game::apply_move(state, row, col))
            .await
            .inspect_err(|e| warn!(row, col, error = %e, "Move not applied"))?;

        info!(
            row,
            col,
            status = ?next.status(),
            moves = next.moves_count(),
            "Move completed successfully"
        );
        Ok(next)
    }

    /// Resets a session to the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if the session does not exist.
    #[instrument(skip(self), fields(session_id = %id))]
    pub async fn reset(&self, id: &SessionId) -> Result<GameState, SessionError> {
        let fresh = self.update(id, |state| Ok(Game::reset(state))).await?;
        info!("Game reset");
        Ok(fresh)
    }

    /// Deletes a session and releases its lock entry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if the session does not exist.
    #[instrument(skip(self), fields(session_id = %id))]
    pub async fn delete(&self, id: &SessionId) -> Result<(), SessionError> {
        let result = {
            let _guard = self.lock(id).await;
            self.store.delete(id).await
        };
        self.locks.lock().await.remove(id);
        result?;

        info!("Session deleted");
        Ok(())
    }

    /// Number of live sessions.
    #[instrument(skip(self))]
    pub async fn session_count(&self) -> usize {
        self.store.ids().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
