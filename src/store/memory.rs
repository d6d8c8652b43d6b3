//! In-memory session store.

use super::{SessionId, SessionStore, StoreError};
use crate::games::tictactoe::{Game, GameState};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Session store backed by a `HashMap` behind an async `RwLock`.
///
/// Sessions are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, GameState>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self))]
    async fn create(&self) -> (SessionId, GameState) {
        let mut sessions = self.sessions.write().await;

        let mut id = SessionId::generate();
        while sessions.contains_key(&id) {
            warn!(session_id = %id, "Session id collision, regenerating");
            id = SessionId::generate();
        }

        let state = Game::initialize();
        sessions.insert(id.clone(), state.clone());

        info!(session_id = %id, count = sessions.len(), "Created session");
        (id, state)
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn get(&self, id: &SessionId) -> Result<GameState, StoreError> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned().ok_or_else(|| {
            debug!("Session not found");
            StoreError::NotFound(id.clone())
        })
    }

    #[instrument(skip(self, state), fields(session_id = %id))]
    async fn put(&self, id: &SessionId, state: GameState) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(slot) => {
                *slot = state;
                debug!("Session updated");
                Ok(())
            }
            None => {
                debug!("Session not found");
                Err(StoreError::NotFound(id.clone()))
            }
        }
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(id).is_some() {
            info!(count = sessions.len(), "Deleted session");
            Ok(())
        } else {
            debug!("Session not found");
            Err(StoreError::NotFound(id.clone()))
        }
    }

    #[instrument(skip(self))]
    async fn ids(&self) -> Vec<SessionId> {
        let sessions = self.sessions.read().await;
        sessions.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_does_not_create() {
        let store = InMemorySessionStore::new();
        let result = store.put(&"missing".into(), GameState::new()).await;
        assert_eq!(result, Err(StoreError::NotFound("missing".into())));
        assert!(store.ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_created_ids_are_distinct() {
        let store = InMemorySessionStore::new();
        let (a, _) = store.create().await;
        let (b, _) = store.create().await;
        assert_ne!(a, b);
        assert_eq!(store.ids().await.len(), 2);
    }
}
