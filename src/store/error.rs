//! Store error types.

use super::SessionId;
use derive_more::{Display, Error};

/// Error returned by a [`SessionStore`](super::SessionStore).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum StoreError {
    /// No session is stored under the identifier.
    #[display("Session {_0} not found")]
    NotFound(#[error(not(source))] SessionId),
}
