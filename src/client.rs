//! HTTP client for the REST API.
//!
//! The client keeps no game logic of its own: every method returns the
//! state the server answered with.

use crate::server::{ErrorResponse, GameStateResponse, MoveRequest, NewGameResponse};
use derive_more::{Display, Error};
use reqwest::{Response, StatusCode};
use tracing::{debug, info, instrument};

/// Error talking to the game server.
#[derive(Debug, Display, Error)]
pub enum ClientError {
    /// The session does not exist on the server.
    #[display("Not found: {reason}")]
    NotFound {
        /// Reason given by the server.
        reason: String,
    },

    /// The server refused the request.
    #[display("Rejected ({status}): {reason}")]
    Rejected {
        /// HTTP status returned.
        status: StatusCode,
        /// Reason given by the server.
        reason: String,
    },

    /// Transport or decoding failure.
    #[display("HTTP error: {_0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

/// Client for one game server.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    #[instrument]
    pub fn new(base_url: impl Into<String> + std::fmt::Debug) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(%base_url, "Creating game client");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps non-success responses to [`ClientError`].
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        debug!(%status, %reason, "Request rejected");
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { reason });
        }
        Err(ClientError::Rejected { status, reason })
    }

    /// Creates a new game.
    #[instrument(skip(self))]
    pub async fn new_game(&self) -> Result<NewGameResponse, ClientError> {
        let response = self.client.post(self.url("/api/game/new")).send().await?;
        let created: NewGameResponse = Self::check(response).await?.json().await?;
        info!(game_id = %created.game_id, "Game created");
        Ok(created)
    }

    /// Fetches the current state of a game.
    #[instrument(skip(self))]
    pub async fn state(&self, game_id: &str) -> Result<GameStateResponse, ClientError> {
        let url = self.url(&format!("/api/game/{}/state", game_id));
        let response = self.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Submits a move.
    #[instrument(skip(self))]
    pub async fn make_move(
        &self,
        game_id: &str,
        row: i64,
        col: i64,
    ) -> Result<GameStateResponse, ClientError> {
        let url = self.url(&format!("/api/game/{}/move", game_id));
        let response = self
            .client
            .post(url)
            .json(&MoveRequest { row, col })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Resets a game to the initial state.
    #[instrument(skip(self))]
    pub async fn reset(&self, game_id: &str) -> Result<GameStateResponse, ClientError> {
        let url = self.url(&format!("/api/game/{}/reset", game_id));
        let response = self.client.post(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Deletes a game.
    #[instrument(skip(self))]
    pub async fn delete(&self, game_id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/game/{}", game_id));
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Renders a state for the terminal: status line, move count and board.
pub fn render(state: &GameStateResponse) -> String {
    let status = match (state.game_over, state.winner.as_deref()) {
        (true, Some("tie")) => "It's a tie!".to_string(),
        (true, Some(winner)) => format!("Player {} wins!", winner),
        _ => format!("Current player: {}", state.current_player),
    };

    let rows: Vec<String> = state
        .board
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| if cell.is_empty() { "." } else { cell.as_str() })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    format!(
        "{}\nMoves: {}\n\n{}",
        status,
        state.moves_count,
        rows.join("\n-+-+-\n")
    )
}
