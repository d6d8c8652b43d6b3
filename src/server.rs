//! REST API over the session manager.
//!
//! Endpoints:
//!
//! - `POST   /api/game/new`        create a session
//! - `GET    /api/game/{id}/state` current state
//! - `POST   /api/game/{id}/move`  body `{"row": r, "col": c}`
//! - `POST   /api/game/{id}/reset` back to the initial state
//! - `DELETE /api/game/{id}`       drop the session
//! - `GET    /api/health`          liveness
//!
//! Errors are returned as `{"error": "<reason>"}`. Rejected moves use `400`
//! for bad coordinates and `409` for moves the current state refuses;
//! unknown sessions use `404`.

use crate::config::ServerConfig;
use crate::games::tictactoe::{GameState, MoveError, Player};
use crate::session::{SessionError, SessionManager};
use crate::store::SessionId;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, instrument, warn};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session coordinator shared by all requests.
    pub sessions: SessionManager,
}

/// Serialized view of a session's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateResponse {
    /// Rows of cells, each `""`, `"X"` or `"O"`.
    pub board: [[String; 3]; 3],
    /// Player to move, or the last mover once the game is over.
    pub current_player: Player,
    /// Whether the game reached a win or a tie.
    pub game_over: bool,
    /// `null`, `"X"`, `"O"` or `"tie"`.
    pub winner: Option<String>,
    /// Number of accepted moves.
    pub moves_count: u8,
}

impl From<&GameState> for GameStateResponse {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.board().rows().map(|row| row.map(str::to_string)),
            current_player: state.current_player(),
            game_over: state.is_over(),
            winner: state.winner().map(|w| w.to_string()),
            moves_count: state.moves_count(),
        }
    }
}

/// Response to `POST /api/game/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// Identifier of the created session.
    pub game_id: SessionId,
    /// Its initial state.
    pub state: GameStateResponse,
}

/// Body of `POST /api/game/{id}/move`, as sent by [`GameClient`](crate::GameClient).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row (0-2).
    pub row: i64,
    /// Column (0-2).
    pub col: i64,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Number of live sessions.
    pub sessions: usize,
}

/// Handler error mapped onto an HTTP status.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// Unknown session.
    #[display("Game not found")]
    NotFound,
    /// The engine refused the move.
    #[display("{_0}")]
    Rejected(MoveError),
    /// Malformed request.
    #[display("{_0}")]
    BadRequest(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => ApiError::NotFound,
            SessionError::Rejected(e) => ApiError::Rejected(e),
        }
    }
}

impl ApiError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Rejected(MoveError::InvalidCoordinates { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(MoveError::GameAlreadyOver | MoveError::CellOccupied(_)) => {
                StatusCode::CONFLICT
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the API router.
#[instrument(skip(state))]
pub fn create_router(state: AppState, cors: bool) -> Router {
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/game/new", post(new_game))
        .route("/api/game/{id}/state", get(game_state))
        .route("/api/game/{id}/move", post(make_move))
        .route("/api/game/{id}/reset", post(reset_game))
        .route("/api/game/{id}", delete(delete_game))
        .with_state(state);

    if cors {
        debug!("CORS enabled for all origins");
        router.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
    } else {
        router
    }
}

/// Binds the configured address and serves until the process stops.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &ServerConfig, sessions: SessionManager) -> anyhow::Result<()> {
    let app = create_router(AppState { sessions }, *config.cors());

    let listener =
        tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, app).await?;
    Ok(())
}

#[instrument(skip(state))]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        sessions: state.sessions.session_count().await,
    })
}

#[instrument(skip(state))]
async fn new_game(State(state): State<AppState>) -> Json<NewGameResponse> {
    let (id, game) = state.sessions.new_game().await;
    Json(NewGameResponse {
        game_id: id,
        state: GameStateResponse::from(&game),
    })
}

#[instrument(skip(state))]
async fn game_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let game = state.sessions.state(&SessionId::from(id)).await?;
    Ok(Json(GameStateResponse::from(&game)))
}

/// Reads one coordinate from a move body.
///
/// Integers outside `i64` saturate so the engine reports them as out of
/// bounds; anything that is not an integral number is treated as missing.
fn coordinate(body: &Value, key: &str) -> Option<i64> {
    let Value::Number(n) = body.get(key)? else {
        return None;
    };
    if let Some(v) = n.as_i64() {
        return Some(v);
    }
    if n.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let f = n.as_f64()?;
    // `as` saturates at the i64 range.
    (f.fract() == 0.0).then_some(f as i64)
}

#[instrument(skip(state, body))]
async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let id = SessionId::from(id);
    // An unknown session is reported before anything about the body.
    state.sessions.state(&id).await?;

    let coords = match body {
        Ok(Json(body)) => coordinate(&body, "row").zip(coordinate(&body, "col")),
        Err(e) => {
            warn!(error = %e, "Unreadable move body");
            None
        }
    };
    let Some((row, col)) = coords else {
        warn!("Move request without row and column");
        return Err(ApiError::BadRequest(
            "Row and column are required".to_string(),
        ));
    };
    debug!(row, col, "Processing move");

    let game = state.sessions.make_move(&id, row, col).await?;
    Ok(Json(GameStateResponse::from(&game)))
}

#[instrument(skip(state))]
async fn reset_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let game = state.sessions.reset(&SessionId::from(id)).await?;
    Ok(Json(GameStateResponse::from(&game)))
}

#[instrument(skip(state))]
async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.delete(&SessionId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_reads_integers() {
        let body = json!({ "row": 2, "col": -1 });
        assert_eq!(coordinate(&body, "row"), Some(2));
        assert_eq!(coordinate(&body, "col"), Some(-1));
        assert_eq!(coordinate(&body, "missing"), None);
    }

    #[test]
    fn test_coordinate_saturates_oversized_integers() {
        let body = json!({ "big": u64::MAX, "float": 1e20, "neg": -1e20 });
        assert_eq!(coordinate(&body, "big"), Some(i64::MAX));
        assert_eq!(coordinate(&body, "float"), Some(i64::MAX));
        assert_eq!(coordinate(&body, "neg"), Some(i64::MIN));
    }

    #[test]
    fn test_coordinate_rejects_non_integers() {
        let body = json!({ "half": 0.5, "text": "1", "null": null });
        assert_eq!(coordinate(&body, "half"), None);
        assert_eq!(coordinate(&body, "text"), None);
        assert_eq!(coordinate(&body, "null"), None);
    }
}
