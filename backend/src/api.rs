use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chess_engine::{Difficulty, Side};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::ai::{MoveOrchestrator, MoveSource};
use crate::error::ResolveError;
use crate::ledger::{submit_game_result, GameResult, ResultLedger, SubmissionReceipt, Winner};

const SERVICE_NAME: &str = "royalmint-chess";
const CORS_MAX_AGE_SECS: u64 = 86_400;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<MoveOrchestrator>,
    pub ledger: Arc<dyn ResultLedger>,
}

impl AppState {
    pub fn new(orchestrator: MoveOrchestrator, ledger: Arc<dyn ResultLedger>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            ledger,
        }
    }
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub fen: Option<String>,
    pub side: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub san: String,
    pub uci: String,
    pub fen: String,
    pub new_fen: String,
    pub source: MoveSource,
    pub success: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub game_id: Option<String>,
    pub human_address: Option<String>,
    pub winner: Option<String>,
    pub signature: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Errors returned by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// A required request field is absent or empty
    MissingFields(&'static str),
    /// A field is present but unusable
    BadRequest(String),
    Resolve(ResolveError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        ApiError::Resolve(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingFields(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "success": false }),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "success": false }),
            ),
            ApiError::Resolve(ResolveError::NoLegalMoves) => (
                StatusCode::CONFLICT,
                json!({ "error": "No legal moves available", "gameOver": true }),
            ),
            ApiError::Resolve(
                e @ (ResolveError::InvalidInput(_) | ResolveError::NotYourTurn { .. }),
            ) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": e.to_string(), "success": false }),
            ),
            ApiError::Resolve(e @ ResolveError::Internal { .. }) => {
                error!("[API] {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Move resolution failed", "success": false }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(CORS_MAX_AGE_SECS));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/chess/move", post(resolve_move))
        .route("/api/chess/submit", post(submit_result))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn resolve_move(
    State(state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let Json(payload) = payload?;
    let (Some(fen), Some(side)) = (required(payload.fen), required(payload.side)) else {
        return Err(ApiError::MissingFields("Missing fen or side parameter"));
    };

    let side: Side = side
        .parse()
        .map_err(|e: chess_engine::EngineError| ApiError::BadRequest(e.to_string()))?;
    let difficulty = match required(payload.difficulty) {
        Some(value) => value
            .parse()
            .map_err(|e: chess_engine::EngineError| ApiError::BadRequest(e.to_string()))?,
        None => Difficulty::default(),
    };

    info!("[API] Move request: {} {} ({})", fen, side, difficulty);

    let resolved = state
        .orchestrator
        .resolve_move(&fen, side, difficulty)
        .await
        .inspect_err(|e| warn!("[API] Move request rejected: {}", e))?;

    Ok(Json(MoveResponse {
        san: resolved.san,
        uci: resolved.uci,
        fen: resolved.fen_after.clone(),
        new_fen: resolved.fen_after,
        source: resolved.source,
        success: true,
    }))
}

async fn submit_result(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmissionReceipt>, ApiError> {
    let Json(payload) = payload?;
    let (Some(game_id), Some(human_address), Some(winner), Some(signature)) = (
        required(payload.game_id),
        required(payload.human_address),
        required(payload.winner),
        required(payload.signature),
    ) else {
        return Err(ApiError::MissingFields("Missing required parameters"));
    };

    let winner: Winner = winner.parse().map_err(ApiError::BadRequest)?;
    let result = GameResult {
        game_id,
        human_address,
        winner,
        signature,
    };

    info!("[API] Submit result: {} winner={}", result.game_id, result.winner);
    Ok(Json(submit_game_result(state.ledger.as_ref(), &result).await))
}
