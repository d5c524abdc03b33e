use axum::{
    extract::State,
    routing::{get, post},
    Json,
    Router,
};
use core_sim::{TradeCommand, TradeRequest};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::{
    dto::{PulseResponse, TradeResponse},
    error::ApiError,
    state::AppState,
    ws,
};

pub const READY_BANNER: &str = "TITAN_CORE_V25_ONLINE";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(healthcheck))
        .route("/pulse", get(pulse))
        .route("/trade", post(trade))
        .route("/ws/events", get(ws::events_socket))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    READY_BANNER
}

async fn healthcheck() -> &'static str {
    "ok"
}

async fn pulse(State(state): State<AppState>) -> Json<PulseResponse> {
    Json(PulseResponse::new(state.snapshot(), state.vault_balance()))
}

async fn trade(
    State(state): State<AppState>,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeResponse>, ApiError> {
    let command = TradeCommand::try_from(request).map_err(|err| {
        warn!(error = %err, "trade rejected");
        err
    })?;

    state.execute(command);
    Ok(Json(TradeResponse { success: true }))
}
