use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::config::ServerConfig;
use crate::shared::{AppError, AppState};
use crate::websockets::websocket_handler;

/// Static acknowledgement served at `/`
pub const HEALTH_MESSAGE: &str = "Infinite tic-tac-toe API";

/// GET /
pub async fn health_check() -> Json<&'static str> {
    Json(HEALTH_MESSAGE)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
}

/// Builds the application router: health check, websocket endpoint, CORS and tracing
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/ws", get(websocket_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}
