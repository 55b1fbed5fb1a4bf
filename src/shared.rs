use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ConfigError;
use crate::room::{Lobby, RoomRegistry};
use crate::websockets::{ConnectionManager, InMemoryConnectionManager};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub lobby: Arc<Lobby>,
    pub connection_manager: Arc<dyn ConnectionManager>,
}

impl AppState {
    pub fn new(registry: RoomRegistry, connection_manager: Arc<dyn ConnectionManager>) -> Self {
        let lobby = Arc::new(Lobby::new(registry, Arc::clone(&connection_manager)));
        Self {
            lobby,
            connection_manager,
        }
    }

    /// Fresh registry and in-memory connection manager
    pub fn in_memory() -> Self {
        Self::new(
            RoomRegistry::new(),
            Arc::new(InMemoryConnectionManager::new()),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Config(_) | AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
