// Library crate for the infinite tic-tac-toe server
// This file exposes the public API for integration tests

pub mod config;
pub mod event;
pub mod game;
pub mod room;
pub mod routes;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use event::{Dispatch, RoomEvent};
pub use game::{Board, Symbol};
pub use room::{ConnectionId, Lobby, RoomRegistry};
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, MessageHandler, MessageType, WebSocketMessage, WebsocketReceiveHandler,
};
