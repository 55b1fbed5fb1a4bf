use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::RoomEvent;
use crate::game::{Board, Symbol};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    // Client -> Server
    CreateRoom,
    JoinRoom,
    JoinRandomRoom,
    LeaveRoom,
    Rematch,
    MakeMove,

    // Server -> Client
    RoomCreated,
    RoomJoined,
    PlayerJoined,
    PlayerLeft,
    LeftRoom,
    RematchStarted,
    NextDisappear,
    MoveMade,
    Error,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

fn default_public() -> bool {
    true
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    #[serde(default = "default_public")]
    pub is_public: bool,
}

impl Default for CreateRoomPayload {
    fn default() -> Self {
        Self { is_public: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinRoomPayload {
    pub code: String,
}

/// Payload shared by leave-room and rematch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomCodePayload {
    pub room_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeMovePayload {
    pub room_code: String,
    pub index: usize,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreatedPayload {
    pub code: String,
    pub symbol: Symbol,
    pub board: Board,
    pub turn: Symbol,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedPayload {
    pub board: Board,
    pub symbol: Symbol,
    pub turn: Symbol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
}

/// Board snapshot shared by player-joined and rematch-started
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardStatePayload {
    pub board: Board,
    pub turn: Symbol,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLeftPayload {
    pub left_symbol: Symbol,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveMadePayload {
    pub board: Board,
    pub turn: Symbol,
    pub winner: Option<Symbol>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

fn to_payload<T: Serialize>(payload: T) -> serde_json::Value {
    serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Create a room-created message
    pub fn room_created(code: String, symbol: Symbol, board: Board, turn: Symbol) -> Self {
        let payload = RoomCreatedPayload {
            code,
            symbol,
            board,
            turn,
        };
        Self::new(MessageType::RoomCreated, to_payload(payload))
    }

    /// Create a room-joined message
    pub fn room_joined(board: Board, symbol: Symbol, turn: Symbol, room_code: Option<String>) -> Self {
        let payload = RoomJoinedPayload {
            board,
            symbol,
            turn,
            room_code,
        };
        Self::new(MessageType::RoomJoined, to_payload(payload))
    }

    pub fn player_joined(board: Board, turn: Symbol) -> Self {
        Self::new(
            MessageType::PlayerJoined,
            to_payload(BoardStatePayload { board, turn }),
        )
    }

    pub fn player_left(left_symbol: Symbol) -> Self {
        Self::new(
            MessageType::PlayerLeft,
            to_payload(PlayerLeftPayload { left_symbol }),
        )
    }

    pub fn left_room() -> Self {
        Self::new(MessageType::LeftRoom, serde_json::json!({}))
    }

    pub fn rematch_started(board: Board, turn: Symbol) -> Self {
        Self::new(
            MessageType::RematchStarted,
            to_payload(BoardStatePayload { board, turn }),
        )
    }

    /// Payload is the bare position, or null
    pub fn next_disappear(position: Option<usize>) -> Self {
        Self::new(MessageType::NextDisappear, to_payload(position))
    }

    pub fn move_made(board: Board, turn: Symbol, winner: Option<Symbol>) -> Self {
        Self::new(
            MessageType::MoveMade,
            to_payload(MoveMadePayload {
                board,
                turn,
                winner,
            }),
        )
    }

    /// Create an error message
    pub fn error(message: String) -> Self {
        let payload = ErrorPayload { message };
        Self::new(MessageType::Error, to_payload(payload))
    }
}

impl From<&RoomEvent> for WebSocketMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::RoomCreated {
                code,
                symbol,
                board,
                turn,
            } => Self::room_created(code.clone(), *symbol, *board, *turn),
            RoomEvent::RoomJoined {
                board,
                symbol,
                turn,
                room_code,
            } => Self::room_joined(*board, *symbol, *turn, room_code.clone()),
            RoomEvent::PlayerJoined { board, turn } => Self::player_joined(*board, *turn),
            RoomEvent::PlayerLeft { left_symbol } => Self::player_left(*left_symbol),
            RoomEvent::LeftRoom => Self::left_room(),
            RoomEvent::RematchStarted { board, turn } => Self::rematch_started(*board, *turn),
            RoomEvent::NextDisappear { position } => Self::next_disappear(*position),
            RoomEvent::MoveMade {
                board,
                turn,
                winner,
            } => Self::move_made(*board, *turn, *winner),
            RoomEvent::Error { message } => Self::error(message.clone()),
        }
    }
}
