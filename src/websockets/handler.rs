use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::room::{ConnectionId, Lobby};
use crate::shared::AppState;
use crate::websockets::messages::{
    CreateRoomPayload, JoinRoomPayload, MakeMovePayload, MessageType, RoomCodePayload,
    WebSocketMessage,
};

use super::socket::{Connection, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
///
/// Frames that fail to parse, carry a server-only type, or whose payload does
/// not match the type are logged and dropped without a reply.
pub struct WebsocketReceiveHandler {
    lobby: Arc<Lobby>,
}

impl WebsocketReceiveHandler {
    pub fn new(lobby: Arc<Lobby>) -> Self {
        Self { lobby }
    }
}

fn parse_payload<T: DeserializeOwned>(
    connection: ConnectionId,
    message_type: MessageType,
    payload: serde_json::Value,
) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(
                connection_id = %connection,
                message_type = ?message_type,
                error = %e,
                "Invalid payload"
            );
            None
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection: ConnectionId, message: String) {
        debug!(
            connection_id = %connection,
            message = %message,
            "Received message"
        );

        let ws_message = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => ws_message,
            Err(e) => {
                warn!(
                    connection_id = %connection,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                return;
            }
        };

        let message_type = ws_message.message_type;
        let payload = ws_message.payload;
        match message_type {
            MessageType::CreateRoom => {
                // A missing payload means the defaults
                let request = if payload.is_null() {
                    Some(CreateRoomPayload::default())
                } else {
                    parse_payload::<CreateRoomPayload>(connection, message_type, payload)
                };
                if let Some(request) = request {
                    self.lobby.create_room(connection, request.is_public).await;
                }
            }
            MessageType::JoinRoom => {
                if let Some(request) =
                    parse_payload::<JoinRoomPayload>(connection, message_type, payload)
                {
                    self.lobby.join_room(connection, request.code).await;
                }
            }
            MessageType::JoinRandomRoom => {
                self.lobby.join_random_room(connection).await;
            }
            MessageType::LeaveRoom => {
                if let Some(request) =
                    parse_payload::<RoomCodePayload>(connection, message_type, payload)
                {
                    self.lobby.leave_room(connection, request.room_code).await;
                }
            }
            MessageType::Rematch => {
                if let Some(request) =
                    parse_payload::<RoomCodePayload>(connection, message_type, payload)
                {
                    self.lobby.rematch(connection, request.room_code).await;
                }
            }
            MessageType::MakeMove => {
                if let Some(request) =
                    parse_payload::<MakeMovePayload>(connection, message_type, payload)
                {
                    self.lobby
                        .make_move(connection, request.room_code, request.index)
                        .await;
                }
            }
            _ => {
                warn!(
                    connection_id = %connection,
                    message_type = ?message_type,
                    "Ignoring server-only message type"
                );
            }
        }
    }
}

/// WebSocket endpoint. Every accepted socket gets a fresh connection id;
/// there is no authentication.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = ConnectionId::new();
    info!(connection_id = %connection_id, "User connected");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    app_state
        .connection_manager
        .add_connection(connection_id, outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.lobby.clone()));
    let connection = Connection::new(
        connection_id,
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    match connection.run().await {
        Ok(reason) => {
            info!(connection_id = %connection_id, reason = ?reason, "WebSocket connection closed");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: stop routing frames to this socket, then vacate its seats
    app_state
        .connection_manager
        .remove_connection(connection_id)
        .await;
    app_state.lobby.disconnect(connection_id).await;

    info!(connection_id = %connection_id, "User disconnected");
}
