use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Barrier;

use infinite_tictactoe::{ConnectionId, MessageHandler, MessageType, WebSocketMessage};

use super::setup::TestSetup;

/// A serialized client frame
pub fn client_frame(message_type: MessageType, payload: Value) -> String {
    serde_json::to_string(&WebSocketMessage::new(message_type, payload)).unwrap()
}

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a WebSocket message as `connection`
    pub async fn send_message(&self, connection: ConnectionId, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(connection, &message_json).await;
    }

    /// Send an arbitrary text frame as `connection`
    pub async fn send_raw(&self, connection: ConnectionId, frame: &str) {
        self.input_handler
            .handle_message(connection, frame.to_string())
            .await;
    }

    /// Delivers every frame from its own task, all released at once
    pub async fn send_concurrently(&self, frames: Vec<(ConnectionId, String)>) {
        let barrier = Arc::new(Barrier::new(frames.len()));
        let tasks: Vec<_> = frames
            .into_iter()
            .map(|(connection, frame)| {
                let handler = Arc::clone(&self.input_handler);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    handler.handle_message(connection, frame).await;
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }
    }

    /// Consumes and parses every unread frame for `connection`
    pub async fn drain_messages(&self, connection: ConnectionId) -> Vec<WebSocketMessage> {
        let mut messages = vec![];
        while let Some(frame) = self.mock_conn_manager.consume_message_for(connection).await {
            messages.push(serde_json::from_str(&frame).unwrap());
        }
        messages
    }

    /// Simulate the socket closing
    pub async fn disconnect(&self, connection: ConnectionId) {
        self.lobby.disconnect(connection).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn send_create_room(&self, connection: ConnectionId, is_public: bool) {
        self.send_message(
            connection,
            WebSocketMessage::new(MessageType::CreateRoom, json!({ "isPublic": is_public })),
        )
        .await;
    }

    /// Creates a room and returns its code, consuming the room-created reply
    pub async fn create_room(&self, connection: ConnectionId, is_public: bool) -> String {
        self.send_create_room(connection, is_public).await;
        let frame = self
            .mock_conn_manager
            .consume_message_for(connection)
            .await
            .expect("room-created reply");
        let message: WebSocketMessage = serde_json::from_str(&frame).unwrap();
        assert_eq!(message.message_type, MessageType::RoomCreated);
        message.payload["code"].as_str().unwrap().to_string()
    }

    pub async fn send_join_room(&self, connection: ConnectionId, code: &str) {
        self.send_message(
            connection,
            WebSocketMessage::new(MessageType::JoinRoom, json!({ "code": code })),
        )
        .await;
    }

    pub async fn send_join_random(&self, connection: ConnectionId) {
        self.send_message(
            connection,
            WebSocketMessage::new(MessageType::JoinRandomRoom, json!({})),
        )
        .await;
    }

    pub async fn send_leave(&self, connection: ConnectionId, code: &str) {
        self.send_message(
            connection,
            WebSocketMessage::new(MessageType::LeaveRoom, json!({ "roomCode": code })),
        )
        .await;
    }

    pub async fn send_rematch(&self, connection: ConnectionId, code: &str) {
        self.send_message(
            connection,
            WebSocketMessage::new(MessageType::Rematch, json!({ "roomCode": code })),
        )
        .await;
    }

    pub async fn send_move(&self, connection: ConnectionId, code: &str, index: usize) {
        self.send_message(
            connection,
            WebSocketMessage::new(
                MessageType::MakeMove,
                json!({ "roomCode": code, "index": index }),
            ),
        )
        .await;
    }

    /// Seats players[0] as X and players[1] as O in a fresh room, with inboxes drained
    pub async fn start_two_player_game(&self) -> String {
        let code = self.create_room(self.players[0], true).await;
        self.send_join_room(self.players[1], &code).await;
        self.clear_messages().await;
        code
    }
}
