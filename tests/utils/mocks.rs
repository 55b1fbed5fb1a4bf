use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use infinite_tictactoe::{ConnectionId, ConnectionManager};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every frame sent to each connection instead of writing to a socket
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<ConnectionId, VecDeque<String>>>>,
    connected_players: Arc<RwLock<Vec<ConnectionId>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected_players: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn add_connected_player(&self, connection: ConnectionId) {
        self.connected_players.write().await.push(connection);
    }

    pub async fn get_messages_for(&self, connection: ConnectionId) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(&connection)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pops the oldest unread frame for `connection`
    pub async fn consume_message_for(&self, connection: ConnectionId) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(&connection)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection: ConnectionId, _sender: mpsc::UnboundedSender<String>) {
        self.add_connected_player(connection).await;
    }

    async fn remove_connection(&self, connection: ConnectionId) {
        self.connected_players
            .write()
            .await
            .retain(|c| *c != connection);
    }

    async fn send_to_player(&self, connection: ConnectionId, frame: &str) -> bool {
        self.sent_messages
            .write()
            .await
            .entry(connection)
            .or_default()
            .push_back(frame.to_string());
        true
    }
}
