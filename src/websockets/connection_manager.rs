use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::room::ConnectionId;

/// Addressed delivery of serialized frames to live sockets.
///
/// Every accepted socket registers the sending half of its outbound channel
/// under its `ConnectionId`. Frames addressed to an id that has gone away are
/// dropped; room state never waits on a socket.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection: ConnectionId, outbound: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, connection: ConnectionId);

    /// Queues `frame` for `connection`. Returns false if it is not reachable.
    async fn send_to_player(&self, connection: ConnectionId, frame: &str) -> bool;

    /// Queues `frame` for each connection in order and returns how many were reached
    async fn send_to_players(&self, connections: &[ConnectionId], frame: &str) -> usize {
        let mut reached = 0;
        for &connection in connections {
            if self.send_to_player(connection, frame).await {
                reached += 1;
            }
        }
        reached
    }
}

/// Outbound channels of the sockets attached to this process
#[derive(Default)]
pub struct InMemoryConnectionManager {
    outbound: RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection: ConnectionId, outbound: mpsc::UnboundedSender<String>) {
        self.outbound.write().await.insert(connection, outbound);
    }

    async fn remove_connection(&self, connection: ConnectionId) {
        self.outbound.write().await.remove(&connection);
    }

    async fn send_to_player(&self, connection: ConnectionId, frame: &str) -> bool {
        let outbound = self.outbound.read().await;
        let Some(sender) = outbound.get(&connection) else {
            debug!(connection_id = %connection, "No socket registered, frame dropped");
            return false;
        };

        // The receiver is gone once the socket task has exited
        if sender.send(frame.to_owned()).is_err() {
            debug!(connection_id = %connection, "Socket task gone, frame dropped");
            return false;
        }
        true
    }
}
