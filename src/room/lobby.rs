use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::{models::ConnectionId, registry::RoomRegistry};
use crate::event::Dispatch;
use crate::game::session::{self, JoinTarget};
use crate::websockets::{ConnectionManager, WebSocketMessage};

/// Service that runs inbound room events against the shared registry.
///
/// One lock guards the whole registry. Each event holds it from the first
/// read until its outbound frames are queued, so events never interleave and
/// every room sees its events, and emits its replies, in arrival order.
pub struct Lobby {
    registry: Mutex<RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl Lobby {
    pub fn new(registry: RoomRegistry, connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self {
            registry: Mutex::new(registry),
            connection_manager,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_room(&self, caller: ConnectionId, is_public: bool) {
        let mut registry = self.registry.lock().await;
        let dispatches = session::create_room(&mut registry, caller, is_public);
        self.deliver(dispatches).await;
    }

    #[instrument(skip(self))]
    pub async fn join_room(&self, caller: ConnectionId, code: String) {
        let mut registry = self.registry.lock().await;
        let dispatches = session::join_room(&mut registry, caller, JoinTarget::Code(code));
        self.deliver(dispatches).await;
    }

    #[instrument(skip(self))]
    pub async fn join_random_room(&self, caller: ConnectionId) {
        let mut registry = self.registry.lock().await;
        let dispatches = session::join_room(&mut registry, caller, JoinTarget::Random);
        self.deliver(dispatches).await;
    }

    #[instrument(skip(self))]
    pub async fn leave_room(&self, caller: ConnectionId, code: String) {
        let mut registry = self.registry.lock().await;
        let dispatches = session::leave_room(&mut registry, caller, &code);
        self.deliver(dispatches).await;
    }

    #[instrument(skip(self))]
    pub async fn rematch(&self, caller: ConnectionId, code: String) {
        let mut registry = self.registry.lock().await;
        let dispatches = session::rematch(&mut registry, &code);
        self.deliver(dispatches).await;
    }

    #[instrument(skip(self))]
    pub async fn make_move(&self, caller: ConnectionId, code: String, index: usize) {
        let mut registry = self.registry.lock().await;
        match session::make_move(&mut registry, caller, &code, index) {
            Ok(dispatches) => self.deliver(dispatches).await,
            Err(e) => {
                debug!(
                    connection_id = %caller,
                    room_code = %code,
                    index,
                    reason = %e,
                    "Move ignored"
                );
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn disconnect(&self, caller: ConnectionId) {
        let mut registry = self.registry.lock().await;
        let dispatches = session::disconnect(&mut registry, caller);
        self.deliver(dispatches).await;
    }

    /// Number of live rooms
    pub async fn room_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Seat count of a room, None if it does not exist
    pub async fn player_count(&self, code: &str) -> Option<usize> {
        self.registry
            .lock()
            .await
            .get(code)
            .map(|room| room.players.len())
    }

    async fn deliver(&self, dispatches: Vec<Dispatch>) {
        for dispatch in dispatches {
            let message = WebSocketMessage::from(&dispatch.event);
            let message_json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!(
                        event_type = dispatch.event.event_type(),
                        error = %e,
                        "Failed to serialize outbound message"
                    );
                    continue;
                }
            };

            let reached = self
                .connection_manager
                .send_to_players(&dispatch.recipients, &message_json)
                .await;
            debug!(
                event_type = dispatch.event.event_type(),
                recipients = dispatch.recipients.len(),
                reached,
                "Delivered room event"
            );
        }
    }
}
