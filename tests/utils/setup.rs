use std::sync::Arc;

use infinite_tictactoe::{ConnectionId, Lobby, RoomRegistry, WebsocketReceiveHandler};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub lobby: Arc<Lobby>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: Arc<WebsocketReceiveHandler>,
    pub players: Vec<ConnectionId>,
}

pub struct TestSetupBuilder {
    player_count: usize,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { player_count: 0 }
    }

    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(2)
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(3)
    }

    pub async fn build(self) -> TestSetup {
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let lobby = Arc::new(Lobby::new(RoomRegistry::new(), mock_conn_manager.clone()));

        // Connect players
        let players: Vec<ConnectionId> = (0..self.player_count).map(|_| ConnectionId::new()).collect();
        for player in &players {
            mock_conn_manager.add_connected_player(*player).await;
        }

        let input_handler = Arc::new(WebsocketReceiveHandler::new(lobby.clone()));

        TestSetup {
            lobby,
            mock_conn_manager,
            input_handler,
            players,
        }
    }
}
