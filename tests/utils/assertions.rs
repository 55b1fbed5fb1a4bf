//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::{json, Value};

use infinite_tictactoe::{ConnectionId, MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    players: Vec<ConnectionId>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all players in the setup
    pub fn for_all_players(setup: &'a TestSetup) -> Self {
        let players = setup.players.clone();
        Self { setup, players }
    }

    /// Create an assertion for specific players
    pub fn for_players(setup: &'a TestSetup, players: Vec<ConnectionId>) -> Self {
        Self { setup, players }
    }

    pub fn for_player(setup: &'a TestSetup, player: ConnectionId) -> Self {
        Self::for_players(setup, vec![player])
    }

    /// Assert that players received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for (i, player) in self.players.iter().enumerate() {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(*player)
                .await;
            assert!(
                message.is_some(),
                "player {} should have received {:?}",
                i,
                expected_type
            );

            let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "player {} received wrong message type",
                i
            );
            messages.push(msg);
        }

        // Broadcasts carry the same payload to every recipient
        let first_payload = &messages[0].payload;
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                &msg.payload, first_payload,
                "player {} payload differs from player 0",
                i
            );
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that players have no unread messages
    pub async fn received_no_messages(self) {
        for (i, player) in self.players.iter().enumerate() {
            let messages = self.setup.mock_conn_manager.get_messages_for(*player).await;
            assert!(
                messages.is_empty(),
                "player {} should not have received any messages, got {:?}",
                i,
                messages
            );
        }
    }

    /// Assert that players received a sequence of message types in order (consuming them)
    pub async fn received_message_sequence(
        self,
        expected_types: Vec<MessageType>,
    ) -> Vec<MessageContent> {
        let mut result_messages = vec![];
        for expected_type in expected_types {
            let content = MessageAssertion::for_players(self.setup, self.players.clone())
                .received_message_type(expected_type)
                .await;
            result_messages.push(content);
        }
        result_messages
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    pub payload: Value,
}

impl MessageContent {
    /// Board as a vector of "X" / "O" / null
    pub fn board(&self) -> Vec<Value> {
        serde_json::from_value(self.payload["board"].clone()).unwrap()
    }

    pub fn with_empty_board(self) -> Self {
        let board = self.board();
        assert_eq!(board.len(), 9);
        assert!(board.iter().all(Value::is_null), "board not empty: {:?}", board);
        self
    }

    /// Assert the cell at `index` holds `expected` ("X", "O") or is empty (None)
    pub fn with_cell(self, index: usize, expected: Option<&str>) -> Self {
        let board = self.board();
        match expected {
            Some(symbol) => assert_eq!(board[index], json!(symbol), "cell {}", index),
            None => assert!(board[index].is_null(), "cell {} should be empty", index),
        }
        self
    }

    pub fn with_turn(self, expected: &str) -> Self {
        assert_eq!(self.payload["turn"], expected);
        self
    }

    pub fn with_symbol(self, expected: &str) -> Self {
        assert_eq!(self.payload["symbol"], expected);
        self
    }

    pub fn with_winner(self, expected: Option<&str>) -> Self {
        match expected {
            Some(symbol) => assert_eq!(self.payload["winner"], symbol),
            None => assert!(self.payload["winner"].is_null()),
        }
        self
    }

    pub fn with_room_code(self, expected: &str) -> Self {
        assert_eq!(self.payload["roomCode"], expected);
        self
    }

    pub fn without_room_code(self) -> Self {
        assert!(self.payload.get("roomCode").is_none());
        self
    }

    pub fn with_left_symbol(self, expected: &str) -> Self {
        assert_eq!(self.payload["leftSymbol"], expected);
        self
    }

    pub fn with_message(self, expected: &str) -> Self {
        assert_eq!(self.payload["message"], expected);
        self
    }

    /// For next-disappear, whose payload is the bare position
    pub fn with_position(self, expected: Option<usize>) -> Self {
        assert_eq!(self.payload, json!(expected));
        self
    }
}
