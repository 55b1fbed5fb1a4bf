use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

use crate::game::{Board, Symbol};

/// Maximum number of players seated in a room
pub const MAX_PLAYERS: usize = 2;

/// Maximum number of live marks a player keeps on the board
pub const MAX_LIVE_MARKS: usize = 3;

/// Transient handle for a live socket, assigned when the connection is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A connection seated in a room
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub connection: ConnectionId,
    pub symbol: Symbol,
    /// Live board positions, oldest first
    pub moves: VecDeque<usize>,
}

impl Player {
    pub fn new(connection: ConnectionId, symbol: Symbol) -> Self {
        Self {
            connection,
            symbol,
            moves: VecDeque::with_capacity(MAX_LIVE_MARKS),
        }
    }

    /// Whether the next placement will evict the oldest mark
    pub fn at_mark_limit(&self) -> bool {
        self.moves.len() >= MAX_LIVE_MARKS
    }
}

/// Lifecycle stage derived from the number of seated players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    WaitingForPlayer,
    InProgress,
}

/// An isolated game instance identified by a short code
#[derive(Debug, Clone)]
pub struct Room {
    pub code: String,
    pub players: Vec<Player>,
    pub board: Board,
    pub turn: Symbol,
    pub is_public: bool,
}

impl Room {
    /// Creates a room with `host` seated as the first symbol
    pub fn new(code: String, host: ConnectionId, is_public: bool) -> Self {
        Self {
            code,
            players: vec![Player::new(host, Symbol::FIRST)],
            board: Board::new(),
            turn: Symbol::FIRST,
            is_public,
        }
    }

    pub fn status(&self) -> RoomStatus {
        if self.players.len() >= MAX_PLAYERS {
            RoomStatus::InProgress
        } else {
            RoomStatus::WaitingForPlayer
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Open for random matchmaking: public with exactly one seated player
    pub fn is_open(&self) -> bool {
        self.is_public && self.players.len() == 1
    }

    pub fn has_player(&self, connection: ConnectionId) -> bool {
        self.players.iter().any(|p| p.connection == connection)
    }

    pub fn player(&self, connection: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.connection == connection)
    }

    pub fn player_mut(&mut self, connection: ConnectionId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.connection == connection)
    }

    pub fn connections(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.connection).collect()
    }

    /// The symbol a newcomer receives: whichever one the seated player lacks
    pub fn available_symbol(&self) -> Symbol {
        match self.players.first() {
            Some(seated) => seated.symbol.other(),
            None => Symbol::FIRST,
        }
    }

    /// Removes `connection` and returns the departed player
    pub fn remove_player(&mut self, connection: ConnectionId) -> Option<Player> {
        let position = self
            .players
            .iter()
            .position(|p| p.connection == connection)?;
        Some(self.players.remove(position))
    }

    /// Clears the board and every move queue, and hands the turn back to X
    pub fn reset_game(&mut self) {
        self.board.reset();
        self.turn = Symbol::FIRST;
        for player in &mut self.players {
            player.moves.clear();
        }
    }
}
