use crate::game::{Board, Symbol};
use crate::room::models::ConnectionId;

/// Outbound events produced by the room state machine
///
/// Events describe things that already happened to a room. The websocket
/// layer turns each one into a wire message for its recipients.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// The caller created a room and was seated as its first symbol
    RoomCreated {
        code: String,
        symbol: Symbol,
        board: Board,
        turn: Symbol,
    },

    /// The caller was seated as the second player.
    /// `room_code` is only echoed back when the room was found by random join.
    RoomJoined {
        board: Board,
        symbol: Symbol,
        turn: Symbol,
        room_code: Option<String>,
    },

    /// An opponent took the free seat
    PlayerJoined { board: Board, turn: Symbol },

    /// The opponent holding `left_symbol` is gone
    PlayerLeft { left_symbol: Symbol },

    /// Acknowledges an explicit leave
    LeftRoom,

    RematchStarted { board: Board, turn: Symbol },

    /// Cell that will vanish next, if any player is at the mark limit
    NextDisappear { position: Option<usize> },

    MoveMade {
        board: Board,
        turn: Symbol,
        winner: Option<Symbol>,
    },

    Error { message: String },
}

impl RoomEvent {
    /// Wire name of the event
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::RoomCreated { .. } => "room-created",
            RoomEvent::RoomJoined { .. } => "room-joined",
            RoomEvent::PlayerJoined { .. } => "player-joined",
            RoomEvent::PlayerLeft { .. } => "player-left",
            RoomEvent::LeftRoom => "left-room",
            RoomEvent::RematchStarted { .. } => "rematch-started",
            RoomEvent::NextDisappear { .. } => "next-disappear",
            RoomEvent::MoveMade { .. } => "move-made",
            RoomEvent::Error { .. } => "error",
        }
    }
}

/// An event together with the connections it must reach.
///
/// Room-wide broadcasts are resolved to the seated connections at the moment
/// the event is produced, while the registry is still locked.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub recipients: Vec<ConnectionId>,
    pub event: RoomEvent,
}

impl Dispatch {
    /// Addressed send to a single connection
    pub fn to(connection: ConnectionId, event: RoomEvent) -> Self {
        Self {
            recipients: vec![connection],
            event,
        }
    }

    /// Broadcast to every listed connection
    pub fn to_all(recipients: Vec<ConnectionId>, event: RoomEvent) -> Self {
        Self { recipients, event }
    }
}
