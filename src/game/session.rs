// Room lifecycle and move rules.
//
// Every operation runs against a locked registry and returns the events the
// caller must deliver before releasing it. Nothing here touches the network.

use thiserror::Error;
use tracing::{debug, info};

use super::board::{Symbol, BOARD_SIZE};
use crate::event::{Dispatch, RoomEvent};
use crate::room::{
    models::{ConnectionId, Player},
    registry::RoomRegistry,
};

/// Reasons a seat request fails. The message is sent back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatError {
    #[error("Room does not exist")]
    RoomNotFound,
    #[error("Room is full")]
    RoomFull,
    #[error("Already in this room")]
    AlreadySeated,
}

/// Reasons a move is rejected. Rejected moves are dropped without a reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Player is not seated in this room")]
    NotSeated,
    #[error("Not this player's turn")]
    NotYourTurn,
    #[error("Cell {0} is occupied")]
    CellOccupied(usize),
    #[error("Cell {0} is off the board")]
    InvalidIndex(usize),
}

/// How the target room of a join is determined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinTarget {
    /// Code supplied by the caller
    Code(String),
    /// Any open public room
    Random,
}

/// Creates a room and seats the caller as X
pub fn create_room(registry: &mut RoomRegistry, caller: ConnectionId, is_public: bool) -> Vec<Dispatch> {
    let code = registry.create_room(caller, is_public);
    let Some(room) = registry.get(&code) else {
        return Vec::new();
    };

    vec![Dispatch::to(
        caller,
        RoomEvent::RoomCreated {
            code,
            symbol: Symbol::FIRST,
            board: room.board,
            turn: room.turn,
        },
    )]
}

/// Entry point for both join-room and join-random-room.
///
/// A random join with no open room produces no events at all.
pub fn join_room(registry: &mut RoomRegistry, caller: ConnectionId, target: JoinTarget) -> Vec<Dispatch> {
    let (code, discovered) = match target {
        JoinTarget::Code(code) => (code, false),
        JoinTarget::Random => match registry.find_public_open_room(caller) {
            Some(code) => (code, true),
            None => {
                debug!(connection_id = %caller, "No open public room for random join");
                return Vec::new();
            }
        },
    };

    match seat_player(registry, caller, &code, discovered) {
        Ok(dispatches) => dispatches,
        Err(e) => {
            debug!(
                connection_id = %caller,
                room_code = %code,
                error = %e,
                "Join rejected"
            );
            vec![Dispatch::to(
                caller,
                RoomEvent::Error {
                    message: e.to_string(),
                },
            )]
        }
    }
}

/// Seats `caller` as the second player of `code`.
///
/// The board is wiped and the turn handed to X on every successful seat, so
/// the new game starts clean however long the room sat waiting.
fn seat_player(
    registry: &mut RoomRegistry,
    caller: ConnectionId,
    code: &str,
    echo_code: bool,
) -> Result<Vec<Dispatch>, SeatError> {
    let room = registry.get_mut(code).ok_or(SeatError::RoomNotFound)?;
    if room.is_full() {
        return Err(SeatError::RoomFull);
    }
    if room.has_player(caller) {
        return Err(SeatError::AlreadySeated);
    }

    room.reset_game();
    let symbol = room.available_symbol();
    room.players.push(Player::new(caller, symbol));

    info!(
        room_code = %code,
        connection_id = %caller,
        symbol = %symbol,
        status = ?room.status(),
        "Player seated"
    );

    let mut dispatches = vec![Dispatch::to(
        caller,
        RoomEvent::RoomJoined {
            board: room.board,
            symbol,
            turn: room.turn,
            room_code: echo_code.then(|| code.to_string()),
        },
    )];

    let opponents: Vec<ConnectionId> = room
        .connections()
        .into_iter()
        .filter(|c| *c != caller)
        .collect();
    if !opponents.is_empty() {
        dispatches.push(Dispatch::to_all(
            opponents,
            RoomEvent::PlayerJoined {
                board: room.board,
                turn: room.turn,
            },
        ));
    }

    Ok(dispatches)
}

/// Applies a move under the disappearing-move rule.
///
/// On success the room receives `next-disappear` followed by `move-made`.
pub fn make_move(
    registry: &mut RoomRegistry,
    caller: ConnectionId,
    code: &str,
    index: usize,
) -> Result<Vec<Dispatch>, MoveError> {
    let room = registry.get_mut(code).ok_or(MoveError::RoomNotFound)?;
    if index >= BOARD_SIZE {
        return Err(MoveError::InvalidIndex(index));
    }
    let symbol = room.player(caller).ok_or(MoveError::NotSeated)?.symbol;
    if room.turn != symbol {
        return Err(MoveError::NotYourTurn);
    }
    if room.board.is_occupied(index) {
        return Err(MoveError::CellOccupied(index));
    }

    let evicted = match room.player_mut(caller) {
        Some(player) if player.at_mark_limit() => player.moves.pop_front(),
        Some(_) => None,
        None => return Err(MoveError::NotSeated),
    };
    if let Some(old) = evicted {
        room.board.clear(old);
        debug!(room_code = %code, symbol = %symbol, position = old, "Oldest mark removed");
    }

    // Computed after the mover's eviction and before the new mark lands
    let next_disappear = room
        .players
        .iter()
        .rev()
        .find(|p| p.at_mark_limit())
        .and_then(|p| p.moves.front().copied());

    room.board.place(index, symbol);
    if let Some(player) = room.player_mut(caller) {
        player.moves.push_back(index);
    }
    room.turn = symbol.other();

    let winner = room.board.winner();
    if let Some(winner) = winner {
        info!(room_code = %code, winner = %winner, "Winning line completed");
    }

    let recipients = room.connections();
    Ok(vec![
        Dispatch::to_all(
            recipients.clone(),
            RoomEvent::NextDisappear {
                position: next_disappear,
            },
        ),
        Dispatch::to_all(
            recipients,
            RoomEvent::MoveMade {
                board: room.board,
                turn: room.turn,
                winner,
            },
        ),
    ])
}

/// Resets board, turn and move queues. Works with a single seated player.
pub fn rematch(registry: &mut RoomRegistry, code: &str) -> Vec<Dispatch> {
    let Some(room) = registry.get_mut(code) else {
        debug!(room_code = %code, "Rematch for unknown room ignored");
        return Vec::new();
    };

    room.reset_game();
    info!(room_code = %code, players = room.players.len(), "Rematch started");

    vec![Dispatch::to_all(
        room.connections(),
        RoomEvent::RematchStarted {
            board: room.board,
            turn: room.turn,
        },
    )]
}

/// Explicit leave keyed by room code. The caller is acknowledged with
/// `left-room` only if it was actually seated there.
pub fn leave_room(registry: &mut RoomRegistry, caller: ConnectionId, code: &str) -> Vec<Dispatch> {
    match remove_player(registry, caller, code) {
        Some(mut dispatches) => {
            dispatches.push(Dispatch::to(caller, RoomEvent::LeftRoom));
            dispatches
        }
        None => Vec::new(),
    }
}

/// Removes a closed connection from every room it is seated in
pub fn disconnect(registry: &mut RoomRegistry, caller: ConnectionId) -> Vec<Dispatch> {
    let mut dispatches = Vec::new();
    while let Some(code) = registry.find_room_containing(caller) {
        match remove_player(registry, caller, &code) {
            Some(mut removed) => dispatches.append(&mut removed),
            None => break,
        }
    }
    dispatches
}

/// Shared removal for leave and disconnect. Returns None when the room is
/// unknown or the caller is not seated in it.
fn remove_player(registry: &mut RoomRegistry, caller: ConnectionId, code: &str) -> Option<Vec<Dispatch>> {
    let room = registry.get_mut(code)?;
    let departed = room.remove_player(caller)?;

    info!(
        room_code = %code,
        connection_id = %caller,
        symbol = %departed.symbol,
        status = ?room.status(),
        "Player removed from room"
    );

    if room.is_empty() {
        registry.destroy(code);
        return Some(Vec::new());
    }

    Some(vec![Dispatch::to_all(
        room.connections(),
        RoomEvent::PlayerLeft {
            left_symbol: departed.symbol,
        },
    )])
}
