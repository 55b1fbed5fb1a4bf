use std::collections::HashMap;
use tracing::{debug, info};

use super::{
    codes::{RandomCodeGenerator, RoomCodeGenerator},
    models::{ConnectionId, Room},
};

/// Process-wide mapping from room code to room state.
///
/// The registry itself holds no lock; the owning `Lobby` serializes access so
/// that a whole inbound event runs against it atomically.
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
    code_generator: Box<dyn RoomCodeGenerator>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    /// Creates an empty registry with random 5-character codes
    pub fn new() -> Self {
        Self::with_code_generator(Box::new(RandomCodeGenerator::new()))
    }

    pub fn with_code_generator(code_generator: Box<dyn RoomCodeGenerator>) -> Self {
        Self {
            rooms: HashMap::new(),
            code_generator,
        }
    }

    /// Draws codes until one is not already in use
    pub fn generate_code(&self) -> String {
        loop {
            let code = self.code_generator.generate();
            if !self.rooms.contains_key(&code) {
                return code;
            }
            debug!(room_code = %code, "Room code collision, regenerating");
        }
    }

    /// Allocates a room with `host` seated as X and returns its code
    pub fn create_room(&mut self, host: ConnectionId, is_public: bool) -> String {
        let code = self.generate_code();
        self.rooms
            .insert(code.clone(), Room::new(code.clone(), host, is_public));

        info!(
            room_code = %code,
            host = %host,
            is_public,
            "Room created"
        );
        code
    }

    pub fn get(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rooms.contains_key(code)
    }

    /// Removes the room, returning it if it existed
    pub fn destroy(&mut self, code: &str) -> Option<Room> {
        let removed = self.rooms.remove(code);
        if removed.is_some() {
            info!(room_code = %code, "Room destroyed");
        }
        removed
    }

    /// Any public room waiting for a second player that `joiner` is not
    /// already seated in. First match in iteration order.
    pub fn find_public_open_room(&self, joiner: ConnectionId) -> Option<String> {
        self.rooms
            .values()
            .find(|room| room.is_open() && !room.has_player(joiner))
            .map(|room| room.code.clone())
    }

    /// First room in which `connection` is seated
    pub fn find_room_containing(&self, connection: ConnectionId) -> Option<String> {
        self.rooms
            .values()
            .find(|room| room.has_player(connection))
            .map(|room| room.code.clone())
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
