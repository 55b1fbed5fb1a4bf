// Public API - what other modules can use
pub use lobby::Lobby;
pub use models::{ConnectionId, Room};
pub use registry::RoomRegistry;

// Internal modules
pub mod codes;
mod lobby;
pub mod models;
pub mod registry;
