// Outbound room events and their addressing

// Public API - what other modules can use
pub use events::{Dispatch, RoomEvent};

// Internal modules
mod events;
