// Public API
pub use board::{Board, Symbol, BOARD_SIZE, WINNING_LINES};
pub use session::{JoinTarget, MoveError, SeatError};

// Internal modules
mod board;
pub mod session;
