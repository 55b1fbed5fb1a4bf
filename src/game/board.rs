use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// The eight canonical lines: rows, then columns, then diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The symbol that moves first in every fresh game
    pub const FIRST: Symbol = Symbol::X;

    pub fn other(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// Nine fixed cells, each empty or holding a symbol.
///
/// Serializes as a plain JSON array of `null | "X" | "O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Option<Symbol>; BOARD_SIZE]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mark at `index`, or None for an empty or out-of-range cell
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.0.get(index).copied().flatten()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Writes `symbol` into `index`. Out-of-range indices are ignored.
    pub fn place(&mut self, index: usize, symbol: Symbol) {
        if let Some(cell) = self.0.get_mut(index) {
            *cell = Some(symbol);
        }
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(cell) = self.0.get_mut(index) {
            *cell = None;
        }
    }

    pub fn reset(&mut self) {
        self.0 = [None; BOARD_SIZE];
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// The winning line and its symbol, if any line is uniformly occupied.
    /// Lines are checked in `WINNING_LINES` order and the first match wins.
    pub fn winning_line(&self) -> Option<([usize; 3], Symbol)> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| match self.get(a) {
            Some(symbol) if self.get(b) == Some(symbol) && self.get(c) == Some(symbol) => {
                Some(([a, b, c], symbol))
            }
            _ => None,
        })
    }

    pub fn winner(&self) -> Option<Symbol> {
        self.winning_line().map(|(_, symbol)| symbol)
    }
}
