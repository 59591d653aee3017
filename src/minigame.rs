//! Tic-tac-toe minigame
//!
//! Pure board state machine; the page driver maps cell clicks to
//! [`TicTacToe::play`] calls and renders the board back out.

use serde::{Deserialize, Serialize};

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

/// The eight three-in-a-row lines, row-major board indexing
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-tac-toe game state. X moves first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    current: Mark,
    outcome: Option<Outcome>,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Mark::X,
            outcome: None,
        }
    }

    /// Place the current player's mark in `cell` (0-8, row-major).
    ///
    /// Returns false without changing state if the index is out of range,
    /// the cell is taken, or the game is already over.
    pub fn play(&mut self, cell: usize) -> bool {
        if cell >= 9 || self.outcome.is_some() || self.board[cell].is_some() {
            return false;
        }

        self.board[cell] = Some(self.current);
        self.outcome = self.check_outcome();
        self.current = self.current.other();
        true
    }

    fn check_outcome(&self) -> Option<Outcome> {
        for line in &LINES {
            if let Some(mark) = self.board[line[0]] {
                if self.board[line[1]] == Some(mark) && self.board[line[2]] == Some(mark) {
                    return Some(Outcome::Win(mark));
                }
            }
        }
        if self.board.iter().all(|cell| cell.is_some()) {
            return Some(Outcome::Draw);
        }
        None
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &[Option<Mark>; 9] {
        &self.board
    }

    /// Whose turn it is (meaningless once the game is over)
    pub fn current_player(&self) -> Mark {
        self.current
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}
