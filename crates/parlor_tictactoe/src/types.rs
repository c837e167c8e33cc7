//! Core domain types for tic-tac-toe.

use super::action::Move;
use super::position::Position;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// The eight winning lines: rows, columns, diagonals.
const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|&s| s != Square::Empty)
    }

    /// Checks for a completed line on the board.
    pub fn winner(&self) -> Option<Player> {
        for [a, b, c] in LINES {
            let occ = self.get(a);

            if occ != Square::Empty && occ == self.get(b) && occ == self.get(c) {
                return match occ {
                    Square::Occupied(p) => Some(p),
                    Square::Empty => None,
                };
            }
        }

        None
    }

    /// Classifies the board: a completed line wins before a full board
    /// counts as a draw.
    pub fn evaluate(&self) -> GameStatus {
        if let Some(winner) = self.winner() {
            return GameStatus::Won(winner);
        }

        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Current player to move.
    current_player: Player,
    /// Game status.
    status: GameStatus,
    /// Move history.
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new game.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Applies a validated move (unchecked - use Game::make_move).
    ///
    /// Places the mark, records it, and re-evaluates the board in one
    /// step so board and status can never desynchronize. The turn only
    /// flips while the game remains in progress.
    pub(super) fn apply_move(&mut self, mov: Move) {
        self.board.set(mov.position(), Square::Occupied(mov.player()));
        self.history.push(mov);
        self.status = self.board.evaluate();

        if self.status == GameStatus::InProgress {
            self.current_player = mov.player().opponent();
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
