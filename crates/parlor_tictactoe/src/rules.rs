//! Game logic and rules for tic-tac-toe.

use super::action::{Move, MoveError};
use super::position::Position;
use super::types::{GameState, GameStatus};
use tracing::instrument;

/// Tic-tac-toe game engine.
///
/// Every mutation, human or computer, passes through [`Game::make_move`],
/// so the board and the game status can never desynchronize.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Makes a move at the given position for the current player.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] if the game already ended, or
    /// [`MoveError::SquareOccupied`] if the square is taken. Rejected
    /// moves leave the state unchanged.
    #[instrument(skip(self), fields(player = ?self.state.current_player()))]
    pub fn make_move(&mut self, pos: Position) -> Result<(), MoveError> {
        // Check if game is over
        if *self.state.status() != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }

        // Check if square is empty
        if !self.state.board().is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        // Apply the move; evaluation and turn handling happen inside
        let mov = Move::new(self.state.current_player(), pos);
        self.state.apply_move(mov);

        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
