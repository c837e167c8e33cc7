//! Parlor Tic-Tac-Toe - pure game logic
//!
//! This library provides the tic-tac-toe board model, the move applier,
//! and the difficulty-graded computer opponents.
//!
//! # Architecture
//!
//! - **Types**: board, squares, players, and the evolving game state
//! - **Rules**: the `Game` engine, the single gate through which every
//!   move (human or computer) passes
//! - **Strategy**: `Difficulty` dispatch over the random, blocking, and
//!   exhaustive-search opponents
//!
//! # Example
//!
//! ```
//! use parlor_tictactoe::{Difficulty, Game, GameStatus, Position};
//!
//! let mut game = Game::new();
//! game.make_move(Position::Center)?;
//!
//! // Let the computer answer as O.
//! if *game.state().status() == GameStatus::InProgress {
//!     let mark = game.state().current_player();
//!     if let Some(reply) = Difficulty::Hard.choose_move(game.state().board(), mark) {
//!         game.make_move(reply)?;
//!     }
//! }
//! # Ok::<(), parlor_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod position;
mod rules;
mod strategy;
mod types;

// Crate-level exports - actions and errors
pub use action::{Move, MoveError};

// Crate-level exports - board positions
pub use position::Position;

// Crate-level exports - game engine
pub use rules::Game;

// Crate-level exports - computer opponents
pub use strategy::Difficulty;

// Crate-level exports - domain types
pub use types::{Board, GameState, GameStatus, Player, Square};
