//! Game session: turn alternation between human input and the
//! computer opponent.

use crate::mode::GameMode;
use parlor_tictactoe::{Difficulty, Game, GameStatus, Player, Position};
use tracing::{debug, warn};

/// The human (or first human) always plays X and moves first.
pub const HUMAN: Player = Player::X;

/// The computer answers as O.
pub const COMPUTER: Player = Player::O;

/// One game between the human and an opponent.
///
/// All moves flow through the engine's single gate; this controller
/// only decides whose input is allowed to reach it and when the
/// computer owes a reply.
pub struct GameSession {
    game: Game,
    mode: GameMode,
    difficulty: Difficulty,
}

impl GameSession {
    /// Creates a session with a fresh game.
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            game: Game::new(),
            mode,
            difficulty,
        }
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the current difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Applies a move typed by a human. Returns whether it was accepted.
    ///
    /// In computer mode, input while the computer's reply is pending is
    /// refused outright; rejected positions refuse silently (the UI
    /// simply does not change).
    pub fn human_move(&mut self, pos: Position) -> bool {
        if self.mode == GameMode::Computer && self.game.state().current_player() != HUMAN {
            debug!(%pos, "Ignoring input during the computer's turn");
            return false;
        }

        match self.game.make_move(pos) {
            Ok(()) => true,
            Err(e) => {
                debug!(%pos, error = %e, "Move refused");
                false
            }
        }
    }

    /// True when the computer owes a reply.
    pub fn wants_computer_move(&self) -> bool {
        self.mode == GameMode::Computer
            && *self.game.state().status() == GameStatus::InProgress
            && self.game.state().current_player() == COMPUTER
    }

    /// Applies the computer's reply. Returns whether a move was made.
    pub fn computer_move(&mut self) -> bool {
        if !self.wants_computer_move() {
            debug!("No computer move due");
            return false;
        }

        let Some(pos) = self
            .difficulty
            .choose_move(self.game.state().board(), COMPUTER)
        else {
            // Unreachable while in progress; the board cannot be full.
            warn!("Strategy found no move on an in-progress board");
            return false;
        };

        match self.game.make_move(pos) {
            Ok(()) => true,
            Err(e) => {
                warn!(%pos, error = %e, "Computer move refused");
                false
            }
        }
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// The old state is replaced wholesale; nothing mutates a finished
    /// game in place.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game = Game::new();
    }

    /// True while a game is underway: difficulty switches are only
    /// allowed before the first move or after the game ends.
    pub fn difficulty_locked(&self) -> bool {
        *self.game.state().status() == GameStatus::InProgress
            && !self.game.state().history().is_empty()
    }

    /// Changes difficulty if no game is underway. Returns whether the
    /// change was applied.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.difficulty_locked() {
            debug!(?difficulty, "Difficulty locked mid-game");
            return false;
        }
        self.difficulty = difficulty;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(index: usize) -> Position {
        Position::from_index(index).expect("Index in range")
    }

    #[test]
    fn human_input_refused_while_computer_reply_pending() {
        let mut session = GameSession::new(GameMode::Computer, Difficulty::Easy);

        assert!(session.human_move(pos(0)));
        assert!(session.wants_computer_move());

        // It is O's turn; further human input must bounce off.
        assert!(!session.human_move(pos(1)));
        assert_eq!(session.game().state().history().len(), 1);
    }

    #[test]
    fn computer_reply_hands_turn_back() {
        let mut session = GameSession::new(GameMode::Computer, Difficulty::Easy);

        assert!(session.human_move(pos(4)));
        assert!(session.computer_move());

        assert!(!session.wants_computer_move());
        assert_eq!(session.game().state().current_player(), HUMAN);
        assert_eq!(session.game().state().history().len(), 2);
    }

    #[test]
    fn friend_mode_never_wants_a_computer_move() {
        let mut session = GameSession::new(GameMode::Friend, Difficulty::Easy);

        assert!(session.human_move(pos(0)));
        assert!(!session.wants_computer_move());
        assert!(!session.computer_move());

        // Both marks come from the keyboard.
        assert!(session.human_move(pos(4)));
        assert_eq!(session.game().state().history().len(), 2);
    }

    #[test]
    fn restart_discards_the_board() {
        let mut session = GameSession::new(GameMode::Computer, Difficulty::Medium);

        assert!(session.human_move(pos(0)));
        assert!(session.computer_move());
        session.restart();

        let state = session.game().state();
        assert_eq!(state.status(), &GameStatus::InProgress);
        assert_eq!(state.current_player(), HUMAN);
        assert!(state.history().is_empty());
        assert!(Position::ALL.iter().all(|&p| state.board().is_empty(p)));
    }

    #[test]
    fn difficulty_locks_while_a_game_is_underway() {
        let mut session = GameSession::new(GameMode::Computer, Difficulty::Easy);

        // Before the first move: free to change.
        assert!(session.set_difficulty(Difficulty::Hard));
        assert_eq!(session.difficulty(), Difficulty::Hard);

        // Mid-game: locked.
        assert!(session.human_move(pos(0)));
        assert!(!session.set_difficulty(Difficulty::Easy));
        assert_eq!(session.difficulty(), Difficulty::Hard);

        // After restart: free again.
        session.restart();
        assert!(session.set_difficulty(Difficulty::Medium));
        assert_eq!(session.difficulty(), Difficulty::Medium);
    }
}
