//! Application state and logic.

use crate::mode::GameMode;
use crate::session::{GameSession, COMPUTER, HUMAN};
use crossterm::event::KeyCode;
use parlor_tictactoe::{Difficulty, GameStatus, Position};
use ratatui::widgets::ListState;
use std::time::Duration;
use tracing::debug;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choosing between computer and friend mode.
    ModeSelect,
    /// A game is on screen.
    Playing,
}

/// A deferred computer move for the caller to schedule.
///
/// The generation token ties the timer to the game it was scheduled
/// for; a restart or navigation in between invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredMove {
    /// Generation the move belongs to.
    pub generation: u64,
    /// Cosmetic thinking delay before the move is applied.
    pub delay: Duration,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing further.
    Continue,
    /// Exit the application.
    Quit,
    /// Schedule a deferred computer move.
    Schedule(DeferredMove),
}

/// Main application state.
pub struct App {
    screen: Screen,
    menu_state: ListState,
    session: Option<GameSession>,
    cursor: Position,
    status_message: String,
    // Bumped on every restart and navigation; stale timers carry an
    // older value and are dropped.
    generation: u64,
}

impl App {
    /// Creates a new application on the mode-select screen.
    pub fn new() -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));
        Self {
            screen: Screen::ModeSelect,
            menu_state,
            session: None,
            cursor: Position::Center,
            status_message: "Choose a game mode.".to_string(),
            generation: 0,
        }
    }

    /// Gets the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Gets the current session, if a game is on screen.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Gets the board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Gets the mode-select menu state for rendering.
    pub fn menu_state(&mut self) -> &mut ListState {
        &mut self.menu_state
    }

    /// Starts a game in the given mode.
    pub fn start(&mut self, mode: GameMode, difficulty: Difficulty) {
        debug!(?mode, ?difficulty, "Starting game");
        self.generation += 1;
        self.session = Some(GameSession::new(mode, difficulty));
        self.screen = Screen::Playing;
        self.cursor = Position::Center;
        self.status_message =
            "Player X's turn. Press 1-9 or arrows + Enter to move.".to_string();
    }

    /// Leaves the game and returns to mode select.
    fn leave(&mut self) {
        debug!("Leaving game");
        self.generation += 1;
        self.session = None;
        self.screen = Screen::ModeSelect;
        self.status_message = "Choose a game mode.".to_string();
    }

    /// Restarts the current game.
    fn restart(&mut self) {
        self.generation += 1;
        if let Some(session) = self.session.as_mut() {
            session.restart();
        }
        self.status_message =
            "Game restarted. Player X's turn.".to_string();
    }

    /// Handles a key press for the current screen.
    pub fn handle_key(&mut self, key: KeyCode) -> KeyOutcome {
        match self.screen {
            Screen::ModeSelect => self.handle_menu_key(key),
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) -> KeyOutcome {
        let count = GameMode::all().len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Up => {
                let i = match self.menu_state.selected() {
                    Some(i) if i > 0 => i - 1,
                    _ => count - 1,
                };
                self.menu_state.select(Some(i));
            }
            KeyCode::Down => {
                let i = match self.menu_state.selected() {
                    Some(i) => (i + 1) % count,
                    None => 0,
                };
                self.menu_state.select(Some(i));
            }
            KeyCode::Enter => {
                let mode = self
                    .menu_state
                    .selected()
                    .and_then(|i| GameMode::all().get(i).copied())
                    .unwrap_or_default();
                self.start(mode, Difficulty::default());
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_game_key(&mut self, key: KeyCode) -> KeyOutcome {
        match key {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('b') | KeyCode::Esc => {
                self.leave();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            KeyCode::Char('e') => self.select_difficulty(Difficulty::Easy),
            KeyCode::Char('m') => self.select_difficulty(Difficulty::Medium),
            KeyCode::Char('h') => self.select_difficulty(Difficulty::Hard),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return self.try_human_move(self.cursor);
            }
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10) {
                    let index = digit as usize;
                    if (1..=9).contains(&index) {
                        if let Some(pos) = Position::from_index(index - 1) {
                            return self.try_human_move(pos);
                        }
                    }
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// Moves the board cursor, wrapping at the edges.
    fn move_cursor(&mut self, row_step: isize, col_step: isize) {
        let index = self.cursor.to_index() as isize;
        let row = (index / 3 + row_step).rem_euclid(3);
        let col = (index % 3 + col_step).rem_euclid(3);
        if let Some(pos) = Position::from_index((row * 3 + col) as usize) {
            self.cursor = pos;
        }
    }

    /// Changes difficulty when allowed; refused changes alter nothing.
    fn select_difficulty(&mut self, difficulty: Difficulty) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.mode() != GameMode::Computer {
            return;
        }
        if session.set_difficulty(difficulty) {
            self.status_message =
                format!("Difficulty set to {}.", difficulty.label());
        }
    }

    /// Feeds a human move to the session; schedules the computer's
    /// reply when one comes due.
    fn try_human_move(&mut self, pos: Position) -> KeyOutcome {
        let Some(session) = self.session.as_mut() else {
            return KeyOutcome::Continue;
        };

        // Silent refusal: a rejected move changes nothing on screen.
        if !session.human_move(pos) {
            return KeyOutcome::Continue;
        }

        if session.wants_computer_move() {
            self.status_message = "Computer is thinking...".to_string();
            return KeyOutcome::Schedule(DeferredMove {
                generation: self.generation,
                delay: session.difficulty().think_delay(),
            });
        }

        self.refresh_status();
        KeyOutcome::Continue
    }

    /// Applies a deferred computer move if its generation is current.
    pub fn on_computer_due(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Dropping stale computer move"
            );
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.computer_move() {
            self.refresh_status();
        }
    }

    /// Rewrites the status line from the game state.
    fn refresh_status(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let state = session.game().state();

        self.status_message = match state.status() {
            GameStatus::InProgress => {
                let player = state.current_player();
                match session.mode() {
                    GameMode::Computer if player == COMPUTER => {
                        "Computer is thinking...".to_string()
                    }
                    GameMode::Computer => "Your turn (X).".to_string(),
                    GameMode::Friend => {
                        format!("Player {:?}'s turn.", player)
                    }
                }
            }
            GameStatus::Won(player) => {
                let name = match (session.mode(), *player) {
                    (GameMode::Computer, p) if p == HUMAN => "You win".to_string(),
                    (GameMode::Computer, _) => "Computer wins".to_string(),
                    (GameMode::Friend, p) => format!("Player {:?} wins", p),
                };
                format!("{}! Press 'r' to restart or 'q' to quit.", name)
            }
            GameStatus::Draw => {
                "Draw! Press 'r' to restart or 'q' to quit.".to_string()
            }
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit_key(index: usize) -> KeyCode {
        KeyCode::Char(char::from_digit(index as u32 + 1, 10).expect("Digit"))
    }

    fn start_computer_game(difficulty: Difficulty) -> App {
        let mut app = App::new();
        app.start(GameMode::Computer, difficulty);
        app
    }

    #[test]
    fn human_move_schedules_computer_reply() {
        let mut app = start_computer_game(Difficulty::Easy);

        let outcome = app.handle_key(digit_key(0));
        let KeyOutcome::Schedule(deferred) = outcome else {
            panic!("Expected a scheduled computer move, got {outcome:?}");
        };
        assert_eq!(deferred.delay, Difficulty::Easy.think_delay());

        app.on_computer_due(deferred.generation);
        let state = app.session().expect("Session active").game().state();
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.current_player(), HUMAN);
    }

    #[test]
    fn stale_timer_cannot_touch_a_restarted_game() {
        let mut app = start_computer_game(Difficulty::Hard);

        let KeyOutcome::Schedule(deferred) = app.handle_key(digit_key(4)) else {
            panic!("Expected a scheduled computer move");
        };

        // Restart races ahead of the deferred move.
        app.handle_key(KeyCode::Char('r'));
        app.on_computer_due(deferred.generation);

        let state = app.session().expect("Session active").game().state();
        assert!(state.history().is_empty());
        assert!(Position::ALL.iter().all(|&p| state.board().is_empty(p)));
    }

    #[test]
    fn stale_timer_cannot_touch_a_new_session() {
        let mut app = start_computer_game(Difficulty::Easy);

        let KeyOutcome::Schedule(deferred) = app.handle_key(digit_key(4)) else {
            panic!("Expected a scheduled computer move");
        };

        // Navigate away and into a fresh game before the timer fires.
        app.handle_key(KeyCode::Char('b'));
        assert_eq!(app.screen(), Screen::ModeSelect);
        app.handle_key(KeyCode::Enter);

        app.on_computer_due(deferred.generation);
        let state = app.session().expect("Session active").game().state();
        assert!(state.history().is_empty());
    }

    #[test]
    fn current_timer_applies_after_matching_generation() {
        let mut app = start_computer_game(Difficulty::Medium);

        app.handle_key(KeyCode::Char('r'));
        let KeyOutcome::Schedule(deferred) = app.handle_key(digit_key(0)) else {
            panic!("Expected a scheduled computer move");
        };

        app.on_computer_due(deferred.generation);
        let state = app.session().expect("Session active").game().state();
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn input_during_pending_reply_changes_nothing() {
        let mut app = start_computer_game(Difficulty::Easy);

        let KeyOutcome::Schedule(_) = app.handle_key(digit_key(0)) else {
            panic!("Expected a scheduled computer move");
        };

        // The computer has not answered yet; more digits must bounce.
        assert_eq!(app.handle_key(digit_key(1)), KeyOutcome::Continue);
        let state = app.session().expect("Session active").game().state();
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn friend_mode_alternates_without_scheduling() {
        let mut app = App::new();
        app.start(GameMode::Friend, Difficulty::default());

        assert_eq!(app.handle_key(digit_key(0)), KeyOutcome::Continue);
        assert_eq!(app.handle_key(digit_key(4)), KeyOutcome::Continue);

        let state = app.session().expect("Session active").game().state();
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.current_player(), HUMAN);
    }

    #[test]
    fn cursor_wraps_around_the_grid() {
        let mut app = start_computer_game(Difficulty::Easy);
        assert_eq!(app.cursor(), Position::Center);

        app.handle_key(KeyCode::Up);
        assert_eq!(app.cursor(), Position::TopCenter);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.cursor(), Position::BottomCenter);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.cursor(), Position::BottomRight);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.cursor(), Position::BottomLeft);
    }

    #[test]
    fn enter_places_at_the_cursor() {
        let mut app = start_computer_game(Difficulty::Easy);

        let outcome = app.handle_key(KeyCode::Enter);
        assert!(matches!(outcome, KeyOutcome::Schedule(_)));

        let state = app.session().expect("Session active").game().state();
        assert!(!state.board().is_empty(Position::Center));
    }
}
