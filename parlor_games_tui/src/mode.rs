//! Game mode selection.

/// Game mode - who is the opponent?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Human vs the computer opponent.
    #[default]
    Computer,
    /// Two humans sharing the keyboard.
    Friend,
}

impl GameMode {
    /// Returns the display name.
    pub fn name(&self) -> &str {
        match self {
            GameMode::Computer => "Play with Computer",
            GameMode::Friend => "Play with Friend",
        }
    }

    /// All selectable modes, in menu order.
    pub fn all() -> &'static [GameMode] {
        &[GameMode::Computer, GameMode::Friend]
    }
}
