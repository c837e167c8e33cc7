//! Command-line interface for the parlor games TUI.

use clap::{Parser, Subcommand, ValueEnum};
use parlor_tictactoe::Difficulty;

/// Parlor Games - casual games in the terminal
#[derive(Parser, Debug)]
#[command(name = "parlor_games_tui")]
#[command(about = "Play tic-tac-toe against the computer or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run; without one, the mode-select screen opens
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the computer
    Computer {
        /// Opponent difficulty
        #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
        difficulty: DifficultyArg,
    },

    /// Play against a friend at the same keyboard
    Friend,
}

/// Difficulty as a CLI argument.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DifficultyArg {
    /// Random moves.
    Easy,
    /// Blocks immediate wins.
    Medium,
    /// Full search, never loses.
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}
