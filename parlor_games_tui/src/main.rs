//! Terminal UI for Parlor Games
//!
//! Plays tic-tac-toe against a difficulty-graded computer opponent or
//! a friend at the same keyboard.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod mode;
mod session;
mod ui;

use anyhow::Result;
use app::{App, KeyOutcome};
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mode::GameMode;
use parlor_tictactoe::Difficulty;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file to avoid interfering with the TUI.
    let log_file = std::fs::File::create("parlor_games_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Parlor Games TUI");

    let mut app = App::new();
    match cli.command {
        Some(Command::Computer { difficulty }) => {
            app.start(GameMode::Computer, difficulty.into());
        }
        Some(Command::Friend) => {
            app.start(GameMode::Friend, Difficulty::default());
        }
        None => {}
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Event loop error");
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    // Deferred computer moves arrive here, tagged with the generation
    // they were scheduled under; the app drops the stale ones.
    let (move_tx, mut move_rx) = mpsc::unbounded_channel::<u64>();

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        // Apply computer moves that came due.
        while let Ok(generation) = move_rx.try_recv() {
            app.on_computer_due(generation);
        }

        // Check for keyboard input
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match app.handle_key(key.code) {
                    KeyOutcome::Quit => {
                        info!("User quit");
                        return Ok(());
                    }
                    KeyOutcome::Schedule(deferred) => {
                        debug!(
                            generation = deferred.generation,
                            delay_ms = deferred.delay.as_millis() as u64,
                            "Scheduling computer move"
                        );
                        let tx = move_tx.clone();
                        tokio::spawn(async move {
                            sleep(deferred.delay).await;
                            let _ = tx.send(deferred.generation);
                        });
                    }
                    KeyOutcome::Continue => {}
                }
            }
        }
    }
}
