//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Screen};
use crate::mode::GameMode;
use parlor_tictactoe::{Board, Player, Position, Square};

/// Renders the current screen.
pub fn draw(frame: &mut Frame, app: &mut App) {
    match app.screen() {
        Screen::ModeSelect => draw_mode_select(frame, app),
        Screen::Playing => draw_game(frame, app),
    }
}

fn draw_mode_select(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Menu
            Constraint::Length(3), // Help
        ])
        .split(area);

    let title = Paragraph::new("Parlor Games - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = GameMode::all()
        .iter()
        .map(|mode| ListItem::new(mode.name()))
        .collect();
    let menu = List::new(items)
        .block(Block::default().title("Select Mode").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let menu_area = center_rect(chunks[1], 40, 6);
    frame.render_stateful_widget(menu, menu_area, app.menu_state());

    let help = Paragraph::new("Up/Down to choose, Enter to start, 'q' to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

fn draw_game(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board
            Constraint::Length(1), // Difficulty
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Parlor Games - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if let Some(session) = app.session() {
        draw_board(frame, chunks[1], session.game().state().board(), app.cursor());

        let difficulty_line = match session.mode() {
            GameMode::Computer if session.difficulty_locked() => {
                format!("Difficulty: {}", session.difficulty().label())
            }
            GameMode::Computer => format!(
                "Difficulty: {} ('e'/'m'/'h' to change)",
                session.difficulty().label()
            ),
            GameMode::Friend => "Two players, one keyboard".to_string(),
        };
        let difficulty = Paragraph::new(difficulty_line)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(difficulty, chunks[2]);
    }

    let status = Paragraph::new(app.status_message().to_string())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Position) {
    // Center the board
    let board_area = center_rect(area, 40, 12);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    draw_row(
        frame,
        rows[0],
        board,
        cursor,
        &[Position::TopLeft, Position::TopCenter, Position::TopRight],
    );
    draw_separator(frame, rows[1]);
    draw_row(
        frame,
        rows[2],
        board,
        cursor,
        &[Position::MiddleLeft, Position::Center, Position::MiddleRight],
    );
    draw_separator(frame, rows[3]);
    draw_row(
        frame,
        rows[4],
        board,
        cursor,
        &[
            Position::BottomLeft,
            Position::BottomCenter,
            Position::BottomRight,
        ],
    );
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    positions: &[Position; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], board, cursor, positions[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], board, cursor, positions[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], board, cursor, positions[2]);
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, pos: Position) {
    let (symbol, base_style) = match board.get(pos) {
        Square::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
