//! Computer opponents, graded by difficulty.
//!
//! All strategies share one signature: given a board and the mark the
//! computer plays, pick a position. `None` only happens on a full board,
//! which callers never ask about.

use super::position::Position;
use super::types::{Board, Player, Square};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Opponent difficulty, selecting which strategy answers the human.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Difficulty {
    /// Random moves, no look-ahead.
    #[default]
    Easy,
    /// Blocks the human's immediate wins, otherwise random.
    Medium,
    /// Exhaustive minimax; never loses.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this difficulty.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Cosmetic "thinking" pause before the computer answers.
    ///
    /// Easier opponents take longer, which reads as deliberation; the
    /// delay has no effect on the chosen move.
    pub fn think_delay(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(1000),
            Self::Medium => Duration::from_millis(700),
            Self::Hard => Duration::from_millis(400),
        }
    }

    /// Chooses a move for `mark` on the given board.
    ///
    /// Returns `None` only when the board has no empty square.
    #[instrument(skip(board))]
    pub fn choose_move(self, board: &Board, mark: Player) -> Option<Position> {
        let choice = match self {
            Self::Easy => random_move(board),
            Self::Medium => blocking_move(board, mark),
            Self::Hard => best_move(board, mark),
        };
        debug!(?choice, "Computer chose position");
        choice
    }
}

/// Picks uniformly among the empty positions.
fn random_move(board: &Board) -> Option<Position> {
    Position::valid_moves(board).choose(&mut rand::rng()).copied()
}

/// Blocks an immediate win for `mark`'s opponent, otherwise random.
///
/// The scan probes only the opponent's mark: this strategy never looks
/// for its own win-in-one. The asymmetry is intentional and keeps the
/// medium opponent beatable.
fn blocking_move(board: &Board, mark: Player) -> Option<Position> {
    let opponent = mark.opponent();

    for pos in Position::valid_moves(board) {
        let mut probe = board.clone();
        probe.set(pos, Square::Occupied(opponent));
        if probe.winner() == Some(opponent) {
            debug!(%pos, "Blocking opponent win");
            return Some(pos);
        }
    }

    random_move(board)
}

/// Result of searching a subtree: the guaranteed score, and the move
/// that achieves it from the root of that subtree.
struct SearchResult {
    score: i32,
    position: Option<Position>,
}

/// Finds the optimal move for `mark` by searching the full game tree.
fn best_move(board: &Board, mark: Player) -> Option<Position> {
    let mut scratch = board.clone();
    minimax(&mut scratch, mark, mark).position
}

/// Exhaustive minimax over the remaining game tree.
///
/// Scores are from `seeker`'s perspective: +1 for its win, -1 for its
/// opponent's, 0 for a draw. The board is mutated and restored around
/// each recursive call; every path through the loop body undoes its
/// placement. Ties go to the first position in index order. The tree
/// tops out at 9 plies, so no pruning is needed.
fn minimax(board: &mut Board, to_move: Player, seeker: Player) -> SearchResult {
    if let Some(winner) = board.winner() {
        let score = if winner == seeker { 1 } else { -1 };
        return SearchResult {
            score,
            position: None,
        };
    }

    if board.is_full() {
        return SearchResult {
            score: 0,
            position: None,
        };
    }

    let maximizing = to_move == seeker;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_position = None;

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }

        board.set(pos, Square::Occupied(to_move));
        let result = minimax(board, to_move.opponent(), seeker);
        board.set(pos, Square::Empty);

        let improved = if maximizing {
            result.score > best_score
        } else {
            result.score < best_score
        };

        if improved {
            best_score = result.score;
            best_position = Some(pos);
        }
    }

    SearchResult {
        score: best_score,
        position: best_position,
    }
}
