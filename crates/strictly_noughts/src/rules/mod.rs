//! Game rules for noughts and crosses.
//!
//! Pure functions over boards. The transition validator composes these;
//! orchestrators use them to build proposals.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::{Board, Cell, Outcome};
use tracing::instrument;

/// Evaluates a board.
///
/// All 8 lines are checked; the first complete one decides the winner.
/// Without a complete line a full board is a draw.
#[instrument(level = "trace")]
pub fn check_outcome(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::won_by(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Returns the cell written by a move from `old` to `new`.
///
/// Scans for the first index that was blank in `old` and is marked in
/// `new`. `Cell::Blank` means no mark was added.
pub fn mark_added(old: &Board, new: &Board) -> Cell {
    old.cells()
        .iter()
        .zip(new.cells())
        .find(|(before, after)| before.is_blank() && !after.is_blank())
        .map(|(_, after)| *after)
        .unwrap_or(Cell::Blank)
}

/// Number of blank cells on the board.
pub fn blank_count(board: &Board) -> usize {
    board.blank_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(check_outcome(&Board::new()), Outcome::InProgress);
        assert_eq!(check_outcome(&board("XXX ... ...")), Outcome::XWins);
        assert_eq!(check_outcome(&board("XX. OOO X..")), Outcome::OWins);
        assert_eq!(check_outcome(&board("XOX OXO OXO")), Outcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        assert_eq!(check_outcome(&board("XOX OXO OOX")), Outcome::XWins);
    }

    #[test]
    fn test_mark_added_finds_new_mark() {
        let old = Board::new().apply_move(Mark::X, Position::Center);
        let new = old.apply_move(Mark::O, Position::BottomRight);
        assert_eq!(mark_added(&old, &new), Cell::Marked(Mark::O));
    }

    #[test]
    fn test_mark_added_blank_when_nothing_added() {
        let old = Board::new().apply_move(Mark::X, Position::Center);
        assert_eq!(mark_added(&old, &old), Cell::Blank);

        let overwritten = board("... .O. ...");
        assert_eq!(mark_added(&old, &overwritten), Cell::Blank);
    }

    #[test]
    fn test_blank_count() {
        assert_eq!(blank_count(&Board::new()), 9);
        assert_eq!(blank_count(&board("XOX OXO OXO")), 0);
    }
}
