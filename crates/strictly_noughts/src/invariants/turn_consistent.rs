//! Turn consistency invariant: the recorded mover matches the board.

use super::Invariant;
use crate::{GameState, Mark};

/// Invariant: the last mover agrees with the marks on the board.
///
/// - No mover is recorded exactly when the board is blank.
/// - If crosses moved last, X leads O by one.
/// - If noughts moved last, the counts are equal.
pub struct TurnConsistentInvariant;

impl Invariant<GameState> for TurnConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);

        match state.turn() {
            None => board.is_empty(),
            Some(mover) => match state.mark_of(mover) {
                Some(Mark::X) => x == o + 1,
                Some(Mark::O) => x == o && o > 0,
                None => false,
            },
        }
    }

    fn description() -> &'static str {
        "Last mover is consistent with the board"
    }
}
