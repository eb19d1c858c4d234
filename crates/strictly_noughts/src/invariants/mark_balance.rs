//! Mark balance invariant: crosses lead noughts by at most one.

use super::Invariant;
use crate::{GameState, Mark};

/// Invariant: the number of X marks equals the number of O marks, or
/// exceeds it by one.
///
/// Holds on every board reachable by alternating moves starting with X.
pub struct MarkBalanceInvariant;

impl Invariant<GameState> for MarkBalanceInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Mark::X);
        let o = state.board().count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "Crosses lead noughts by zero or one mark"
    }
}
