//! Outcome consistency invariant: the declared outcome is the board's.

use super::Invariant;
use crate::GameState;
use crate::rules::check_outcome;

/// Invariant: the stored outcome equals the outcome recomputed from the board.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        *state.outcome() == check_outcome(state.board())
    }

    fn description() -> &'static str {
        "Declared outcome matches the board"
    }
}
