//! Monotonic board invariant: a step marks exactly one blank cell.

use super::Invariant;
use crate::Transition;

/// Invariant: marks are never overwritten or erased, and a play adds
/// exactly one mark.
///
/// Create and EndGame steps hold trivially; the board rules for them live
/// in the contract.
pub struct MonotonicBoardInvariant;

impl Invariant<Transition> for MonotonicBoardInvariant {
    fn holds(transition: &Transition) -> bool {
        let Transition::Play { input, output } = transition else {
            return true;
        };

        let mut added = 0;
        for (before, after) in input.board().cells().iter().zip(output.board().cells()) {
            if before.is_blank() {
                if !after.is_blank() {
                    added += 1;
                }
            } else if before != after {
                return false;
            }
        }
        added == 1
    }

    fn description() -> &'static str {
        "Each play marks exactly one blank cell and overwrites nothing"
    }
}
