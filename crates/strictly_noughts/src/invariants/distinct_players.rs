//! Distinct players invariant: nobody plays against themselves.

use super::Invariant;
use crate::GameState;

/// Invariant: `player_x` and `player_o` are different parties.
pub struct DistinctPlayersInvariant;

impl Invariant<GameState> for DistinctPlayersInvariant {
    fn holds(state: &GameState) -> bool {
        state.player_x() != state.player_o()
    }

    fn description() -> &'static str {
        "Players are different identities"
    }
}
