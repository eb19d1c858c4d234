//! Replays a scripted game through nodes sharing one ledger.

use crate::config::ScenarioConfig;
use crate::error::ScenarioError;
use crate::flows::{next_mover, Node};
use crate::ledger::Ledger;
use serde::Serialize;
use strictly_noughts::{Contract, GameState, Party, Position};
use tracing::{info, instrument};

/// A committed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    /// Party that moved.
    pub mover: Party,
    /// Cell marked.
    pub position: Position,
    /// Version published by the move.
    pub state: GameState,
}

/// Everything a replay committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    /// Version published by the Create transition.
    pub created: GameState,
    /// Moves in commit order.
    pub steps: Vec<ReplayStep>,
    /// True if the game was retired afterwards.
    pub ended: bool,
}

impl Replay {
    /// Latest version of the game.
    pub fn final_state(&self) -> &GameState {
        self.steps.last().map_or(&self.created, |step| &step.state)
    }
}

/// Runs `config` against `ledger`, stopping at the first failure.
#[instrument(skip_all, fields(player_x = %config.player_x(), player_o = %config.player_o()))]
pub fn replay<C>(config: &ScenarioConfig, ledger: &Ledger<C>) -> Result<Replay, ScenarioError>
where
    C: Contract + Clone,
{
    let x = Node::new(config.party_x(), ledger.clone());
    let o = Node::new(config.party_o(), ledger.clone());

    let created = x.create_game(o.me())?;
    let mut state = created.clone();
    let mut steps = Vec::with_capacity(config.moves().len());

    for (index, spec) in config.moves().iter().enumerate() {
        let position = spec.position().ok_or_else(|| ScenarioError::InvalidMove {
            index,
            spec: spec.to_string(),
        })?;

        let node = if next_mover(&state) == x.me() { &x } else { &o };
        state = node.play(state.id(), position)?;
        steps.push(ReplayStep {
            mover: node.me().clone(),
            position,
            state: state.clone(),
        });
    }

    let ended = *config.end_game();
    if ended {
        x.end_game(o.me())?;
    }

    info!(moves = steps.len(), outcome = %state.outcome(), ended, "Scenario replayed");
    Ok(Replay {
        created,
        steps,
        ended,
    })
}
