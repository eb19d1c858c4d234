//! First-class transition types.
//!
//! A transition is a proposed change to the ledger: the versions it
//! consumes and produces, tagged by intent. The shape of each variant fixes
//! which of input and output are present.

use super::{GameId, GameState, Party};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Parties observed to have authorized a transition.
///
/// Signatures are verified elsewhere; the contract checks membership only.
pub type Signers = HashSet<Party>;

/// Intent of a transition.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Start a game.
    #[display("create")]
    Create,
    /// Place a mark.
    #[display("play")]
    Play,
    /// Retire a game.
    #[display("end-game")]
    EndGame,
}

/// A proposed state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// No input; the first version of a new game.
    Create {
        /// Proposed first version.
        output: GameState,
    },
    /// Consumes the latest version and produces the next one.
    Play {
        /// Version being consumed.
        input: GameState,
        /// Proposed next version.
        output: GameState,
    },
    /// Consumes the latest version and produces nothing.
    EndGame {
        /// Version being retired.
        input: GameState,
    },
}

impl Transition {
    /// Returns the intent of this transition.
    pub fn kind(&self) -> TransitionKind {
        match self {
            Transition::Create { .. } => TransitionKind::Create,
            Transition::Play { .. } => TransitionKind::Play,
            Transition::EndGame { .. } => TransitionKind::EndGame,
        }
    }

    /// Version consumed, if any.
    pub fn input(&self) -> Option<&GameState> {
        match self {
            Transition::Create { .. } => None,
            Transition::Play { input, .. } | Transition::EndGame { input } => Some(input),
        }
    }

    /// Version produced, if any.
    pub fn output(&self) -> Option<&GameState> {
        match self {
            Transition::Create { output } | Transition::Play { output, .. } => Some(output),
            Transition::EndGame { .. } => None,
        }
    }

    /// Game the transition refers to: the input's id, else the output's.
    pub fn game_id(&self) -> &GameId {
        match self {
            Transition::Create { output } => output.id(),
            Transition::Play { input, .. } | Transition::EndGame { input } => input.id(),
        }
    }

    /// Both players of the game this transition refers to.
    pub fn participants(&self) -> [&Party; 2] {
        match self {
            Transition::Create { output } => output.participants(),
            Transition::Play { input, .. } | Transition::EndGame { input } => {
                input.participants()
            }
        }
    }
}
