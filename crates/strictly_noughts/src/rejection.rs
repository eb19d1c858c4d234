//! Rejection reasons returned by the game contract.

use super::{Cell, GameId, Mark, Outcome};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Broad class of a rejected transition.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    /// Players identical, changed, or wrong signer set.
    #[display("identity conflict")]
    IdentityConflict,
    /// Board not blank at creation, or no blank cell was marked.
    #[display("illegal board mutation")]
    IllegalBoardMutation,
    /// Mover's mark does not match their role.
    #[display("wrong symbol played")]
    WrongSymbolPlayed,
    /// Same player moved twice in a row.
    #[display("turn order violation")]
    TurnOrderViolation,
    /// Finished game, or not the latest version.
    #[display("stale or terminal input")]
    StaleOrTerminalInput,
    /// Declared outcome disagrees with the board.
    #[display("outcome mismatch")]
    OutcomeMismatch,
}

/// The first rule a proposed transition violated.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Rejection {
    /// Create: both player slots hold the same party.
    #[display("The players must be different identities")]
    SamePlayers,

    /// Create: board not blank or outcome already decided.
    #[display("A new game must start blank with no winner")]
    NotFreshGame,

    /// Create: signer set is not exactly both players.
    #[display("Create must be signed by exactly both players")]
    CreateSigners,

    /// Play: the input version is already decided.
    #[display("Cannot play on a finished game ({})", _0)]
    GameFinished(Outcome),

    /// Play: players or game id differ between input and output.
    #[display("Players and game identity must not change")]
    IdentityChanged,

    /// Play: blank count did not strictly decrease.
    #[display("Must place a mark on a previously blank cell")]
    NoMarkPlaced,

    /// Play: the mark added is not the mover's.
    #[display("Player played the wrong symbol (expected {}, found {:?})", expected, found)]
    WrongSymbol {
        /// Mark the mover is assigned.
        expected: Mark,
        /// Cell actually added to the board.
        found: Cell,
    },

    /// Play: the same party moved twice in a row.
    #[display("Players must alternate turns")]
    SameMoverTwice,

    /// Play: declared outcome differs from the recomputed one.
    #[display("Declared outcome '{}' does not match board ('{}')", declared, actual)]
    OutcomeMismatch {
        /// Outcome carried by the proposal.
        declared: Outcome,
        /// Outcome the board actually has.
        actual: Outcome,
    },

    /// Play: signer set is not exactly both players.
    #[display("Play must be signed by both players")]
    PlaySigners,

    /// The input is not the latest committed version of the game.
    #[display("Input is not the latest version of game {}", _0)]
    StaleInput(GameId),
}

impl std::error::Error for Rejection {}

impl Rejection {
    /// Maps this rejection to its broad class.
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::SamePlayers
            | Rejection::CreateSigners
            | Rejection::IdentityChanged
            | Rejection::PlaySigners => RejectionKind::IdentityConflict,
            Rejection::NotFreshGame | Rejection::NoMarkPlaced => {
                RejectionKind::IllegalBoardMutation
            }
            Rejection::WrongSymbol { .. } => RejectionKind::WrongSymbolPlayed,
            Rejection::SameMoverTwice => RejectionKind::TurnOrderViolation,
            Rejection::GameFinished(_) | Rejection::StaleInput(_) => {
                RejectionKind::StaleOrTerminalInput
            }
            Rejection::OutcomeMismatch { .. } => RejectionKind::OutcomeMismatch,
        }
    }

    /// Returns true if re-fetching the latest version and retrying may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Rejection::StaleInput(_))
    }
}
