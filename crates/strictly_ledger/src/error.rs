//! Error types for the ledger, flows and scenarios.

use derive_more::{Display, Error, From};
use strictly_noughts::{GameId, Party, Rejection};

/// Errors returned when submitting a transition to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum LedgerError {
    /// The contract refused the transition.
    #[display("Transition rejected: {}", _0)]
    #[from]
    Rejected(#[error(source)] Rejection),

    /// The contract accepted, but a committed-state invariant would break.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),

    /// No current version exists for the game.
    #[display("Unknown game {}", _0)]
    UnknownGame(#[error(not(source))] GameId),

    /// A game with this id already exists.
    #[display("Game {} already exists", _0)]
    DuplicateGame(#[error(not(source))] GameId),

    /// Create: the two players already share an unconsumed game.
    #[display("Players already share game {}", _0)]
    PairAlreadyActive(#[error(not(source))] GameId),
}

impl LedgerError {
    /// Returns the contract rejection, if that is what this is.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            LedgerError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Errors returned by flows acting on behalf of a party.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum FlowError {
    /// The acting party is not a player of the game.
    #[display("{} is not a player in game {}", party, game_id)]
    NotAParticipant {
        /// Acting party.
        party: Party,
        /// Game they tried to play.
        game_id: GameId,
    },

    /// The acting party may not move now.
    #[display("It is not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Party),

    /// An unconsumed game between the two parties already exists.
    #[display("You can only have one ongoing game with {} at a time (game {})", opponent, game_id)]
    GameAlreadyActive {
        /// The other party.
        opponent: Party,
        /// The existing game.
        game_id: GameId,
    },

    /// No current game exists against this opponent.
    #[display("No active game with {}", _0)]
    NoActiveGame(#[error(not(source))] Party),

    /// The ledger refused the proposal.
    #[display("{}", _0)]
    #[from]
    Ledger(#[error(source)] LedgerError),
}

impl FlowError {
    /// Returns the contract rejection behind this error, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            FlowError::Ledger(err) => err.rejection(),
            _ => None,
        }
    }

    /// Returns true if re-fetching the latest version and retrying may succeed.
    ///
    /// Only stale-version rejections qualify; identity and turn errors need
    /// a different caller.
    pub fn is_retryable(&self) -> bool {
        self.rejection().is_some_and(Rejection::is_retryable)
    }
}

/// Scenario configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors raised while replaying a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ScenarioError {
    /// A move does not name a board position.
    #[display("Move {} is not a board position: {}", index, spec)]
    InvalidMove {
        /// Zero-based index of the move in the scenario.
        index: usize,
        /// The move as written.
        spec: String,
    },

    /// A flow failed.
    #[display("{}", _0)]
    #[from]
    Flow(#[error(source)] FlowError),
}
