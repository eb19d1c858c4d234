//! Noughts and crosses as a two-party ledger contract.
//!
//! A game is a chain of immutable [`GameState`] versions sharing one
//! [`GameId`]. Orchestrators build the next version with the board model
//! ([`Board::apply_move`], [`rules::check_outcome`]) and ask the
//! [`GameContract`] whether the proposed [`Transition`] may be committed.
//!
//! # Example
//!
//! ```
//! use strictly_noughts::{Contract, GameContract, GameState, Party, Position, Signers, Transition};
//!
//! let alice = Party::new("Alice");
//! let bob = Party::new("Bob");
//! let signers = Signers::from([alice.clone(), bob.clone()]);
//!
//! let game = GameState::new(alice.clone(), bob.clone());
//! let create = Transition::Create { output: game.clone() };
//! assert!(GameContract.verify(&create, &signers).is_ok());
//!
//! let next = game.play(&alice, Position::Center);
//! let play = Transition::Play { input: game, output: next };
//! assert!(GameContract.verify(&play, &signers).is_ok());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod rejection;
mod state;
mod transition;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use contracts::{Contract, GameContract};
pub use position::Position;
pub use rejection::{Rejection, RejectionKind};
pub use rules::{blank_count, check_outcome, mark_added};
pub use state::GameState;
pub use transition::{Signers, Transition, TransitionKind};
pub use types::{Board, BoardParseError, Cell, GameId, Mark, Outcome, Party};
