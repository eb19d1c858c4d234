//! Ledger and flows for noughts and crosses games.
//!
//! The [`Ledger`] keeps the latest version of every game and commits
//! transitions only after the [`strictly_noughts::GameContract`] and the
//! committed-state invariants accept them. A [`Node`] runs the Create,
//! Play and EndGame flows for one party, and [`replay`] drives a scripted
//! game loaded from TOML.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod flows;
mod ledger;
mod scenario;

pub use config::{MoveSpec, ScenarioConfig};
pub use error::{ConfigError, FlowError, LedgerError, ScenarioError};
pub use flows::{Node, collect_signatures, next_mover};
pub use ledger::{Ledger, Receipt};
pub use scenario::{Replay, ReplayStep, replay};
