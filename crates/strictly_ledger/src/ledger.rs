//! In-memory game ledger.
//!
//! Holds the latest unconsumed version of every game and commits
//! transitions atomically: validate, check invariants, then retire the
//! input and publish the output under one lock. Retired versions are not
//! kept.

use crate::error::LedgerError;
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_noughts::invariants::{
    GameStateInvariants, InvariantSet, InvariantViolation, TransitionInvariants,
};
use strictly_noughts::{
    Contract, GameContract, GameId, GameState, Party, Rejection, Signers, Transition,
    TransitionKind,
};
use tracing::{debug, info, instrument, warn};

/// A stored version and its position in the chain.
#[derive(Debug, Clone)]
struct Entry {
    state: GameState,
    version: u64,
}

/// Result of a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, new)]
pub struct Receipt {
    /// Game the transition applied to.
    game_id: GameId,
    /// Intent of the transition.
    kind: TransitionKind,
    /// Version number of the published state (0 at creation), or of the
    /// retired one for an ended game.
    version: u64,
    /// Published state; `None` once the game is ended.
    state: Option<GameState>,
}

/// Thread-safe store of current game versions.
#[derive(Debug, Clone)]
pub struct Ledger<C = GameContract> {
    contract: C,
    games: Arc<Mutex<HashMap<GameId, Entry>>>,
}

impl Ledger<GameContract> {
    /// Creates an empty ledger governed by [`GameContract`].
    #[instrument]
    pub fn new() -> Self {
        info!("Creating ledger");
        Self::with_contract(GameContract)
    }
}

impl Default for Ledger<GameContract> {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_game<'a>(
    games: &'a HashMap<GameId, Entry>,
    a: &Party,
    b: &Party,
) -> Option<&'a GameState> {
    games.values().map(|e| &e.state).find(|s| {
        (s.player_x() == a && s.player_o() == b) || (s.player_x() == b && s.player_o() == a)
    })
}

fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl<C: Contract> Ledger<C> {
    /// Creates an empty ledger governed by `contract`.
    pub fn with_contract(contract: C) -> Self {
        Self {
            contract,
            games: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // Entries are replaced whole, so a panic elsewhere cannot leave one half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<GameId, Entry>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates and commits a transition.
    ///
    /// Play and EndGame must consume the current version of their game;
    /// anything older is rejected as stale so concurrent proposals against
    /// one version cannot both succeed. Create is refused while the two
    /// players already share an unconsumed game.
    #[instrument(skip_all, fields(kind = %transition.kind(), game_id = %transition.game_id()))]
    pub fn submit(
        &self,
        transition: Transition,
        signers: &Signers,
    ) -> Result<Receipt, LedgerError> {
        let mut games = self.lock();
        let game_id = *transition.game_id();

        let current_version = match transition.input() {
            None => {
                if games.contains_key(&game_id) {
                    warn!("Game already exists");
                    return Err(LedgerError::DuplicateGame(game_id));
                }
                let [x, o] = transition.participants();
                if let Some(existing) = pair_game(&games, x, o) {
                    warn!(existing = %existing.id(), "Players already share a game");
                    return Err(LedgerError::PairAlreadyActive(*existing.id()));
                }
                None
            }
            Some(input) => {
                let entry = games
                    .get(&game_id)
                    .ok_or(LedgerError::UnknownGame(game_id))?;
                if entry.state != *input {
                    warn!(current_version = entry.version, "Stale input");
                    return Err(Rejection::StaleInput(game_id).into());
                }
                Some(entry.version)
            }
        };

        self.contract.verify(&transition, signers)?;

        TransitionInvariants::check_all(&transition).map_err(|violations| {
            warn!(violations = %describe(&violations), "Transition invariant broken");
            LedgerError::InvariantViolation(describe(&violations))
        })?;
        if let Some(output) = transition.output() {
            GameStateInvariants::check_all(output).map_err(|violations| {
                warn!(violations = %describe(&violations), "State invariant broken");
                LedgerError::InvariantViolation(describe(&violations))
            })?;
        }

        let kind = transition.kind();
        let receipt = match transition {
            Transition::Create { output } => {
                games.insert(
                    game_id,
                    Entry {
                        state: output.clone(),
                        version: 0,
                    },
                );
                Receipt::new(game_id, kind, 0, Some(output))
            }
            Transition::Play { output, .. } => {
                let version = current_version.map_or(0, |v| v + 1);
                games.insert(
                    game_id,
                    Entry {
                        state: output.clone(),
                        version,
                    },
                );
                Receipt::new(game_id, kind, version, Some(output))
            }
            Transition::EndGame { .. } => {
                games.remove(&game_id);
                Receipt::new(game_id, kind, current_version.unwrap_or_default(), None)
            }
        };

        info!(version = receipt.version, "Transition committed");
        Ok(receipt)
    }

    /// Returns the current version of a game.
    #[instrument(skip(self))]
    pub fn get(&self, game_id: &GameId) -> Option<GameState> {
        let state = self.lock().get(game_id).map(|e| e.state.clone());
        if state.is_none() {
            debug!("Game not found");
        }
        state
    }

    /// Returns the version number of a game's current state.
    pub fn version(&self, game_id: &GameId) -> Option<u64> {
        self.lock().get(game_id).map(|e| e.version)
    }

    /// Returns the current game between two parties, in either seat.
    #[instrument(skip(self, a, b), fields(a = %a, b = %b))]
    pub fn find_between(&self, a: &Party, b: &Party) -> Option<GameState> {
        pair_game(&self.lock(), a, b).cloned()
    }

    /// Returns every current game `party` plays in.
    #[instrument(skip(self, party), fields(party = %party))]
    pub fn active_games_of(&self, party: &Party) -> Vec<GameState> {
        let games: Vec<_> = self
            .lock()
            .values()
            .filter(|e| e.state.is_participant(party))
            .map(|e| e.state.clone())
            .collect();
        debug!(count = games.len(), "Listed games");
        games
    }

    /// Number of current games.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no game is current.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_noughts::{Position, RejectionKind};

    fn alice() -> Party {
        Party::new("Alice")
    }

    fn bob() -> Party {
        Party::new("Bob")
    }

    fn both() -> Signers {
        Signers::from([alice(), bob()])
    }

    fn created(ledger: &Ledger) -> GameState {
        let game = GameState::new(alice(), bob());
        ledger
            .submit(Transition::Create { output: game.clone() }, &both())
            .unwrap();
        game
    }

    #[test]
    fn test_create_publishes_version_zero() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        assert_eq!(ledger.get(game.id()), Some(game.clone()));
        assert_eq!(ledger.version(game.id()), Some(0));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        let err = ledger
            .submit(Transition::Create { output: game.clone() }, &both())
            .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateGame(*game.id()));
    }

    #[test]
    fn test_second_create_for_pair_rejected() {
        let ledger = Ledger::new();
        let first = created(&ledger);
        // Seats swapped, fresh id.
        let second = GameState::new(bob(), alice());
        let err = ledger
            .submit(Transition::Create { output: second }, &both())
            .unwrap_err();
        assert_eq!(err, LedgerError::PairAlreadyActive(*first.id()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_play_advances_version() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        let next = game.play(&alice(), Position::Center);
        let receipt = ledger
            .submit(
                Transition::Play {
                    input: game.clone(),
                    output: next.clone(),
                },
                &both(),
            )
            .unwrap();
        assert_eq!(*receipt.version(), 1);
        assert_eq!(ledger.get(game.id()), Some(next));
    }

    #[test]
    fn test_conflicting_children_only_one_wins() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        let left = game.play(&alice(), Position::Center);
        let right = game.play(&alice(), Position::TopLeft);

        ledger
            .submit(
                Transition::Play {
                    input: game.clone(),
                    output: left,
                },
                &both(),
            )
            .unwrap();
        let err = ledger
            .submit(
                Transition::Play {
                    input: game.clone(),
                    output: right,
                },
                &both(),
            )
            .unwrap_err();

        let rejection = err.rejection().unwrap();
        assert_eq!(rejection.kind(), RejectionKind::StaleOrTerminalInput);
        assert!(rejection.is_retryable());
    }

    #[test]
    fn test_unknown_game() {
        let ledger = Ledger::new();
        let game = GameState::new(alice(), bob());
        let err = ledger
            .submit(Transition::EndGame { input: game.clone() }, &both())
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownGame(*game.id()));
    }

    #[test]
    fn test_noughts_first_breaks_invariants() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        // The contract alone accepts this; the committed-state invariants do not.
        let next = game.play(&bob(), Position::Center);
        let err = ledger
            .submit(Transition::Play { input: game, output: next }, &both())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation(_)));
    }

    #[test]
    fn test_two_marks_in_one_play_rejected() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        let next = game
            .play(&alice(), Position::Center)
            .with_board("XO. .X. ...".parse().unwrap());
        let err = ledger
            .submit(Transition::Play { input: game, output: next }, &both())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation(_)));
    }

    #[test]
    fn test_end_game_retires_current_version() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        let receipt = ledger
            .submit(Transition::EndGame { input: game.clone() }, &both())
            .unwrap();
        assert_eq!(*receipt.state(), None);
        assert!(ledger.get(game.id()).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_queries_by_party() {
        let ledger = Ledger::new();
        let game = created(&ledger);
        assert_eq!(ledger.find_between(&bob(), &alice()), Some(game.clone()));
        assert_eq!(ledger.active_games_of(&alice()).len(), 1);
        assert!(ledger.active_games_of(&Party::new("Carl")).is_empty());
        assert!(ledger.find_between(&alice(), &Party::new("Carl")).is_none());
    }
}
