//! Flows: the orchestration a participant runs to change a game.
//!
//! A [`Node`] acts for one party. Each flow loads the current version from
//! the ledger, builds the proposal with the board model, gathers the
//! participants' signatures and submits it for commit.

use crate::error::{FlowError, LedgerError};
use crate::ledger::{Ledger, Receipt};
use derive_getters::Getters;
use strictly_noughts::{
    Contract, GameContract, GameId, GameState, Party, Position, Signers, Transition,
};
use tracing::{debug, info, instrument, warn};

/// Collects the signatures of every participant in a transition.
///
/// Each counterparty signs once it has checked that the proposal is a game
/// transition it plays in, which holds by construction here.
#[instrument(skip_all, fields(kind = %transition.kind()))]
pub fn collect_signatures(transition: &Transition) -> Signers {
    let signers: Signers = transition.participants().into_iter().cloned().collect();
    debug!(count = signers.len(), "Signatures collected");
    signers
}

/// Party whose turn it is: crosses first, then alternating.
pub fn next_mover(state: &GameState) -> &Party {
    match state.turn() {
        Some(last) if last == state.player_x() => state.player_o(),
        _ => state.player_x(),
    }
}

/// A participant acting on a shared ledger.
#[derive(Debug, Clone, Getters)]
pub struct Node<C = GameContract> {
    /// Party this node acts for.
    me: Party,
    /// Shared ledger.
    ledger: Ledger<C>,
}

impl<C: Contract> Node<C> {
    /// Creates a node acting for `me`.
    pub fn new(me: Party, ledger: Ledger<C>) -> Self {
        Self { me, ledger }
    }

    /// Starts a game against `opponent`, with this node playing crosses.
    ///
    /// Only one unconsumed game per pair is allowed; a finished game must
    /// be ended before a new one starts. The ledger enforces this at
    /// commit, so concurrent creates for one pair cannot both succeed.
    #[instrument(skip(self, opponent), fields(me = %self.me, opponent = %opponent))]
    pub fn create_game(&self, opponent: &Party) -> Result<GameState, FlowError> {
        if let Some(existing) = self.ledger.find_between(&self.me, opponent) {
            warn!(game_id = %existing.id(), "Game already active");
            return Err(FlowError::GameAlreadyActive {
                opponent: opponent.clone(),
                game_id: *existing.id(),
            });
        }

        let output = GameState::new(self.me.clone(), opponent.clone());
        let transition = Transition::Create {
            output: output.clone(),
        };
        let signers = collect_signatures(&transition);
        self.ledger
            .submit(transition, &signers)
            .map_err(|err| match err {
                LedgerError::PairAlreadyActive(game_id) => {
                    warn!(%game_id, "Game created concurrently");
                    FlowError::GameAlreadyActive {
                        opponent: opponent.clone(),
                        game_id,
                    }
                }
                other => other.into(),
            })?;

        info!(game_id = %output.id(), "Game created");
        Ok(output)
    }

    /// Places this node's mark at `position` in the given game.
    #[instrument(skip(self), fields(me = %self.me))]
    pub fn play(&self, game_id: &GameId, position: Position) -> Result<GameState, FlowError> {
        let input = self
            .ledger
            .get(game_id)
            .ok_or(LedgerError::UnknownGame(*game_id))?;
        self.play_on(input, position)
    }

    /// Places this node's mark at `position` in the current game against `opponent`.
    #[instrument(skip(self, opponent), fields(me = %self.me, opponent = %opponent))]
    pub fn play_against(
        &self,
        opponent: &Party,
        position: Position,
    ) -> Result<GameState, FlowError> {
        let input = self
            .ledger
            .find_between(&self.me, opponent)
            .ok_or_else(|| FlowError::NoActiveGame(opponent.clone()))?;
        self.play_on(input, position)
    }

    fn play_on(&self, input: GameState, position: Position) -> Result<GameState, FlowError> {
        if !input.is_participant(&self.me) {
            warn!(game_id = %input.id(), "Not a participant");
            return Err(FlowError::NotAParticipant {
                party: self.me.clone(),
                game_id: *input.id(),
            });
        }
        // Finished games go to the contract so the caller sees its rejection.
        if !input.is_terminal() && *next_mover(&input) != self.me {
            warn!(game_id = %input.id(), "Out of turn");
            return Err(FlowError::NotYourTurn(self.me.clone()));
        }

        let output = input.play(&self.me, position);
        let transition = Transition::Play {
            input,
            output: output.clone(),
        };
        let signers = collect_signatures(&transition);
        self.ledger.submit(transition, &signers)?;

        info!(game_id = %output.id(), %position, outcome = %output.outcome(), "Move committed");
        Ok(output)
    }

    /// Retires the current game against `opponent`.
    #[instrument(skip(self, opponent), fields(me = %self.me, opponent = %opponent))]
    pub fn end_game(&self, opponent: &Party) -> Result<Receipt, FlowError> {
        let input = self
            .ledger
            .find_between(&self.me, opponent)
            .ok_or_else(|| FlowError::NoActiveGame(opponent.clone()))?;

        let transition = Transition::EndGame { input };
        let signers = collect_signatures(&transition);
        let receipt = self.ledger.submit(transition, &signers)?;

        info!(game_id = %receipt.game_id(), "Game ended");
        Ok(receipt)
    }

    /// Current games this node plays in.
    pub fn active_games(&self) -> Vec<GameState> {
        self.ledger.active_games_of(&self.me)
    }
}
