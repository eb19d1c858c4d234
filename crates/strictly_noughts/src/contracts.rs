//! Contract-based validation of game transitions.
//!
//! Each rule is a small unit with a `check` returning the rejection it
//! guards against. [`GameContract`] runs them in a fixed order per
//! transition kind and reports the first failure.

use super::rules::{blank_count, check_outcome, mark_added};
use super::transition::{Signers, Transition};
use super::{Cell, GameState, Mark, Outcome, Rejection};
use tracing::{debug, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Decides whether a proposed transition may be committed.
///
/// Implementations are pure: the same transition and signers always give
/// the same answer, and nothing is mutated.
pub trait Contract {
    /// Accepts the transition or returns the first violated rule.
    fn verify(&self, transition: &Transition, signers: &Signers) -> Result<(), Rejection>;
}

// ─────────────────────────────────────────────────────────────
//  Shared rules
// ─────────────────────────────────────────────────────────────

/// Both players must be different identities.
pub struct DistinctPlayers;

impl DistinctPlayers {
    /// Checks the rule.
    pub fn check(state: &GameState) -> Result<(), Rejection> {
        if state.player_x() == state.player_o() {
            Err(Rejection::SamePlayers)
        } else {
            Ok(())
        }
    }
}

/// The signer set must be exactly the two players.
///
/// Duplicates collapse under set semantics, so order and repetition do
/// not matter.
pub struct SignedByBothPlayers;

impl SignedByBothPlayers {
    /// Checks the rule, reporting `rejection` on failure.
    pub fn check(
        signers: &Signers,
        state: &GameState,
        rejection: Rejection,
    ) -> Result<(), Rejection> {
        let [x, o] = state.participants();
        let exact = signers.len() == if x == o { 1 } else { 2 }
            && signers.contains(x)
            && signers.contains(o);
        if exact { Ok(()) } else { Err(rejection) }
    }
}

// ─────────────────────────────────────────────────────────────
//  Create rules
// ─────────────────────────────────────────────────────────────

/// A new game starts blank and undecided.
pub struct FreshGame;

impl FreshGame {
    /// Checks the rule.
    pub fn check(output: &GameState) -> Result<(), Rejection> {
        if *output.outcome() == Outcome::InProgress && output.board().is_empty() {
            Ok(())
        } else {
            Err(Rejection::NotFreshGame)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Play rules
// ─────────────────────────────────────────────────────────────

/// The consumed version must still be in progress.
pub struct InputInProgress;

impl InputInProgress {
    /// Checks the rule.
    pub fn check(input: &GameState) -> Result<(), Rejection> {
        match *input.outcome() {
            Outcome::InProgress => Ok(()),
            finished => Err(Rejection::GameFinished(finished)),
        }
    }
}

/// Players and game id carry over unchanged.
pub struct IdentityPreserved;

impl IdentityPreserved {
    /// Checks the rule.
    pub fn check(input: &GameState, output: &GameState) -> Result<(), Rejection> {
        if input.player_x() == output.player_x()
            && input.player_o() == output.player_o()
            && input.id() == output.id()
        {
            Ok(())
        } else {
            Err(Rejection::IdentityChanged)
        }
    }
}

/// Strictly fewer blank cells after the move.
///
/// Also catches no-op moves and attempts to overwrite a mark.
pub struct BlankCellMarked;

impl BlankCellMarked {
    /// Checks the rule.
    pub fn check(input: &GameState, output: &GameState) -> Result<(), Rejection> {
        if blank_count(output.board()) < blank_count(input.board()) {
            Ok(())
        } else {
            Err(Rejection::NoMarkPlaced)
        }
    }
}

/// The mark added belongs to the mover recorded in `output.turn`.
pub struct MoverPlaysOwnMark;

impl MoverPlaysOwnMark {
    /// Checks the rule.
    pub fn check(input: &GameState, output: &GameState) -> Result<(), Rejection> {
        let expected = if output.turn().as_ref() == Some(output.player_x()) {
            Mark::X
        } else {
            Mark::O
        };
        let found = mark_added(input.board(), output.board());
        if found == Cell::Marked(expected) {
            Ok(())
        } else {
            Err(Rejection::WrongSymbol { expected, found })
        }
    }
}

/// The mover differs from whoever moved last.
pub struct TurnsAlternate;

impl TurnsAlternate {
    /// Checks the rule.
    pub fn check(input: &GameState, output: &GameState) -> Result<(), Rejection> {
        if input.turn() != output.turn() {
            Ok(())
        } else {
            Err(Rejection::SameMoverTwice)
        }
    }
}

/// The declared outcome is the one the board supports.
pub struct OutcomeMatchesBoard;

impl OutcomeMatchesBoard {
    /// Checks the rule.
    pub fn check(output: &GameState) -> Result<(), Rejection> {
        let actual = check_outcome(output.board());
        let declared = *output.outcome();
        if declared == actual {
            Ok(())
        } else {
            Err(Rejection::OutcomeMismatch { declared, actual })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Game Contract
// ─────────────────────────────────────────────────────────────

/// Rules governing the noughts and crosses game chain.
///
/// Create:
/// 1. Players are distinct
/// 2. Board blank, outcome in progress
/// 3. Signed by exactly both players
///
/// Play:
/// 1. Input still in progress
/// 2. Players and id unchanged
/// 3. Blank count strictly decreases
/// 4. Mark added matches the mover's role
/// 5. Mover differs from the previous mover
/// 6. Declared outcome matches the board
/// 7. Signed by both players
///
/// EndGame: always accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameContract;

impl GameContract {
    /// Checks a Create transition.
    pub fn verify_create(output: &GameState, signers: &Signers) -> Result<(), Rejection> {
        DistinctPlayers::check(output)?;
        FreshGame::check(output)?;
        SignedByBothPlayers::check(signers, output, Rejection::CreateSigners)?;
        Ok(())
    }

    /// Checks a Play transition.
    pub fn verify_play(
        input: &GameState,
        output: &GameState,
        signers: &Signers,
    ) -> Result<(), Rejection> {
        InputInProgress::check(input)?;
        IdentityPreserved::check(input, output)?;
        BlankCellMarked::check(input, output)?;
        MoverPlaysOwnMark::check(input, output)?;
        TurnsAlternate::check(input, output)?;
        OutcomeMatchesBoard::check(output)?;
        SignedByBothPlayers::check(signers, input, Rejection::PlaySigners)?;
        Ok(())
    }

    /// Checks an EndGame transition.
    ///
    /// Retiring a game imposes no rule at this layer, not even that the
    /// input is finished.
    pub fn verify_end_game(_input: &GameState, _signers: &Signers) -> Result<(), Rejection> {
        Ok(())
    }
}

impl Contract for GameContract {
    #[instrument(skip_all, fields(kind = %transition.kind(), game_id = %transition.game_id()))]
    fn verify(&self, transition: &Transition, signers: &Signers) -> Result<(), Rejection> {
        let result = match transition {
            Transition::Create { output } => Self::verify_create(output, signers),
            Transition::Play { input, output } => Self::verify_play(input, output, signers),
            Transition::EndGame { input } => Self::verify_end_game(input, signers),
        };

        match &result {
            Ok(()) => debug!("Transition accepted"),
            Err(rejection) => warn!(%rejection, kind = %rejection.kind(), "Transition rejected"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Party, Position, RejectionKind};

    fn alice() -> Party {
        Party::new("Alice")
    }

    fn bob() -> Party {
        Party::new("Bob")
    }

    fn both() -> Signers {
        Signers::from([alice(), bob()])
    }

    #[test]
    fn test_create_accepted() {
        let output = GameState::new(alice(), bob());
        assert_eq!(GameContract.verify(&Transition::Create { output }, &both()), Ok(()));
    }

    #[test]
    fn test_create_with_winner_rejected() {
        let output = GameState::new(alice(), bob()).with_outcome(Outcome::XWins);
        assert_eq!(
            GameContract.verify(&Transition::Create { output }, &both()),
            Err(Rejection::NotFreshGame)
        );
    }

    #[test]
    fn test_create_with_marks_rejected() {
        let output = GameState::new(alice(), bob())
            .with_board(crate::Board::new().apply_move(Mark::X, Position::Center));
        let rejection = GameContract
            .verify(&Transition::Create { output }, &both())
            .unwrap_err();
        assert_eq!(rejection.kind(), RejectionKind::IllegalBoardMutation);
    }

    #[test]
    fn test_create_signer_variants() {
        let output = GameState::new(alice(), bob());
        let create = Transition::Create { output };
        let carl = Party::new("Carl");

        for signers in [
            Signers::from([alice()]),
            Signers::from([bob()]),
            Signers::from([alice(), carl.clone()]),
            Signers::from([alice(), bob(), carl]),
            Signers::new(),
        ] {
            assert_eq!(
                GameContract.verify(&create, &signers),
                Err(Rejection::CreateSigners)
            );
        }

        let repeated: Signers = [bob(), alice(), bob()].into_iter().collect();
        assert_eq!(GameContract.verify(&create, &repeated), Ok(()));
    }

    #[test]
    fn test_play_by_outsider_rejected_on_signers() {
        let input = GameState::new(alice(), bob());
        let carl = Party::new("Carl");
        // An outsider writes noughts first, so the symbol rule passes and turn order passes.
        let output = input.play(&carl, Position::Center);
        let signers = Signers::from([alice(), carl]);
        assert_eq!(
            GameContract.verify(&Transition::Play { input, output }, &signers),
            Err(Rejection::PlaySigners)
        );
    }

    #[test]
    fn test_play_changing_players_rejected() {
        let input = GameState::new(alice(), bob());
        let output = input
            .play(&alice(), Position::Center)
            .with_players(alice(), Party::new("Carl"));
        assert_eq!(
            GameContract.verify(&Transition::Play { input, output }, &both()),
            Err(Rejection::IdentityChanged)
        );
    }

    #[test]
    fn test_play_changing_id_rejected() {
        let input = GameState::new(alice(), bob());
        let output = input
            .play(&alice(), Position::Center)
            .with_game_id(crate::GameId::new());
        assert_eq!(
            GameContract.verify(&Transition::Play { input, output }, &both()),
            Err(Rejection::IdentityChanged)
        );
    }

    #[test]
    fn test_end_game_always_accepted() {
        let input = GameState::new(alice(), bob());
        assert_eq!(
            GameContract.verify(&Transition::EndGame { input }, &Signers::new()),
            Ok(())
        );
    }

    #[test]
    fn test_first_violation_wins() {
        // Finished input, changed players and bad signers: the finished check fires first.
        let input = GameState::new(alice(), bob()).with_outcome(Outcome::Draw);
        let output = input.clone().with_players(bob(), alice());
        assert_eq!(
            GameContract.verify(&Transition::Play { input, output }, &Signers::new()),
            Err(Rejection::GameFinished(Outcome::Draw))
        );
    }
}
