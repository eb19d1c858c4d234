//! Versioned game state.
//!
//! A `GameState` is one immutable version of a game. Playing produces the
//! next version, which keeps the same [`GameId`]; the chain of versions is
//! kept by whoever stores them, never by the state itself.

use super::rules::check_outcome;
use super::{Board, GameId, Mark, Outcome, Party, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One version of a game between two parties.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// Player holding crosses (moves first).
    player_x: Party,
    /// Player holding noughts.
    player_o: Party,
    /// The board.
    board: Board,
    /// Whoever produced the current board; `None` before the first move.
    turn: Option<Party>,
    /// Outcome declared for this version.
    outcome: Outcome,
    /// Shared by every version of this game.
    id: GameId,
}

impl GameState {
    /// Creates the first version of a new game.
    #[instrument(skip(player_x, player_o), fields(player_x = %player_x, player_o = %player_o))]
    pub fn new(player_x: Party, player_o: Party) -> Self {
        let id = GameId::new();
        debug!(game_id = %id, "New game state");
        Self::with_id(id, player_x, player_o)
    }

    /// Creates the first version of a game with a caller-supplied id.
    pub fn with_id(id: GameId, player_x: Party, player_o: Party) -> Self {
        Self {
            player_x,
            player_o,
            board: Board::new(),
            turn: None,
            outcome: Outcome::InProgress,
            id,
        }
    }

    /// Both participants, crosses first.
    pub fn participants(&self) -> [&Party; 2] {
        [&self.player_x, &self.player_o]
    }

    /// Returns true if `party` is one of the two players.
    pub fn is_participant(&self, party: &Party) -> bool {
        self.participants().contains(&party)
    }

    /// Returns the mark assigned to `party`.
    pub fn mark_of(&self, party: &Party) -> Option<Mark> {
        if *party == self.player_x {
            Some(Mark::X)
        } else if *party == self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Returns true once the outcome is decided.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Builds the next version with `mover`'s mark written at `position`.
    ///
    /// The outcome is recomputed from the new board. Anyone other than
    /// `player_x` is treated as the noughts side; the contract decides
    /// whether the proposal is legal.
    #[instrument(skip(self, mover), fields(game_id = %self.id, mover = %mover))]
    pub fn play(&self, mover: &Party, position: Position) -> GameState {
        let mark = self.mark_of(mover).unwrap_or(Mark::O);
        let board = self.board.apply_move(mark, position);
        let outcome = check_outcome(&board);
        debug!(%mark, %position, %outcome, "Proposed next version");
        GameState {
            board,
            turn: Some(mover.clone()),
            outcome,
            ..self.clone()
        }
    }

    /// Replaces the board, keeping everything else.
    pub fn with_board(self, board: Board) -> Self {
        Self { board, ..self }
    }

    /// Replaces the last mover, keeping everything else.
    pub fn with_turn(self, turn: Option<Party>) -> Self {
        Self { turn, ..self }
    }

    /// Replaces the declared outcome, keeping everything else.
    pub fn with_outcome(self, outcome: Outcome) -> Self {
        Self { outcome, ..self }
    }

    /// Replaces the players, keeping everything else.
    pub fn with_players(self, player_x: Party, player_o: Party) -> Self {
        Self {
            player_x,
            player_o,
            ..self
        }
    }

    /// Replaces the game id, keeping everything else.
    pub fn with_game_id(self, id: GameId) -> Self {
        Self { id, ..self }
    }
}
