//! Core domain types for noughts and crosses.

use super::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;
use uuid::Uuid;

/// The mark a player writes on the board.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Crosses (moves first).
    #[display("X")]
    X,
    /// Noughts.
    #[display("O")]
    O,
}

/// A single cell of the board.
///
/// A cell is never unset; `Blank` is the explicit empty marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    Blank,
    /// Holds a player's mark.
    Marked(Mark),
}

impl Cell {
    /// Returns the mark held by this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Blank => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    /// Returns true for `Cell::Blank`.
    pub fn is_blank(self) -> bool {
        self == Cell::Blank
    }

    fn symbol(self) -> char {
        match self {
            Cell::Blank => '.',
            Cell::Marked(Mark::X) => 'X',
            Cell::Marked(Mark::O) => 'O',
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Marked(mark)
    }
}

/// 3x3 board in row-major order.
///
/// Boards are values: every move produces a new board and leaves the
/// original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an all-blank board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Blank; 9],
        }
    }

    /// Creates a board from raw cells (index 0 is the top-left corner).
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Returns the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if the cell at the given position is blank.
    pub fn is_blank(&self, pos: Position) -> bool {
        self.get(pos).is_blank()
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns a copy of this board with `mark` written at `pos`.
    ///
    /// Only blank cells are written. An occupied cell keeps its value and
    /// the returned board equals `self`; callers must not treat that as a
    /// successful move.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&self, mark: Mark, pos: Position) -> Board {
        let mut next = *self;
        if self.is_blank(pos) {
            next.cells[pos.to_index()] = Cell::Marked(mark);
        }
        next
    }

    /// Number of blank cells (0-9).
    pub fn blank_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blank()).count()
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Marked(mark))
            .count()
    }

    /// Returns true if no cell holds a mark.
    pub fn is_empty(&self) -> bool {
        self.blank_count() == 9
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Blank cells show their index so a player can pick one.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Blank => pos.to_string(),
                    Cell::Marked(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: String = self.cells.iter().map(|c| c.symbol()).collect();
        write!(f, "{}", text)
    }
}

/// Error returned when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// A character that is not a mark, a blank or a separator.
    #[display("Invalid board symbol {:?}", _0)]
    InvalidSymbol(char),
    /// The text did not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `X`, `O` and `.`/`U`/`_` (blank); whitespace, `|` and `/` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for ch in s.chars() {
            let cell = match ch.to_ascii_uppercase() {
                'X' => Cell::Marked(Mark::X),
                'O' => Cell::Marked(Mark::O),
                '.' | 'U' | '_' => Cell::Blank,
                c if c.is_whitespace() || c == '|' || c == '/' => continue,
                other => return Err(BoardParseError::InvalidSymbol(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|rest: Vec<Cell>| BoardParseError::WrongLength(rest.len()))?;
        Ok(Board::from_cells(cells))
    }
}

/// Result of evaluating a board.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line complete and blanks remain.
    #[display("in progress")]
    InProgress,
    /// Crosses completed a line.
    #[display("X wins")]
    XWins,
    /// Noughts completed a line.
    #[display("O wins")]
    OWins,
    /// Board full without a complete line.
    #[display("draw")]
    Draw,
}

impl Outcome {
    /// Outcome of `mark` completing a line.
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => Outcome::XWins,
            Mark::O => Outcome::OWins,
        }
    }

    /// Returns true once the game can no longer be played.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Identity of a participant.
///
/// Opaque to the contract: only equality and hashing are relied upon.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Party(String);

impl Party {
    /// Creates a party from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the party's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Party {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identifier shared by every version of one logical game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[display("{_0}")]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh, globally unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GameId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
