//! Scenario configuration: a scripted game loaded from TOML.
//!
//! ```toml
//! player_x = "Alice"
//! player_o = "Bob"
//! moves = [4, 0, 8, [2, 0], "bottom-center"]
//! end_game = true
//! ```

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_noughts::{Party, Position};
use tracing::{debug, info, instrument};

/// One scripted move: a raw index (0-8), an `[x, y]` coordinate or a
/// position label such as `"top-left"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveSpec {
    /// Row-major index.
    Index(usize),
    /// Grid coordinate, `[0, 0]` being the top-left corner.
    Coords([usize; 2]),
    /// Position label, case-insensitive.
    Label(String),
}

impl MoveSpec {
    /// Resolves the move to a board position.
    pub fn position(&self) -> Option<Position> {
        match self {
            MoveSpec::Index(index) => Position::from_index(*index),
            MoveSpec::Coords([x, y]) => Position::from_coords(*x, *y),
            MoveSpec::Label(label) => Position::from_label_or_number(label),
        }
    }
}

impl std::fmt::Display for MoveSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveSpec::Index(index) => write!(f, "{}", index),
            MoveSpec::Coords([x, y]) => write!(f, "[{}, {}]", x, y),
            MoveSpec::Label(label) => write!(f, "{:?}", label),
        }
    }
}

/// A game to replay through the ledger.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Party playing crosses; creates the game.
    player_x: String,

    /// Party playing noughts.
    player_o: String,

    /// Moves in order; each is played by whoever's turn it is.
    #[serde(default)]
    moves: Vec<MoveSpec>,

    /// Retire the game after the last move.
    #[serde(default)]
    end_game: bool,
}

impl ScenarioConfig {
    /// Creates a scenario.
    pub fn new(
        player_x: impl Into<String>,
        player_o: impl Into<String>,
        moves: Vec<MoveSpec>,
        end_game: bool,
    ) -> Self {
        Self {
            player_x: player_x.into(),
            player_o: player_o.into(),
            moves,
            end_game,
        }
    }

    /// Loads a scenario from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading scenario from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read scenario file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses a scenario from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse scenario: {}", e)))?;

        if config.player_x.trim().is_empty() || config.player_o.trim().is_empty() {
            return Err(ConfigError::new("Player names must not be empty"));
        }

        info!(
            player_x = %config.player_x,
            player_o = %config.player_o,
            moves = config.moves.len(),
            "Scenario loaded"
        );
        Ok(config)
    }

    /// Party playing crosses.
    pub fn party_x(&self) -> Party {
        Party::new(self.player_x.as_str())
    }

    /// Party playing noughts.
    pub fn party_o(&self) -> Party {
        Party::new(self.player_o.as_str())
    }
}
