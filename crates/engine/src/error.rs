//! Error taxonomy for configuration and state transitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::{Color, PlayerIdx};

/// Settings are missing or invalid. Fatal at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    MissingKey(&'static str),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to read settings from {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Why an action was rejected. The state is never mutated when this is returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum IllegalAction {
    #[error("the game is over")]
    GameOver,

    #[error("it is player {expected}'s turn, not player {actual}'s")]
    NotPlayersTurn {
        expected: PlayerIdx,
        actual: PlayerIdx,
    },

    #[error("factory {0} does not exist")]
    NoSuchFactory(usize),

    #[error("color {0} is not configured")]
    UnknownColor(Color),

    #[error("pattern line {0} does not exist")]
    NoSuchPatternLine(usize),

    #[error("no tiles of color {0} at the chosen source")]
    ColorNotAtSource(Color),

    #[error("pattern line {row} already holds color {held}")]
    LineHoldsOtherColor { row: usize, held: Color },

    #[error("pattern line {0} is full")]
    LineFull(usize),

    #[error("wall row {row} already holds color {color}")]
    ColorAlreadyOnWall { row: usize, color: Color },

    #[error("the drafting round still has tiles on offer")]
    RoundInProgress,
}

/// Errors raised by the rules engine.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    /// Bag and discard are both empty when a draw is required. Tiles leaked
    /// somewhere upstream; `state` holds the rendered state for diagnosis.
    #[error("tile supply exhausted: bag and discard pile are both empty\n{state}")]
    SupplyExhausted { state: String },

    /// Wall tiling would overwrite an occupied cell.
    #[error("wall conflict for player {player}: row {row}, column {col} is already occupied")]
    WallConflict {
        player: PlayerIdx,
        row: usize,
        col: usize,
    },
}
