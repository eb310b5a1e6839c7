//! Azul Game Engine
//!
//! Rules engine for a configurable Azul: any number of players, factories
//! and colors, with the wall layout and floor penalties supplied by
//! [`GameConfig`]. The aggregate root is [`GameState`]; [`legal_actions`]
//! enumerates moves and [`ActionCatalog`] maps them to dense indices.

mod action;
mod action_catalog;
mod board;
mod color;
mod config;
mod error;
mod legal;
mod state;
mod supply;

/// Index into the players array: 0..num_players-1
pub type PlayerIdx = usize;

pub use action::{Action, DraftDestination, DraftSource};
pub use action_catalog::{ActionCatalog, ActionId};
pub use board::{
    end_game_bonus, floor_penalty, score_placement, FloorLine, PatternLine, PlayerBoard, Token,
    Wall,
};
pub use color::{Color, TileColorMapping, MAX_COLORS};
pub use config::{
    GameConfig, Rules, DEFAULT_FACTORY_CAPACITY, DEFAULT_FLOOR_PENALTIES, DEFAULT_MAX_ROUNDS,
    DEFAULT_TILES_PER_COLOR, STANDARD_COLORS,
};
pub use error::{ConfigError, GameError, IllegalAction};
pub use legal::legal_actions;
pub use state::{CenterPool, Factory, GameState, Phase};
pub use supply::TileSupply;
