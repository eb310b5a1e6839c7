//! Search agents for Azul
//!
//! This crate provides:
//! - `MinimaxAgent`: depth-limited, time-bounded alpha-beta with a
//!   per-call transposition table and rayon-parallel sibling evaluation
//! - the `Agent` trait and `RandomAgent`
//! - `play_game`, a loop that drives agents against a `GameState`

mod agent;
mod game_loop;
mod heuristic;
mod minimax;
mod stats;
mod transposition;

pub use agent::{Agent, RandomAgent};
pub use game_loop::{play_game, GameRecord};
pub use heuristic::evaluate;
pub use minimax::{MinimaxAgent, SearchConfig, SearchError, SearchOutcome};
pub use stats::SearchStats;
pub use transposition::{Bound, Entry, StateKey, TranspositionTable};
