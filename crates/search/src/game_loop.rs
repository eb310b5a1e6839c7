//! Drives agents against an authoritative game state.

use azul_engine::{Action, GameError, GameState, Phase, PlayerIdx};
use tracing::{info, warn};

use crate::Agent;

/// What happened in one game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub moves: Vec<(PlayerIdx, Action)>,
    pub final_scores: Vec<i32>,
    pub rounds: u32,
    /// False when an agent passed before the game ended.
    pub completed: bool,
}

impl GameRecord {
    /// Players holding the top score.
    pub fn winners(&self) -> Vec<PlayerIdx> {
        let Some(&best) = self.final_scores.iter().max() else {
            return Vec::new();
        };
        self.final_scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == best)
            .map(|(p, _)| p)
            .collect()
    }
}

/// Reset `state` and play it out, agent `i` moving for player `i`.
///
/// An agent that returns no move ends the game early; engine errors
/// propagate unchanged.
///
/// # Panics
///
/// Panics if `agents.len()` differs from the number of players in `state`.
pub fn play_game(
    state: &mut GameState,
    agents: &mut [Box<dyn Agent + '_>],
) -> Result<GameRecord, GameError> {
    assert_eq!(
        agents.len(),
        state.num_players(),
        "one agent per player is required"
    );

    state.reset();
    let mut moves = Vec::new();
    let mut round = state.round();
    let mut completed = true;

    while state.phase() == Phase::FactoryOffer {
        let player = state.current_player();
        let agent = &mut agents[player];

        let Some(action) = agent.select_action(state) else {
            warn!(player, agent = agent.name(), round = state.round(), "agent passed; stopping game");
            completed = false;
            break;
        };

        state.apply_action(player, action)?;
        moves.push((player, action));

        if state.round() != round || state.phase() == Phase::GameOver {
            info!(round, scores = ?state.scores(), "round resolved");
            round = state.round();
        }
    }

    let record = GameRecord {
        moves,
        final_scores: state.scores(),
        rounds: state.round(),
        completed,
    };
    info!(
        rounds = record.rounds,
        moves = record.moves.len(),
        scores = ?record.final_scores,
        winners = ?record.winners(),
        "game finished"
    );
    Ok(record)
}
