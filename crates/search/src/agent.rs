//! Agent API for action selection

use azul_engine::{legal_actions, Action, GameState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::MinimaxAgent;

/// Anything that can choose moves for the player to move: the search agent,
/// a random policy, or human input.
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose a legal action for `state.current_player()`.
    ///
    /// `None` means the agent has no move to offer (the caller treats it as a pass).
    fn select_action(&mut self, state: &GameState) -> Option<Action>;
}

/// Random agent that uniformly samples from legal actions
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, state: &GameState) -> Option<Action> {
        let legal = legal_actions(state, state.current_player());
        if legal.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..legal.len());
        Some(legal[idx])
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_action(&mut self, state: &GameState) -> Option<Action> {
        self.find_optimal_move(state, state.current_player())
    }
}
