//! Transposition table keyed by a canonical snapshot of the game state.

use std::collections::HashMap;

use azul_engine::{Action, GameState, PlayerBoard, PlayerIdx};

/// Cache key: everything a search node's value depends on.
///
/// Factories and the center are reduced to per-color counts, so tile order
/// within a display does not split entries.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateKey {
    factories: Vec<Vec<u16>>,
    center: Vec<u16>,
    first_player_token: bool,
    boards: Vec<PlayerBoard>,
    to_move: PlayerIdx,
    round: u32,
    depth: u32,
}

impl StateKey {
    pub fn new(state: &GameState, depth: u32) -> Self {
        let colors = state.rules().colors();
        // A color never exceeds `tiles_per_color: u16` tiles in one place.
        let counts = |tiles: &[azul_engine::Color]| -> Vec<u16> {
            let mut counts = vec![0u16; colors.len()];
            for tile in tiles {
                counts[tile.index()] += 1;
            }
            counts
        };

        StateKey {
            factories: state.factories().iter().map(|f| counts(&f.tiles)).collect(),
            center: counts(&state.center().tiles),
            first_player_token: state.center().first_player_token,
            boards: state.players().to_vec(),
            to_move: state.current_player(),
            round: state.round(),
            depth,
        }
    }
}

/// How a stored score relates to the node's true value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Bound {
    Exact,
    /// Failed high: true value >= score.
    Lower,
    /// Failed low: true value <= score.
    Upper,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry {
    pub score: f64,
    pub best_move: Option<Action>,
    pub bound: Bound,
}

impl Entry {
    /// Classify `score` against the window the node was searched with.
    pub fn from_window(score: f64, best_move: Option<Action>, alpha: f64, beta: f64) -> Self {
        let bound = if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Entry {
            score,
            best_move,
            bound,
        }
    }

    /// Whether this entry settles a node searched with `(alpha, beta)`.
    pub fn is_conclusive(&self, alpha: f64, beta: f64) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

/// Per-search cache. Owned by exactly one searcher; workers fill their own
/// tables and the owner merges them.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<StateKey, Entry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StateKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: StateKey, entry: Entry) {
        self.entries.insert(key, entry);
    }

    /// Absorb a worker's table. Exact entries win over bounds.
    pub fn merge(&mut self, other: TranspositionTable) {
        for (key, entry) in other.entries {
            match self.entries.get(&key) {
                Some(existing) if existing.bound == Bound::Exact && entry.bound != Bound::Exact => {}
                _ => {
                    self.entries.insert(key, entry);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azul_engine::{legal_actions, GameConfig};

    fn game() -> GameState {
        GameState::new(&GameConfig::standard(2).unwrap(), 21).unwrap()
    }

    #[test]
    fn test_key_distinguishes_depth_and_moves() {
        let state = game();
        assert_eq!(StateKey::new(&state, 2), StateKey::new(&state.clone(), 2));
        assert_ne!(StateKey::new(&state, 2), StateKey::new(&state, 1));

        let action = legal_actions(&state, 0)[0];
        let next = state.clone().play(0, action).unwrap();
        assert_ne!(StateKey::new(&state, 2), StateKey::new(&next, 2));
    }

    #[test]
    fn test_key_counts_oversized_factories() {
        let mut config = GameConfig::new(2, 1, &["red"]);
        config.factory_capacity = 300;
        config.tiles_per_color = 400;
        let state = GameState::new(&config, 0).unwrap();
        assert_eq!(state.factories()[0].tiles.len(), 300);

        let key = StateKey::new(&state, 1);
        assert_eq!(key.factories, vec![vec![300]]);

        let action = legal_actions(&state, 0)[0];
        let next = state.clone().play(0, action).unwrap();
        assert_ne!(StateKey::new(&next, 1), key);
    }

    #[test]
    fn test_bound_classification() {
        assert_eq!(Entry::from_window(5.0, None, 0.0, 10.0).bound, Bound::Exact);
        assert_eq!(Entry::from_window(0.0, None, 0.0, 10.0).bound, Bound::Upper);
        assert_eq!(Entry::from_window(12.0, None, 0.0, 10.0).bound, Bound::Lower);

        let lower = Entry::from_window(12.0, None, 0.0, 10.0);
        assert!(lower.is_conclusive(0.0, 11.0));
        assert!(!lower.is_conclusive(0.0, 20.0));

        let upper = Entry::from_window(-3.0, None, 0.0, 10.0);
        assert!(upper.is_conclusive(-2.0, 10.0));
        assert!(!upper.is_conclusive(-5.0, 10.0));
    }

    #[test]
    fn test_merge_keeps_exact_entries() {
        let state = game();
        let key = StateKey::new(&state, 1);

        let mut owner = TranspositionTable::new();
        owner.insert(key.clone(), Entry::from_window(3.0, None, 0.0, 10.0));

        let mut worker = TranspositionTable::new();
        worker.insert(key.clone(), Entry::from_window(20.0, None, 0.0, 10.0));
        worker.insert(StateKey::new(&state, 2), Entry::from_window(1.0, None, 0.0, 10.0));

        owner.merge(worker);
        assert_eq!(owner.len(), 2);
        assert_eq!(owner.get(&key).unwrap().score, 3.0);
    }
}
