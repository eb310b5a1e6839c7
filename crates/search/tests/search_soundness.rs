//! Alpha-beta with memoization must agree with plain full-width minimax on
//! trees small enough to enumerate.

use std::time::Duration;

use azul_engine::{legal_actions, GameConfig, GameState, Phase, PlayerIdx};
use azul_search::{evaluate, MinimaxAgent, SearchConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 2 players, 2 factories, 2 colors.
fn tiny_game(seed: u64) -> GameState {
    GameState::new(&GameConfig::new(2, 2, &["red", "blue"]), seed).unwrap()
}

/// Play `moves` random legal moves from a fresh game.
fn advanced_game(seed: u64, moves: usize) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = tiny_game(seed);
    for _ in 0..moves {
        if state.phase() == Phase::GameOver {
            break;
        }
        let player = state.current_player();
        let legal = legal_actions(&state, player);
        let action = legal[rng.random_range(0..legal.len())];
        state.apply_action(player, action).unwrap();
    }
    state
}

/// Full-width minimax with the same leaf rules as the agent: stop at depth
/// zero, at the end of the root's round, or at game over.
fn brute_force(
    state: &GameState,
    depth: u32,
    maximizer: PlayerIdx,
    root_round: u32,
    is_root: bool,
) -> Option<f64> {
    let round_ended = state.round() != root_round || state.phase() == Phase::GameOver;
    if !is_root && (depth == 0 || round_ended) {
        return evaluate(state, maximizer);
    }

    let player = state.current_player();
    let values: Vec<f64> = legal_actions(state, player)
        .into_iter()
        .filter_map(|mv| state.clone().play(player, mv).ok())
        .filter_map(|child| brute_force(&child, depth - 1, maximizer, root_round, false))
        .collect();

    if values.is_empty() {
        return if is_root { None } else { evaluate(state, maximizer) };
    }
    let fold = if player == maximizer { f64::max } else { f64::min };
    values.into_iter().reduce(fold)
}

fn agent(depth: u32, parallel: bool) -> MinimaxAgent {
    MinimaxAgent::new(SearchConfig {
        max_depth: depth,
        time_limit: Duration::from_secs(120),
        parallel,
        num_threads: Some(4),
    })
    .unwrap()
}

fn assert_matches_brute_force(state: &GameState, depth: u32) {
    let player = state.current_player();
    let expected = brute_force(state, depth, player, state.round(), true).unwrap();

    for parallel in [false, true] {
        let mut agent = agent(depth, parallel);
        let outcome = agent.search(state, player).unwrap();
        assert!(!outcome.stats.timed_out());
        assert_eq!(
            outcome.score, expected,
            "depth {depth}, parallel {parallel}, state:\n{state}"
        );

        // The chosen move must itself achieve the root value.
        let child = state.clone().play(player, outcome.action).unwrap();
        let achieved = brute_force(&child, depth - 1, player, state.round(), false);
        assert_eq!(achieved, Some(expected), "depth {depth}, parallel {parallel}");
    }
}

#[test]
fn depth_two_matches_brute_force() {
    for seed in 0..10 {
        assert_matches_brute_force(&tiny_game(seed), 2);
    }
}

#[test]
fn deeper_searches_match_brute_force() {
    for seed in 0..4 {
        assert_matches_brute_force(&tiny_game(seed), 3);
        assert_matches_brute_force(&tiny_game(seed), 4);
    }
}

#[test]
fn mid_round_positions_match_brute_force() {
    for seed in 0..6 {
        for moves in [1, 2, 3, 5] {
            let state = advanced_game(seed, moves);
            if state.phase() == Phase::GameOver {
                continue;
            }
            assert_matches_brute_force(&state, 3);
        }
    }
}

#[test]
fn repeated_searches_return_the_same_move() {
    for seed in 0..5 {
        let state = tiny_game(seed);
        for parallel in [false, true] {
            let mut agent = agent(3, parallel);
            let first = agent.find_optimal_move(&state, 0).unwrap();
            let second = agent.find_optimal_move(&state, 0).unwrap();
            assert_eq!(first, second, "seed {seed}, parallel {parallel}");

            let fresh = self::agent(3, parallel).find_optimal_move(&state, 0).unwrap();
            assert_eq!(first, fresh);
        }
    }
}

#[test]
fn transpositions_hit_the_cache() {
    // Four factories give move orders that commute.
    let config = GameConfig::new(2, 4, &["red", "blue"]);
    let (mut hits, mut cutoffs) = (0, 0);

    for seed in 0..3 {
        let state = GameState::new(&config, seed).unwrap();
        let mut agent = agent(4, false);
        agent.find_optimal_move(&state, 0).unwrap();

        let stats = agent.last_stats();
        assert!(stats.achieved_depth <= 4, "{stats}");
        hits += stats.cache_hits;
        cutoffs += stats.cutoffs;
    }
    assert!(hits > 0);
    assert!(cutoffs > 0);
}
