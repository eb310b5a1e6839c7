//! Property-based invariant tests for the rules engine.
//!
//! Uses proptest to generate seeds, plays full games with seeded random
//! action selection, and verifies core invariants at every step.

use azul_engine::{
    legal_actions, ActionCatalog, GameConfig, GameError, GameState, Phase, Wall,
};
use proptest::prelude::*;

const MAX_STEPS: u32 = 2_000;

/// Pick a "random" action deterministically from seed + counter.
fn pick<T: Copy>(seed: u64, counter: u64, items: &[T]) -> T {
    let idx = seed.wrapping_mul(counter.wrapping_add(7)).wrapping_add(counter) as usize % items.len();
    items[idx]
}

fn new_game(num_players: usize, seed: u64) -> GameState {
    GameState::new(&GameConfig::standard(num_players).unwrap(), seed).unwrap()
}

/// Every occupied cell of `before` is still occupied with the same color.
fn wall_extends(before: &Wall, after: &Wall) -> bool {
    let n = before.size();
    (0..n).all(|r| {
        (0..n).all(|c| match before.get(r, c) {
            Some(color) => after.get(r, c) == Some(color),
            None => true,
        })
    })
}

fn check_static_invariants(state: &GameState) -> Result<(), TestCaseError> {
    let rules = state.rules();

    prop_assert!(state.check_tile_conservation(), "tile counts {:?}", state.tile_counts());
    prop_assert!(state.current_player() < state.num_players());

    for board in state.players() {
        for (row, line) in board.pattern_lines.iter().enumerate() {
            prop_assert!(line.count <= row + 1, "line {row} over capacity");
            prop_assert_eq!(line.count == 0, line.color.is_none());
        }
        let n = board.wall.size();
        for r in 0..n {
            for c in 0..n {
                if let Some(color) = board.wall.get(r, c) {
                    prop_assert_eq!(color, rules.wall_color(r, c));
                }
            }
        }
    }

    let offer_empty =
        state.factories().iter().all(|f| f.tiles.is_empty()) && state.center().tiles.is_empty();
    prop_assert_eq!(state.is_round_over(), offer_empty);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Conservation, monochrome lines, wall write-once and termination,
    /// checked across random legal games.
    #[test]
    fn game_invariants_hold(seed in 0u64..1_000_000, num_players in 2usize..=3) {
        let mut state = new_game(num_players, seed);
        let mut counter = 0u64;
        let mut steps = 0u32;

        while state.phase() == Phase::FactoryOffer && steps < MAX_STEPS {
            check_static_invariants(&state)?;

            // A round in progress always offers a move.
            prop_assert!(!state.is_round_over());
            let player = state.current_player();
            let legal = legal_actions(&state, player);
            prop_assert!(!legal.is_empty(), "seed {seed}: no legal actions at step {steps}");

            counter += 1;
            let action = pick(seed, counter, &legal);
            let walls: Vec<Wall> = state.players().iter().map(|p| p.wall.clone()).collect();

            match state.apply_action(player, action) {
                Ok(()) => {}
                // Supply can run dry with three players; not a rules bug.
                Err(GameError::SupplyExhausted { .. }) => break,
                Err(err) => prop_assert!(false, "seed {seed}: legal action {action} failed: {err}"),
            }

            for (before, board) in walls.iter().zip(state.players()) {
                prop_assert!(wall_extends(before, &board.wall));
            }
            steps += 1;
        }

        check_static_invariants(&state)?;
        prop_assert!(steps < MAX_STEPS, "seed {seed}: game did not terminate");
    }

    /// Arbitrary catalog actions either apply or leave the state untouched.
    #[test]
    fn rejected_actions_never_mutate(seed in 0u64..1_000_000, picks in prop::collection::vec(any::<u64>(), 1..40)) {
        let mut state = new_game(2, seed);
        let catalog = ActionCatalog::new(state.rules());
        let all: Vec<_> = catalog.actions().collect();

        for (i, p) in picks.into_iter().enumerate() {
            if state.phase() == Phase::GameOver {
                break;
            }
            let action = pick(p, i as u64, &all);
            let player = state.current_player();
            let before = state.clone();

            match state.validate(player, &action) {
                Ok(()) => {
                    prop_assert!(legal_actions(&before, player).contains(&action));
                    state.apply_action(player, action).map_err(|e| TestCaseError::fail(e.to_string()))?;
                }
                Err(reason) => {
                    prop_assert!(!legal_actions(&before, player).contains(&action));
                    prop_assert_eq!(state.apply_action(player, action), Err(reason.into()));
                    prop_assert_eq!(&state, &before);
                }
            }
        }
    }

    /// Projected scores are a pure query.
    #[test]
    fn projected_scores_are_pure(seed in 0u64..1_000_000, moves in 0usize..30) {
        let mut state = new_game(2, seed);
        for i in 0..moves {
            if state.phase() == Phase::GameOver {
                break;
            }
            let player = state.current_player();
            let legal = legal_actions(&state, player);
            state.apply_action(player, pick(seed, i as u64, &legal)).unwrap();
        }

        let before = state.clone();
        let first = state.projected_scores().unwrap();
        prop_assert_eq!(&state, &before);
        prop_assert_eq!(first, state.projected_scores().unwrap());
    }
}
