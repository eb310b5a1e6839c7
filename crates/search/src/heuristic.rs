use azul_engine::{GameState, PlayerIdx};

/// One-step lookahead: resolve the round hypothetically and return the
/// maximizer's projected score minus the mean projected score of everyone
/// else. `None` if the position cannot be resolved.
pub fn evaluate(state: &GameState, maximizer: PlayerIdx) -> Option<f64> {
    let scores = state.projected_scores().ok()?;
    let own = *scores.get(maximizer)? as f64;

    let opponents: Vec<f64> = scores
        .iter()
        .enumerate()
        .filter(|&(p, _)| p != maximizer)
        .map(|(_, &s)| s as f64)
        .collect();
    if opponents.is_empty() {
        return Some(own);
    }

    let mean = opponents.iter().sum::<f64>() / opponents.len() as f64;
    Some(own - mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azul_engine::{Action, DraftDestination, DraftSource, GameConfig};

    #[test]
    fn test_fresh_game_is_even() {
        let state = GameState::new(&GameConfig::standard(3).unwrap(), 1).unwrap();
        assert_eq!(evaluate(&state, 0), Some(0.0));
        assert_eq!(evaluate(&state, 5), None);
    }

    #[test]
    fn test_completed_line_counts_for_its_owner() {
        let mut state = GameState::new(&GameConfig::standard(2).unwrap(), 1).unwrap();
        let color = state.factories()[0].tiles[0];
        let taken = state.factories()[0].count(color);
        state
            .apply_action(0, Action::new(DraftSource::Factory(0), color, DraftDestination::PatternLine(0)))
            .unwrap();

        // Line 0 scores 1; overflow costs the floor penalty.
        let overflow = azul_engine::floor_penalty(state.rules().floor_penalties(), taken - 1);
        let expected = (1 + overflow) as f64;
        assert_eq!(evaluate(&state, 0), Some(expected));
        assert_eq!(evaluate(&state, 1), Some(-expected));
    }
}
