use crate::{Action, Color, DraftDestination, DraftSource, GameState, Phase, PlayerIdx};

/// Enumerate all legal actions for `player` against the current offer.
///
/// Order is deterministic and matches ActionCatalog index order: factories
/// first, then the center; colors ascending; pattern lines ascending, then
/// the floor.
pub fn legal_actions(state: &GameState, player: PlayerIdx) -> Vec<Action> {
    if state.phase() != Phase::FactoryOffer {
        return Vec::new();
    }
    let Some(board) = state.players().get(player) else {
        return Vec::new();
    };

    let rules = state.rules();
    let num_colors = rules.num_colors();
    let mut actions = Vec::new();

    let mut push_color = |source: DraftSource, color: Color| {
        for row in 0..rules.pattern_line_count() {
            if board.check_pattern_line(rules, row, color).is_ok() {
                actions.push(Action::new(source, color, DraftDestination::PatternLine(row)));
            }
        }
        // Floor always allowed
        actions.push(Action::new(source, color, DraftDestination::Floor));
    };

    let sources = state
        .factories()
        .iter()
        .enumerate()
        .map(|(f, factory)| (DraftSource::Factory(f), factory.tiles.as_slice()))
        .chain(std::iter::once((DraftSource::Center, state.center().tiles.as_slice())));

    for (source, tiles) in sources {
        if tiles.is_empty() {
            continue;
        }

        let mut present = vec![false; num_colors];
        for tile in tiles {
            present[tile.index()] = true;
        }
        for color in rules.colors().colors().filter(|c| present[c.index()]) {
            push_color(source, color);
        }
    }

    actions
}
