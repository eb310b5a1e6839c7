//! Action catalog: Action <-> ActionId
//!
//! Fixed action space covering every syntactically possible draft for a
//! configuration, regardless of current legality. Numeric collaborators
//! (encoders, policy heads) address actions by their dense index.

use crate::{legal_actions, Action, Color, DraftDestination, DraftSource, GameState, Rules};

/// Dense index into the action space.
pub type ActionId = usize;

/// Encodes/decodes between engine Actions and discrete ActionIds.
///
/// Packing scheme, with `F` factories, `C` colors and `L` pattern lines:
/// `id = source * C * (L + 1) + color * (L + 1) + dest`
/// where the center is source `F` and the floor is destination `L`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ActionCatalog {
    num_factories: usize,
    num_colors: usize,
    num_lines: usize,
}

impl ActionCatalog {
    pub fn new(rules: &Rules) -> Self {
        ActionCatalog {
            num_factories: rules.num_factories(),
            num_colors: rules.num_colors(),
            num_lines: rules.pattern_line_count(),
        }
    }

    /// Size of the action space: `(F + 1) * C * (L + 1)`.
    pub fn len(&self) -> usize {
        (self.num_factories + 1) * self.num_colors * (self.num_lines + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode an action, or `None` if any component is outside this configuration.
    pub fn encode(&self, action: &Action) -> Option<ActionId> {
        let source = match action.source {
            DraftSource::Factory(f) if f < self.num_factories => f,
            DraftSource::Factory(_) => return None,
            DraftSource::Center => self.num_factories,
        };

        let color = action.color.index();
        if color >= self.num_colors {
            return None;
        }

        let dest = match action.dest {
            DraftDestination::PatternLine(row) if row < self.num_lines => row,
            DraftDestination::PatternLine(_) => return None,
            DraftDestination::Floor => self.num_lines,
        };

        let stride = self.num_lines + 1;
        Some(source * self.num_colors * stride + color * stride + dest)
    }

    /// Decode an id back into an action, or `None` if out of range.
    ///
    /// The result may be syntactically valid but illegal in the current state.
    pub fn decode(&self, id: ActionId) -> Option<Action> {
        if id >= self.len() {
            return None;
        }

        let stride = self.num_lines + 1;
        let dest = id % stride;
        let color = (id / stride) % self.num_colors;
        let source = id / (stride * self.num_colors);

        let source = if source == self.num_factories {
            DraftSource::Center
        } else {
            DraftSource::Factory(source)
        };
        let dest = if dest == self.num_lines {
            DraftDestination::Floor
        } else {
            DraftDestination::PatternLine(dest)
        };

        Some(Action {
            source,
            color: Color::from_index(color)?,
            dest,
        })
    }

    /// Every action in index order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        (0..self.len()).filter_map(|id| self.decode(id))
    }

    /// Legality mask over the action space for the player to move.
    pub fn legal_mask(&self, state: &GameState) -> Vec<bool> {
        let mut mask = vec![false; self.len()];
        for action in legal_actions(state, state.current_player()) {
            if let Some(id) = self.encode(&action) {
                mask[id] = true;
            }
        }
        mask
    }

    /// Legal actions for the player to move, ordered by descending activation.
    ///
    /// `activations` is indexed by ActionId; missing entries rank last. Ties
    /// keep index order.
    pub fn sorted_legal_actions(&self, state: &GameState, activations: &[f32]) -> Vec<Action> {
        let mut ranked: Vec<(ActionId, Action)> = legal_actions(state, state.current_player())
            .into_iter()
            .filter_map(|action| self.encode(&action).map(|id| (id, action)))
            .collect();

        let activation = |id: ActionId| activations.get(id).copied().unwrap_or(f32::NEG_INFINITY);
        ranked.sort_by(|(a, _), (b, _)| activation(*b).total_cmp(&activation(*a)).then(a.cmp(b)));

        ranked.into_iter().map(|(_, action)| action).collect()
    }
}
