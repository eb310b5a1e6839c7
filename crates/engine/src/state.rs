//! The rules engine: drafting, round resolution and end-of-game scoring.
//!
//! A `GameState` is the aggregate root. It is mutated only through
//! [`GameState::apply_action`] / [`GameState::play`] and the round resolution
//! they trigger. Clones are fully independent: the rule set is shared through
//! an `Arc` and the bag RNG is cloned with the state, so a clone replays the
//! same draws as the original.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::board::{end_game_bonus, floor_penalty, score_placement, Token};
use crate::{
    Action, Color, ConfigError, DraftDestination, DraftSource, GameConfig, GameError,
    IllegalAction, PlayerBoard, PlayerIdx, Rules, TileSupply,
};

/// Game phase / status
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    FactoryOffer, // Players drafting
    GameOver,     // Terminal; no more actions
}

/// A single factory display
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Factory {
    pub tiles: Vec<Color>,
}

impl Factory {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn count(&self, color: Color) -> usize {
        self.tiles.iter().filter(|&&c| c == color).count()
    }
}

/// Center pool: factory leftovers plus the first player token until claimed
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CenterPool {
    pub tiles: Vec<Color>,
    pub first_player_token: bool,
}

impl CenterPool {
    /// True when no tiles remain; the token alone does not count.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn count(&self, color: Color) -> usize {
        self.tiles.iter().filter(|&&c| c == color).count()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    pub(crate) rules: Arc<Rules>,
    pub(crate) factories: Vec<Factory>,
    pub(crate) center: CenterPool,
    pub(crate) players: Vec<PlayerBoard>,
    pub(crate) supply: TileSupply,

    /// Whose turn it is in FactoryOffer phase
    pub(crate) current_player: PlayerIdx,

    /// Current round, starting at 1
    pub(crate) round: u32,
    pub(crate) phase: Phase,

    seed: u64,
    rng: StdRng,
}

impl GameState {
    /// Validate `config` and deal the first round.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let rules = Rules::from_config(config)?;
        Ok(Self::with_rules(Arc::new(rules), seed))
    }

    /// Fresh game sharing an already validated rule set.
    pub fn with_rules(rules: Arc<Rules>, seed: u64) -> Self {
        let mut state = GameState {
            factories: Vec::new(),
            center: CenterPool::default(),
            players: Vec::new(),
            supply: TileSupply::full(rules.num_colors(), rules.tiles_per_color()),
            current_player: 0,
            round: 1,
            phase: Phase::FactoryOffer,
            seed,
            rng: StdRng::seed_from_u64(seed),
            rules,
        };
        state.reset();
        state
    }

    /// Start over: round 1, full bag, empty boards, freshly dealt factories.
    ///
    /// The bag RNG is reseeded, so resetting twice yields identical states.
    pub fn reset(&mut self) {
        let rules = Arc::clone(&self.rules);
        let size = rules.pattern_line_count();

        self.rng = StdRng::seed_from_u64(self.seed);
        self.players = vec![PlayerBoard::new(size); rules.num_players()];
        self.factories = vec![Factory::default(); rules.num_factories()];
        self.center = CenterPool {
            tiles: Vec::new(),
            first_player_token: true,
        };
        self.supply = TileSupply::full(rules.num_colors(), rules.tiles_per_color());
        self.current_player = 0;
        self.round = 1;
        self.phase = Phase::FactoryOffer;

        // Rules validation guarantees a full bag covers the first deal.
        self.deal();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn shared_rules(&self) -> &Arc<Rules> {
        &self.rules
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    pub fn center(&self) -> &CenterPool {
        &self.center
    }

    pub fn players(&self) -> &[PlayerBoard] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }

    pub fn current_player(&self) -> PlayerIdx {
        self.current_player
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scores(&self) -> Vec<i32> {
        self.players.iter().map(|p| p.score).collect()
    }

    /// True iff every factory and the center are empty.
    pub fn is_round_over(&self) -> bool {
        self.factories.iter().all(Factory::is_empty) && self.center.is_empty()
    }

    /// True iff any wall has a full row, or the round counter passed the ceiling.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
            || self.any_full_row()
            || self.round > self.rules.max_rounds()
    }

    fn any_full_row(&self) -> bool {
        self.players.iter().any(|p| p.wall.has_full_row())
    }

    /// The game ends after this round's resolution. The ceiling round itself
    /// is still played; resolution past it ends the game.
    fn ends_after_resolution(&self) -> bool {
        self.any_full_row() || self.round > self.rules.max_rounds()
    }

    /// Per-color tile totals across bag, discard, offer and every board.
    pub fn tile_counts(&self) -> Vec<usize> {
        self.rules
            .colors()
            .colors()
            .map(|color| {
                let supply =
                    (self.supply.bag[color.index()] + self.supply.discard[color.index()]) as usize;
                let offer: usize = self.factories.iter().map(|f| f.count(color)).sum::<usize>()
                    + self.center.count(color);
                let boards: usize = self.players.iter().map(|p| p.count_color(color)).sum();
                supply + offer + boards
            })
            .collect()
    }

    /// Every color still accounts for exactly `tiles_per_color` tiles.
    pub fn check_tile_conservation(&self) -> bool {
        let expected = self.rules.tiles_per_color() as usize;
        let counts = self.tile_counts();
        counts.iter().all(|&n| n == expected)
            && counts.iter().sum::<usize>() == self.rules.total_tiles()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Check `action` for `player` without touching the state.
    pub fn validate(&self, player: PlayerIdx, action: &Action) -> Result<(), IllegalAction> {
        if self.phase == Phase::GameOver {
            return Err(IllegalAction::GameOver);
        }
        if player != self.current_player {
            return Err(IllegalAction::NotPlayersTurn {
                expected: self.current_player,
                actual: player,
            });
        }

        let tiles = match action.source {
            DraftSource::Factory(f) => {
                &self
                    .factories
                    .get(f)
                    .ok_or(IllegalAction::NoSuchFactory(f))?
                    .tiles
            }
            DraftSource::Center => &self.center.tiles,
        };
        if !self.rules.colors().contains(action.color) {
            return Err(IllegalAction::UnknownColor(action.color));
        }
        if let DraftDestination::PatternLine(row) = action.dest {
            if row >= self.rules.pattern_line_count() {
                return Err(IllegalAction::NoSuchPatternLine(row));
            }
        }
        if !tiles.contains(&action.color) {
            return Err(IllegalAction::ColorNotAtSource(action.color));
        }

        if let DraftDestination::PatternLine(row) = action.dest {
            self.players[player].check_pattern_line(&self.rules, row, action.color)?;
        }
        Ok(())
    }

    /// Apply `action` for `player`. On any error the state is left unchanged.
    ///
    /// If the draft empties the offer, the round is resolved before returning.
    pub fn apply_action(&mut self, player: PlayerIdx, action: Action) -> Result<(), GameError> {
        self.validate(player, &action)?;

        let next = self.clone().play(player, action)?;
        debug!(player, %action, round = next.round, "applied action");
        *self = next;
        Ok(())
    }

    /// Consuming variant of [`apply_action`](Self::apply_action) for callers
    /// that already own a scratch copy.
    pub fn play(mut self, player: PlayerIdx, action: Action) -> Result<GameState, GameError> {
        self.validate(player, &action)?;
        self.draft(player, action);

        if self.is_round_over() {
            self.resolve_round()?;
        }

        debug_assert!(self.check_tile_conservation(), "tile conservation violated:\n{self}");
        Ok(self)
    }

    fn draft(&mut self, player: PlayerIdx, action: Action) {
        let color = action.color;

        let taken = match action.source {
            DraftSource::Factory(f) => {
                let tiles = std::mem::take(&mut self.factories[f].tiles);
                let (taken, rest): (Vec<Color>, Vec<Color>) =
                    tiles.into_iter().partition(|&c| c == color);
                self.center.tiles.extend(rest);
                taken.len()
            }
            DraftSource::Center => {
                let before = self.center.tiles.len();
                self.center.tiles.retain(|&c| c != color);

                if self.center.first_player_token {
                    self.center.first_player_token = false;
                    self.players[player]
                        .floor
                        .slots
                        .push(Token::FirstPlayerMarker);
                }
                before - self.center.tiles.len()
            }
        };

        let board = &mut self.players[player];
        match action.dest {
            DraftDestination::PatternLine(row) => board.place_on_line(row, color, taken),
            DraftDestination::Floor => board.place_on_floor(color, taken),
        }

        self.current_player = (player + 1) % self.players.len();
    }

    /// Phase resolution: tile walls, settle floors, then either finish the
    /// game or set up the next round.
    ///
    /// Runs automatically when a draft empties the offer; calling it while
    /// tiles remain on offer is rejected.
    pub fn resolve_round(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::GameOver {
            return Err(IllegalAction::GameOver.into());
        }
        if !self.is_round_over() {
            return Err(IllegalAction::RoundInProgress.into());
        }

        self.tile_walls()?;
        let token_holder = self.settle_floors();

        if self.ends_after_resolution() {
            self.apply_end_game_bonuses();
            self.phase = Phase::GameOver;
            debug!(round = self.round, scores = ?self.scores(), "game over");
            return Ok(());
        }

        self.round += 1;
        self.current_player = token_holder.unwrap_or(0);
        self.center.first_player_token = true;
        self.refill_factories()?;

        debug!(round = self.round, starting_player = self.current_player, "round set up");
        Ok(())
    }

    /// Scores each player would hold if the round were resolved now,
    /// including end-game bonuses if that resolution would end the game.
    /// Runs on a scratch copy and never sets up the next round.
    pub fn projected_scores(&self) -> Result<Vec<i32>, GameError> {
        if self.phase == Phase::GameOver {
            return Ok(self.scores());
        }

        let mut scratch = self.clone();
        scratch.tile_walls()?;
        scratch.settle_floors();
        if scratch.ends_after_resolution() {
            scratch.apply_end_game_bonuses();
        }
        Ok(scratch.scores())
    }

    /// Move every full pattern line's tile to the wall and score it. The
    /// rest of the line goes to the discard.
    fn tile_walls(&mut self) -> Result<(), GameError> {
        let rules = &self.rules;

        for (p, board) in self.players.iter_mut().enumerate() {
            for row in 0..rules.pattern_line_count() {
                let line = board.pattern_lines[row];
                let Some(color) = line.color else {
                    continue;
                };
                if line.count < row + 1 {
                    continue;
                }

                let col = rules.wall_column(row, color);
                if !board.wall.place(row, col, color) {
                    return Err(GameError::WallConflict { player: p, row, col });
                }
                board.score += score_placement(&board.wall, row, col);

                self.supply.discard_tiles(color, line.count - 1);
                board.clear_line(row);
            }
        }
        Ok(())
    }

    /// Apply floor penalties and empty every floor. Returns the token holder.
    fn settle_floors(&mut self) -> Option<PlayerIdx> {
        let mut holder = None;

        for (p, board) in self.players.iter_mut().enumerate() {
            board.score += floor_penalty(self.rules.floor_penalties(), board.floor.len());

            for slot in board.floor.slots.drain(..) {
                match slot {
                    Token::Tile(color) => self.supply.discard_tiles(color, 1),
                    Token::FirstPlayerMarker => holder = Some(p),
                }
            }
        }
        holder
    }

    fn apply_end_game_bonuses(&mut self) {
        for board in &mut self.players {
            board.score += end_game_bonus(&board.wall);
        }
    }

    fn refill_factories(&mut self) -> Result<(), GameError> {
        let demand = self.factories.len() * self.rules.factory_capacity();
        if self.supply.available() < demand {
            return Err(GameError::SupplyExhausted {
                state: self.to_string(),
            });
        }
        self.deal();
        Ok(())
    }

    fn deal(&mut self) {
        let capacity = self.rules.factory_capacity();
        for factory in &mut self.factories {
            factory.tiles.clear();
            for _ in 0..capacity {
                if let Some(color) = self.supply.draw(&mut self.rng) {
                    factory.tiles.push(color);
                }
            }
        }
    }

    fn color_name(&self, color: Color) -> &str {
        self.rules.colors().name(color).unwrap_or("?")
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |tiles: &[Color]| -> String {
            tiles
                .iter()
                .map(|&c| self.color_name(c))
                .collect::<Vec<_>>()
                .join(" ")
        };

        writeln!(
            f,
            "Round {} | {:?} | player to move: {}",
            self.round, self.phase, self.current_player
        )?;

        writeln!(f, "Factories:")?;
        for (i, factory) in self.factories.iter().enumerate() {
            writeln!(f, "  {i}: [{}]", names(&factory.tiles))?;
        }
        let token = if self.center.first_player_token { " +first-player token" } else { "" };
        writeln!(f, "Center: [{}]{token}", names(&self.center.tiles))?;

        for (p, board) in self.players.iter().enumerate() {
            writeln!(f, "Player {p} (score {}):", board.score)?;
            for (row, line) in board.pattern_lines.iter().enumerate() {
                let held = match line.color {
                    Some(c) => format!("{} x{}", self.color_name(c), line.count),
                    None => "-".to_string(),
                };
                let wall: Vec<&str> = (0..board.wall.size())
                    .map(|col| match board.wall.get(row, col) {
                        Some(c) => self.color_name(c),
                        None => ".",
                    })
                    .collect();
                writeln!(f, "  {row} [{held}/{}] | {}", row + 1, wall.join(" "))?;
            }
            let floor: Vec<&str> = board
                .floor
                .slots
                .iter()
                .map(|slot| match slot {
                    Token::Tile(c) => self.color_name(*c),
                    Token::FirstPlayerMarker => "1st",
                })
                .collect();
            writeln!(f, "  floor: [{}]", floor.join(" "))?;
        }

        let counts = |counts: &[u16]| -> String {
            self.rules
                .colors()
                .colors()
                .map(|c| format!("{}={}", self.color_name(c), counts[c.index()]))
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(f, "Discard: {}", counts(&self.supply.discard))?;
        write!(f, "Bag: {}", counts(&self.supply.bag))
    }
}
