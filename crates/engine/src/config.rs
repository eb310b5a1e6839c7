//! Game settings and the validated rule set derived from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Color, ConfigError, TileColorMapping};

/// Floor penalties (default schedule), indexed by floor position.
pub const DEFAULT_FLOOR_PENALTIES: [i32; 7] = [-1, -1, -2, -2, -2, -3, -3];
pub const DEFAULT_TILES_PER_COLOR: u16 = 20;
pub const DEFAULT_FACTORY_CAPACITY: usize = 4;
/// Safety ceiling on the round counter.
pub const DEFAULT_MAX_ROUNDS: u32 = 100;

/// Colors of the classic game, in wall order.
pub const STANDARD_COLORS: [&str; 5] = ["blue", "yellow", "red", "black", "white"];

/// Game settings as supplied by the caller or a settings file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameConfig {
    pub num_players: usize,
    pub num_factories: usize,
    pub tile_colors: Vec<String>,
    /// Number of pattern lines (and wall rows); defaults to the color count.
    pub pattern_line_count: Option<usize>,
    /// `wall_pattern[row][col]` = color identifier. Defaults to a cyclic Latin square.
    pub wall_pattern: Option<Vec<Vec<String>>>,
    pub floor_penalties: Vec<i32>,
    pub tiles_per_color: u16,
    pub factory_capacity: usize,
    pub max_rounds: u32,
}

/// On-disk shape: every key optional so missing required keys can be named.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    num_players: Option<usize>,
    num_factories: Option<usize>,
    tile_colors: Option<Vec<String>>,
    pattern_line_count: Option<usize>,
    wall_pattern: Option<Vec<Vec<String>>>,
    floor_penalties: Option<Vec<i32>>,
    tiles_per_color: Option<u16>,
    factory_capacity: Option<usize>,
    max_rounds: Option<u32>,
}

impl GameConfig {
    /// Config with the given required settings and defaults for the rest.
    pub fn new(num_players: usize, num_factories: usize, tile_colors: &[&str]) -> Self {
        GameConfig {
            num_players,
            num_factories,
            tile_colors: tile_colors.iter().map(|c| c.to_string()).collect(),
            pattern_line_count: None,
            wall_pattern: None,
            floor_penalties: DEFAULT_FLOOR_PENALTIES.to_vec(),
            tiles_per_color: DEFAULT_TILES_PER_COLOR,
            factory_capacity: DEFAULT_FACTORY_CAPACITY,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Classic setup: five colors, 5/7/9 factories for 2/3/4 players.
    pub fn standard(num_players: usize) -> Result<Self, ConfigError> {
        let num_factories = match num_players {
            2 => 5,
            3 => 7,
            4 => 9,
            n => {
                return Err(ConfigError::invalid(
                    "num_players",
                    format!("the standard setup supports 2-4 players, got {n}"),
                ))
            }
        };
        Ok(Self::new(num_players, num_factories, &STANDARD_COLORS))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(text)?;

        Ok(GameConfig {
            num_players: raw.num_players.ok_or(ConfigError::MissingKey("num_players"))?,
            num_factories: raw
                .num_factories
                .ok_or(ConfigError::MissingKey("num_factories"))?,
            tile_colors: raw.tile_colors.ok_or(ConfigError::MissingKey("tile_colors"))?,
            pattern_line_count: raw.pattern_line_count,
            wall_pattern: raw.wall_pattern,
            floor_penalties: raw
                .floor_penalties
                .unwrap_or_else(|| DEFAULT_FLOOR_PENALTIES.to_vec()),
            tiles_per_color: raw.tiles_per_color.unwrap_or(DEFAULT_TILES_PER_COLOR),
            factory_capacity: raw.factory_capacity.unwrap_or(DEFAULT_FACTORY_CAPACITY),
            max_rounds: raw.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Validated, immutable rule set shared by every clone of a game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    num_players: usize,
    num_factories: usize,
    colors: TileColorMapping,
    /// Pattern lines per board == wall rows == wall columns.
    size: usize,
    /// `wall_pattern[row][col]` => color at that cell.
    wall_pattern: Vec<Vec<Color>>,
    /// `wall_dest_col[row][color]` => column, precomputed for O(1) lookup.
    wall_dest_col: Vec<Vec<usize>>,
    floor_penalties: Vec<i32>,
    tiles_per_color: u16,
    factory_capacity: usize,
    max_rounds: u32,
}

impl Rules {
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        if config.num_players == 0 {
            return Err(ConfigError::invalid("num_players", "must be at least 1"));
        }
        if config.num_factories == 0 {
            return Err(ConfigError::invalid("num_factories", "must be at least 1"));
        }
        if config.factory_capacity == 0 {
            return Err(ConfigError::invalid("factory_capacity", "must be at least 1"));
        }
        if config.tiles_per_color == 0 {
            return Err(ConfigError::invalid("tiles_per_color", "must be at least 1"));
        }
        if config.max_rounds == 0 {
            return Err(ConfigError::invalid("max_rounds", "must be at least 1"));
        }
        if config.floor_penalties.is_empty() {
            return Err(ConfigError::invalid("floor_penalties", "schedule must not be empty"));
        }

        let colors = TileColorMapping::new(&config.tile_colors)?;
        let num_colors = colors.len();

        let size = config.pattern_line_count.unwrap_or(num_colors);
        if size != num_colors {
            return Err(ConfigError::invalid(
                "pattern_line_count",
                format!("wall rows are permutations of the {num_colors} colors, got {size} lines"),
            ));
        }

        let wall_pattern = match &config.wall_pattern {
            Some(rows) => parse_wall_pattern(rows, &colors)?,
            None => (0..size)
                .map(|row| {
                    (0..size)
                        .map(|col| Color(((col + size - row) % size) as u8))
                        .collect()
                })
                .collect(),
        };

        let mut wall_dest_col = vec![vec![0; num_colors]; size];
        for (row, cells) in wall_pattern.iter().enumerate() {
            for (col, color) in cells.iter().enumerate() {
                wall_dest_col[row][color.index()] = col;
            }
        }

        let total_tiles = num_colors * config.tiles_per_color as usize;
        let round_demand = config.num_factories * config.factory_capacity;
        if round_demand > total_tiles {
            return Err(ConfigError::invalid(
                "num_factories",
                format!("{round_demand} tiles are needed per round but only {total_tiles} exist"),
            ));
        }

        Ok(Rules {
            num_players: config.num_players,
            num_factories: config.num_factories,
            colors,
            size,
            wall_pattern,
            wall_dest_col,
            floor_penalties: config.floor_penalties.clone(),
            tiles_per_color: config.tiles_per_color,
            factory_capacity: config.factory_capacity,
            max_rounds: config.max_rounds,
        })
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn num_factories(&self) -> usize {
        self.num_factories
    }

    pub fn colors(&self) -> &TileColorMapping {
        &self.colors
    }

    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }

    /// Number of pattern lines, which is also the wall's side length.
    pub fn pattern_line_count(&self) -> usize {
        self.size
    }

    pub fn factory_capacity(&self) -> usize {
        self.factory_capacity
    }

    pub fn tiles_per_color(&self) -> u16 {
        self.tiles_per_color
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn floor_penalties(&self) -> &[i32] {
        &self.floor_penalties
    }

    /// Total number of tiles in the game; conserved across every transition.
    pub fn total_tiles(&self) -> usize {
        self.colors.len() * self.tiles_per_color as usize
    }

    /// Column where `color` lands in wall `row`.
    #[inline]
    pub fn wall_column(&self, row: usize, color: Color) -> usize {
        self.wall_dest_col[row][color.index()]
    }

    /// Color printed on wall cell (`row`, `col`).
    #[inline]
    pub fn wall_color(&self, row: usize, col: usize) -> Color {
        self.wall_pattern[row][col]
    }

    /// Penalty for the tile at floor `position`; positions past the schedule
    /// reuse its last value.
    pub fn floor_penalty(&self, position: usize) -> i32 {
        floor_penalty_at(&self.floor_penalties, position)
    }
}

pub(crate) fn floor_penalty_at(schedule: &[i32], position: usize) -> i32 {
    match schedule.get(position) {
        Some(&p) => p,
        None => schedule.last().copied().unwrap_or(0),
    }
}

fn parse_wall_pattern(
    rows: &[Vec<String>],
    colors: &TileColorMapping,
) -> Result<Vec<Vec<Color>>, ConfigError> {
    let n = colors.len();
    if rows.len() != n {
        return Err(ConfigError::invalid(
            "wall_pattern",
            format!("expected {n} rows, got {}", rows.len()),
        ));
    }

    let mut pattern = Vec::with_capacity(n);
    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(ConfigError::invalid(
                "wall_pattern",
                format!("row {row_idx} has {} cells, expected {n}", row.len()),
            ));
        }

        let mut seen = vec![false; n];
        let mut cells = Vec::with_capacity(n);
        for name in row {
            let color = colors.get(name).ok_or_else(|| {
                ConfigError::invalid("wall_pattern", format!("unknown color `{name}` in row {row_idx}"))
            })?;
            if std::mem::replace(&mut seen[color.index()], true) {
                return Err(ConfigError::invalid(
                    "wall_pattern",
                    format!("row {row_idx} repeats color `{name}`"),
                ));
            }
            cells.push(color);
        }
        pattern.push(cells);
    }

    Ok(pattern)
}
