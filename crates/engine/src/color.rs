//! Tile colors and the identifier <-> index mapping.
//!
//! The color set is configured at startup, so a `Color` is just a dense index
//! into the configured list. `TileColorMapping` owns the identifiers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Upper bound on configured colors (a `Color` is stored in a `u8`).
pub const MAX_COLORS: usize = u8::MAX as usize;

/// A tile color, identified by its position in the configured color list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    pub fn from_index(idx: usize) -> Option<Color> {
        u8::try_from(idx).ok().map(Color)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bijective mapping between color identifiers and dense indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileColorMapping {
    names: Vec<String>,
    lookup: HashMap<String, Color>,
}

impl TileColorMapping {
    /// Build the mapping in configured order. Identifiers must be unique and non-empty.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::invalid("tile_colors", "at least one color is required"));
        }
        if names.len() > MAX_COLORS {
            return Err(ConfigError::invalid(
                "tile_colors",
                format!("at most {MAX_COLORS} colors are supported, got {}", names.len()),
            ));
        }

        let mut lookup = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(ConfigError::invalid("tile_colors", "color identifiers must be non-empty"));
            }
            if lookup.insert(name.to_string(), Color(idx as u8)).is_some() {
                return Err(ConfigError::invalid(
                    "tile_colors",
                    format!("duplicate color `{name}`"),
                ));
            }
        }

        Ok(Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
            lookup,
        })
    }

    /// Index of an identifier, or `None` for an unknown color.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.lookup.get(name).copied()
    }

    /// Identifier of a color, or `None` if the index is out of range.
    pub fn name(&self, color: Color) -> Option<&str> {
        self.names.get(color.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        color.index() < self.names.len()
    }

    /// All colors in configured order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.names.len()).map(|i| Color(i as u8))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
