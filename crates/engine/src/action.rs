use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;

/// Source of tiles for drafting
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DraftSource {
    Factory(usize), // index 0..num_factories-1
    Center,
}

/// Destination for drafted tiles
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DraftDestination {
    PatternLine(usize), // 0..pattern_line_count-1
    Floor,
}

/// A player action: draft tiles of a color from a source to a destination
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub source: DraftSource,
    pub color: Color,
    pub dest: DraftDestination,
}

impl Action {
    pub fn new(source: DraftSource, color: Color, dest: DraftDestination) -> Self {
        Action { source, color, dest }
    }
}

impl fmt::Display for DraftSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftSource::Factory(idx) => write!(f, "factory {idx}"),
            DraftSource::Center => write!(f, "center"),
        }
    }
}

impl fmt::Display for DraftDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftDestination::PatternLine(row) => write!(f, "line {row}"),
            DraftDestination::Floor => write!(f, "floor"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} -> {}", self.color, self.source, self.dest)
    }
}
