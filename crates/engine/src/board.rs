//! Player board primitives and the scoring rules that operate on them.

use crate::config::floor_penalty_at;
use crate::{Color, IllegalAction, Rules};

/// A single pattern line; row `i` holds at most `i + 1` tiles.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PatternLine {
    pub color: Option<Color>, // None => empty; Some(c) => all tiles are c
    pub count: usize,
}

impl PatternLine {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn clear(&mut self) {
        self.color = None;
        self.count = 0;
    }
}

/// Square scoring grid; a cell, once set, is never cleared.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Wall {
    size: usize,
    cells: Vec<Option<Color>>, // row-major
}

impl Wall {
    pub fn new(size: usize) -> Self {
        Wall {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Write a tile; returns `false` (and leaves the wall untouched) if the
    /// cell is already occupied.
    pub fn place(&mut self, row: usize, col: usize, color: Color) -> bool {
        let cell = &mut self.cells[row * self.size + col];
        if cell.is_some() {
            return false;
        }
        *cell = Some(color);
        true
    }

    pub fn row_full(&self, row: usize) -> bool {
        (0..self.size).all(|col| self.is_occupied(row, col))
    }

    pub fn column_full(&self, col: usize) -> bool {
        (0..self.size).all(|row| self.is_occupied(row, col))
    }

    pub fn has_full_row(&self) -> bool {
        (0..self.size).any(|row| self.row_full(row))
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Color> + '_ {
        self.cells.iter().flatten().copied()
    }
}

/// Token on the floor line
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    Tile(Color),
    FirstPlayerMarker,
}

/// Floor line: ordered, unbounded; every slot costs a penalty at round end.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FloorLine {
    pub slots: Vec<Token>,
}

impl FloorLine {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_first_player_marker(&self) -> bool {
        self.slots.contains(&Token::FirstPlayerMarker)
    }

    pub fn tiles(&self) -> impl Iterator<Item = Color> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Token::Tile(c) => Some(*c),
            Token::FirstPlayerMarker => None,
        })
    }
}

/// Complete state for one player
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PlayerBoard {
    pub pattern_lines: Vec<PatternLine>,
    pub wall: Wall,
    pub floor: FloorLine,
    pub score: i32, // can go negative from floor penalties
}

impl PlayerBoard {
    pub fn new(size: usize) -> Self {
        PlayerBoard {
            pattern_lines: vec![PatternLine::default(); size],
            wall: Wall::new(size),
            floor: FloorLine::default(),
            score: 0,
        }
    }

    /// Can pattern line `row` accept at least one tile of `color`?
    pub fn check_pattern_line(
        &self,
        rules: &Rules,
        row: usize,
        color: Color,
    ) -> Result<(), IllegalAction> {
        let line = self
            .pattern_lines
            .get(row)
            .ok_or(IllegalAction::NoSuchPatternLine(row))?;

        if let Some(held) = line.color {
            if held != color {
                return Err(IllegalAction::LineHoldsOtherColor { row, held });
            }
        }
        if line.count >= row + 1 {
            return Err(IllegalAction::LineFull(row));
        }
        if self.wall.is_occupied(row, rules.wall_column(row, color)) {
            return Err(IllegalAction::ColorAlreadyOnWall { row, color });
        }
        Ok(())
    }

    /// Put `count` tiles of `color` on pattern line `row`; tiles that do not
    /// fit spill onto the floor. The line must already accept `color`.
    pub(crate) fn place_on_line(&mut self, row: usize, color: Color, count: usize) {
        let line = &mut self.pattern_lines[row];
        let space = row + 1 - line.count;
        let accepted = count.min(space);

        line.color = Some(color);
        line.count += accepted;

        self.place_on_floor(color, count - accepted);
    }

    pub(crate) fn place_on_floor(&mut self, color: Color, count: usize) {
        self.floor
            .slots
            .extend(std::iter::repeat_n(Token::Tile(color), count));
    }

    /// Number of tiles of `color` held on this board (lines, wall and floor).
    pub fn count_color(&self, color: Color) -> usize {
        let in_lines: usize = self
            .pattern_lines
            .iter()
            .filter(|line| line.color == Some(color))
            .map(|line| line.count)
            .sum();
        let on_floor = self.floor.tiles().filter(|&c| c == color).count();
        in_lines + self.wall.count_color(color) + on_floor
    }

    pub(crate) fn clear_line(&mut self, row: usize) {
        self.pattern_lines[row].clear();
    }
}

/// Points for the tile just placed at (`row`, `col`).
///
/// `h` and `v` are the occupied runs touching the cell horizontally and
/// vertically, excluding the cell itself. An isolated tile scores 1.
pub fn score_placement(wall: &Wall, row: usize, col: usize) -> i32 {
    let n = wall.size();

    let left = (0..col).rev().take_while(|&c| wall.is_occupied(row, c)).count();
    let right = (col + 1..n).take_while(|&c| wall.is_occupied(row, c)).count();
    let up = (0..row).rev().take_while(|&r| wall.is_occupied(r, col)).count();
    let down = (row + 1..n).take_while(|&r| wall.is_occupied(r, col)).count();

    let h = (left + right) as i32;
    let v = (up + down) as i32;
    (h + 1).max(1) + (v + 1).max(1) - 1
}

/// Total penalty for a floor line holding `len` slots.
pub fn floor_penalty(schedule: &[i32], len: usize) -> i32 {
    (0..len).map(|pos| floor_penalty_at(schedule, pos)).sum()
}

/// End-game bonus: +2 per full row, +7 per full column, +10 per color that
/// fills all of its cells.
pub fn end_game_bonus(wall: &Wall) -> i32 {
    let n = wall.size();
    let rows = (0..n).filter(|&r| wall.row_full(r)).count() as i32;
    let cols = (0..n).filter(|&c| wall.column_full(c)).count() as i32;
    let colors = (0..n)
        .filter_map(Color::from_index)
        .filter(|&color| wall.count_color(color) == n)
        .count() as i32;

    2 * rows + 7 * cols + 10 * colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, DEFAULT_FLOOR_PENALTIES};

    fn wall_with(cells: &[(usize, usize)]) -> Wall {
        let mut wall = Wall::new(5);
        for &(r, c) in cells {
            assert!(wall.place(r, c, Color(((c + 5 - r) % 5) as u8)));
        }
        wall
    }

    fn standard_rules() -> Rules {
        Rules::from_config(&GameConfig::standard(2).unwrap()).unwrap()
    }

    // =========================================================================
    // Placement scoring
    // =========================================================================

    #[test]
    fn test_score_placement_isolated() {
        let wall = wall_with(&[(2, 2)]);
        assert_eq!(score_placement(&wall, 2, 2), 1);
    }

    #[test]
    fn test_score_placement_horizontal() {
        let wall = wall_with(&[(2, 1), (2, 2), (2, 3)]);
        assert_eq!(score_placement(&wall, 2, 2), 3);
    }

    #[test]
    fn test_score_placement_vertical() {
        let wall = wall_with(&[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(score_placement(&wall, 2, 2), 3);
    }

    #[test]
    fn test_score_placement_cross() {
        // h = 2, v = 2: (2 + 1) + (2 + 1) - 1
        let wall = wall_with(&[(2, 1), (2, 2), (2, 3), (1, 2), (3, 2)]);
        assert_eq!(score_placement(&wall, 2, 2), 5);
    }

    #[test]
    fn test_score_placement_run_stops_at_gap() {
        let wall = wall_with(&[(0, 0), (0, 2), (0, 3), (1, 2)]);
        // Left neighbor (0,1) is empty, so (0,0) does not count.
        assert_eq!(score_placement(&wall, 0, 2), 3);
    }

    #[test]
    fn test_score_placement_edge_of_wall() {
        let wall = wall_with(&[(4, 3), (4, 4)]);
        assert_eq!(score_placement(&wall, 4, 4), 2);
    }

    // =========================================================================
    // Floor penalties and bonuses
    // =========================================================================

    #[test]
    fn test_floor_penalty_table() {
        let expected = [0, -1, -2, -4, -6, -8, -11, -14, -17, -20];
        for (k, &total) in expected.iter().enumerate() {
            assert_eq!(floor_penalty(&DEFAULT_FLOOR_PENALTIES, k), total, "k = {k}");
        }
    }

    #[test]
    fn test_end_game_bonus() {
        let mut cells = Vec::new();
        // Full row 0 and full column 0.
        for i in 0..5 {
            cells.push((0, i));
            if i > 0 {
                cells.push((i, 0));
            }
        }
        let wall = wall_with(&cells);
        // Color 0 sits on the diagonal, so only (0,0) holds it.
        assert_eq!(end_game_bonus(&wall), 2 + 7);

        let diagonal: Vec<_> = (0..5).map(|i| (i, i)).collect();
        let wall = wall_with(&diagonal);
        assert_eq!(end_game_bonus(&wall), 10);
    }

    #[test]
    fn test_wall_cell_written_once() {
        let mut wall = Wall::new(3);
        assert!(wall.place(1, 1, Color(0)));
        assert!(!wall.place(1, 1, Color(2)));
        assert_eq!(wall.get(1, 1), Some(Color(0)));
    }

    // =========================================================================
    // Pattern line acceptance
    // =========================================================================

    #[test]
    fn test_check_pattern_line_rules() {
        let rules = standard_rules();
        let mut board = PlayerBoard::new(5);

        assert_eq!(board.check_pattern_line(&rules, 2, Color(1)), Ok(()));
        assert_eq!(
            board.check_pattern_line(&rules, 5, Color(1)),
            Err(IllegalAction::NoSuchPatternLine(5))
        );

        board.place_on_line(2, Color(1), 1);
        assert_eq!(
            board.check_pattern_line(&rules, 2, Color(3)),
            Err(IllegalAction::LineHoldsOtherColor { row: 2, held: Color(1) })
        );

        board.place_on_line(2, Color(1), 2);
        assert_eq!(
            board.check_pattern_line(&rules, 2, Color(1)),
            Err(IllegalAction::LineFull(2))
        );

        let col = rules.wall_column(0, Color(4));
        board.wall.place(0, col, Color(4));
        assert_eq!(
            board.check_pattern_line(&rules, 0, Color(4)),
            Err(IllegalAction::ColorAlreadyOnWall { row: 0, color: Color(4) })
        );
    }

    #[test]
    fn test_overflow_goes_to_floor() {
        let mut board = PlayerBoard::new(5);
        board.place_on_line(1, Color(2), 4);

        assert_eq!(board.pattern_lines[1].count, 2);
        assert_eq!(board.floor.len(), 2);
        assert_eq!(board.count_color(Color(2)), 4);
    }
}
