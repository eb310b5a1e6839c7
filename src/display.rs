//! Shared display utilities for rendering Azul game state in the terminal
//!
//! Provides colorized, human-readable output for game boards, factories, and actions.
//! Colors are configured by name, so the palette is looked up by identifier and
//! falls back to cycling through a fixed set for unknown names.

use azul_engine::{
    Action, Color, DraftDestination, DraftSource, GameState, TileColorMapping, Token,
};

// ANSI color codes for tile display
pub const BLUE: &str = "\x1b[94m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const BLACK: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[97m";
pub const TEAL: &str = "\x1b[96m";
pub const GREEN: &str = "\x1b[92m";
pub const MAGENTA: &str = "\x1b[95m";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

const FALLBACK_PALETTE: [&str; 8] = [BLUE, YELLOW, RED, BLACK, WHITE, TEAL, GREEN, MAGENTA];

pub fn color_code(colors: &TileColorMapping, color: Color) -> &'static str {
    match colors.name(color) {
        Some("blue") => BLUE,
        Some("yellow") => YELLOW,
        Some("red") => RED,
        Some("black") => BLACK,
        Some("white") => WHITE,
        Some("teal") => TEAL,
        Some("green") => GREEN,
        _ => FALLBACK_PALETTE[color.index() % FALLBACK_PALETTE.len()],
    }
}

pub fn color_char(colors: &TileColorMapping, color: Color) -> char {
    match colors.name(color) {
        Some("black") => 'K',
        Some(name) => name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?'),
        None => '?',
    }
}

pub fn color_name(colors: &TileColorMapping, color: Color) -> &str {
    colors.name(color).unwrap_or("?")
}

pub fn display_tile(colors: &TileColorMapping, color: Color) -> String {
    format!("{}{}{}", color_code(colors, color), color_char(colors, color), RESET)
}

pub fn display_token(colors: &TileColorMapping, token: Token) -> String {
    match token {
        Token::Tile(c) => display_tile(colors, c),
        Token::FirstPlayerMarker => format!("{BOLD}1{RESET}"),
    }
}

/// Format an action for display
pub fn format_action(colors: &TileColorMapping, action: &Action) -> String {
    let source = match action.source {
        DraftSource::Factory(f) => format!("F{f}"),
        DraftSource::Center => "Center".to_string(),
    };
    let dest = match action.dest {
        DraftDestination::PatternLine(r) => format!("Line {}", r + 1),
        DraftDestination::Floor => "Floor".to_string(),
    };
    format!("{} {} -> {}", source, display_tile(colors, action.color), dest)
}

/// Format an action in compact form (for tables and logs)
pub fn format_action_compact(colors: &TileColorMapping, action: &Action) -> String {
    let source = match action.source {
        DraftSource::Factory(f) => format!("F{f}"),
        DraftSource::Center => "C".to_string(),
    };
    let dest = match action.dest {
        DraftDestination::PatternLine(r) => format!("L{}", r + 1),
        DraftDestination::Floor => "Floor".to_string(),
    };
    format!("{} {} {}", source, color_name(colors, action.color), dest)
}

/// Display the full game board with all player information
///
/// If `highlight_player` is Some, that player's board will be shown with emphasis.
pub fn display_board(state: &GameState, highlight_player: Option<usize>) {
    let rules = state.rules();
    let colors = rules.colors();
    let size = rules.pattern_line_count();

    println!("\n{BOLD}══════════════════════════════════════════════════════════════{RESET}");
    println!(
        "{BOLD}  Round {}{RESET}   |   Current Player: {}",
        state.round(),
        state.current_player()
    );
    println!("{BOLD}══════════════════════════════════════════════════════════════{RESET}\n");

    println!("{BOLD}FACTORIES:{RESET}");
    for (f, factory) in state.factories().iter().enumerate() {
        print!("  F{f}: ");
        if factory.is_empty() {
            print!("{DIM}(empty){RESET}");
        } else {
            for &tile in &factory.tiles {
                print!("{} ", display_tile(colors, tile));
            }
        }
        println!();
    }

    print!("\n{BOLD}CENTER:{RESET} ");
    let center = state.center();
    if center.first_player_token {
        print!("{} ", display_token(colors, Token::FirstPlayerMarker));
    }
    if center.is_empty() && !center.first_player_token {
        print!("{DIM}(empty){RESET}");
    }
    for &tile in &center.tiles {
        print!("{} ", display_tile(colors, tile));
    }
    println!("\n");

    for (p, player) in state.players().iter().enumerate() {
        let style = if highlight_player == Some(p) { BOLD } else { DIM };
        println!("{style}PLAYER {p} (Score: {}){RESET}", player.score);
        println!("  Pattern Lines          Wall");

        for (row, line) in player.pattern_lines.iter().enumerate() {
            let cap = row + 1;

            // Right-aligned pattern line
            print!("  ");
            for _ in 0..(size - cap) {
                print!("  ");
            }
            for _ in 0..(cap - line.count) {
                print!("{DIM}.{RESET} ");
            }
            if let Some(color) = line.color {
                for _ in 0..line.count {
                    print!("{} ", display_tile(colors, color));
                }
            }

            print!(" -> ");

            for col in 0..size {
                match player.wall.get(row, col) {
                    Some(color) => print!("{} ", display_tile(colors, color)),
                    // Show expected color dimmed
                    None => print!("{DIM}{}{RESET} ", color_char(colors, rules.wall_color(row, col))),
                }
            }
            println!();
        }

        print!("  Floor: ");
        if player.floor.is_empty() {
            print!("{DIM}(empty){RESET}");
        } else {
            for &slot in &player.floor.slots {
                print!("{} ", display_token(colors, slot));
            }
        }
        println!("\n");
    }
}
