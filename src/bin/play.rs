//! Interactive CLI to play Azul against the minimax agent
//!
//! Usage: cargo run --bin play [--depth 4] [--time-limit-ms 2000]

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use azul::display::{display_board, format_action, BOLD, DIM, RESET};
use azul::search::{MinimaxAgent, SearchConfig};
use azul::{legal_actions, Action, GameConfig, GameState, Phase};

/// Play Azul against the minimax agent
#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Play Azul against the search agent", long_about = None)]
struct Args {
    /// Search depth in plies (deeper = stronger but slower)
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Time budget per AI move in milliseconds
    #[arg(long, default_value_t = 2000)]
    time_limit_ms: u64,

    /// Play as player 1 (AI goes first) instead of player 0
    #[arg(long)]
    ai_first: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log level for the search agent
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

/// Prompt until the user picks a legal move. Returns None on quit or EOF.
fn get_human_action(state: &GameState, player: usize) -> io::Result<Option<Action>> {
    let colors = state.rules().colors();
    let actions = legal_actions(state, player);

    println!("{BOLD}Your legal moves:{RESET}");
    for (i, action) in actions.iter().enumerate() {
        println!("  {}: {}", i, format_action(colors, action));
    }

    loop {
        print!("\n{BOLD}Enter move number:{RESET} ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        let input = input.trim();
        if input == "q" || input == "quit" {
            return Ok(None);
        }

        match input.parse::<usize>() {
            Ok(idx) if idx < actions.len() => return Ok(Some(actions[idx])),
            Ok(_) => println!("Invalid move number. Enter 0-{}", actions.len() - 1),
            Err(_) => println!("Please enter a number (or 'q' to quit)"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let mut agent = MinimaxAgent::new(SearchConfig {
        max_depth: args.depth,
        time_limit: Duration::from_millis(args.time_limit_ms),
        ..Default::default()
    })?;

    let mut state = GameState::new(&GameConfig::standard(2)?, args.seed)?;
    let human_player = if args.ai_first { 1 } else { 0 };

    println!("\n{BOLD}Welcome to Azul!{RESET}");
    println!(
        "You are Player {} ({})",
        human_player,
        if human_player == 0 { "first" } else { "second" }
    );
    println!("Type 'q' to quit at any time.\n");

    while state.phase() != Phase::GameOver {
        display_board(&state, Some(human_player));

        let player = state.current_player();
        let action = if player == human_player {
            match get_human_action(&state, player)? {
                Some(action) => action,
                None => {
                    println!("Goodbye!");
                    return Ok(());
                }
            }
        } else {
            println!("{DIM}AI is thinking...{RESET}");
            let Some(outcome) = agent.search(&state, player) else {
                println!("AI found no move; ending the game.");
                break;
            };
            println!(
                "AI plays: {}  {DIM}({}){RESET}",
                format_action(state.rules().colors(), &outcome.action),
                outcome.stats
            );
            outcome.action
        };

        state.apply_action(player, action)?;
    }

    display_board(&state, Some(human_player));
    let scores = state.scores();
    let (mine, theirs) = (scores[human_player], scores[1 - human_player]);

    println!("\n{BOLD}═══════════════════════════════════════{RESET}");
    println!("{BOLD}                GAME OVER{RESET}");
    println!("{BOLD}═══════════════════════════════════════{RESET}");
    println!("Your score: {mine}");
    println!("AI score:   {theirs}");

    if mine > theirs {
        println!("\n{BOLD}🎉 YOU WIN! 🎉{RESET}");
    } else if mine < theirs {
        println!("\n{DIM}AI wins. Better luck next time!{RESET}");
    } else {
        println!("\n{BOLD}It's a tie!{RESET}");
    }

    Ok(())
}
