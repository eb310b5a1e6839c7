//! Agent-vs-agent match runner for Azul
//!
//! Player 0 is always the minimax agent; the remaining seats are filled with
//! the agent selected by `--opponent`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, Level};

use azul::search::{play_game, Agent, MinimaxAgent, RandomAgent, SearchConfig};
use azul::{GameConfig, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Minimax,
    Random,
}

/// Play Azul matches between search agents
#[derive(Parser, Debug)]
#[command(name = "azul")]
#[command(about = "Run Azul games between a minimax agent and an opponent", long_about = None)]
struct Args {
    /// TOML game settings (defaults to the standard setup for --players)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of players when no config file is given
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Maximum search depth in plies
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Time budget per move in milliseconds
    #[arg(long, default_value_t = 1000)]
    time_limit_ms: u64,

    /// Random seed for the first game; game i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Evaluate sibling moves on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Worker threads for parallel search (rayon default when omitted)
    #[arg(long)]
    threads: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Agent for every seat but player 0
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth,
            time_limit: Duration::from_millis(self.time_limit_ms),
            parallel: !self.sequential,
            num_threads: self.threads,
        }
    }

    fn game_config(&self) -> Result<GameConfig, azul::ConfigError> {
        match &self.config {
            Some(path) => GameConfig::from_path(path),
            None => GameConfig::standard(self.players),
        }
    }
}

fn build_agents(
    args: &Args,
    num_players: usize,
    seed: u64,
) -> Result<Vec<Box<dyn Agent>>, Box<dyn std::error::Error>> {
    let mut agents: Vec<Box<dyn Agent>> = Vec::with_capacity(num_players);
    agents.push(Box::new(MinimaxAgent::new(args.search_config())?));
    for seat in 1..num_players {
        let agent: Box<dyn Agent> = match args.opponent {
            Opponent::Minimax => Box::new(MinimaxAgent::new(args.search_config())?),
            Opponent::Random => Box::new(RandomAgent::new(seed.wrapping_add(seat as u64))),
        };
        agents.push(agent);
    }
    Ok(agents)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let config = args.game_config()?;
    info!(
        players = config.num_players,
        factories = config.num_factories,
        colors = ?config.tile_colors,
        depth = args.depth,
        time_limit_ms = args.time_limit_ms,
        parallel = !args.sequential,
        opponent = ?args.opponent,
        "starting match"
    );

    let mut wins = vec![0u64; config.num_players];

    for game in 0..args.games {
        let seed = args.seed.wrapping_add(game);
        let mut state = GameState::new(&config, seed)?;
        let mut agents = build_agents(&args, config.num_players, seed)?;

        let record = play_game(&mut state, &mut agents)?;

        println!("{state}");
        println!(
            "Game {} (seed {seed}): {} rounds, {} moves{}",
            game + 1,
            record.rounds,
            record.moves.len(),
            if record.completed { "" } else { " (stopped early)" },
        );
        for (player, score) in record.final_scores.iter().enumerate() {
            let name = agents[player].name();
            println!("  Player {player} ({name}): {score}");
        }

        for winner in record.winners() {
            wins[winner] += 1;
        }
    }

    if args.games > 1 {
        println!("\nWins over {} games:", args.games);
        for (player, count) in wins.iter().enumerate() {
            println!("  Player {player}: {count}");
        }
    }

    Ok(())
}
