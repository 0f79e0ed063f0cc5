use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{play_game, GameConfig, Outcome, Recorder};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many players take part in each game
    #[arg(short = 'p', long, default_value_t = 2)]
    num_players: u32,

    /// Board width the players agree on
    #[arg(long, default_value_t = 10)]
    width: u32,

    /// Board height the players agree on
    #[arg(long, default_value_t = 10)]
    height: u32,

    /// How many fields in a row win the game
    #[arg(short, long, default_value_t = 5)]
    win_length: u32,

    /// How many blocked fields to scatter during setup
    #[arg(short, long, default_value_t = 4)]
    blocks: u32,

    /// How many joker fields to scatter during setup
    #[arg(short, long, default_value_t = 2)]
    jokers: u32,

    /// Per-turn chance that the mover forfeits instead of placing a stone
    #[arg(long, default_value_t = 0.0)]
    forfeit_chance: f64,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record each game's event stream as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let config = GameConfig {
        num_players: args.num_players,
        width: args.width,
        height: args.height,
        win_length: args.win_length,
        blocks: args.blocks,
        jokers: args.jokers,
        forfeit_chance: args.forfeit_chance,
    };

    let mut wins = vec![0usize; args.num_players as usize];
    let mut forfeit_wins = vec![0usize; args.num_players as usize];
    let mut ties = 0usize;

    for game_idx in 0..args.num_games {
        let (outcome, events) = play_game(&mut rng, &config)?;
        match outcome {
            Outcome::WonBy { player } => {
                debug!(winner = player.0, game_idx);
                wins[player.0 as usize - 1] += 1;
            }
            Outcome::WonByForfeits { player } => {
                debug!(winner = player.0, game_idx, "won after forfeits");
                wins[player.0 as usize - 1] += 1;
                forfeit_wins[player.0 as usize - 1] += 1;
            }
            Outcome::Tie => {
                debug!(game_idx, "Tie");
                ties += 1;
            }
        }
        if let Some(recorder) = &mut recorder {
            recorder.write_game(outcome, &events)?;
        }
    }

    eprintln!("End result:");
    for (idx, count) in wins.iter().enumerate() {
        let paren = if forfeit_wins[idx] > 0 {
            format!(" ({} after forfeits)", forfeit_wins[idx])
        } else {
            String::new()
        };
        eprintln!("- {} wins by player {}{}", count, idx + 1, paren);
    }
    eprintln!("- {} ties", ties);

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
