//! Hex-Rust: play Hex against an alpha-beta Monte Carlo engine.
//!
//! ## Usage
//!
//! - `hex-rust` - 4x4 board, depth 5, branch factor 5
//! - `hex-rust -s 7 -d 3 -f 8` - larger board, shallower but wider search
//! - `hex-rust --computer-first --seed 1` - reproducible game, computer opens

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use hex_rust::config::{GameConfig, Requested};
use hex_rust::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_BRANCH_FACTOR, DEFAULT_SEARCH_DEPTH, DEFAULT_THREADS, MC_TRIALS,
};
use hex_rust::game::{Game, Outcome};
use hex_rust::input::TextInput;
use hex_rust::playout::seed_rng;

/// Hex-Rust: play Hex against the computer
#[derive(Parser)]
#[command(name = "hex-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (clamped to 3..=13)
    #[arg(short = 's', long = "size", default_value_t = DEFAULT_BOARD_SIZE as i64, allow_negative_numbers = true)]
    board_size: i64,

    /// Search depth in plies (clamped to 1..=20)
    #[arg(short = 'd', long, default_value_t = i64::from(DEFAULT_SEARCH_DEPTH), allow_negative_numbers = true)]
    depth: i64,

    /// Moves kept per search node (clamped to 1..=20)
    #[arg(short = 'f', long, default_value_t = DEFAULT_BRANCH_FACTOR as i64, allow_negative_numbers = true)]
    branch_factor: i64,

    /// Random playouts per evaluation
    #[arg(short = 'n', long, default_value_t = MC_TRIALS as i64, allow_negative_numbers = true)]
    trials: i64,

    /// Threads used for playouts
    #[arg(short = 'j', long, default_value_t = DEFAULT_THREADS as i64, allow_negative_numbers = true)]
    threads: i64,

    /// Seed for the playout generator
    #[arg(long)]
    seed: Option<u64>,

    /// Let the computer move first
    #[arg(long)]
    computer_first: bool,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Unknown flags are a usage error with status 1; help and version exit 0.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    init_tracing(&cli.log_level);

    if let Some(seed) = cli.seed {
        seed_rng(seed);
    }

    let config = GameConfig::from_requested(Requested {
        board_size: cli.board_size,
        depth: cli.depth,
        branch_factor: cli.branch_factor,
        trials: cli.trials,
        threads: cli.threads,
        computer_first: cli.computer_first,
    });
    info!(?config, "starting game");

    let mut game = Game::new(config).context("failed to set up the board")?;
    let stdin = io::stdin();
    let mut input = TextInput::new(stdin.lock(), io::stdout());

    match game.play(&mut input) {
        Outcome::Winner(side) => println!("{}winner: {side}", game.board()),
        Outcome::Abandoned => println!("\ninput closed, game abandoned"),
        Outcome::Exhausted => println!("{}no moves left", game.board()),
    }
    Ok(())
}
