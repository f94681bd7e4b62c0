use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use snakes_ladders::{
    config::GameConfig,
    engine::{DEFAULT_MAX_TURNS, run_simulations},
    error::Result,
    game::{Game, GameOutcome},
    rules::{Roll, roll_sequence},
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snakes_ladders")]
#[command(about = "Two-player Snakes & Ladders", long_about = None)]
struct Cli {
    /// TOML file with board and rule settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game with automatic rolls
    Play {
        /// Seed for layout and rolls
        #[arg(long)]
        seed: Option<u64>,
        /// Show the dice reveal frames before each result
        #[arg(long)]
        animate: bool,
    },
    /// Print a generated layout
    Layout {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play many games on one layout and print statistics
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "10000")]
        games: u32,
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snakes_ladders=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    match cli.command {
        Commands::Play { seed, animate } => play(config, &mut seeded(seed), animate),
        Commands::Layout { seed } => {
            let game = Game::new(config, &mut seeded(seed))?;
            println!("{}", game.to_fancy_string());
            Ok(())
        }
        Commands::Simulate { games, seed } => {
            let game = Game::new(config, &mut StdRng::seed_from_u64(seed))?;
            println!("{}", game.to_fancy_string());
            println!("============================================");
            println!("{}", run_simulations(&game, games, seed));
            Ok(())
        }
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn play(config: GameConfig, rng: &mut StdRng, animate: bool) -> Result<()> {
    let mut game = Game::new(config, rng)?;
    println!("{}", game.to_fancy_string());

    for _ in 0..DEFAULT_MAX_TURNS {
        let roll = if animate {
            let frames = roll_sequence(650, 28, rng);
            let faces: Vec<&str> = frames.iter().map(Roll::face).collect();
            println!("{}", faces.join(" "));
            frames.last().copied().unwrap_or_else(|| Roll::roll_with(rng))
        } else {
            Roll::roll_with(rng)
        };

        let turn = game.apply_roll(roll)?;
        let outcome = turn.outcome;
        let jump = if outcome.final_cell > outcome.landed {
            format!(", climbed a ladder to {}", outcome.final_cell)
        } else if outcome.final_cell < outcome.landed {
            format!(", slid down a snake to {}", outcome.final_cell)
        } else if outcome.landed == turn.from {
            String::from(", overshot and stays put")
        } else {
            String::new()
        };
        println!(
            "{} rolled {} {}: {} -> {}{} (facing {:?})",
            turn.player, roll.face(), roll, turn.from, outcome.landed, jump, turn.facing
        );

        if let GameOutcome::Win(player) = game.outcome() {
            println!("=========================================================");
            println!("{}", game.to_fancy_string());
            println!("{player} wins!");
            return Ok(());
        }
    }

    println!("No winner after {DEFAULT_MAX_TURNS} turns");
    Ok(())
}
