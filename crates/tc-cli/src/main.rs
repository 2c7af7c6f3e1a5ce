//! CLI frontend for the Torchcrawl GM control panel.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tc",
    about = "Torchcrawl: random encounters, weather and timekeeping for the GM",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug detail, including every die roll
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new data directory with starter tables
    Init {
        /// Name of the directory to create
        name: String,
    },

    /// Load a data directory and report problems
    Check {
        /// Data directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Generate overland days: weather, six watches and rest checks
    Overland {
        /// Overland zone
        #[arg(short, long)]
        zone: String,

        /// Overlay zone mixed in on a coin flip
        #[arg(short, long)]
        overlay: Option<String>,

        /// Season (default: from the calendar)
        #[arg(long)]
        season: Option<String>,

        /// Number of days to generate
        #[arg(long, default_value = "1")]
        days: u32,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Generate a site and play out ten-minute turns
    Site {
        /// Site zone
        #[arg(short, long)]
        zone: String,

        /// Turns to advance after generating
        #[arg(short, long, default_value = "0")]
        turns: u32,

        /// Timer to start, as NAME=MINUTES (repeatable)
        #[arg(long = "timer")]
        timers: Vec<String>,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show or change the calendar date
    Calendar {
        /// Set the date to MONTH DAY
        #[arg(long, num_args = 2, value_names = ["MONTH", "DAY"])]
        set: Option<Vec<u32>>,

        /// Advance the date by N days
        #[arg(long)]
        advance: Option<u32>,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Start an interactive GM session
    Play {
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Overland {
            zone,
            overlay,
            season,
            days,
            seed,
            dir,
        } => commands::overland::run(
            &dir,
            &zone,
            overlay.as_deref(),
            season.as_deref(),
            days,
            seed,
        ),
        Commands::Site {
            zone,
            turns,
            timers,
            seed,
            dir,
        } => commands::site::run(&dir, &zone, turns, &timers, seed),
        Commands::Calendar { set, advance, dir } => {
            let set = set.and_then(|v| match v.as_slice() {
                [month, day] => Some((*month, *day)),
                _ => None,
            });
            commands::calendar::run(&dir, set, advance)
        }
        Commands::Play { seed, dir } => commands::play::run(&dir, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
