//! CLI frontend for the Dragonbourne composition engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "drb",
    about = "Dragonbourne — inspect the entities a game file describes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Log composition details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the game comes from and who is playing it.
#[derive(Args)]
pub struct GameArgs {
    /// Game file (.json, .toml, .yaml or .yml)
    #[arg(short, long, global = true, default_value = "game.json")]
    pub file: PathBuf,

    /// Player level
    #[arg(long, global = true)]
    pub level: Option<i64>,

    /// Player alliance
    #[arg(long, global = true)]
    pub alliance: Option<String>,

    /// World variable readable as `$KEY` in conditions (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_var, global = true)]
    pub vars: Vec<(String, String)>,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got \"{raw}\"")),
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List every entity the game file produces
    List {
        /// Only show entities of this kind (e.g. weapon, wearable)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Show details of one entity
    Inspect {
        /// Entity name, or dotted path like items.weapon.sword
        name: String,
    },

    /// Evaluate a condition against the starting world
    Eval {
        /// Condition, e.g. "$player.level >= 5"
        condition: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { kind } => commands::list::run(&cli.game, kind.as_deref()),
        Commands::Inspect { name } => commands::inspect::run(&cli.game, &name),
        Commands::Eval { condition } => commands::eval::run(&cli.game, &condition),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
