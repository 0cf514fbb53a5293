use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "roadmap-cli", version, about = "Roadmap planner scheduling CLI")]
struct Cli {
    /// Scheduler config file (default: ~/.config/roadmap-planner/scheduler.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank engineers for one initiative
    Recommend(commands::recommend::RecommendArgs),
    /// Generate a schedule for every open initiative
    Schedule(commands::schedule::ScheduleArgs),
    /// Check a snapshot for malformed input
    Validate(commands::validate::ValidateArgs),
    /// Scheduler configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config;
    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run(args, config),
        Commands::Schedule(args) => commands::schedule::run(args, config),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
