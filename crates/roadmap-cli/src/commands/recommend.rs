use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use roadmap_core::RoadmapScheduler;

use super::{load_config, load_valid_snapshot, today_or_local, CliResult};

#[derive(Args)]
pub struct RecommendArgs {
    /// Snapshot JSON file
    #[arg(long)]
    input: PathBuf,
    /// Initiative ID
    #[arg(long)]
    initiative: String,
    /// Date to plan from (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,
}

pub fn run(args: RecommendArgs, config: Option<PathBuf>) -> CliResult {
    let snapshot = load_valid_snapshot(&args.input)?;
    let initiative = snapshot
        .initiative(&args.initiative)
        .ok_or_else(|| format!("unknown initiative: {}", args.initiative))?;

    let scheduler = RoadmapScheduler::with_config(load_config(config)?);
    let recommendations = scheduler.recommend(&snapshot, initiative, today_or_local(args.today));
    println!("{}", serde_json::to_string_pretty(&recommendations)?);
    Ok(())
}
