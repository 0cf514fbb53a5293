use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use roadmap_core::RoadmapScheduler;

use super::{load_config, load_valid_snapshot, today_or_local, CliResult};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Snapshot JSON file
    #[arg(long)]
    input: PathBuf,
    /// Date to plan from (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Write the new blocks back into the snapshot
    #[arg(long)]
    apply: bool,
    /// Where to write the updated snapshot (default: the input file)
    #[arg(long, requires = "apply")]
    output: Option<PathBuf>,
}

pub fn run(args: ScheduleArgs, config: Option<PathBuf>) -> CliResult {
    let mut snapshot = load_valid_snapshot(&args.input)?;
    let scheduler = RoadmapScheduler::with_config(load_config(config)?);
    let result = scheduler.generate(&snapshot, today_or_local(args.today));

    println!("{}", serde_json::to_string_pretty(&result)?);

    if args.apply {
        snapshot.apply_schedule(&result);
        let target = args.output.unwrap_or(args.input);
        snapshot.save(&target)?;
        tracing::info!(path = %target.display(), blocks = result.blocks.len(), "snapshot updated");
    }
    Ok(())
}
