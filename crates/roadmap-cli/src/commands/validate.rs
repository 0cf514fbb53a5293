use std::path::PathBuf;

use clap::Args;
use roadmap_core::RoadmapSnapshot;

use super::CliResult;

#[derive(Args)]
pub struct ValidateArgs {
    /// Snapshot JSON file
    #[arg(long)]
    input: PathBuf,
}

pub fn run(args: ValidateArgs) -> CliResult {
    let snapshot = RoadmapSnapshot::load(&args.input)?;
    let problems = roadmap_core::validate_snapshot(&snapshot);
    if problems.is_empty() {
        println!("ok");
        return Ok(());
    }
    for problem in &problems {
        println!("{problem}");
    }
    Err(format!("{} problem(s) found", problems.len()).into())
}
