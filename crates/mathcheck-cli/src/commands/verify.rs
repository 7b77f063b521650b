use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mathcheck_bench::serde::{from_json_slice, to_canonical_json_pretty};
use mathcheck_core::Step;
use mathcheck_prune::PathPruner;
use tracing::info;

use super::{pipeline_config, read_input};

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// JSON array of `{text, logprob}` steps (`-` for stdin).
    #[arg(long)]
    pub path: PathBuf,
    /// Pipeline YAML with a `verification` section.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Also report where and why the walk stopped.
    #[arg(long, default_value_t = false)]
    pub trace: bool,
}

pub fn run(args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    let config = pipeline_config(args.config.as_deref())?;
    let steps: Vec<Step> = from_json_slice(read_input(&args.path)?.as_bytes())?;
    let pruner = PathPruner::with_budget(config.verification, config.metrics.budget);
    let trace = pruner.verify_path_traced(&steps);
    info!(
        input = steps.len(),
        retained = trace.verified.len(),
        "path verified"
    );
    let rendered = if args.trace {
        to_canonical_json_pretty(&trace)?
    } else {
        to_canonical_json_pretty(&trace.verified)?
    };
    println!("{rendered}");
    Ok(())
}
