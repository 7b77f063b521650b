use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mathcheck_bench::serde::to_canonical_json_pretty;
use mathcheck_metrics::MetricsEngine;

use super::{pipeline_config, read_input};

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Solution text file, one step per line (`-` for stdin).
    #[arg(long)]
    pub solution: PathBuf,
    /// Target answer, e.g. `5` or `x = 5`.
    #[arg(long = "ground-truth")]
    pub ground_truth: String,
    /// Pipeline YAML overriding the default budgets.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print only EE, ASS and TSA.
    #[arg(long, default_value_t = false)]
    pub scores_only: bool,
}

pub fn run(args: &MetricsArgs) -> Result<(), Box<dyn Error>> {
    let config = pipeline_config(args.config.as_deref())?;
    let solution = read_input(&args.solution)?;
    let engine = MetricsEngine::new(config.metrics);
    let report = engine.evaluate(&solution, &args.ground_truth);
    let rendered = if args.scores_only {
        to_canonical_json_pretty(&report.scores)?
    } else {
        to_canonical_json_pretty(&report)?
    };
    println!("{rendered}");
    Ok(())
}
