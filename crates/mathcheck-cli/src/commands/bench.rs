use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mathcheck_bench::batch::REPORT_FILE;
use mathcheck_bench::{run_bench, RunOpts};

use super::pipeline_config;

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// JSONL dataset with `problem`/`question` and `ground_truth`/`answer` fields.
    #[arg(long)]
    pub dataset: PathBuf,
    /// Output directory for the report.
    #[arg(long)]
    pub out: PathBuf,
    /// Maximum number of records to read.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Worker threads.
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
    /// Pipeline YAML with `verification` and `metrics` sections.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &BenchArgs) -> Result<(), Box<dyn Error>> {
    let config = pipeline_config(args.config.as_deref())?;
    let opts = RunOpts {
        concurrency: args.concurrency,
        limit: args.limit,
    };
    let report = run_bench(&args.dataset, &args.out, &config, &opts)?;
    for (name, stats) in &report.summary.metrics {
        println!(
            "{name}: mean {:.4} min {:.4} median {:.4} max {:.4}",
            stats.mean, stats.min, stats.quantiles.q50, stats.max
        );
    }
    println!(
        "{} records, {}/{} steps retained -> {}",
        report.summary.records,
        report.summary.retained_steps,
        report.summary.total_steps,
        args.out.join(REPORT_FILE).display()
    );
    Ok(())
}
