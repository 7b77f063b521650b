use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    bench::{self, BenchArgs},
    config::{self, ConfigArgs},
    metrics::{self, MetricsArgs},
    verify::{self, VerifyArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "mathcheck",
    version,
    about = "Symbolic verification and scoring of step-by-step math solutions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one solution with EE, ASS and TSA.
    Metrics(MetricsArgs),
    /// Prune a candidate path with the local verifier.
    Verify(VerifyArgs),
    /// Prune and score a JSONL dataset, writing bench_report.json.
    Bench(BenchArgs),
    /// Write the default pipeline configuration.
    Config(ConfigArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Metrics(args) => metrics::run(&args),
        Command::Verify(args) => verify::run(&args),
        Command::Bench(args) => bench::run(&args),
        Command::Config(args) => config::run(&args),
    }
}
