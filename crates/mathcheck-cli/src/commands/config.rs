use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use mathcheck_bench::PipelineConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Destination YAML file; printed to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> Result<(), Box<dyn Error>> {
    let yaml = PipelineConfig::default().to_yaml()?;
    match &args.out {
        Some(path) => fs::write(path, yaml)?,
        None => print!("{yaml}"),
    }
    Ok(())
}
