pub mod bench;
pub mod config;
pub mod metrics;
pub mod verify;

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use mathcheck_bench::{load_pipeline_config, PipelineConfig};

/// Reads a file, or standard input when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(fs::read_to_string(path)?)
}

/// Pipeline configuration from `--config`, or the defaults.
pub fn pipeline_config(path: Option<&Path>) -> Result<PipelineConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(load_pipeline_config(path)?),
        None => Ok(PipelineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_flag_means_defaults() {
        assert_eq!(pipeline_config(None).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn reads_config_and_input_files() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("pipeline.yaml");
        fs::write(&config_path, "verification:\n  logprob_threshold: -3.0\n").unwrap();
        let config = pipeline_config(Some(&config_path)).unwrap();
        assert_eq!(config.verification.logprob_threshold, -3.0);

        let solution = temp.path().join("solution.txt");
        fs::write(&solution, "Step 1: x = 2\n").unwrap();
        assert_eq!(read_input(&solution).unwrap(), "Step 1: x = 2\n");
    }
}
