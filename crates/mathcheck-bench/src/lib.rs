#![deny(missing_docs)]
#![doc = "Benchmark driver for mathcheck: JSONL datasets, parallel prune-and-score batches and content-hashed reports."]

/// Parallel batch execution.
pub mod batch;
/// Combined pipeline configuration.
pub mod config;
/// JSONL dataset loading.
pub mod dataset;
/// Canonical hashing helpers.
pub mod hash;
/// Report assembly.
pub mod report;
/// Canonical JSON and YAML helpers.
pub mod serde;
/// Summary statistics over per-record scores.
pub mod stat;

pub use batch::{run_batch, run_bench, RunOpts};
pub use config::{load_pipeline_config, PipelineConfig};
pub use dataset::{load_dataset, BenchRecord};
pub use report::{BenchReport, RecordReport};
pub use stat::{BatchSummary, MetricStats, Quantiles};
