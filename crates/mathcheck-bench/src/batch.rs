use std::fs;
use std::path::Path;

use mathcheck_core::errors::{ErrorInfo, MathcheckError};
use mathcheck_metrics::MetricsEngine;
use mathcheck_prune::PathPruner;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::dataset::{load_dataset, BenchRecord};
use crate::report::{BenchReport, RecordReport, SolutionSource};
use crate::serde::to_canonical_json_bytes;

/// File name of the report written by [`run_bench`].
pub const REPORT_FILE: &str = "bench_report.json";

fn io_error(code: &str, err: impl ToString, path: &Path) -> MathcheckError {
    MathcheckError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Options governing batch execution.
#[derive(Debug, Clone)]
pub struct RunOpts {
    /// Worker threads; zero is treated as one.
    pub concurrency: usize,
    /// Maximum number of dataset records to read.
    pub limit: Option<usize>,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self {
            concurrency: 1,
            limit: None,
        }
    }
}

/// Prunes and scores every record on a dedicated pool, preserving input order.
pub fn run_batch(
    records: &[BenchRecord],
    config: &PipelineConfig,
    opts: &RunOpts,
) -> Result<BenchReport, MathcheckError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency.max(1))
        .build()
        .map_err(|err| MathcheckError::Config(ErrorInfo::new("thread_pool", err.to_string())))?;
    let pruner = PathPruner::with_budget(config.verification.clone(), config.metrics.budget);
    let engine = MetricsEngine::new(config.metrics);

    let mut scored: Vec<(usize, RecordReport)> = pool.install(|| {
        records
            .par_iter()
            .enumerate()
            .map(|(index, record)| (index, score_record(index, record, &pruner, &engine)))
            .collect()
    });
    scored.sort_by_key(|(index, _)| *index);
    let reports: Vec<RecordReport> = scored.into_iter().map(|(_, report)| report).collect();

    let empty = reports
        .iter()
        .filter(|report| report.source == SolutionSource::Empty)
        .count();
    if empty > 0 {
        warn!(empty, records = reports.len(), "records scored without any solution text");
    }

    let report = BenchReport::new(config.clone(), reports)?;
    if let Some(ee) = report.summary.metrics.get("EE") {
        info!(
            records = report.summary.records,
            mean_ee = ee.mean,
            retained_steps = report.summary.retained_steps,
            total_steps = report.summary.total_steps,
            "batch scored"
        );
    }
    Ok(report)
}

fn score_record(
    index: usize,
    record: &BenchRecord,
    pruner: &PathPruner,
    engine: &MetricsEngine,
) -> RecordReport {
    let trace = record
        .steps
        .as_deref()
        .map(|steps| pruner.verify_path_traced(steps));
    let total_steps = record.steps.as_ref().map_or(0, Vec::len);
    let retained_steps = trace.as_ref().map_or(0, |trace| trace.verified.len());

    let (solution, source) = match (&record.solution, &trace) {
        (Some(text), _) => (text.clone(), SolutionSource::Provided),
        (None, Some(trace)) if !trace.verified.is_empty() => {
            let joined = trace
                .verified
                .iter()
                .map(|step| step.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            (joined, SolutionSource::VerifiedSteps)
        }
        (None, Some(_)) => {
            debug!(record = index, "path rejected completely");
            (String::new(), SolutionSource::Empty)
        }
        (None, None) => (String::new(), SolutionSource::Empty),
    };

    let metrics = engine.evaluate(&solution, &record.ground_truth);
    debug!(
        record = index,
        ee = metrics.scores.ee,
        ass = metrics.scores.ass,
        tsa = metrics.scores.tsa,
        "record scored"
    );
    RecordReport {
        index,
        problem: record.problem.clone(),
        ground_truth: record.ground_truth.clone(),
        total_steps,
        retained_steps,
        stopped_at: trace.as_ref().and_then(|trace| trace.stopped_at),
        stop_reason: trace.as_ref().and_then(|trace| trace.reason),
        source,
        metrics,
    }
}

/// Loads `dataset`, runs the batch and writes [`REPORT_FILE`] under `out`.
pub fn run_bench(
    dataset: &Path,
    out: &Path,
    config: &PipelineConfig,
    opts: &RunOpts,
) -> Result<BenchReport, MathcheckError> {
    let records = load_dataset(dataset, opts.limit)?;
    let report = run_batch(&records, config, opts)?;
    fs::create_dir_all(out).map_err(|err| io_error("bench_out_dir", err, out))?;
    let path = out.join(REPORT_FILE);
    let bytes = to_canonical_json_bytes(&report)?;
    fs::write(&path, bytes).map_err(|err| io_error("bench_report_write", err, &path))?;
    info!(path = %path.display(), hash = %report.report_hash, "report written");
    Ok(report)
}
