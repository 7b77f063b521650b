use std::path::PathBuf;

use mathcheck_bench::batch::REPORT_FILE;
use mathcheck_bench::report::SolutionSource;
use mathcheck_bench::serde::from_json_slice;
use mathcheck_bench::{load_dataset, run_batch, run_bench, BenchReport, PipelineConfig, RunOpts};
use mathcheck_prune::StopReason;

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

#[test]
fn reports_are_identical_across_concurrency_levels() {
    let dataset = fixture_path("fixtures/smoke.jsonl");
    let config = PipelineConfig::default();
    let serial = tempfile::tempdir().expect("tmp dir");
    let parallel = tempfile::tempdir().expect("tmp dir");

    run_bench(&dataset, serial.path(), &config, &RunOpts::default()).expect("serial run");
    let opts = RunOpts {
        concurrency: 4,
        ..RunOpts::default()
    };
    run_bench(&dataset, parallel.path(), &config, &opts).expect("parallel run");
    run_bench(&dataset, parallel.path(), &config, &opts).expect("repeat run");

    let serial_bytes = std::fs::read(serial.path().join(REPORT_FILE)).expect("read serial");
    let parallel_bytes = std::fs::read(parallel.path().join(REPORT_FILE)).expect("read parallel");
    assert_eq!(serial_bytes, parallel_bytes);

    let parsed: BenchReport = from_json_slice(&serial_bytes).expect("parse report");
    assert_eq!(parsed.records.len(), 5);
}

#[test]
fn pruning_feeds_the_scored_text() {
    let records = load_dataset(&fixture_path("fixtures/smoke.jsonl"), None).expect("load");
    let report = run_batch(&records, &PipelineConfig::default(), &RunOpts::default()).expect("run");
    assert!(report.hash_matches().expect("hash"));

    let indices: Vec<usize> = report.records.iter().map(|record| record.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    let provided = &report.records[0];
    assert_eq!(provided.source, SolutionSource::Provided);
    assert_eq!(provided.metrics.scores.tsa, 1.0);

    let intact = &report.records[1];
    assert_eq!(intact.source, SolutionSource::VerifiedSteps);
    assert_eq!((intact.total_steps, intact.retained_steps), (3, 3));
    assert_eq!(intact.stopped_at, None);

    let truncated = &report.records[2];
    assert_eq!((truncated.total_steps, truncated.retained_steps), (3, 1));
    assert_eq!(truncated.stopped_at, Some(1));
    assert_eq!(truncated.stop_reason, Some(StopReason::LowConfidence));
    assert_eq!(truncated.metrics.parsed_lines, 1);

    let rejected = &report.records[3];
    assert_eq!(rejected.source, SolutionSource::Empty);
    assert_eq!(rejected.metrics.scores.ee, 0.0);
    assert_eq!(rejected.metrics.scores.ass, 0.0);
    assert_eq!(rejected.metrics.scores.tsa, 0.0);

    assert_eq!(report.summary.records, 5);
    assert_eq!(report.summary.total_steps, 7);
    assert_eq!(report.summary.retained_steps, 4);
    for stats in report.summary.metrics.values() {
        assert_eq!(stats.count, 5);
        assert!(stats.min <= stats.quantiles.q50 && stats.quantiles.q50 <= stats.max);
    }
}

#[test]
fn configuration_changes_the_hash() {
    let records = load_dataset(&fixture_path("fixtures/smoke.jsonl"), None).expect("load");
    let baseline = run_batch(&records, &PipelineConfig::default(), &RunOpts::default()).expect("run");
    let mut lenient = PipelineConfig::default();
    lenient.verification.logprob_threshold = -10.0;
    let relaxed = run_batch(&records, &lenient, &RunOpts::default()).expect("run");
    assert_ne!(baseline.report_hash, relaxed.report_hash);
    assert_eq!(relaxed.records[2].retained_steps, 3);
}

#[test]
fn empty_batch_produces_a_zero_summary() {
    let report = run_batch(&[], &PipelineConfig::default(), &RunOpts::default()).expect("run");
    assert_eq!(report.summary.records, 0);
    assert_eq!(report.summary.metrics["TSA"].count, 0);
}
