use mathcheck_core::errors::MathcheckError;
use mathcheck_core::provenance::SchemaVersion;
use mathcheck_core::MetricScores;
use mathcheck_metrics::MetricsReport;
use mathcheck_prune::StopReason;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::hash::stable_hash_string;
use crate::stat::BatchSummary;

/// Schema version written into every [`BenchReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Where the scored solution text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionSource {
    /// The record's `solution` field.
    Provided,
    /// Verified step contents joined by newlines.
    VerifiedSteps,
    /// Nothing to score.
    Empty,
}

/// Outcome for one dataset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordReport {
    /// Position in the dataset.
    pub index: usize,
    /// Problem statement, as loaded.
    pub problem: String,
    /// Target answer, as loaded.
    pub ground_truth: String,
    /// Steps supplied in the record's path.
    pub total_steps: usize,
    /// Steps kept by the verifier.
    pub retained_steps: usize,
    /// Index of the first discarded step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<usize>,
    /// Gate that discarded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    /// Origin of the scored text.
    pub source: SolutionSource,
    /// Scores and their diagnostic counts.
    pub metrics: MetricsReport,
}

impl RecordReport {
    /// EE, ASS and TSA of this record.
    pub fn scores(&self) -> MetricScores {
        self.metrics.scores
    }
}

#[derive(Serialize)]
struct HashedContent<'a> {
    schema: &'a SchemaVersion,
    config: &'a PipelineConfig,
    records: &'a [RecordReport],
    summary: &'a BatchSummary,
}

/// Deterministic batch report; identical inputs give byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    /// Report schema version.
    pub schema: SchemaVersion,
    /// Configuration the batch ran with.
    pub config: PipelineConfig,
    /// Per-record outcomes in dataset order.
    pub records: Vec<RecordReport>,
    /// Batch statistics.
    pub summary: BatchSummary,
    /// SHA-256 over the canonical JSON of every other field.
    pub report_hash: String,
}

impl BenchReport {
    /// Assembles a report and computes its hash.
    pub fn new(config: PipelineConfig, records: Vec<RecordReport>) -> Result<Self, MathcheckError> {
        let scores: Vec<MetricScores> = records.iter().map(RecordReport::scores).collect();
        let total_steps = records.iter().map(|record| record.total_steps).sum();
        let retained_steps = records.iter().map(|record| record.retained_steps).sum();
        let summary = BatchSummary::from_scores(&scores, total_steps, retained_steps);
        let mut report = Self {
            schema: REPORT_SCHEMA,
            config,
            records,
            summary,
            report_hash: String::new(),
        };
        report.report_hash = report.content_hash()?;
        Ok(report)
    }

    fn content_hash(&self) -> Result<String, MathcheckError> {
        stable_hash_string(&HashedContent {
            schema: &self.schema,
            config: &self.config,
            records: &self.records,
            summary: &self.summary,
        })
    }

    /// Whether `report_hash` matches the report's content.
    pub fn hash_matches(&self) -> Result<bool, MathcheckError> {
        Ok(self.content_hash()? == self.report_hash)
    }
}
