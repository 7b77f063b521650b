use std::collections::BTreeMap;

use mathcheck_core::MetricScores;
use serde::{Deserialize, Serialize};

/// Quantile summary for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Quantiles {
    /// 5th percentile.
    pub q05: f64,
    /// Median.
    pub q50: f64,
    /// 95th percentile.
    pub q95: f64,
}

/// Distribution of one metric across a batch.
///
/// An empty batch yields all zeros with `count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricStats {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Linearly interpolated quantiles.
    pub quantiles: Quantiles,
}

impl MetricStats {
    /// Summarises `values`.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        Self {
            count,
            mean: sorted.iter().sum::<f64>() / count as f64,
            min: sorted[0],
            max: sorted[count - 1],
            quantiles: Quantiles {
                q05: percentile(&sorted, 0.05),
                q50: percentile(&sorted, 0.5),
                q95: percentile(&sorted, 0.95),
            },
        }
    }
}

fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    let position = quantile * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Batch-wide statistics keyed by metric name (`EE`, `ASS`, `TSA`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BatchSummary {
    /// Records scored.
    pub records: usize,
    /// Steps supplied across all records with a `steps` path.
    pub total_steps: usize,
    /// Steps surviving the verifier.
    pub retained_steps: usize,
    /// Per-metric distributions.
    pub metrics: BTreeMap<String, MetricStats>,
}

impl BatchSummary {
    /// Builds the summary from per-record scores and step counts.
    pub fn from_scores(scores: &[MetricScores], total_steps: usize, retained_steps: usize) -> Self {
        let column = |pick: fn(&MetricScores) -> f64| {
            MetricStats::from_values(&scores.iter().map(pick).collect::<Vec<_>>())
        };
        let mut metrics = BTreeMap::new();
        metrics.insert("EE".to_string(), column(|s: &MetricScores| s.ee));
        metrics.insert("ASS".to_string(), column(|s: &MetricScores| s.ass));
        metrics.insert("TSA".to_string(), column(|s: &MetricScores| s.tsa));
        Self {
            records: scores.len(),
            total_steps,
            retained_steps,
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_interpolate_between_samples() {
        let stats = MetricStats::from_values(&[1.0, 0.0, 0.5]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.quantiles.q50, 0.5);
        assert!((stats.quantiles.q05 - 0.05).abs() < 1e-12);
        assert!((stats.quantiles.q95 - 0.95).abs() < 1e-12);
        assert!((stats.mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(MetricStats::from_values(&[]), MetricStats::default());
        let summary = BatchSummary::from_scores(&[], 0, 0);
        assert_eq!(summary.metrics["EE"].count, 0);
    }
}
