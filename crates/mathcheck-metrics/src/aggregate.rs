use mathcheck_core::MetricScores;
use mathcheck_sym::SimplifyBudget;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consistency::tally_consistency;
use crate::equivalence::tally_transitions;
use crate::extract::extract_steps;
use crate::ground_truth::GroundTruth;
use crate::simplification::evaluate_simplification;

/// Configuration for [`MetricsEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MetricsConfig {
    /// Work limits for every symbolic call.
    #[serde(default)]
    pub budget: SimplifyBudget,
}

/// Scores plus the counts they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// EE, ASS and TSA.
    pub scores: MetricScores,
    /// Digit-bearing lines kept as steps.
    pub parsed_lines: usize,
    /// Steps whose expression parsed.
    pub parseable_steps: usize,
    /// Parseable steps consistent with the ground truth.
    pub consistent_steps: usize,
    /// Consecutive pairs entering the EE denominator.
    pub comparable_transitions: usize,
    /// Comparable pairs judged equivalent.
    pub equivalent_transitions: usize,
    /// Canonical form of the final parseable step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_final: Option<String>,
}

impl MetricsReport {
    fn empty() -> Self {
        Self {
            scores: MetricScores::zero(),
            parsed_lines: 0,
            parseable_steps: 0,
            consistent_steps: 0,
            comparable_transitions: 0,
            equivalent_transitions: 0,
            canonical_final: None,
        }
    }
}

/// Stateless scorer parameterised by an immutable [`MetricsConfig`].
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: MetricsConfig,
}

impl MetricsEngine {
    /// Creates an engine for the given configuration.
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Scores one solution against its ground truth, with diagnostics.
    pub fn evaluate(&self, solution: &str, ground_truth: &str) -> MetricsReport {
        let budget = &self.config.budget;
        let steps = extract_steps(solution, budget);
        if steps.is_empty() {
            debug!("no digit-bearing lines; scores are zero");
            return MetricsReport::empty();
        }
        let truth = GroundTruth::parse(ground_truth, budget);

        let transitions = tally_transitions(&steps, budget);
        let consistency = tally_consistency(
            steps.iter().filter_map(|step| step.expression.as_ref()),
            truth.as_ref(),
            budget,
        );
        let simplification = steps
            .iter()
            .rev()
            .find_map(|step| step.expression.as_ref())
            .map(|last| evaluate_simplification(last, budget));
        let (ass, canonical_final) = match simplification {
            Some(Ok(outcome)) => (outcome.score, Some(outcome.canonical)),
            Some(Err(err)) => {
                debug!(error = %err, "final step could not be simplified");
                (0.0, None)
            }
            None => (0.0, None),
        };

        MetricsReport {
            scores: MetricScores {
                ee: transitions.score(),
                ass,
                tsa: consistency.score(),
            },
            parsed_lines: steps.len(),
            parseable_steps: consistency.parseable,
            consistent_steps: consistency.consistent,
            comparable_transitions: transitions.comparable,
            equivalent_transitions: transitions.equivalent,
            canonical_final,
        }
    }

    /// Scores one solution against its ground truth.
    pub fn compute_all_metrics(&self, solution: &str, ground_truth: &str) -> MetricScores {
        self.evaluate(solution, ground_truth).scores
    }
}

/// [`MetricsEngine::compute_all_metrics`] with the default configuration.
pub fn compute_all_metrics(solution: &str, ground_truth: &str) -> MetricScores {
    MetricsEngine::default().compute_all_metrics(solution, ground_truth)
}
