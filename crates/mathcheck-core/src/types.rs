use serde::{Deserialize, Serialize};

/// One line of a model-generated solution together with its log-probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Raw step text as emitted by the sampler.
    #[serde(default)]
    pub text: String,
    /// Log-probability of the step; negative infinity when the sampler omitted it.
    #[serde(default = "Step::missing_logprob")]
    pub logprob: f64,
}

impl Step {
    fn missing_logprob() -> f64 {
        f64::NEG_INFINITY
    }

    /// Creates a step from its text and log-probability.
    pub fn new(text: impl Into<String>, logprob: f64) -> Self {
        Self {
            text: text.into(),
            logprob,
        }
    }
}

/// Step that survived local verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedStep {
    /// Original step text, kept verbatim for downstream re-parsing.
    pub content: String,
    /// `exp(logprob)`.
    pub confidence: f64,
    /// Log-probability carried over from the input step.
    pub logprob: f64,
}

impl VerifiedStep {
    /// Builds a verified step, deriving the confidence from the log-probability.
    pub fn from_step(step: &Step) -> Self {
        Self {
            content: step.text.clone(),
            confidence: step.logprob.exp(),
            logprob: step.logprob,
        }
    }
}

/// Ordered, possibly truncated, sequence of verified steps.
pub type VerifiedPath = Vec<VerifiedStep>;

/// The three scalar scores computed for one solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricScores {
    /// Expression equivalence across consecutive steps.
    #[serde(rename = "EE")]
    pub ee: f64,
    /// Algebraic simplification score of the final step.
    #[serde(rename = "ASS")]
    pub ass: f64,
    /// Transformation step accuracy against the ground truth.
    #[serde(rename = "TSA")]
    pub tsa: f64,
}

impl MetricScores {
    /// All-zero scores, the "inconclusive" outcome.
    pub const fn zero() -> Self {
        Self {
            ee: 0.0,
            ass: 0.0,
            tsa: 0.0,
        }
    }
}
