use serde::{Deserialize, Serialize};

/// How a failed atomic (syntax) check is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AtomicPolicy {
    /// Log the failure and keep the step.
    #[default]
    Advisory,
    /// Stop the walk at the failing step.
    Strict,
}

/// Verification toggles and thresholds for [`crate::PathPruner`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Run the atomic syntax check on each step.
    #[serde(default = "VerificationConfig::default_enabled")]
    pub atomic_check_enabled: bool,
    /// Gate each step on its log-probability.
    #[serde(default = "VerificationConfig::default_enabled")]
    pub logical_check_enabled: bool,
    /// Steps with a log-probability strictly below this value stop the walk.
    #[serde(default = "VerificationConfig::default_logprob_threshold")]
    pub logprob_threshold: f64,
    /// Treatment of atomic check failures.
    #[serde(default)]
    pub atomic_policy: AtomicPolicy,
}

impl VerificationConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_logprob_threshold() -> f64 {
        -1.5
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            atomic_check_enabled: Self::default_enabled(),
            logical_check_enabled: Self::default_enabled(),
            logprob_threshold: Self::default_logprob_threshold(),
            atomic_policy: AtomicPolicy::default(),
        }
    }
}
