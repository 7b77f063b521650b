use mathcheck_core::{Step, VerifiedPath, VerifiedStep};
use mathcheck_sym::{Expression, SimplifyBudget};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AtomicPolicy, VerificationConfig};

/// Why a walk stopped before the end of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Strict atomic check rejected the step.
    AtomicCheck,
    /// Log-probability below the threshold (or NaN).
    LowConfidence,
}

/// Verified prefix of a path plus where and why the walk stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneTrace {
    /// Accepted steps, in input order.
    pub verified: VerifiedPath,
    /// Index of the first discarded step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<usize>,
    /// Gate that discarded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StopReason>,
}

/// Paths surviving [`PathPruner::verify_paths`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathSelection {
    /// Non-empty verified paths, in input order.
    pub retained: Vec<VerifiedPath>,
    /// Input index of every retained path.
    pub retained_indices: Vec<usize>,
    /// Input indices of paths with no verified step.
    pub rejected: Vec<usize>,
}

enum ScanState {
    Scanning,
    Stopped { index: usize, reason: StopReason },
}

/// Sequential, confidence-gated step filter.
#[derive(Debug, Clone, Default)]
pub struct PathPruner {
    config: VerificationConfig,
    budget: SimplifyBudget,
}

impl PathPruner {
    /// Creates a pruner for the given configuration.
    pub fn new(config: VerificationConfig) -> Self {
        Self {
            config,
            budget: SimplifyBudget::default(),
        }
    }

    /// Creates a pruner whose syntax check parses under `budget`.
    pub fn with_budget(config: VerificationConfig, budget: SimplifyBudget) -> Self {
        Self { config, budget }
    }

    /// Configuration in use.
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Syntax check: `true` when the step looks like parseable mathematics.
    ///
    /// The text is lowercased and the words `solve` and `step` removed; an
    /// empty remainder is accepted as narration.
    pub fn atomic_check(&self, text: &str) -> bool {
        let cleaned = text.to_lowercase().replace("solve", "").replace("step", "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return true;
        }
        let candidate = cleaned.rsplit(':').next().unwrap_or(cleaned).trim();
        match Expression::parse(candidate, &self.budget) {
            Ok(_) => true,
            Err(err) => {
                debug!(step = text, error = %err, "atomic check could not parse step");
                false
            }
        }
    }

    fn passes_logical_check(&self, logprob: f64) -> bool {
        // NaN compares false against everything and must not pass.
        logprob >= self.config.logprob_threshold
    }

    /// Walks `path` until the first step failing a gate.
    pub fn verify_path_traced(&self, path: &[Step]) -> PruneTrace {
        let mut verified = Vec::with_capacity(path.len());
        let mut state = ScanState::Scanning;
        for (index, step) in path.iter().enumerate() {
            if self.config.atomic_check_enabled && !self.atomic_check(&step.text) {
                match self.config.atomic_policy {
                    AtomicPolicy::Advisory => {
                        debug!(index, "atomic check failed; step kept under advisory policy");
                    }
                    AtomicPolicy::Strict => {
                        state = ScanState::Stopped {
                            index,
                            reason: StopReason::AtomicCheck,
                        };
                        break;
                    }
                }
            }
            if self.config.logical_check_enabled && !self.passes_logical_check(step.logprob) {
                state = ScanState::Stopped {
                    index,
                    reason: StopReason::LowConfidence,
                };
                break;
            }
            verified.push(VerifiedStep::from_step(step));
        }

        match state {
            ScanState::Scanning => PruneTrace {
                verified,
                stopped_at: None,
                reason: None,
            },
            ScanState::Stopped { index, reason } => {
                debug!(index, ?reason, kept = verified.len(), "path truncated");
                PruneTrace {
                    verified,
                    stopped_at: Some(index),
                    reason: Some(reason),
                }
            }
        }
    }

    /// Verified prefix of `path`.
    pub fn verify_path(&self, path: &[Step]) -> VerifiedPath {
        self.verify_path_traced(path).verified
    }

    /// Prunes many candidate paths in parallel, keeping the non-empty ones.
    pub fn verify_paths(&self, paths: &[Vec<Step>]) -> PathSelection {
        let mut results: Vec<(usize, VerifiedPath)> = paths
            .par_iter()
            .enumerate()
            .map(|(index, path)| (index, self.verify_path(path)))
            .collect();
        results.sort_by_key(|(index, _)| *index);

        let mut selection = PathSelection::default();
        for (index, verified) in results {
            if verified.is_empty() {
                debug!(path = index, "path rejected completely");
                selection.rejected.push(index);
            } else {
                selection.retained_indices.push(index);
                selection.retained.push(verified);
            }
        }
        if selection.retained.is_empty() && !paths.is_empty() {
            warn!(paths = paths.len(), "no path survived local verification");
        }
        selection
    }
}

/// Verifies one path with an explicit configuration.
pub fn verify_path(path: &[Step], config: &VerificationConfig) -> VerifiedPath {
    PathPruner::new(config.clone()).verify_path(path)
}
