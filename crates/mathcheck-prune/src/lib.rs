#![deny(missing_docs)]
#![doc = "Local verification of candidate solution paths: a syntax gate and a log-probability gate applied step by step until the first failure."]

/// Verification toggles and the atomic failure policy.
pub mod config;
/// The pruning walk.
pub mod pruner;

pub use config::{AtomicPolicy, VerificationConfig};
pub use pruner::{verify_path, PathPruner, PathSelection, PruneTrace, StopReason};
