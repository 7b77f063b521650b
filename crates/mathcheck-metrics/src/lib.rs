#![deny(missing_docs)]
#![doc = "Extraction of algebraic steps from model-generated solutions and the EE, ASS and TSA scores computed over them."]

/// Orchestration of the three scores over one solution.
pub mod aggregate;
/// Step-versus-ground-truth consistency (TSA).
pub mod consistency;
/// Consecutive-step equivalence (EE).
pub mod equivalence;
/// Line splitting and algebraic-substring parsing.
pub mod extract;
/// Target value parsing.
pub mod ground_truth;
/// Operation-count based simplification score (ASS).
pub mod simplification;

pub use aggregate::{compute_all_metrics, MetricsConfig, MetricsEngine, MetricsReport};
pub use consistency::{check_consistency, ConsistencyVerdict};
pub use equivalence::{check_equivalence, EquivalenceVerdict};
pub use extract::{extract_steps, ParsedStep};
pub use ground_truth::GroundTruth;
pub use simplification::simplification_score;
