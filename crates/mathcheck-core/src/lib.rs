#![deny(missing_docs)]
#![doc = "Core error taxonomy and data model shared by the mathcheck crates."]

pub mod errors;
pub mod provenance;
mod types;

pub use errors::{ErrorInfo, MathcheckError};
pub use provenance::SchemaVersion;
pub use types::{MetricScores, Step, VerifiedPath, VerifiedStep};
