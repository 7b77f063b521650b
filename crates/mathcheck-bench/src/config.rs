use std::fs;
use std::path::Path;

use mathcheck_core::errors::{ErrorInfo, MathcheckError};
use mathcheck_metrics::MetricsConfig;
use mathcheck_prune::VerificationConfig;
use serde::{Deserialize, Serialize};

use crate::serde::{from_yaml_slice, to_yaml_string};

/// Pipeline file: verification gates plus metric budgets.
///
/// Sections other than `verification` and `metrics` are ignored so one file
/// can drive the sampler and the scorer alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    /// Local verifier settings.
    #[serde(default)]
    pub verification: VerificationConfig,
    /// Scorer settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl PipelineConfig {
    /// Parses a pipeline YAML payload.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, MathcheckError> {
        from_yaml_slice(data).map_err(|err| {
            let mut info = err.info().clone();
            info.hint = Some("every field is optional; see `mathcheck config`".into());
            MathcheckError::Config(info)
        })
    }

    /// YAML rendering of the configuration.
    pub fn to_yaml(&self) -> Result<String, MathcheckError> {
        to_yaml_string(self)
    }
}

/// Loads a pipeline configuration from a YAML file.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig, MathcheckError> {
    let bytes = fs::read(path).map_err(|err| {
        MathcheckError::Io(
            ErrorInfo::new("config_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    PipelineConfig::from_yaml_slice(&bytes)
}
