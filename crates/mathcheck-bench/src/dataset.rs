use std::fs;
use std::path::Path;

use mathcheck_core::errors::{ErrorInfo, MathcheckError};
use mathcheck_core::Step;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;

/// One benchmark problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRecord {
    /// Problem statement.
    #[serde(alias = "question", default)]
    pub problem: String,
    /// Target answer; numeric JSON values are accepted and kept as text.
    #[serde(alias = "answer", default, deserialize_with = "text_or_number")]
    pub ground_truth: String,
    /// Full solution text, scored as written when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    /// Candidate path to prune before scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

fn dataset_error(code: &str, err: impl ToString, path: &Path, line: usize) -> MathcheckError {
    MathcheckError::Serde(
        ErrorInfo::new(code, err.to_string())
            .with_context("path", path.display().to_string())
            .with_context("line", line.to_string()),
    )
}

/// Reads at most `limit` records from a JSONL file. Blank lines are skipped.
pub fn load_dataset(path: &Path, limit: Option<usize>) -> Result<Vec<BenchRecord>, MathcheckError> {
    let text = fs::read_to_string(path).map_err(|err| {
        MathcheckError::Io(
            ErrorInfo::new("dataset_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let limit = limit.unwrap_or(usize::MAX);
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if records.len() >= limit {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let record: BenchRecord = serde_json::from_str(line)
            .map_err(|err| dataset_error("dataset_record", err, path, idx + 1))?;
        records.push(record);
    }
    info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}
