//! Structured error types shared across mathcheck crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MathcheckError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (input fragments, positions, limits).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the mathcheck engine.
///
/// None of these ever escape `compute_all_metrics` or `verify_path`; the
/// scoring layers collapse them into conservative defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MathcheckError {
    /// Text could not be tokenized or parsed into an expression.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Symbolic evaluation failed (division by zero, unsupported form).
    #[error("evaluation error: {0}")]
    Eval(ErrorInfo),
    /// Symbolic work exceeded the configured budget.
    #[error("budget exceeded: {0}")]
    Budget(ErrorInfo),
    /// Configuration was missing or invalid.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl MathcheckError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MathcheckError::Parse(info)
            | MathcheckError::Eval(info)
            | MathcheckError::Budget(info)
            | MathcheckError::Config(info)
            | MathcheckError::Serde(info)
            | MathcheckError::Io(info) => info,
        }
    }

    /// Shorthand for a [`MathcheckError::Eval`] with no context.
    pub fn eval(code: &str, message: impl Into<String>) -> Self {
        MathcheckError::Eval(ErrorInfo::new(code, message))
    }
}
