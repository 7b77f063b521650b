use mathcheck_sym::{Expression, SimplifyBudget};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One digit-bearing solution line with its parsed algebraic content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStep {
    /// Trimmed source line.
    pub text: String,
    /// Parsed content; absent when the algebraic part did not parse.
    #[serde(skip)]
    pub expression: Option<Expression>,
}

impl ParsedStep {
    /// Whether the line produced an expression.
    pub fn is_parseable(&self) -> bool {
        self.expression.is_some()
    }
}

/// Substring after the last colon, trimmed (drops `Step k:` labels).
pub fn math_part(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or(line).trim()
}

/// Extracts a single line.
///
/// Returns `None` for lines without any digit; such lines are prose and never
/// become steps. A digit-bearing line that fails to parse is still returned,
/// with its expression absent.
pub fn extract_step(line: &str, budget: &SimplifyBudget) -> Option<ParsedStep> {
    let text = line.trim();
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let expression = match Expression::parse(math_part(text), budget) {
        Ok(expression) => Some(expression),
        Err(err) => {
            debug!(line = text, error = %err, "step has no parseable expression");
            None
        }
    };
    Some(ParsedStep {
        text: text.to_string(),
        expression,
    })
}

/// Splits a solution on line breaks and extracts every non-blank line in order.
pub fn extract_steps(solution: &str, budget: &SimplifyBudget) -> Vec<ParsedStep> {
    solution
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| extract_step(line, budget))
        .collect()
}
