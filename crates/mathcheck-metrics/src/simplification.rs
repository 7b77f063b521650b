use mathcheck_core::errors::MathcheckError;
use mathcheck_sym::{Expression, SimplifyBudget};
use serde::{Deserialize, Serialize};

/// Operation counts behind an ASS value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplificationOutcome {
    /// Operations in the expression as written.
    pub raw_ops: usize,
    /// Operations in the canonical form.
    pub canonical_ops: usize,
    /// Rendered canonical form.
    pub canonical: String,
    /// Resulting score in (0, 1].
    pub score: f64,
}

/// `1.0` when no operations can be saved, else `1 / (1 + excess)`.
pub fn score_from_ops(raw_ops: usize, canonical_ops: usize) -> f64 {
    if raw_ops <= canonical_ops {
        1.0
    } else {
        1.0 / (1.0 + (raw_ops - canonical_ops) as f64)
    }
}

/// Simplifies `expression` (each side of an equation independently) and
/// compares operation counts.
pub fn evaluate_simplification(
    expression: &Expression,
    budget: &SimplifyBudget,
) -> Result<SimplificationOutcome, MathcheckError> {
    let canonical = expression.simplify(budget)?;
    let raw_ops = expression.count_ops();
    let canonical_ops = canonical.count_ops();
    Ok(SimplificationOutcome {
        raw_ops,
        canonical_ops,
        canonical: canonical.to_string(),
        score: score_from_ops(raw_ops, canonical_ops),
    })
}

/// ASS for one expression; 0.0 on any evaluation failure.
pub fn simplification_score(expression: &Expression, budget: &SimplifyBudget) -> f64 {
    evaluate_simplification(expression, budget)
        .map(|outcome| outcome.score)
        .unwrap_or(0.0)
}
