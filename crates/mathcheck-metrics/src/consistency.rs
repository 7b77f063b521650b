use mathcheck_sym::{Expression, SimplifyBudget};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ground_truth::GroundTruth;

/// Outcome of checking one step against the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyVerdict {
    /// Substituting the target value satisfies the equation.
    Consistent,
    /// Substitution leaves a non-zero residual, or the step is a bare term.
    Inconsistent,
    /// No ground truth, or no free symbol to substitute into.
    NoAnchor,
    /// Simplification failed or ran out of budget.
    EvaluationError,
}

impl ConsistencyVerdict {
    /// Boolean view used for scoring.
    pub fn is_consistent(self) -> bool {
        matches!(self, ConsistencyVerdict::Consistent)
    }
}

/// Symbol receiving the ground-truth value: the pinned target when the step
/// mentions it, otherwise the lexicographically smallest free symbol.
pub fn substitution_symbol(expression: &Expression, truth: &GroundTruth) -> Option<String> {
    let symbols = expression.free_symbols();
    if let Some(target) = &truth.target {
        if symbols.contains(target) {
            return Some(target.clone());
        }
    }
    symbols.into_iter().next()
}

/// Checks a step against the ground truth by substitution.
pub fn check_consistency(
    expression: &Expression,
    truth: Option<&GroundTruth>,
    budget: &SimplifyBudget,
) -> ConsistencyVerdict {
    let Some(truth) = truth else {
        return ConsistencyVerdict::NoAnchor;
    };
    let Some(symbol) = substitution_symbol(expression, truth) else {
        return ConsistencyVerdict::NoAnchor;
    };
    match expression.substitute(&symbol, &truth.value) {
        Expression::Equation { lhs, rhs } => match lhs.sub(&rhs).is_zero(budget) {
            Ok(true) => ConsistencyVerdict::Consistent,
            Ok(false) => ConsistencyVerdict::Inconsistent,
            Err(err) => {
                debug!(symbol = %symbol, error = %err, "consistency check failed");
                ConsistencyVerdict::EvaluationError
            }
        },
        // Substituting into a term never yields an equation.
        Expression::Term(_) => ConsistencyVerdict::Inconsistent,
    }
}

/// Counts of parseable and consistent steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyTally {
    /// Steps with a parsed expression.
    pub parseable: usize,
    /// Parseable steps consistent with the ground truth.
    pub consistent: usize,
}

impl ConsistencyTally {
    /// `consistent / parseable`, or 0.0 when nothing parsed.
    pub fn score(&self) -> f64 {
        if self.parseable == 0 {
            0.0
        } else {
            self.consistent as f64 / self.parseable as f64
        }
    }
}

/// Checks every parseable expression against the ground truth.
pub fn tally_consistency<'a>(
    expressions: impl IntoIterator<Item = &'a Expression>,
    truth: Option<&GroundTruth>,
    budget: &SimplifyBudget,
) -> ConsistencyTally {
    let mut tally = ConsistencyTally::default();
    for (idx, expression) in expressions.into_iter().enumerate() {
        tally.parseable += 1;
        let verdict = check_consistency(expression, truth, budget);
        debug!(step = idx, ?verdict, "step checked against ground truth");
        if verdict.is_consistent() {
            tally.consistent += 1;
        }
    }
    tally
}
