use mathcheck_core::errors::MathcheckError;
use mathcheck_sym::{Expression, SimplifyBudget, Term};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::ParsedStep;

/// Outcome of comparing two consecutive steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceVerdict {
    /// Difference simplifies to zero.
    Equivalent,
    /// Difference does not simplify to zero.
    NotEquivalent,
    /// Absent expression or mixed equation/term kinds.
    Incomparable,
    /// Simplification failed or ran out of budget.
    EvaluationError,
}

impl EquivalenceVerdict {
    /// Whether the pair enters the EE denominator.
    pub fn is_comparable(self) -> bool {
        !matches!(self, EquivalenceVerdict::Incomparable)
    }

    /// Whether the pair enters the EE numerator.
    pub fn is_equivalent(self) -> bool {
        matches!(self, EquivalenceVerdict::Equivalent)
    }
}

fn residual(lhs: &Term, rhs: &Term) -> Term {
    lhs.sub(rhs)
}

fn zero_verdict(result: Result<bool, MathcheckError>) -> EquivalenceVerdict {
    match result {
        Ok(true) => EquivalenceVerdict::Equivalent,
        Ok(false) => EquivalenceVerdict::NotEquivalent,
        Err(err) => {
            debug!(error = %err, "equivalence check failed");
            EquivalenceVerdict::EvaluationError
        }
    }
}

/// Compares two expressions.
///
/// Equations compare their residuals `lhs - rhs`; terms compare directly.
pub fn check_equivalence(
    first: Option<&Expression>,
    second: Option<&Expression>,
    budget: &SimplifyBudget,
) -> EquivalenceVerdict {
    match (first, second) {
        (
            Some(Expression::Equation { lhs: l1, rhs: r1 }),
            Some(Expression::Equation { lhs: l2, rhs: r2 }),
        ) => zero_verdict(residual(l1, r1).sub(&residual(l2, r2)).is_zero(budget)),
        (Some(Expression::Term(a)), Some(Expression::Term(b))) => {
            zero_verdict(a.sub(b).is_zero(budget))
        }
        _ => EquivalenceVerdict::Incomparable,
    }
}

/// Counts of comparable and equivalent consecutive pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTally {
    /// Pairs where both sides parsed into the same kind.
    pub comparable: usize,
    /// Comparable pairs judged equivalent.
    pub equivalent: usize,
}

impl TransitionTally {
    /// `equivalent / comparable`, or 0.0 when nothing was comparable.
    pub fn score(&self) -> f64 {
        if self.comparable == 0 {
            0.0
        } else {
            self.equivalent as f64 / self.comparable as f64
        }
    }
}

/// Walks consecutive pairs of the step sequence.
pub fn tally_transitions(steps: &[ParsedStep], budget: &SimplifyBudget) -> TransitionTally {
    let mut tally = TransitionTally::default();
    for (idx, pair) in steps.windows(2).enumerate() {
        let verdict = check_equivalence(
            pair[0].expression.as_ref(),
            pair[1].expression.as_ref(),
            budget,
        );
        debug!(transition = idx, ?verdict, "consecutive steps compared");
        if verdict.is_comparable() {
            tally.comparable += 1;
        }
        if verdict.is_equivalent() {
            tally.equivalent += 1;
        }
    }
    tally
}
