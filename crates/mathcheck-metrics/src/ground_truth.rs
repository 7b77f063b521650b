use mathcheck_sym::{Node, SimplifyBudget, Term};
use tracing::debug;

/// Known target value for a problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    /// Parsed target value.
    pub value: Term,
    /// Symbol named by a `symbol = value` target, preferred for substitution.
    pub target: Option<String>,
}

fn strip_wrappers(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let next = if let Some(inner) = current
            .strip_prefix('$')
            .and_then(|rest| rest.strip_suffix('$'))
        {
            inner.trim()
        } else if let Some(inner) = current
            .strip_prefix("\\boxed{")
            .and_then(|rest| rest.strip_suffix('}'))
        {
            inner.trim()
        } else {
            return current;
        };
        current = next;
    }
}

impl GroundTruth {
    /// Parses a target string such as `5`, `$\boxed{3/4}$` or `x = 5`.
    ///
    /// Returns `None` when the value does not parse; every consistency check
    /// against an absent ground truth fails.
    pub fn parse(text: &str, budget: &SimplifyBudget) -> Option<Self> {
        let text = strip_wrappers(text);
        let parsed = match text.split_once('=') {
            Some((lhs, rhs)) => Term::parse(lhs, budget).and_then(|lhs| {
                Term::parse(rhs, budget).map(|value| (Some(lhs), value))
            }),
            None => Term::parse(text, budget).map(|value| (None, value)),
        };
        match parsed {
            Ok((None, value)) => Some(GroundTruth {
                value,
                target: None,
            }),
            Ok((Some(lhs), value)) => match lhs.node() {
                Node::Sym(name) => Some(GroundTruth {
                    value,
                    target: Some(name.clone()),
                }),
                _ => {
                    debug!(ground_truth = text, "left side of target is not a symbol");
                    None
                }
            },
            Err(err) => {
                debug!(ground_truth = text, error = %err, "ground truth is unparsable");
                None
            }
        }
    }
}
