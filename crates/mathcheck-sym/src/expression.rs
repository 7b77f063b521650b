use std::collections::BTreeSet;
use std::fmt::{self, Display};

use mathcheck_core::errors::MathcheckError;

use crate::ast::{BinOp, Node};
use crate::budget::SimplifyBudget;
use crate::parser::parse_node;
use crate::simplify::{canonicalize, simplify};

/// A single algebraic term such as `2*x + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    node: Node,
}

impl Term {
    /// Parses a term; the text must not contain `=`.
    pub fn parse(text: &str, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        Ok(Term {
            node: parse_node(text, budget)?,
        })
    }

    /// Underlying syntax tree.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Free symbol names in lexicographic order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.node.free_symbols()
    }

    /// Replaces `symbol` everywhere by `value`.
    pub fn substitute(&self, symbol: &str, value: &Term) -> Term {
        Term {
            node: self.node.substitute(symbol, &value.node),
        }
    }

    /// Operation count of the term as written.
    pub fn count_ops(&self) -> usize {
        self.node.count_ops()
    }

    /// Syntactic difference `self - other`.
    pub fn sub(&self, other: &Term) -> Term {
        Term {
            node: Node::binary(BinOp::Sub, self.node.clone(), other.node.clone()),
        }
    }

    /// Canonical simplified form.
    pub fn simplify(&self, budget: &SimplifyBudget) -> Result<Term, MathcheckError> {
        Ok(Term {
            node: simplify(&self.node, budget)?,
        })
    }

    /// Whether the term simplifies to exactly zero.
    pub fn is_zero(&self, budget: &SimplifyBudget) -> Result<bool, MathcheckError> {
        Ok(canonicalize(&self.node, budget)?.is_zero())
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.node, f)
    }
}

/// Either an equation `lhs = rhs` or a bare term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// `lhs = rhs`
    Equation {
        /// Left-hand side.
        lhs: Term,
        /// Right-hand side.
        rhs: Term,
    },
    /// Bare term without `=`.
    Term(Term),
}

impl Expression {
    /// Parses text, splitting on the first `=` into an equation.
    pub fn parse(text: &str, budget: &SimplifyBudget) -> Result<Self, MathcheckError> {
        match text.split_once('=') {
            Some((lhs, rhs)) => Ok(Expression::Equation {
                lhs: Term::parse(lhs, budget)?,
                rhs: Term::parse(rhs, budget)?,
            }),
            None => Ok(Expression::Term(Term::parse(text, budget)?)),
        }
    }

    /// Union of the free symbols of every side.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        match self {
            Expression::Equation { lhs, rhs } => {
                let mut symbols = lhs.free_symbols();
                symbols.extend(rhs.free_symbols());
                symbols
            }
            Expression::Term(term) => term.free_symbols(),
        }
    }

    /// Substitutes `value` for `symbol` on every side.
    pub fn substitute(&self, symbol: &str, value: &Term) -> Expression {
        match self {
            Expression::Equation { lhs, rhs } => Expression::Equation {
                lhs: lhs.substitute(symbol, value),
                rhs: rhs.substitute(symbol, value),
            },
            Expression::Term(term) => Expression::Term(term.substitute(symbol, value)),
        }
    }

    /// Simplifies each side independently.
    pub fn simplify(&self, budget: &SimplifyBudget) -> Result<Expression, MathcheckError> {
        match self {
            Expression::Equation { lhs, rhs } => Ok(Expression::Equation {
                lhs: lhs.simplify(budget)?,
                rhs: rhs.simplify(budget)?,
            }),
            Expression::Term(term) => Ok(Expression::Term(term.simplify(budget)?)),
        }
    }

    /// Sum of the operation counts of every side.
    pub fn count_ops(&self) -> usize {
        match self {
            Expression::Equation { lhs, rhs } => lhs.count_ops() + rhs.count_ops(),
            Expression::Term(term) => term.count_ops(),
        }
    }

    /// Whether this is an equation.
    pub fn is_equation(&self) -> bool {
        matches!(self, Expression::Equation { .. })
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Equation { lhs, rhs } => write!(f, "{lhs} = {rhs}"),
            Expression::Term(term) => Display::fmt(term, f),
        }
    }
}
