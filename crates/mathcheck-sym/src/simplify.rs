use mathcheck_core::errors::MathcheckError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::ast::{BinOp, Func, Node};
use crate::budget::SimplifyBudget;
use crate::canonical::{coefficient_bits, Atom, Monomial, Poly, RationalFn};

/// Lowers a syntax tree into its canonical rational-function form.
pub(crate) fn canonicalize(
    node: &Node,
    budget: &SimplifyBudget,
) -> Result<RationalFn, MathcheckError> {
    match node {
        Node::Num(value) => {
            budget.check_coefficient_bits(coefficient_bits(value))?;
            Ok(RationalFn::constant(value.clone()))
        }
        Node::Sym(name) => Ok(RationalFn::from_atom(Atom::Symbol(name.clone()))),
        Node::Const(constant) => Ok(RationalFn::from_atom(Atom::Constant(*constant))),
        Node::Neg(inner) => Ok(canonicalize(inner, budget)?.neg()),
        Node::Binary(op, lhs, rhs) => {
            let lhs = canonicalize(lhs, budget)?;
            let rhs = canonicalize(rhs, budget)?;
            match op {
                BinOp::Add => lhs.add(&rhs, budget),
                BinOp::Sub => lhs.sub(&rhs, budget),
                BinOp::Mul => lhs.mul(&rhs, budget),
                BinOp::Div => lhs.div(&rhs, budget),
                BinOp::Pow => lhs.pow(&rhs, budget),
            }
        }
        Node::Call(func, args) => match args.as_slice() {
            [arg] => RationalFn::apply(*func, &canonicalize(arg, budget)?, budget),
            _ => Err(MathcheckError::eval(
                "arity",
                format!("{} expects exactly one argument", func.name()),
            )),
        },
    }
}

/// Renders a canonical form back into a syntax tree: terms in descending
/// order, leading sign as negation, later signs as subtraction.
pub(crate) fn render(value: &RationalFn) -> Node {
    let numerator = render_poly(value.numerator());
    if value.denominator().is_one() {
        numerator
    } else {
        Node::binary(BinOp::Div, numerator, render_poly(value.denominator()))
    }
}

fn render_poly(poly: &Poly) -> Node {
    let mut rendered: Option<Node> = None;
    for (mono, coef) in poly.terms().rev() {
        let term = render_term(mono, &coef.abs());
        let negative = coef.is_negative();
        rendered = Some(match rendered {
            None if negative => Node::neg(term),
            None => term,
            Some(acc) if negative => Node::binary(BinOp::Sub, acc, term),
            Some(acc) => Node::binary(BinOp::Add, acc, term),
        });
    }
    rendered.unwrap_or_else(|| Node::Num(BigRational::zero()))
}

fn integer(value: &BigInt) -> Node {
    Node::Num(BigRational::from_integer(value.clone()))
}

fn render_term(mono: &Monomial, magnitude: &BigRational) -> Node {
    let mut factors = mono.factors().iter().map(|(atom, exp)| {
        let base = render_atom(atom);
        if *exp == 1 {
            base
        } else {
            Node::binary(BinOp::Pow, base, integer(&BigInt::from(*exp)))
        }
    });
    let Some(first) = factors.next() else {
        return Node::Num(magnitude.clone());
    };
    let seed = if magnitude.numer().is_one() {
        first
    } else {
        Node::binary(BinOp::Mul, integer(magnitude.numer()), first)
    };
    let product = factors.fold(seed, |acc, factor| Node::binary(BinOp::Mul, acc, factor));
    if magnitude.denom().is_one() {
        product
    } else {
        Node::binary(BinOp::Div, product, integer(magnitude.denom()))
    }
}

fn render_atom(atom: &Atom) -> Node {
    match atom {
        Atom::Symbol(name) => Node::Sym(name.clone()),
        Atom::Constant(constant) => Node::Const(*constant),
        Atom::Apply(func, arg) => Node::Call(*func, vec![render(arg)]),
        Atom::Power(base, exponent) => {
            let half = BigRational::new(BigInt::one(), BigInt::from(2));
            if exponent.as_constant() == Some(half) {
                Node::Call(Func::Sqrt, vec![render(base)])
            } else {
                Node::binary(BinOp::Pow, render(base), render(exponent))
            }
        }
    }
}

/// Returns the canonical simplified form of `node` as a syntax tree.
pub fn simplify(node: &Node, budget: &SimplifyBudget) -> Result<Node, MathcheckError> {
    Ok(render(&canonicalize(node, budget)?))
}
