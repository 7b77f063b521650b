use std::collections::BTreeSet;
use std::fmt::{self, Display};

use num_rational::BigRational;
use num_traits::Signed;
use serde::{Deserialize, Serialize};

/// Binary operators as written in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`, including implicit multiplication.
    Mul,
    /// `a / b`
    Div,
    /// `a ^ b` or `a ** b`
    Pow,
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 4,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => " + ",
            BinOp::Sub => " - ",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }
}

/// Named functions understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Func {
    /// Square root.
    Sqrt,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Natural logarithm (`log` and `ln`).
    Log,
    /// Exponential.
    Exp,
    /// Absolute value.
    Abs,
}

impl Func {
    /// Resolves a function name, if it is one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Func::Sqrt),
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "log" | "ln" => Some(Func::Log),
            "exp" => Some(Func::Exp),
            "abs" | "Abs" => Some(Func::Abs),
            _ => None,
        }
    }

    /// Canonical spelling used when rendering.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sqrt => "sqrt",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Log => "log",
            Func::Exp => "exp",
            Func::Abs => "abs",
        }
    }
}

/// Named constants; these are never free symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Constant {
    /// The circle constant.
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Resolves a constant name, if it is one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "π" => Some(Constant::Pi),
            "E" => Some(Constant::E),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "E",
        }
    }
}

/// Syntax tree preserving the surface form of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Exact non-negative numeric literal.
    Num(BigRational),
    /// Free symbol.
    Sym(String),
    /// Named constant.
    Const(Constant),
    /// Unary negation.
    Neg(Box<Node>),
    /// Binary operation.
    Binary(BinOp, Box<Node>, Box<Node>),
    /// Function application.
    Call(Func, Vec<Node>),
}

impl Node {
    /// Builds a binary node.
    pub fn binary(op: BinOp, lhs: Node, rhs: Node) -> Node {
        Node::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Builds a negation node.
    pub fn neg(inner: Node) -> Node {
        Node::Neg(Box::new(inner))
    }

    /// Counts arithmetic operators and function applications.
    ///
    /// Negative literals count one negation and non-integer literals one
    /// division, so a rendered canonical form and a hand-written expression
    /// are measured on the same scale.
    pub fn count_ops(&self) -> usize {
        match self {
            Node::Num(value) => {
                let mut ops = 0;
                if value.is_negative() {
                    ops += 1;
                }
                if !value.is_integer() {
                    ops += 1;
                }
                ops
            }
            Node::Sym(_) | Node::Const(_) => 0,
            Node::Neg(inner) => 1 + inner.count_ops(),
            Node::Binary(_, lhs, rhs) => 1 + lhs.count_ops() + rhs.count_ops(),
            Node::Call(_, args) => 1 + args.iter().map(Node::count_ops).sum::<usize>(),
        }
    }

    /// Collects free symbol names in lexicographic order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Node::Sym(name) => {
                out.insert(name.clone());
            }
            Node::Num(_) | Node::Const(_) => {}
            Node::Neg(inner) => inner.collect_symbols(out),
            Node::Binary(_, lhs, rhs) => {
                lhs.collect_symbols(out);
                rhs.collect_symbols(out);
            }
            Node::Call(_, args) => args.iter().for_each(|arg| arg.collect_symbols(out)),
        }
    }

    /// Replaces every occurrence of `symbol` with `replacement`.
    pub fn substitute(&self, symbol: &str, replacement: &Node) -> Node {
        match self {
            Node::Sym(name) if name == symbol => replacement.clone(),
            Node::Num(_) | Node::Sym(_) | Node::Const(_) => self.clone(),
            Node::Neg(inner) => Node::neg(inner.substitute(symbol, replacement)),
            Node::Binary(op, lhs, rhs) => Node::binary(
                *op,
                lhs.substitute(symbol, replacement),
                rhs.substitute(symbol, replacement),
            ),
            Node::Call(func, args) => Node::Call(
                *func,
                args.iter()
                    .map(|arg| arg.substitute(symbol, replacement))
                    .collect(),
            ),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Binary(op, _, _) => op.precedence(),
            Node::Neg(_) => 3,
            Node::Num(value) if !value.is_integer() => 2,
            Node::Num(value) if value.is_negative() => 3,
            _ => 5,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &Node, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Num(value) => {
                if value.is_integer() {
                    write!(f, "{}", value.numer())
                } else {
                    write!(f, "{}/{}", value.numer(), value.denom())
                }
            }
            Node::Sym(name) => f.write_str(name),
            Node::Const(constant) => f.write_str(constant.name()),
            Node::Neg(inner) => {
                f.write_str("-")?;
                write_operand(f, inner, inner.precedence() < 3)
            }
            Node::Binary(op, lhs, rhs) => {
                let prec = op.precedence();
                let (left_parens, right_parens) = if *op == BinOp::Pow {
                    (lhs.precedence() <= prec, rhs.precedence() < 3)
                } else {
                    (lhs.precedence() < prec, rhs.precedence() <= prec)
                };
                write_operand(f, lhs, left_parens)?;
                f.write_str(op.symbol())?;
                write_operand(f, rhs, right_parens)
            }
            Node::Call(func, args) => {
                write!(f, "{}(", func.name())?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
