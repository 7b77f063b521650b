#![deny(missing_docs)]
#![doc = "Exact symbolic algebra for the mathcheck verifiers: parsing with implicit multiplication, canonical rational forms, substitution and operation counting."]

/// Syntax tree preserving the written form of an expression.
pub mod ast;
/// Deterministic work limits for symbolic evaluation.
pub mod budget;
mod canonical;
mod expression;
mod lexer;
/// Recursive-descent parser with implicit multiplication.
pub mod parser;
mod simplify;

pub use ast::{BinOp, Constant, Func, Node};
pub use budget::SimplifyBudget;
pub use expression::{Expression, Term};
pub use parser::parse_node;
pub use simplify::simplify;
