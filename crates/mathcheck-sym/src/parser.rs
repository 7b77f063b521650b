use mathcheck_core::errors::{ErrorInfo, MathcheckError};

use crate::ast::{BinOp, Constant, Func, Node};
use crate::budget::SimplifyBudget;
use crate::lexer::{tokenize, Token};

fn parse_error(code: &str, message: &str, source: &str, position: usize) -> MathcheckError {
    MathcheckError::Parse(
        ErrorInfo::new(code, message)
            .with_context("input", source)
            .with_context("token", position.to_string()),
    )
}

/// Parses a single algebraic term (no `=`).
///
/// Precedence, loosest first: `+ -`, then `* /` and juxtaposition, then unary
/// sign, then right-associative `^`. A function name applies either to a
/// parenthesised argument list or to the operand written directly after it.
///
/// Every binary operator deepens the left-leaning tree, so each one is charged
/// against `max_depth` together with parentheses and signs.
pub fn parse_node(source: &str, budget: &SimplifyBudget) -> Result<Node, MathcheckError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(parse_error(
            "empty_expression",
            "no tokens to parse",
            source,
            0,
        ));
    }
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
        budget,
    };
    let node = parser.parse_sum()?;
    if parser.pos != parser.tokens.len() {
        return Err(parse_error(
            "trailing_input",
            "unexpected token after a complete expression",
            source,
            parser.pos,
        ));
    }
    Ok(node)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    budget: &'a SimplifyBudget,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, code: &str, message: &str) -> MathcheckError {
        parse_error(code, message, self.source, self.pos)
    }

    fn enter(&mut self) -> Result<(), MathcheckError> {
        self.depth += 1;
        self.budget.check_depth(self.depth)
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_sum(&mut self) -> Result<Node, MathcheckError> {
        let base = self.depth;
        let mut node = self.parse_product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            let rhs = self.parse_product()?;
            node = Node::binary(op, node, rhs);
        }
        self.depth = base;
        Ok(node)
    }

    fn parse_product(&mut self) -> Result<Node, MathcheckError> {
        let base = self.depth;
        let mut node = self.parse_unary()?;
        loop {
            let (op, rhs) = match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    self.enter()?;
                    (BinOp::Mul, self.parse_unary()?)
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    self.enter()?;
                    (BinOp::Div, self.parse_unary()?)
                }
                Some(token) if token.starts_operand() => {
                    self.enter()?;
                    (BinOp::Mul, self.parse_power()?)
                }
                _ => break,
            };
            node = Node::binary(op, node, rhs);
        }
        self.depth = base;
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Node, MathcheckError> {
        self.enter()?;
        let node = match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Node::neg(self.parse_unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.parse_unary()?
            }
            _ => self.parse_power()?,
        };
        self.leave();
        Ok(node)
    }

    fn parse_power(&mut self) -> Result<Node, MathcheckError> {
        let base = self.parse_primary()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.parse_unary()?;
            return Ok(Node::binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node, MathcheckError> {
        self.enter()?;
        let node = match self.bump() {
            Some(Token::Number(value)) => Node::Num(value),
            Some(Token::Ident(name)) => {
                if let Some(func) = Func::from_name(&name) {
                    self.parse_call(func)?
                } else if let Some(constant) = Constant::from_name(&name) {
                    Node::Const(constant)
                } else {
                    Node::Sym(name)
                }
            }
            Some(Token::LParen) => {
                let inner = self.parse_sum()?;
                if self.bump() != Some(Token::RParen) {
                    return Err(self.error("unbalanced_parenthesis", "expected `)`"));
                }
                inner
            }
            Some(_) => return Err(self.error("unexpected_token", "expected an operand")),
            None => return Err(self.error("unexpected_end", "expression ended early")),
        };
        self.leave();
        Ok(node)
    }

    fn parse_call(&mut self, func: Func) -> Result<Node, MathcheckError> {
        match self.peek() {
            Some(Token::LParen) => {
                self.pos += 1;
                let mut args = vec![self.parse_sum()?];
                while self.peek() == Some(&Token::Comma) {
                    self.pos += 1;
                    args.push(self.parse_sum()?);
                }
                if self.bump() != Some(Token::RParen) {
                    return Err(self.error("unbalanced_parenthesis", "expected `)`"));
                }
                if args.len() != 1 {
                    return Err(self.error("arity", "functions take exactly one argument"));
                }
                Ok(Node::Call(func, args))
            }
            Some(token) if token.starts_operand() => {
                let arg = self.parse_power()?;
                Ok(Node::Call(func, vec![arg]))
            }
            _ => Err(self.error("missing_argument", "function name without an argument")),
        }
    }
}
