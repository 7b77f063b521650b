use std::ops::Range;

use logos::Logos;
use mathcheck_core::errors::{ErrorInfo, MathcheckError};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::ast::{Constant, Func};

const GREEK_NAMES: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega",
];

/// Raw lexemes borrowed from the source text.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\s+")]
enum Lexeme<'a> {
    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+", |lex| lex.slice())]
    Number(&'a str),

    #[regex(r"[\p{L}_][\p{L}0-9_]*", |lex| lex.slice())]
    Ident(&'a str),

    #[token("+")]
    Plus,

    #[token("-")]
    #[token("−")]
    #[token("–")]
    Minus,

    #[token("*")]
    #[token("×")]
    #[token("·")]
    #[token("⋅")]
    Star,

    #[token("/")]
    #[token("÷")]
    Slash,

    #[token("^")]
    #[token("**")]
    Caret,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(BigRational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl Token {
    /// Tokens that may begin an implicit multiplication operand.
    pub(crate) fn starts_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Ident(_) | Token::LParen)
    }
}

fn lex_error(code: &str, message: &str, source: &str, span: Range<usize>) -> MathcheckError {
    MathcheckError::Parse(
        ErrorInfo::new(code, message)
            .with_context("input", source)
            .with_context("position", span.start.to_string())
            .with_context("fragment", source.get(span).unwrap_or_default()),
    )
}

/// Splits text into tokens, expanding multi-letter names into single-letter
/// symbols unless they name a function, constant or Greek letter.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, MathcheckError> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);
    while let Some(lexeme) = lexer.next() {
        let Ok(lexeme) = lexeme else {
            return Err(lex_error(
                "unexpected_character",
                "character is not part of the expression grammar",
                source,
                lexer.span(),
            ));
        };
        let token = match lexeme {
            Lexeme::Number(text) => Token::Number(decimal_value(text)),
            Lexeme::Ident(name) => {
                push_identifier(&mut tokens, name);
                continue;
            }
            Lexeme::Plus => Token::Plus,
            Lexeme::Minus => Token::Minus,
            Lexeme::Star => Token::Star,
            Lexeme::Slash => Token::Slash,
            Lexeme::Caret => Token::Caret,
            Lexeme::LParen => Token::LParen,
            Lexeme::RParen => Token::RParen,
            Lexeme::Comma => Token::Comma,
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Exact value of a decimal literal such as `12`, `0.25`, `.5` or `5.`.
fn decimal_value(text: &str) -> BigRational {
    let ten = BigInt::from(10u32);
    let mut digits = BigInt::zero();
    let mut scale = BigInt::one();
    let mut seen_point = false;
    for ch in text.chars() {
        match ch.to_digit(10) {
            Some(digit) => {
                digits = digits * &ten + BigInt::from(digit);
                if seen_point {
                    scale *= &ten;
                }
            }
            None => seen_point = true,
        }
    }
    BigRational::new(digits, scale)
}

fn push_identifier(tokens: &mut Vec<Token>, name: &str) {
    let keep_whole = Func::from_name(name).is_some()
        || Constant::from_name(name).is_some()
        || GREEK_NAMES.contains(&name)
        || name.chars().count() == 1
        || name.chars().any(|c| c.is_ascii_digit() || c == '_');
    if keep_whole {
        tokens.push(Token::Ident(name.to_string()));
    } else {
        tokens.extend(name.chars().map(|c| Token::Ident(c.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idents(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Ident(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn splits_plain_words_into_letters() {
        let tokens = tokenize("xy + sqrt(theta)").unwrap();
        assert_eq!(idents(&tokens), vec!["x", "y", "sqrt", "theta"]);
    }

    #[test]
    fn reads_decimals_exactly() {
        let tokens = tokenize("0.25 .5 5.").unwrap();
        let values: Vec<_> = tokens
            .into_iter()
            .map(|t| match t {
                Token::Number(v) => v,
                other => panic!("unexpected token {other:?}"),
            })
            .collect();
        assert_eq!(values[0], BigRational::new(1.into(), 4.into()));
        assert_eq!(values[1], BigRational::new(1.into(), 2.into()));
        assert_eq!(values[2], BigRational::from_integer(5.into()));
    }

    #[test]
    fn double_star_is_power() {
        let tokens = tokenize("x**2").unwrap();
        assert_eq!(tokens[1], Token::Caret);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn rejects_latex_markup() {
        let err = tokenize("\\frac{1}{2}").unwrap_err();
        assert_eq!(err.info().code, "unexpected_character");
        assert_eq!(err.info().context.get("position").map(String::as_str), Some("0"));
    }

    #[test]
    fn unicode_operators_and_greek_letters() {
        let tokens = tokenize("2×θ − 4÷2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(BigRational::from_integer(2.into())),
                Token::Star,
                Token::Ident("θ".to_string()),
                Token::Minus,
                Token::Number(BigRational::from_integer(4.into())),
                Token::Slash,
                Token::Number(BigRational::from_integer(2.into())),
            ]
        );
    }

    #[test]
    fn error_reports_the_offending_fragment() {
        let err = tokenize("x + 50%").unwrap_err();
        assert_eq!(err.info().context.get("fragment").map(String::as_str), Some("%"));
        assert_eq!(err.info().context.get("position").map(String::as_str), Some("6"));
    }
}
