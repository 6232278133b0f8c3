//! Expression language: tokenizer, parser and AST.
//!
//! Expressions combine single-letter variables with three operators and
//! parentheses. Whitespace is ignored and letters are case-folded.
//!
//! # Grammar Overview
//!
//! ```text
//! expr    = or
//! or      = and { '+' and }
//! and     = unary { '.' unary }
//! unary   = '!' unary | primary
//! primary = identifier | '(' or ')'
//! ```
//!
//! `!` binds tighter than `.`, which binds tighter than `+`. Chains of the
//! same operator become one n-ary node so gates can be sized by real fan-in.
//! Nesting of `!` and `(` is capped at [`DEFAULT_MAX_DEPTH`]; deeper input
//! fails with [`DiagramError::NestingTooDeep`](crate::error::DiagramError).
//!
//! # Operators
//!
//! | Operator | Symbol | Keyword |
//! |----------|--------|---------|
//! | NOT | `!` | `NOT` |
//! | AND | `.` | `AND` |
//! | OR  | `+` | `OR`  |
//!
//! Keywords are only recognized in [`LexMode::Keywords`] (the default). In
//! that mode any other word names the variable of its first letter, so
//! `Cat + dog` is `C + D`. [`LexMode::Symbolic`] reads one letter per token.
//!
//! # Example
//!
//! ```text
//! A.B + !C
//! (x or y) and not z
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{tokenize_with_mode, LexMode, Lexer, Token, TokenKind};
pub use parser::{Parser, DEFAULT_MAX_DEPTH};

use tracing::trace;

use crate::error::Result;

/// Tokenize an expression with the default (keyword-aware) lexer.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    tokenize_with_mode(source, LexMode::default())
}

/// Parse a token sequence into an AST.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Expr> {
    Parser::new(tokens).parse()
}

/// Parse an expression string into an AST.
pub fn parse(input: &str) -> Result<Expr> {
    parse_with_mode(input, LexMode::default())
}

/// Parse an expression string using the given lexer mode.
pub fn parse_with_mode(input: &str, mode: LexMode) -> Result<Expr> {
    let tokens = tokenize_with_mode(input, mode)?;
    trace!(tokens = tokens.len(), ?mode, "tokenized expression");
    let expr = parse_tokens(tokens)?;
    trace!(root = %expr.kind(), nodes = expr.node_count(), "parsed expression");
    Ok(expr)
}

/// Read an expression from a file.
#[cfg(feature = "cli")]
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| crate::error::DiagramError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
