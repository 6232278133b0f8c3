//! Parser for boolean expressions.

use super::ast::Expr;
use super::lexer::{Token, TokenKind};
use crate::error::{DiagramError, Result};

/// Deepest nesting of `!` and `(` the parser accepts by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    /// Open `!` and `(` around the current token
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Create a new parser over the given tokens.
    ///
    /// The sequence is expected to end with `Eof`; a missing terminator is
    /// treated as end of input after the last token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the deepest nesting accepted before parsing fails with
    /// [`DiagramError::NestingTooDeep`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a complete expression, rejecting trailing tokens.
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_or()?;
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(DiagramError::parse(
                token.position,
                "end of input",
                token.kind.to_string(),
            ));
        }
        Ok(expr)
    }

    fn peek(&self) -> Token {
        match self.tokens.get(self.current) {
            Some(token) => *token,
            None => Token {
                kind: TokenKind::Eof,
                position: self.tokens.last().map_or(0, |t| t.position + 1),
            },
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if self.current < self.tokens.len() {
            self.current += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(DiagramError::parse(
                token.position,
                expected,
                token.kind.to_string(),
            ))
        }
    }

    /// Enter one nesting level at `position`.
    fn descend(&mut self, position: usize) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(DiagramError::NestingTooDeep {
                position,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    // or := and ('+' and)*
    fn parse_or(&mut self) -> Result<Expr> {
        let mut operands = vec![self.parse_and()?];
        while self.peek().kind == TokenKind::Or {
            self.advance();
            operands.push(self.parse_and()?);
        }
        Ok(fold(operands, Expr::Or))
    }

    // and := unary ('.' unary)*
    fn parse_and(&mut self) -> Result<Expr> {
        let mut operands = vec![self.parse_unary()?];
        while self.peek().kind == TokenKind::And {
            self.advance();
            operands.push(self.parse_unary()?);
        }
        Ok(fold(operands, Expr::And))
    }

    // unary := '!' unary | primary
    fn parse_unary(&mut self) -> Result<Expr> {
        let token = self.peek();
        if token.kind == TokenKind::Not {
            self.advance();
            self.descend(token.position)?;
            let operand = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::not(operand));
        }
        self.parse_primary()
    }

    // primary := IDENT | '(' or ')'
    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.peek();
        match token.kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::var(name))
            }
            TokenKind::LParen => {
                self.advance();
                self.descend(token.position)?;
                let inner = self.parse_or()?;
                self.expect(TokenKind::RParen, "')'")?;
                self.depth -= 1;
                Ok(inner)
            }
            other => Err(DiagramError::parse(
                token.position,
                "identifier or '('",
                other.to_string(),
            )),
        }
    }
}

/// Collapse a single-operand chain to the operand itself.
fn fold(mut operands: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Expr {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        build(operands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    fn var(name: char) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn test_parse_single_variable() {
        assert_eq!(parse("a").unwrap(), var('A'));
        assert_eq!(parse("((A))").unwrap(), var('A'));
    }

    #[test]
    fn test_parse_double_negation() {
        assert_eq!(parse("!!A").unwrap(), Expr::not(Expr::not(var('A'))));
    }

    #[test]
    fn test_parse_flattens_chains() {
        assert_eq!(
            parse("A.B.C").unwrap(),
            Expr::And(vec![var('A'), var('B'), var('C')])
        );
        assert_eq!(
            parse("A + B + C + D").unwrap(),
            Expr::Or(vec![var('A'), var('B'), var('C'), var('D')])
        );
    }

    #[test]
    fn test_parse_keeps_explicit_grouping() {
        assert_eq!(
            parse("(A.B).C").unwrap(),
            Expr::And(vec![Expr::And(vec![var('A'), var('B')]), var('C')])
        );
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(
            parse("A + B.C").unwrap(),
            Expr::Or(vec![var('A'), Expr::And(vec![var('B'), var('C')])])
        );
        assert_eq!(
            parse("!A.B").unwrap(),
            Expr::And(vec![Expr::not(var('A')), var('B')])
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse("a and not b").unwrap(), parse("A.!B").unwrap());
        assert_eq!(parse("x OR y").unwrap(), parse("X + Y").unwrap());
    }

    #[test]
    fn test_parse_unbalanced_paren() {
        let err = parse("(A.B").unwrap_err();
        match err {
            DiagramError::ParseError {
                expected,
                found,
                position,
            } => {
                assert_eq!(expected, "')'");
                assert_eq!(found, "end of input");
                assert_eq!(position, 4);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_trailing_input() {
        let err = parse("A.B)").unwrap_err();
        assert!(matches!(err, DiagramError::ParseError { position: 3, .. }));
    }

    #[test]
    fn test_parse_missing_operand() {
        assert!(matches!(
            parse("A +").unwrap_err(),
            DiagramError::ParseError { position: 3, .. }
        ));
        assert!(matches!(
            parse(".A").unwrap_err(),
            DiagramError::ParseError { position: 0, .. }
        ));
        assert!(matches!(
            parse("").unwrap_err(),
            DiagramError::ParseError { position: 0, .. }
        ));
    }

    #[test]
    fn test_parse_rejects_deep_nesting() {
        let n = 5000;
        let text = format!("{}A{}", "(!".repeat(n), ")".repeat(n));
        assert!(matches!(
            parse(&text).unwrap_err(),
            DiagramError::NestingTooDeep { limit: DEFAULT_MAX_DEPTH, .. }
        ));

        let err = parse(&format!("{}A", "!".repeat(100_000))).unwrap_err();
        assert_eq!(err.position(), Some(DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn test_parse_accepts_nesting_up_to_limit() {
        let text = format!("{}A", "!".repeat(DEFAULT_MAX_DEPTH));
        assert_eq!(parse(&text).unwrap().node_count(), DEFAULT_MAX_DEPTH + 1);

        let text = format!("{}A{}", "(".repeat(3), ")".repeat(3));
        let tokens = crate::dsl::tokenize(&text).unwrap();
        assert!(Parser::new(tokens.clone()).with_max_depth(3).parse().is_ok());
        assert!(matches!(
            Parser::new(tokens).with_max_depth(2).parse().unwrap_err(),
            DiagramError::NestingTooDeep { position: 2, limit: 2 }
        ));
    }

    #[test]
    fn test_parse_without_eof_token() {
        let tokens = vec![Token {
            kind: TokenKind::Identifier('A'),
            position: 0,
        }];
        assert_eq!(Parser::new(tokens).parse().unwrap(), var('A'));
    }
}
