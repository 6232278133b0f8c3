//! Lexer (tokenizer) for boolean expressions.

use std::fmt;

use crate::error::{DiagramError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Character offset of the token's first character (0-indexed)
    pub position: usize,
}

/// Token types in the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A variable, always an uppercase ASCII letter
    Identifier(char),
    /// `!` or `NOT`
    Not,
    /// `.` or `AND`
    And,
    /// `+` or `OR`
    Or,
    /// Open parenthesis '('
    LParen,
    /// Close parenthesis ')'
    RParen,
    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "identifier '{}'", name),
            Self::Not => write!(f, "'!'"),
            Self::And => write!(f, "'.'"),
            Self::Or => write!(f, "'+'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// How letters are grouped into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    /// Every letter is its own identifier; operators are symbols only.
    Symbolic,
    /// Letters are read in maximal runs. `AND`, `OR` and `NOT` (any case)
    /// are operators, any other word names the variable of its first letter.
    #[default]
    Keywords,
}

/// Lexer for tokenizing expression input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    mode: LexMode,
    /// Character offset of the next unread character
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new keyword-aware lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self::with_mode(input, LexMode::default())
    }

    /// Create a new lexer with an explicit mode.
    pub fn with_mode(input: &'a str, mode: LexMode) -> Self {
        Self {
            chars: input.chars().peekable(),
            mode,
            position: 0,
        }
    }

    /// Get the next token. Once input is exhausted this keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let position = self.position;
        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    position,
                });
            }
        };

        let kind = match ch {
            '!' => TokenKind::Not,
            '.' => TokenKind::And,
            '+' => TokenKind::Or,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ if ch.is_ascii_alphabetic() => {
                self.advance();
                return Ok(Token {
                    kind: self.read_word(ch),
                    position,
                });
            }
            _ => return Err(DiagramError::lex(position, ch)),
        };
        self.advance();

        Ok(Token { kind, position })
    }

    /// Tokenize the remaining input, ending with a single `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                return Ok(tokens);
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += 1;
        Some(ch)
    }

    /// Read a word starting at an ASCII letter.
    fn read_word(&mut self, first: char) -> TokenKind {
        let first = first.to_ascii_uppercase();
        if self.mode == LexMode::Symbolic {
            return TokenKind::Identifier(first);
        }

        let mut word = String::from(first);
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            word.push(ch.to_ascii_uppercase());
            self.advance();
        }

        match word.as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            _ => TokenKind::Identifier(first),
        }
    }
}

/// Tokenize `source` with the given mode.
pub fn tokenize_with_mode(source: &str, mode: LexMode) -> Result<Vec<Token>> {
    Lexer::with_mode(source, mode).tokenize()
}
