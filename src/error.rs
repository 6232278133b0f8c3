//! Error types for the Logicdraw expression compiler.
//!
//! This module provides a unified error type [`DiagramError`] that covers
//! all error conditions that can occur while compiling an expression and
//! driving a diagram session. Layout and evaluation never fail on a valid AST,
//! so every variant here is either an input error or a host-side error.

use thiserror::Error;

/// Result type alias using [`DiagramError`].
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Unified error type for all Logicdraw operations.
#[derive(Error, Debug)]
pub enum DiagramError {
    // ============ Expression Errors ============
    /// Character that is not whitespace, a letter, an operator or a parenthesis
    #[error("Lexer error at position {position}: unexpected character '{character}'")]
    LexError { position: usize, character: char },

    /// Unexpected token while parsing
    #[error("Parse error at position {position}: expected {expected}, found {found}")]
    ParseError {
        expected: String,
        found: String,
        position: usize,
    },

    /// Negations and parentheses nested past the parser's limit
    #[error("Parse error at position {position}: nesting deeper than {limit} levels")]
    NestingTooDeep { position: usize, limit: usize },

    /// Input contained nothing to compile
    #[error("Empty expression")]
    EmptyExpression,

    // ============ Session Errors ============
    /// Variable not present in the current diagram
    #[error("Variable '{name}' does not appear in the diagram")]
    UnknownVariable { name: char },

    /// Malformed `NAME=VALUE` assignment
    #[error("Invalid assignment '{text}' (expected NAME=0|1|true|false)")]
    InvalidAssignment { text: String },

    // ============ Layout Errors ============
    /// Laid-out graph breaks a placement invariant
    #[error("Invalid layout: {message}")]
    InvalidLayout { message: String },

    // ============ I/O Errors ============
    /// Error reading an expression file
    #[error("Failed to read expression file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error encoding a graph for a renderer
    #[error("Failed to serialize diagram: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DiagramError {
    /// Create a lexer error
    pub fn lex(position: usize, character: char) -> Self {
        Self::LexError {
            position,
            character,
        }
    }

    /// Create a parse error
    pub fn parse(position: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ParseError {
            expected: expected.into(),
            found: found.into(),
            position,
        }
    }

    /// Position in the source text, for errors that carry one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::LexError { position, .. }
            | Self::ParseError { position, .. }
            | Self::NestingTooDeep { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let err = DiagramError::lex(2, '#');
        assert_eq!(
            err.to_string(),
            "Lexer error at position 2: unexpected character '#'"
        );
        assert_eq!(err.position(), Some(2));
    }

    #[test]
    fn test_parse_error_message() {
        let err = DiagramError::parse(4, "')'", "end of input");
        assert_eq!(
            err.to_string(),
            "Parse error at position 4: expected ')', found end of input"
        );
    }

    #[test]
    fn test_nesting_error_message() {
        let err = DiagramError::NestingTooDeep {
            position: 7,
            limit: 4,
        };
        assert_eq!(
            err.to_string(),
            "Parse error at position 7: nesting deeper than 4 levels"
        );
        assert_eq!(err.position(), Some(7));
    }

    #[test]
    fn test_position_absent_for_session_errors() {
        assert_eq!(DiagramError::UnknownVariable { name: 'Q' }.position(), None);
    }
}
