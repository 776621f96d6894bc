//! Error types for SDL parsing and rewriting

use thiserror::Error;

/// Error produced while lexing or parsing SDL text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {line}:{column}: {message}")]
pub struct ParseError {
    /// What went wrong
    pub message: String,
    /// 1-based source line
    pub line: usize,
    /// 1-based source column
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Error produced while building a namespace matcher
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The combined namespace alternation did not compile
    #[error("invalid namespace pattern: {0}")]
    Pattern(#[from] regex::Error),
}
