//! Lexer error types.

use cellatom_ir::Span;
use thiserror::Error;

/// A lexer error: WHAT went wrong and WHERE.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// Missing closing `"` for a comment.
    #[error("unterminated comment")]
    UnterminatedComment,
    /// Integer literal overflowed `u64`.
    #[error("integer literal is too large")]
    IntOverflow,
}
