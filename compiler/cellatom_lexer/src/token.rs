//! Cooked tokens handed to the parser.

use std::fmt;

use cellatom_ir::{Op, Span};

/// A token with its source location.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

cellatom_ir::static_assert_size!(Token, 24);

/// Kind of a [`Token`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Decimal literal, not yet range-checked.
    Int(u64),
    /// `v`
    V,
    /// `aN`
    Local(u32),
    /// `gN`
    Global(u32),
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `min`
    Min,
    /// `max`
    Max,
    /// `neighbours`
    Neighbours,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `|`
    Pipe,
    /// `,`
    Comma,
    /// `=>`
    FatArrow,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The operator this token spells, if it starts an arithmetic statement.
    pub fn as_op(self) -> Option<Op> {
        match self {
            TokenKind::Assign => Some(Op::Assign),
            TokenKind::Plus => Some(Op::Add),
            TokenKind::Minus => Some(Op::Sub),
            TokenKind::Star => Some(Op::Mul),
            TokenKind::Slash => Some(Op::Div),
            TokenKind::Min => Some(Op::Min),
            TokenKind::Max => Some(Op::Max),
            _ => None,
        }
    }

    /// Does this token name a register?
    pub fn is_register(self) -> bool {
        matches!(self, TokenKind::V | TokenKind::Local(_) | TokenKind::Global(_))
    }

    /// Short human-readable description used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::V | TokenKind::Local(_) | TokenKind::Global(_) => "register",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Min => "`min`",
            TokenKind::Max => "`max`",
            TokenKind::Neighbours => "`neighbours`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Pipe => "`|`",
            TokenKind::Comma => "`,`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::V => f.write_str("v"),
            TokenKind::Local(n) => write!(f, "a{n}"),
            TokenKind::Global(n) => write!(f, "g{n}"),
            other => f.write_str(other.display_name().trim_matches('`')),
        }
    }
}
