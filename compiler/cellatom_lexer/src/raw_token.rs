//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! comments are dropped and the final [`TokenKind`](crate::TokenKind) is built.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    /// `"..."`, may span lines.
    #[regex(r#""[^"]*""#)]
    Comment,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Int(u64),

    #[token("v")]
    V,
    #[regex(r"a[0-9]+", |lex| register_number(lex.slice()))]
    Local(u32),
    #[regex(r"g[0-9]+", |lex| register_number(lex.slice()))]
    Global(u32),

    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("min")]
    Min,
    #[token("max")]
    Max,

    #[token("neighbours")]
    Neighbours,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,
    #[token("=>")]
    FatArrow,
}

/// Digits after the register prefix. Oversized numbers saturate so the
/// parser reports them as an out-of-range register rather than a lex error.
fn register_number(slice: &str) -> u32 {
    slice
        .get(1..)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(u32::MAX)
}
