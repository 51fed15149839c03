//! Lexer for Cellatom using logos.
//!
//! Produces a flat `Vec<Token>` terminated by [`TokenKind::Eof`]. Whitespace
//! and `"`-delimited comments are dropped here, so the parser never sees them.

mod lex_error;
mod raw_token;
mod token;

use cellatom_ir::Span;
use logos::Logos;

use raw_token::RawToken;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind};

/// Lex source code into a token list.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        match result {
            Ok(raw) => {
                if let Some(kind) = cook(raw) {
                    tokens.push(Token::new(kind, Span::from_range(range)));
                }
            }
            Err(()) => return Err(classify_error(source, range.start)),
        }
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
    Ok(tokens)
}

/// Convert a raw token into its final kind; comments produce nothing.
fn cook(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::Comment => return None,
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::V => TokenKind::V,
        RawToken::Local(n) => TokenKind::Local(n),
        RawToken::Global(n) => TokenKind::Global(n),
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Min => TokenKind::Min,
        RawToken::Max => TokenKind::Max,
        RawToken::Neighbours => TokenKind::Neighbours,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Comma => TokenKind::Comma,
        RawToken::FatArrow => TokenKind::FatArrow,
    };
    Some(kind)
}

/// Work out why logos rejected the input at `start`.
fn classify_error(source: &str, start: usize) -> LexError {
    let rest = source.get(start..).unwrap_or_default();
    match rest.chars().next() {
        Some('"') => LexError::new(
            LexErrorKind::UnterminatedComment,
            Span::from_range(start..source.len()),
        ),
        Some(ch) if ch.is_ascii_digit() => {
            let len = rest.bytes().take_while(u8::is_ascii_digit).count();
            LexError::new(LexErrorKind::IntOverflow, Span::from_range(start..start + len))
        }
        Some(ch) => LexError::new(
            LexErrorKind::UnexpectedChar(ch),
            Span::from_range(start..start + ch.len_utf8()),
        ),
        None => LexError::new(LexErrorKind::UnexpectedChar('\0'), Span::from_range(start..start)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_arithmetic_statement() {
        assert_eq!(
            kinds("+ a0 12"),
            vec![
                TokenKind::Plus,
                TokenKind::Local(0),
                TokenKind::Int(12),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_keywords_and_operators() {
        assert_eq!(
            kinds("min max = - * / neighbours v g9"),
            vec![
                TokenKind::Min,
                TokenKind::Max,
                TokenKind::Assign,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Neighbours,
                TokenKind::V,
                TokenKind::Global(9),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_range_map_punctuation() {
        assert_eq!(
            kinds("[a0|(0,2)=>1 5=>9]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Local(0),
                TokenKind::Pipe,
                TokenKind::LParen,
                TokenKind::Int(0),
                TokenKind::Comma,
                TokenKind::Int(2),
                TokenKind::RParen,
                TokenKind::FatArrow,
                TokenKind::Int(1),
                TokenKind::Int(5),
                TokenKind::FatArrow,
                TokenKind::Int(9),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_whitespace_skipped() {
        assert_eq!(
            kinds("\"count\nneighbours\" = v\t1 \"done\""),
            vec![TokenKind::Assign, TokenKind::V, TokenKind::Int(1), TokenKind::Eof]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = lex("= v 42").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[1].span, Span::new(2, 3));
        assert_eq!(tokens[2].span, Span::new(4, 6));
        assert_eq!(tokens[3].span, Span::point(6));
    }

    #[test]
    fn test_large_register_numbers_saturate() {
        assert_eq!(kinds("a12")[0], TokenKind::Local(12));
        assert_eq!(kinds("g99999999999")[0], TokenKind::Global(u32::MAX));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \"only a comment\"  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_unexpected_char() {
        let err = lex("+ v x").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('x'));
        assert_eq!(err.span, Span::new(4, 5));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = lex("= v 1 \"oops").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.span, Span::new(6, 11));
    }

    #[test]
    fn test_int_overflow() {
        let err = lex("= v 99999999999999999999999").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IntOverflow);
        assert_eq!(err.span, Span::new(4, 27));
    }

    #[test]
    fn test_op_mapping() {
        use cellatom_ir::Op;
        assert_eq!(TokenKind::Plus.as_op(), Some(Op::Add));
        assert_eq!(TokenKind::Max.as_op(), Some(Op::Max));
        assert_eq!(TokenKind::Comma.as_op(), None);
    }
}
