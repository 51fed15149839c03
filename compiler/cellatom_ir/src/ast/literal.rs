//! Numeric literals.

use std::fmt;

use crate::error::AstError;

/// A decimal literal.
///
/// The surface grammar only has unsigned digits, while registers are signed
/// 16-bit. Literals are therefore restricted to `0..=i16::MAX` so that a
/// literal always denotes the same number in both engines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i16);

impl Literal {
    /// Largest value a literal may take.
    pub const MAX: i16 = i16::MAX;

    pub const ZERO: Literal = Literal(0);

    /// Validate and wrap a literal value.
    pub fn new(value: u64) -> Result<Self, AstError> {
        i16::try_from(value)
            .map(Literal)
            .map_err(|_| AstError::LiteralOutOfRange { value })
    }

    #[inline]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
