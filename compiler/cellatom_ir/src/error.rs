//! Construction-time errors for the AST and grid types.

use thiserror::Error;

use crate::ast::{Literal, REGISTER_COUNT};

/// A tree that would violate an AST invariant.
///
/// Raised by the node constructors, so a successfully built tree is always
/// safe to hand to either backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum AstError {
    /// Register index outside `0..REGISTER_COUNT`.
    #[error("register index {index} out of range (expected 0..{})", REGISTER_COUNT)]
    RegisterOutOfRange { index: u32 },
    /// Literal outside the representable cell range.
    #[error("literal {value} out of range (expected 0..={})", Literal::MAX)]
    LiteralOutOfRange { value: u64 },
}

/// A grid that cannot be allocated or indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum GridError {
    /// A dimension exceeds [`crate::MAX_DIMENSION`].
    #[error("grid dimension {value} exceeds the maximum of {max}")]
    DimensionTooLarge { value: usize, max: usize },
    /// The supplied cell buffer does not hold `width * height` values.
    #[error("grid of {width}x{height} needs {expected} cells, got {actual}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
