//! Evaluation errors.
//!
//! A well-formed tree cannot fail to evaluate; the only failure is being
//! handed grid buffers that do not match the stated dimensions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum EvalError {
    /// The old or new buffer does not hold `width * height` cells.
    #[error("grid buffers of {old} and {new} cells do not match a {width}x{height} grid")]
    GridShape {
        width: usize,
        height: usize,
        old: usize,
        new: usize,
    },
}
