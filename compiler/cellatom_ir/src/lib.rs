//! Cellatom IR - AST and shared semantics
//!
//! This crate contains the data structures every other Cellatom crate
//! agrees on:
//! - Spans for source locations
//! - The closed AST node set (`Statement` and friends)
//! - The operator table and division policy shared by both engines
//! - The `Grid` buffer and its flattening convention
//!
//! # Design Philosophy
//!
//! - **Closed variants**: the node set is fixed, so each backend is a single
//!   exhaustive `match` rather than a trait object per node.
//! - **Validate at construction**: register indices and literals are checked
//!   when the tree is built, so neither engine needs runtime range checks.
//! - **One source of truth**: the interpreter and the code generator both call
//!   into [`Op::apply`], [`cell_index`] and [`NeighbourBounds`] (the code
//!   generator mirrors them instruction for instruction).

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod error;
mod grid;
mod span;

pub use ast::{
    Arithmetic, Literal, Neighbours, Op, Range, RangeExpr, Register, RegisterIndex, Statement,
    StatementList, REGISTER_COUNT,
};
pub use error::{AstError, GridError};
pub use grid::{cell_index, Grid, NeighbourBounds, MAX_DIMENSION};
pub use span::Span;

/// The storage type of every register and grid cell.
pub type Cell = i16;
