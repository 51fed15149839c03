//! Cellatom Eval - tree-walking interpreter and step driver.
//!
//! # Architecture
//!
//! - [`CellState`]: registers of the cell being evaluated, plus a borrow of
//!   the sweep's [`GlobalRegisters`] and of the old grid
//! - [`interpret`]: one exhaustive `match` over the node kinds
//! - [`Interpreter`]: sweeps a whole grid, serially or column-parallel
//! - [`driver`]: the [`Sweep`] abstraction shared with compiled automata, and
//!   double-buffered multi-iteration stepping

pub mod driver;
mod errors;
mod interpret;
mod interpreter;
mod state;

#[cfg(test)]
mod tests;

pub use driver::Sweep;
pub use errors::EvalError;
pub use interpret::{interpret, interpret_list};
pub use interpreter::{check_buffers, run_step, Interpreter};
pub use state::{CellState, GlobalRegisters};
