//! LLVM backend for Cellatom.
//!
//! Lowers a statement list to an LLVM module with a private per-cell
//! function and a public `automaton` sweep, optimizes it with the new pass
//! manager and JIT-compiles it for the host. The compiled sweep is a drop-in
//! replacement for the interpreter: both implement
//! [`cellatom_eval::driver::Sweep`] and produce identical grids.
//!
//! # Debug Environment Variables
//!
//! - `CELLATOM_DEBUG_LLVM`: Print the optimized IR to stderr while
//!   compiling. Any value enables this.
//!   Example: `CELLATOM_DEBUG_LLVM=1 cargo test`
//!
//! - `RUST_LOG=cellatom_llvm=debug`: Pipeline stages (target, passes, JIT).
//!
//! - `RUST_LOG=cellatom_llvm=trace`: Also trace each range map and
//!   `neighbours` block as it is lowered.
//!
//! # Example
//!
//! ```ignore
//! use inkwell::context::Context;
//! use cellatom_llvm::{compile, OptimizationLevel};
//!
//! let program = cellatom_parse::parse("+ v 1")?;
//! let context = Context::create();
//! let automaton = compile(&context, &program, OptimizationLevel::O2)?;
//! automaton.run_step(&old, &mut new)?;
//! ```

#![allow(
    // LLVM constants are built from u64; register numbers are below 10
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    // Internal functions - panics are invariant violations
    clippy::missing_panics_doc,
)]

pub mod builder;
pub mod context;
pub mod passes;
pub mod target;

mod automaton;
mod error;
mod function;
mod lower;

#[cfg(test)]
mod tests;

use std::sync::Once;

pub use automaton::{compile, Automaton, AutomatonFn, DEBUG_IR_ENV};
pub use error::CodegenError;
pub use function::{AUTOMATON_FUNCTION, CELL_FUNCTION};
pub use passes::{OptimizationError, OptimizationLevel};
// Callers create the context that compiled automata borrow.
pub use inkwell::context::Context;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=cellatom_llvm=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
