//! Step driver.
//!
//! Both engines are driven through [`Sweep`]: one call computes a whole new
//! grid from an old one. [`run`] repeats that, swapping the two buffers after
//! every iteration so no grid is allocated per step.

use cellatom_ir::Grid;
use tracing::{debug, instrument};

use crate::EvalError;

/// An engine able to compute one generation.
pub trait Sweep {
    /// Engine name for logs.
    fn name(&self) -> &'static str;

    /// Compute every cell of `new` from `old`. `old` is left untouched.
    fn sweep(&self, old: &Grid, new: &mut Grid) -> Result<(), EvalError>;
}

/// Fail unless `old` and `new` have identical dimensions.
pub fn check_shapes(old: &Grid, new: &Grid) -> Result<(), EvalError> {
    if old.same_shape(new) {
        Ok(())
    } else {
        Err(EvalError::GridShape {
            width: old.width(),
            height: old.height(),
            old: old.cells().len(),
            new: new.cells().len(),
        })
    }
}

/// Apply `engine` to `grid` `iterations` times and return the final grid.
#[instrument(
    level = "debug",
    skip(engine, grid),
    fields(engine = engine.name(), width = grid.width(), height = grid.height())
)]
pub fn run<E: Sweep + ?Sized>(
    engine: &E,
    grid: Grid,
    iterations: usize,
) -> Result<Grid, EvalError> {
    let mut old = grid;
    let mut new = old.clone();
    for iteration in 0..iterations {
        engine.sweep(&old, &mut new)?;
        std::mem::swap(&mut old, &mut new);
        debug!(iteration, "sweep complete");
    }
    Ok(old)
}
