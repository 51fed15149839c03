//! Whole-grid sweeps.

use cellatom_ir::{cell_index, Cell, Grid, StatementList};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::driver::{check_shapes, Sweep};
use crate::{interpret_list, CellState, EvalError, GlobalRegisters};

/// Check that both buffers hold exactly `width * height` cells.
pub fn check_buffers(
    old: &[Cell],
    new: &[Cell],
    width: usize,
    height: usize,
) -> Result<(), EvalError> {
    let matches = width
        .checked_mul(height)
        .is_some_and(|cells| old.len() == cells && new.len() == cells);
    if matches {
        Ok(())
    } else {
        Err(EvalError::GridShape {
            width,
            height,
            old: old.len(),
            new: new.len(),
        })
    }
}

/// One sweep of `program` over `old`, writing every cell of `new`.
///
/// Cells are visited `x` outer, `y` inner. Globals start at zero and carry
/// over from one cell to the next; locals are zeroed per cell. `old` is
/// never written.
#[instrument(level = "debug", skip(old, new, program))]
pub fn run_step(
    old: &[Cell],
    new: &mut [Cell],
    width: usize,
    height: usize,
    program: &StatementList,
) -> Result<(), EvalError> {
    check_buffers(old, new, width, height)?;
    let mut globals = GlobalRegisters::new();
    for x in 0..width {
        for y in 0..height {
            new[cell_index(x, y, height)] =
                evaluate_cell(program, old, width, height, x, y, &mut globals);
        }
    }
    Ok(())
}

/// Run `program` for cell `(x, y)` and return its final `v`.
fn evaluate_cell(
    program: &StatementList,
    old: &[Cell],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    globals: &mut GlobalRegisters,
) -> Cell {
    let value = old[cell_index(x, y, height)];
    let mut state = CellState::new(old, width, height, x, y, value, globals);
    interpret_list(program, &mut state);
    state.value()
}

/// The tree-walking engine.
///
/// Borrows the program for its whole lifetime, so one interpreter can drive
/// any number of sweeps.
#[derive(Clone, Debug)]
pub struct Interpreter<'p> {
    program: &'p StatementList,
    uses_globals: bool,
    parallel: bool,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p StatementList) -> Self {
        Interpreter {
            program,
            uses_globals: program.uses_global_registers(),
            parallel: false,
        }
    }

    /// Prefer [`Interpreter::sweep_parallel`] when driven through [`Sweep`].
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn program(&self) -> &'p StatementList {
        self.program
    }

    /// Can columns be evaluated independently?
    ///
    /// Only when no statement touches a global register; otherwise a cell
    /// may observe writes made by every cell before it.
    pub fn is_parallelizable(&self) -> bool {
        !self.uses_globals
    }

    pub fn run_step(
        &self,
        old: &[Cell],
        new: &mut [Cell],
        width: usize,
        height: usize,
    ) -> Result<(), EvalError> {
        run_step(old, new, width, height, self.program)
    }

    /// Like [`Interpreter::run_step`], evaluating columns on the rayon pool.
    ///
    /// Falls back to the serial sweep for programs using global registers,
    /// so the result is always identical to the serial one.
    #[instrument(level = "debug", skip(self, old, new))]
    pub fn sweep_parallel(
        &self,
        old: &[Cell],
        new: &mut [Cell],
        width: usize,
        height: usize,
    ) -> Result<(), EvalError> {
        if !self.is_parallelizable() {
            debug!("program uses global registers, sweeping serially");
            return self.run_step(old, new, width, height);
        }
        check_buffers(old, new, width, height)?;
        if height == 0 {
            return Ok(());
        }
        let program = self.program;
        new.par_chunks_mut(height)
            .enumerate()
            .for_each(|(x, column)| {
                // Never read or written by a global-free program.
                let mut globals = GlobalRegisters::new();
                for (y, slot) in column.iter_mut().enumerate() {
                    *slot = evaluate_cell(program, old, width, height, x, y, &mut globals);
                }
            });
        Ok(())
    }
}

impl Sweep for Interpreter<'_> {
    fn name(&self) -> &'static str {
        "interpreter"
    }

    fn sweep(&self, old: &Grid, new: &mut Grid) -> Result<(), EvalError> {
        check_shapes(old, new)?;
        let (width, height) = (old.width(), old.height());
        if self.parallel {
            self.sweep_parallel(old.cells(), new.cells_mut(), width, height)
        } else {
            self.run_step(old.cells(), new.cells_mut(), width, height)
        }
    }
}
