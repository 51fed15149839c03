//! Compilation pipeline and the JIT-compiled automaton handle.
//!
//! build `@cell` + `@automaton` → verify → optimize → JIT → entry point

use inkwell::context::Context;
use inkwell::execution_engine::{ExecutionEngine, JitFunction};
use tracing::{debug, instrument};

use cellatom_eval::driver::{check_shapes, Sweep};
use cellatom_eval::{check_buffers, EvalError};
use cellatom_ir::{Cell, Grid, StatementList};

use crate::context::SimpleCx;
use crate::function::{define_automaton, define_cell, AUTOMATON_FUNCTION};
use crate::passes::run_optimization_passes;
use crate::target::native_target_machine;
use crate::{CodegenError, OptimizationLevel};

/// Native signature of `@automaton`: `(old, new, width, height)`.
pub type AutomatonFn = unsafe extern "C" fn(*const Cell, *mut Cell, i64, i64);

/// Set to any value to print the optimized IR to stderr while compiling.
pub const DEBUG_IR_ENV: &str = "CELLATOM_DEBUG_LLVM";

/// Compile `program` into native code for the host.
///
/// The returned handle borrows `context`; every call sweeps the whole grid
/// once with a fresh, zeroed global register bank.
#[instrument(level = "debug", skip_all, fields(statements = program.len(), %level))]
pub fn compile<'ctx>(
    context: &'ctx Context,
    program: &StatementList,
    level: OptimizationLevel,
) -> Result<Automaton<'ctx>, CodegenError> {
    let cx = SimpleCx::new(context, "cellatom");
    let cell = define_cell(&cx, program);
    define_automaton(&cx, cell);

    cx.llmod()
        .verify()
        .map_err(|e| CodegenError::Verify(e.to_string()))?;

    let target_machine = native_target_machine(level)?;
    cx.llmod().set_triple(&target_machine.get_triple());
    cx.llmod()
        .set_data_layout(&target_machine.get_target_data().get_data_layout());

    run_optimization_passes(cx.llmod(), &target_machine, level)?;
    let ir = cx.llmod().print_to_string().to_string();
    debug!(ir_bytes = ir.len(), "module optimized");

    if std::env::var_os(DEBUG_IR_ENV).is_some() {
        eprintln!("=== LLVM IR ({level}) ===");
        eprintln!("{ir}");
        eprintln!("=== END IR ===");
    }

    let engine = cx
        .llmod()
        .create_jit_execution_engine(level.into())
        .map_err(|e| CodegenError::Jit(e.to_string()))?;

    // SAFETY: `@automaton` was defined above with exactly the parameter
    // and return types of `AutomatonFn`.
    let entry = unsafe { engine.get_function::<AutomatonFn>(AUTOMATON_FUNCTION) }.map_err(
        |e| CodegenError::MissingFunction {
            name: AUTOMATON_FUNCTION,
            message: e.to_string(),
        },
    )?;

    Ok(Automaton {
        entry,
        _engine: engine,
        ir,
        level,
    })
}

/// A compiled automaton, ready to sweep grids.
pub struct Automaton<'ctx> {
    entry: JitFunction<'ctx, AutomatonFn>,
    _engine: ExecutionEngine<'ctx>,
    ir: String,
    level: OptimizationLevel,
}

impl Automaton<'_> {
    /// The optimized module as textual IR.
    pub fn ir(&self) -> &str {
        &self.ir
    }

    pub fn opt_level(&self) -> OptimizationLevel {
        self.level
    }

    /// Compute `new` from `old`. Both grids must have the same shape.
    pub fn run_step(&self, old: &Grid, new: &mut Grid) -> Result<(), EvalError> {
        check_shapes(old, new)?;
        let (width, height) = (old.width(), old.height());
        self.run_raw(old.cells(), new.cells_mut(), width, height)
    }

    /// Sweep raw column-major buffers of `width * height` cells.
    pub fn run_raw(
        &self,
        old: &[Cell],
        new: &mut [Cell],
        width: usize,
        height: usize,
    ) -> Result<(), EvalError> {
        check_buffers(old, new, width, height)?;
        let shape_error = || EvalError::GridShape {
            width,
            height,
            old: old.len(),
            new: new.len(),
        };
        let w = i64::try_from(width).map_err(|_| shape_error())?;
        let h = i64::try_from(height).map_err(|_| shape_error())?;

        // SAFETY: both buffers hold exactly `width * height` cells (checked
        // above), and the generated code only touches indices
        // `x * height + y` with `x < width` and `y < height`.
        unsafe {
            self.entry.call(old.as_ptr(), new.as_mut_ptr(), w, h);
        }
        Ok(())
    }
}

impl Sweep for Automaton<'_> {
    fn name(&self) -> &'static str {
        "llvm-jit"
    }

    fn sweep(&self, old: &Grid, new: &mut Grid) -> Result<(), EvalError> {
        self.run_step(old, new)
    }
}
