//! Code generation tests.
//!
//! Every test JIT-compiles real programs; results are compared against
//! hand-computed grids or against the interpreter.

mod equivalence_tests;
mod pipeline_tests;

pub mod helper {
    use inkwell::context::Context;

    use cellatom_ir::{Grid, StatementList};

    use crate::{compile, OptimizationLevel};

    /// Parse `source` or panic with the error.
    pub fn program(source: &str) -> StatementList {
        cellatom_parse::parse(source).expect("test program should parse")
    }

    /// One JIT-compiled sweep of `program` over `grid`.
    pub fn jit_step_program(program: &StatementList, grid: &Grid, level: OptimizationLevel) -> Grid {
        crate::init_tracing();
        let context = Context::create();
        let automaton = compile(&context, program, level).expect("program compiles");
        let mut new = grid.clone();
        automaton.run_step(grid, &mut new).expect("shapes match");
        new
    }

    /// One sweep of `source` at every optimization level. Panics unless all
    /// levels agree, then returns the common result.
    pub fn jit_step(source: &str, grid: &Grid) -> Grid {
        let program = program(source);
        let mut results = OptimizationLevel::ALL
            .iter()
            .map(|&level| (level, jit_step_program(&program, grid, level)));
        let (_, first) = results.next().expect("at least one level");
        for (level, result) in results {
            assert_eq!(result, first, "{level} disagrees with O0 on `{source}`");
        }
        first
    }

    /// One interpreted sweep of `program` over `grid`.
    pub fn interpreted_step(program: &StatementList, grid: &Grid) -> Grid {
        let mut new = grid.clone();
        cellatom_eval::run_step(
            grid.cells(),
            new.cells_mut(),
            grid.width(),
            grid.height(),
            program,
        )
        .expect("buffers match");
        new
    }
}
