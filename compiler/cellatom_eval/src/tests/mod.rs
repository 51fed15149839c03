//! Interpreter tests.

mod parallel_tests;

use cellatom_ir::{Grid, StatementList};

/// Parse `source` or panic with the error.
#[allow(clippy::expect_used)]
pub(crate) fn program(source: &str) -> StatementList {
    cellatom_parse::parse(source).expect("test program should parse")
}

/// One serial sweep of `source` over `grid`.
#[allow(clippy::expect_used)]
pub(crate) fn step(source: &str, grid: &Grid) -> Grid {
    let program = program(source);
    let mut new = grid.clone();
    crate::run_step(
        grid.cells(),
        new.cells_mut(),
        grid.width(),
        grid.height(),
        &program,
    )
    .expect("buffers match");
    new
}
