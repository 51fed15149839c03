//! Column-parallel sweeps agree with serial ones.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cellatom_ir::Grid;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{program, step};
use crate::driver::{self, Sweep};
use crate::Interpreter;

const LOCAL_ONLY: &[&str] = &[
    "neighbours(+ a1 a0) = v [v | 0 => [a1 | 3 => 1], 1 => [a1 | (2,3) => 1]]",
    "neighbours(max v a0) - v 1 min v 9",
    "= a2 [v | (0,3) => 7, (4,9) => a0] neighbours(+ a3 1) * a2 a3 / v a2 + v a2",
];

#[test]
fn test_global_programs_are_not_parallelizable() {
    let global = program("+ g0 1 = v g0");
    assert!(!Interpreter::new(&global).is_parallelizable());
    let local = program(LOCAL_ONLY[0]);
    assert!(Interpreter::new(&local).is_parallelizable());
}

#[test]
fn test_parallel_falls_back_for_globals() {
    let source = "+ g0 1 = v g0";
    let program = program(source);
    let grid = Grid::new(4, 3).unwrap();
    let mut new = grid.clone();
    Interpreter::new(&program)
        .sweep_parallel(grid.cells(), new.cells_mut(), 4, 3)
        .unwrap();
    assert_eq!(new, step(source, &grid));
}

#[test]
fn test_parallel_empty_grid() {
    let program = program(LOCAL_ONLY[0]);
    let interpreter = Interpreter::new(&program).with_parallel(true);
    for (width, height) in [(0, 0), (3, 0), (0, 3)] {
        let grid = Grid::new(width, height).unwrap();
        let mut new = grid.clone();
        interpreter.sweep(&grid, &mut new).unwrap();
        assert_eq!(new, grid);
    }
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(width, height)| {
        prop::collection::vec(0i16..10, width * height)
            .prop_map(move |cells| Grid::from_cells(width, height, cells).unwrap())
    })
}

proptest! {
    #[test]
    fn parallel_sweep_equals_serial(grid in grid_strategy(), which in 0..LOCAL_ONLY.len()) {
        let source = LOCAL_ONLY[which];
        let program = program(source);
        let serial = driver::run(&Interpreter::new(&program), grid.clone(), 3).unwrap();
        let parallel =
            driver::run(&Interpreter::new(&program).with_parallel(true), grid, 3).unwrap();
        prop_assert_eq!(parallel, serial);
    }
}
