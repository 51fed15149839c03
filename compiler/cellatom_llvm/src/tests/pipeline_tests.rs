//! Compilation pipeline: IR shape, determinism, levels and error paths.

use inkwell::context::Context;
use pretty_assertions::assert_eq;

use cellatom_eval::driver::{self, Sweep};
use cellatom_eval::EvalError;
use cellatom_ir::Grid;

use super::helper::{interpreted_step, program};
use crate::{compile, OptimizationLevel, AUTOMATON_FUNCTION, CELL_FUNCTION};

const LIFE: &str = "neighbours(+ a1 a0) = v [v | 0 => [a1 | 3 => 1], 1 => [a1 | (2,3) => 1]]";

#[test]
fn test_unoptimized_ir_keeps_both_functions() {
    let context = Context::create();
    let automaton = compile(&context, &program("+ v 1"), OptimizationLevel::O0).unwrap();
    let ir = automaton.ir();
    assert!(ir.contains(&format!("define void @{AUTOMATON_FUNCTION}(")), "{ir}");
    assert!(ir.contains(&format!("define private i16 @{CELL_FUNCTION}(")), "{ir}");
    assert_eq!(automaton.opt_level(), OptimizationLevel::O0);
}

#[test]
fn test_ir_is_deterministic() {
    let life = program(LIFE);
    for level in OptimizationLevel::ALL {
        let first = Context::create();
        let second = Context::create();
        let a = compile(&first, &life, level).unwrap();
        let b = compile(&second, &life, level).unwrap();
        assert_eq!(a.ir(), b.ir(), "{level}");
    }
}

#[test]
fn test_levels_from_numbers() {
    assert_eq!(OptimizationLevel::from_level(0), Some(OptimizationLevel::O0));
    assert_eq!(OptimizationLevel::from_level(3), Some(OptimizationLevel::O3));
    assert_eq!(OptimizationLevel::from_level(4), None);
    assert_eq!(OptimizationLevel::default(), OptimizationLevel::O0);
    assert_eq!(OptimizationLevel::O2.pipeline_string(), "default<O2>");
}

#[test]
fn test_shape_mismatch_is_rejected() {
    let context = Context::create();
    let automaton = compile(&context, &program("+ v 1"), OptimizationLevel::O1).unwrap();
    let old = Grid::new(2, 3).unwrap();
    let mut new = Grid::new(3, 2).unwrap();
    assert!(matches!(
        automaton.run_step(&old, &mut new),
        Err(EvalError::GridShape { .. })
    ));

    let mut short = vec![0_i16; 5];
    assert!(automaton.run_raw(old.cells(), &mut short, 2, 3).is_err());
}

#[test]
fn test_run_raw_on_buffers() {
    let context = Context::create();
    let automaton = compile(&context, &program("+ v 1"), OptimizationLevel::O2).unwrap();
    let old: [i16; 6] = [1, 2, 3, 4, 5, 6];
    let mut new = [0_i16; 6];
    automaton.run_raw(&old, &mut new, 3, 2).unwrap();
    assert_eq!(new, [2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_driver_runs_compiled_sweep() {
    let life = program(LIFE);
    let context = Context::create();
    let automaton = compile(&context, &life, OptimizationLevel::O3).unwrap();
    assert_eq!(automaton.name(), "llvm-jit");

    let mut grid = Grid::new(6, 6).unwrap();
    for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        grid.set(x, y, 1);
    }
    let mut expected = grid.clone();
    for _ in 0..4 {
        expected = interpreted_step(&life, &expected);
    }
    let engine: &dyn Sweep = &automaton;
    assert_eq!(driver::run(engine, grid, 4).unwrap(), expected);
}
