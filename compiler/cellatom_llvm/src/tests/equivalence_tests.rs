//! Compiled code against the interpreter on generated programs and grids.

use proptest::collection::vec;
use proptest::prelude::*;

use cellatom_ir::{Grid, Literal, Neighbours, Op, Range, RangeExpr, Register, Statement, StatementList};

use super::helper::{interpreted_step, jit_step_program};
use crate::OptimizationLevel;

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        3 => 0u64..8,
        1 => Just(32767u64),
        1 => 0u64..=32767,
    ]
    .prop_map(|value| Literal::new(value).unwrap())
}

fn register() -> impl Strategy<Value = Register> {
    prop_oneof![
        2 => Just(Register::V),
        2 => (0u32..10).prop_map(|i| Register::local(i).unwrap()),
        1 => (0u32..10).prop_map(|i| Register::global(i).unwrap()),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    proptest::sample::select(Op::ALL.to_vec())
}

fn arm(value: impl Strategy<Value = Statement>) -> impl Strategy<Value = Range> {
    (proptest::option::of(literal()), literal(), value).prop_map(|(start, end, then)| match start {
        Some(start) => Range::interval(start, end, then),
        None => Range::single(end, then),
    })
}

fn statement() -> impl Strategy<Value = Statement> {
    let leaf = prop_oneof![
        literal().prop_map(Statement::from),
        register().prop_map(Statement::from),
    ];
    leaf.prop_recursive(4, 40, 4, |inner| {
        prop_oneof![
            4 => (op(), register(), inner.clone())
                .prop_map(|(op, target, value)| Statement::arithmetic(op, target, value)),
            1 => (register(), vec(arm(inner.clone()), 1..4))
                .prop_map(|(scrutinee, arms)| RangeExpr::new(scrutinee, arms).into()),
            1 => vec(inner.clone(), 0..4)
                .prop_map(|body| Neighbours::new(StatementList::new(body)).into()),
            1 => vec(inner, 0..3).prop_map(|list| Statement::List(StatementList::new(list))),
        ]
    })
}

fn program() -> impl Strategy<Value = StatementList> {
    vec(statement(), 0..6).prop_map(StatementList::new)
}

fn grid() -> impl Strategy<Value = Grid> {
    (0usize..5, 0usize..5).prop_flat_map(|(width, height)| {
        vec(any::<i16>(), width * height)
            .prop_map(move |cells| Grid::from_cells(width, height, cells).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn compiled_sweep_matches_interpreter(program in program(), grid in grid()) {
        let expected = interpreted_step(&program, &grid);
        for level in OptimizationLevel::ALL {
            let actual = jit_step_program(&program, &grid, level);
            prop_assert_eq!(&actual, &expected, "{} on `{}`", level, program);
        }
    }
}
