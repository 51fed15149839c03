#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::AstError;

fn lit(value: u64) -> Literal {
    Literal::new(value).unwrap()
}

#[test]
fn test_register_index_bounds() {
    assert!(RegisterIndex::new(0).is_ok());
    assert!(RegisterIndex::new(9).is_ok());
    assert_eq!(
        RegisterIndex::new(10),
        Err(AstError::RegisterOutOfRange { index: 10 })
    );
    assert_eq!(
        Register::global(300),
        Err(AstError::RegisterOutOfRange { index: 300 })
    );
}

#[test]
fn test_literal_bounds() {
    assert_eq!(lit(32767).get(), i16::MAX);
    assert_eq!(
        Literal::new(32768),
        Err(AstError::LiteralOutOfRange { value: 32768 })
    );
}

#[test]
fn test_op_table() {
    let (o, v) = (12, 5);
    assert_eq!(Op::Assign.apply(o, v), 5);
    assert_eq!(Op::Add.apply(o, v), 17);
    assert_eq!(Op::Sub.apply(o, v), 7);
    assert_eq!(Op::Mul.apply(o, v), 60);
    assert_eq!(Op::Div.apply(o, v), 2);
    assert_eq!(Op::Min.apply(o, v), 5);
    assert_eq!(Op::Max.apply(o, v), 12);
}

#[test]
fn test_op_wrapping_and_division_policy() {
    assert_eq!(Op::Add.apply(i16::MAX, 1), i16::MIN);
    assert_eq!(Op::Sub.apply(0, 1), -1);
    assert_eq!(Op::Mul.apply(300, 300), 300_i16.wrapping_mul(300));
    assert_eq!(Op::Div.apply(7, 0), 0);
    assert_eq!(Op::Div.apply(i16::MIN, -1), i16::MIN);
    assert_eq!(Op::Div.apply(-7, 2), -3);
}

#[test]
fn test_min_max_are_signed() {
    assert_eq!(Op::Min.apply(-1, 3), -1);
    assert_eq!(Op::Max.apply(-1, 3), 3);
}

#[test]
fn test_range_matching() {
    let interval = Range::interval(lit(0), lit(2), lit(1).into());
    let single = Range::single(lit(5), lit(9).into());
    assert!(interval.matches(0));
    assert!(interval.matches(2));
    assert!(!interval.matches(3));
    assert!(!interval.matches(-1));
    assert!(single.matches(5));
    assert!(!single.matches(4));

    let empty = Range::interval(lit(3), lit(1), lit(1).into());
    assert!(!empty.matches(2));
}

#[test]
fn test_range_first_match_wins() {
    let range = RangeExpr::new(
        Register::V,
        vec![
            Range::interval(lit(0), lit(10), lit(1).into()),
            Range::single(lit(5), lit(2).into()),
        ],
    );
    assert_eq!(range.select(5).map(|arm| &*arm.value), Some(&lit(1).into()));
    assert_eq!(range.select(11), None);
}

#[test]
fn test_uses_global_registers() {
    let a0 = Register::local(0).unwrap();
    let g3 = Register::global(3).unwrap();

    let local_only = StatementList::new(vec![Statement::arithmetic(Op::Add, Register::V, a0.into())]);
    assert!(!local_only.uses_global_registers());

    let nested = StatementList::new(vec![Neighbours::new(StatementList::new(vec![
        Statement::arithmetic(
            Op::Assign,
            Register::V,
            RangeExpr::new(a0, vec![Range::single(lit(1), g3.into())]).into(),
        ),
    ]))
    .into()]);
    assert!(nested.uses_global_registers());
}

#[test]
fn test_display_source_form() {
    let a0 = Register::local(0).unwrap();
    let program = StatementList::new(vec![
        Statement::arithmetic(Op::Assign, Register::V, lit(5).into()),
        Neighbours::new(StatementList::new(vec![
            Statement::arithmetic(Op::Add, Register::global(1).unwrap(), a0.into()),
            Statement::arithmetic(Op::Max, Register::V, a0.into()),
        ]))
        .into(),
        Statement::arithmetic(
            Op::Assign,
            Register::V,
            RangeExpr::new(
                Register::global(1).unwrap(),
                vec![
                    Range::interval(lit(0), lit(1), lit(0).into()),
                    Range::single(lit(3), lit(1).into()),
                ],
            )
            .into(),
        ),
    ]);
    assert_eq!(
        program.to_string(),
        "= v 5\nneighbours(+ g1 a0 max v a0)\n= v [g1 | (0,1) => 0, 3 => 1]"
    );
}
