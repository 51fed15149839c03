//! Per-node evaluation.

use cellatom_ir::{
    Arithmetic, Cell, NeighbourBounds, Neighbours, RangeExpr, Register, RegisterIndex, Statement,
    StatementList,
};

use cellatom_stack::ensure_sufficient_stack;

use crate::CellState;

/// Evaluate one node against `state` and return its value.
///
/// Register writes happen in place. Nodes without a value of their own
/// (`neighbours` blocks and lists) yield 0.
pub fn interpret(statement: &Statement, state: &mut CellState<'_>) -> Cell {
    ensure_sufficient_stack(|| interpret_inner(statement, state))
}

fn interpret_inner(statement: &Statement, state: &mut CellState<'_>) -> Cell {
    match statement {
        Statement::Literal(literal) => literal.get(),
        Statement::Register(register) => state.read(*register),
        Statement::Arithmetic(arith) => interpret_arithmetic(arith, state),
        Statement::Range(range) => interpret_range(range, state),
        Statement::Neighbours(block) => {
            interpret_neighbours(block, state);
            0
        }
        Statement::List(list) => {
            interpret_list(list, state);
            0
        }
    }
}

/// Evaluate each statement in order, discarding their values.
pub fn interpret_list(list: &StatementList, state: &mut CellState<'_>) {
    for statement in list {
        interpret(statement, state);
    }
}

/// Operand first, then the target's old value, then the write.
fn interpret_arithmetic(arith: &Arithmetic, state: &mut CellState<'_>) -> Cell {
    let operand = interpret(&arith.value, state);
    let old = state.read(arith.target);
    state.write(arith.target, arith.op.apply(old, operand));
    state.read(arith.target)
}

fn interpret_range(range: &RangeExpr, state: &mut CellState<'_>) -> Cell {
    let scrutinee = state.read(range.scrutinee);
    match range.select(scrutinee) {
        Some(arm) => interpret(&arm.value, state),
        None => 0,
    }
}

fn interpret_neighbours(block: &Neighbours, state: &mut CellState<'_>) {
    let (x, y) = state.coordinates();
    let (width, height) = state.dimensions();
    let a0 = Register::Local(RegisterIndex::NEIGHBOUR);
    for (nx, ny) in NeighbourBounds::new(x, y, width, height).iter() {
        let neighbour = state.old_cell(nx, ny);
        state.write(a0, neighbour);
        interpret_list(&block.body, state);
    }
}
