//! The two functions every compiled automaton module contains.
//!
//! ```text
//! define private i16 @cell(ptr %old, i64 %width, i64 %height,
//!                          i64 %x, i64 %y, i16 %v, ptr %globals)
//! define void @automaton(ptr %old, ptr %new, i64 %width, i64 %height)
//! ```
//!
//! `@automaton` owns the global register bank (a zeroed `[10 x i16]` on its
//! stack) and calls `@cell` once per cell in storage order. Keeping `@cell`
//! private lets the optimizer inline it into the sweep.

use inkwell::module::Linkage;
use inkwell::values::{FunctionValue, PointerValue};
use inkwell::IntPredicate;
use tracing::debug;

use cellatom_ir::{StatementList, REGISTER_COUNT};

use crate::builder::Builder;
use crate::context::SimpleCx;
use crate::lower::{CompileState, Lowerer};

/// Name of the per-sweep entry point.
pub const AUTOMATON_FUNCTION: &str = "automaton";
/// Name of the per-cell function.
pub const CELL_FUNCTION: &str = "cell";

/// Define `@cell` with `program` as its body.
pub(crate) fn define_cell<'ll>(cx: &SimpleCx<'ll>, program: &StatementList) -> FunctionValue<'ll> {
    let ptr = cx.ptr_type.into();
    let isize = cx.isize_ty.into();
    let fn_type = cx.cell_ty.fn_type(
        &[ptr, isize, isize, isize, isize, cx.cell_ty.into(), ptr],
        false,
    );
    let function = cx
        .llmod()
        .add_function(CELL_FUNCTION, fn_type, Some(Linkage::Private));
    debug!(statements = program.len(), "defining cell function");

    let param = |index: u32, name: &str| {
        let value = function.get_nth_param(index).expect("cell parameter");
        value.set_name(name);
        value
    };
    let old = param(0, "old").into_pointer_value();
    let width = param(1, "width").into_int_value();
    let height = param(2, "height").into_int_value();
    let x = param(3, "x").into_int_value();
    let y = param(4, "y").into_int_value();
    let v = param(5, "v").into_int_value();
    let bank = param(6, "globals").into_pointer_value();

    let entry = cx.llcx().append_basic_block(function, "entry");
    let bx = Builder::build(cx, entry);

    let value = bx.alloca(cx.cell_ty.into(), "v.slot");
    bx.store(v, value);
    let locals: [PointerValue<'ll>; REGISTER_COUNT] =
        std::array::from_fn(|i| bx.alloca(cx.cell_ty.into(), &format!("a{i}")));
    for slot in locals {
        bx.store(cx.const_cell(0), slot);
    }
    let globals: [PointerValue<'ll>; REGISTER_COUNT] = std::array::from_fn(|i| {
        bx.cell_gep(bank, cx.const_isize(i as i64), &format!("g{i}"))
    });

    let state = CompileState {
        value,
        locals,
        globals,
        old,
        width,
        height,
        x,
        y,
    };
    Lowerer::new(&bx, &state, function).lower_list(program);

    let result = bx.load_cell(value, "result");
    bx.ret(result);
    function
}

/// Define `@automaton`, the sweep over every cell calling `cell`.
pub(crate) fn define_automaton<'ll>(
    cx: &SimpleCx<'ll>,
    cell: FunctionValue<'ll>,
) -> FunctionValue<'ll> {
    let ptr = cx.ptr_type.into();
    let isize = cx.isize_ty.into();
    let fn_type = cx
        .llcx()
        .void_type()
        .fn_type(&[ptr, ptr, isize, isize], false);
    let function = cx.llmod().add_function(AUTOMATON_FUNCTION, fn_type, None);

    let param = |index: u32, name: &str| {
        let value = function.get_nth_param(index).expect("automaton parameter");
        value.set_name(name);
        value
    };
    let old = param(0, "old").into_pointer_value();
    let new = param(1, "new").into_pointer_value();
    let width = param(2, "width").into_int_value();
    let height = param(3, "height").into_int_value();

    let entry = cx.llcx().append_basic_block(function, "entry");
    let x_header = cx.llcx().append_basic_block(function, "x.header");
    let y_body = cx.llcx().append_basic_block(function, "y.body");
    let x_latch = cx.llcx().append_basic_block(function, "x.latch");
    let exit = cx.llcx().append_basic_block(function, "exit");
    let bx = Builder::build(cx, entry);
    let zero = cx.const_isize(0);
    let one = cx.const_isize(1);

    let bank_ty = cx.type_register_bank();
    let globals = bx.alloca(bank_ty.into(), "globals");
    bx.store(bank_ty.const_zero(), globals);

    // Zero-sized grids never enter the loop.
    let has_columns = bx.icmp(IntPredicate::SGT, width, zero, "has_columns");
    let has_rows = bx.icmp(IntPredicate::SGT, height, zero, "has_rows");
    let has_cells = bx.and(has_columns, has_rows, "has_cells");
    bx.cond_br(has_cells, x_header, exit);

    bx.position_at_end(x_header);
    let x_phi = bx.phi(cx.isize_ty.into(), "x");
    let x = x_phi.as_basic_value().into_int_value();
    bx.br(y_body);

    bx.position_at_end(y_body);
    let y_phi = bx.phi(cx.isize_ty.into(), "y");
    let y = y_phi.as_basic_value().into_int_value();
    let column = bx.mul(x, height, "column");
    let index = bx.add(column, y, "index");
    let current = bx.load_cell(bx.cell_gep(old, index, "old.cell"), "current");
    let next = bx
        .call(
            cell,
            &[
                old.into(),
                width.into(),
                height.into(),
                x.into(),
                y.into(),
                current.into(),
                globals.into(),
            ],
            "next",
        )
        .expect("cell returns i16")
        .into_int_value();
    bx.store(next, bx.cell_gep(new, index, "new.cell"));
    let y_next = bx.add(y, one, "y.next");
    let column_done = bx.icmp(IntPredicate::EQ, y_next, height, "column_done");
    bx.cond_br(column_done, x_latch, y_body);

    bx.position_at_end(x_latch);
    let x_next = bx.add(x, one, "x.next");
    let grid_done = bx.icmp(IntPredicate::EQ, x_next, width, "grid_done");
    bx.cond_br(grid_done, exit, x_header);

    x_phi.add_incoming(&[(&zero, entry), (&x_next, x_latch)]);
    y_phi.add_incoming(&[(&zero, x_header), (&y_next, y_body)]);

    bx.position_at_end(exit);
    bx.ret_void();
    function
}
