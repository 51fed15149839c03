//! Statement lowering.
//!
//! Mirrors `cellatom_eval::interpret` node for node: one exhaustive `match`
//! producing the `i16` value of each node, with register writes turned into
//! stores to the slots held by [`CompileState`].
//!
//! | Concern | Location |
//! |---------|----------|
//! | Dispatch, literals, registers, lists | `mod.rs` (this file) |
//! | Read-modify-write and the `Op` table | `arithmetic.rs` |
//! | Range maps (branches + phi) | `ranges.rs` |
//! | `neighbours` loops | `neighbours.rs` |

mod arithmetic;
mod neighbours;
mod ranges;

use inkwell::values::{FunctionValue, IntValue, PointerValue};

use cellatom_ir::{Register, Statement, StatementList, REGISTER_COUNT};
use cellatom_stack::ensure_sufficient_stack;

use crate::builder::Builder;
use crate::context::SimpleCx;

/// Storage the per-cell function works on while it is being built.
///
/// Every register variant maps to exactly one stack or buffer slot, and
/// [`CompileState::slot`] is the only way reads and writes find it.
pub(crate) struct CompileState<'ll> {
    /// Slot holding `v`.
    pub value: PointerValue<'ll>,
    /// Stack slots for `a0..a9`, zeroed on entry.
    pub locals: [PointerValue<'ll>; REGISTER_COUNT],
    /// Addresses of `g0..g9` inside the caller's bank.
    pub globals: [PointerValue<'ll>; REGISTER_COUNT],
    /// Base of the old grid.
    pub old: PointerValue<'ll>,
    pub width: IntValue<'ll>,
    pub height: IntValue<'ll>,
    pub x: IntValue<'ll>,
    pub y: IntValue<'ll>,
}

impl<'ll> CompileState<'ll> {
    #[inline]
    pub fn slot(&self, register: Register) -> PointerValue<'ll> {
        match register {
            Register::V => self.value,
            Register::Local(i) => self.locals[i.get()],
            Register::Global(i) => self.globals[i.get()],
        }
    }
}

/// Lowers statements into the function under construction.
pub(crate) struct Lowerer<'a, 'll> {
    builder: &'a Builder<'a, 'll>,
    state: &'a CompileState<'ll>,
    function: FunctionValue<'ll>,
}

impl<'a, 'll> Lowerer<'a, 'll> {
    pub fn new(
        builder: &'a Builder<'a, 'll>,
        state: &'a CompileState<'ll>,
        function: FunctionValue<'ll>,
    ) -> Self {
        Self {
            builder,
            state,
            function,
        }
    }

    #[inline]
    fn cx(&self) -> &'a SimpleCx<'ll> {
        self.builder.cx()
    }

    /// Emit `statement` and return its value.
    pub fn lower(&self, statement: &Statement) -> IntValue<'ll> {
        ensure_sufficient_stack(|| self.lower_inner(statement))
    }

    fn lower_inner(&self, statement: &Statement) -> IntValue<'ll> {
        match statement {
            Statement::Literal(literal) => self.cx().const_cell(literal.get()),
            Statement::Register(register) => self.read(*register),
            Statement::Arithmetic(arith) => self.lower_arithmetic(arith),
            Statement::Range(range) => self.lower_range(range),
            Statement::Neighbours(block) => {
                self.lower_neighbours(block);
                self.cx().const_cell(0)
            }
            Statement::List(list) => {
                self.lower_list(list);
                self.cx().const_cell(0)
            }
        }
    }

    pub fn lower_list(&self, list: &StatementList) {
        for statement in list {
            self.lower(statement);
        }
    }

    fn read(&self, register: Register) -> IntValue<'ll> {
        self.builder
            .load_cell(self.state.slot(register), &register.to_string())
    }

    fn write(&self, register: Register, value: IntValue<'ll>) {
        self.builder.store(value, self.state.slot(register));
    }
}
