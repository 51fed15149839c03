//! LLVM codegen context.
//!
//! `SimpleCx` bundles the LLVM context, the module being built and the
//! handful of types every lowering step needs. Cellatom has a single value
//! type (`i16`) and uses `i64` for coordinates and dimensions.

use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::types::{ArrayType, IntType, PointerType};
use inkwell::values::IntValue;
use inkwell::AddressSpace;

use cellatom_ir::{Cell, REGISTER_COUNT};

/// Minimal LLVM context: module, context and basic types.
pub struct SimpleCx<'ll> {
    /// The LLVM context (owns all LLVM types and values).
    pub llcx: &'ll Context,
    /// The LLVM module being compiled.
    pub llmod: Module<'ll>,
    /// Opaque pointer type.
    pub ptr_type: PointerType<'ll>,
    /// Machine word size type, used for coordinates and indices.
    pub isize_ty: IntType<'ll>,
    /// Storage type of cells and registers.
    pub cell_ty: IntType<'ll>,
}

impl<'ll> SimpleCx<'ll> {
    #[must_use]
    pub fn new(context: &'ll Context, module_name: &str) -> Self {
        let llmod = context.create_module(module_name);
        Self {
            llcx: context,
            llmod,
            ptr_type: context.ptr_type(AddressSpace::default()),
            isize_ty: context.i64_type(),
            cell_ty: context.i16_type(),
        }
    }

    #[inline]
    pub fn llcx(&self) -> &'ll Context {
        self.llcx
    }

    #[inline]
    pub fn llmod(&self) -> &Module<'ll> {
        &self.llmod
    }

    /// `[10 x i16]`, the layout of a register bank.
    #[inline]
    pub fn type_register_bank(&self) -> ArrayType<'ll> {
        self.cell_ty.array_type(REGISTER_COUNT as u32)
    }

    /// Constant cell value.
    #[inline]
    pub fn const_cell(&self, value: Cell) -> IntValue<'ll> {
        self.cell_ty.const_int(i64::from(value) as u64, true)
    }

    /// Constant index or dimension value.
    #[inline]
    pub fn const_isize(&self, value: i64) -> IntValue<'ll> {
        self.isize_ty.const_int(value as u64, true)
    }
}
