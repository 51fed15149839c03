//! LLVM Instruction Builder
//!
//! Thin wrapper over the inkwell `Builder`. Every inkwell `build_*` call
//! returns a `Result` that only fails if the builder has no insertion
//! point, which lowering never allows, so the wrappers `expect` instead of
//! threading errors through every statement.

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder as LLVMBuilder;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicValueEnum, FunctionValue, IntValue, PhiValue, PointerValue};
use inkwell::IntPredicate;

use crate::context::SimpleCx;

/// LLVM instruction builder.
///
/// All instruction methods insert at the current position.
pub struct Builder<'a, 'll> {
    llbuilder: LLVMBuilder<'ll>,
    cx: &'a SimpleCx<'ll>,
}

impl<'a, 'll> Builder<'a, 'll> {
    /// Create a new builder positioned at the end of the given basic block.
    pub fn build(cx: &'a SimpleCx<'ll>, bb: BasicBlock<'ll>) -> Self {
        let llbuilder = cx.llcx().create_builder();
        llbuilder.position_at_end(bb);
        Self { llbuilder, cx }
    }

    #[inline]
    pub fn cx(&self) -> &'a SimpleCx<'ll> {
        self.cx
    }

    /// The block instructions are currently appended to.
    pub fn current_block(&self) -> BasicBlock<'ll> {
        self.llbuilder
            .get_insert_block()
            .expect("builder has insertion point")
    }

    pub fn position_at_end(&self, bb: BasicBlock<'ll>) {
        self.llbuilder.position_at_end(bb);
    }

    pub fn append_block(&self, function: FunctionValue<'ll>, name: &str) -> BasicBlock<'ll> {
        self.cx.llcx().append_basic_block(function, name)
    }

    // -- Terminators --

    pub fn ret_void(&self) {
        self.llbuilder.build_return(None).expect("build_return");
    }

    pub fn ret(&self, val: IntValue<'ll>) {
        self.llbuilder
            .build_return(Some(&val))
            .expect("build_return");
    }

    pub fn br(&self, dest: BasicBlock<'ll>) {
        self.llbuilder
            .build_unconditional_branch(dest)
            .expect("build_br");
    }

    pub fn cond_br(&self, cond: IntValue<'ll>, then_bb: BasicBlock<'ll>, else_bb: BasicBlock<'ll>) {
        self.llbuilder
            .build_conditional_branch(cond, then_bb, else_bb)
            .expect("build_cond_br");
    }

    // -- Arithmetic --

    pub fn add(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder.build_int_add(lhs, rhs, name).expect("add")
    }

    pub fn sub(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder.build_int_sub(lhs, rhs, name).expect("sub")
    }

    pub fn mul(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder.build_int_mul(lhs, rhs, name).expect("mul")
    }

    /// Raw signed division. Undefined for a zero divisor or `MIN / -1`;
    /// callers guard the divisor first.
    pub fn sdiv(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder
            .build_int_signed_div(lhs, rhs, name)
            .expect("sdiv")
    }

    pub fn and(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder.build_and(lhs, rhs, name).expect("and")
    }

    pub fn or(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder.build_or(lhs, rhs, name).expect("or")
    }

    pub fn icmp(
        &self,
        pred: IntPredicate,
        lhs: IntValue<'ll>,
        rhs: IntValue<'ll>,
        name: &str,
    ) -> IntValue<'ll> {
        self.llbuilder
            .build_int_compare(pred, lhs, rhs, name)
            .expect("icmp")
    }

    /// Integer select; both arms must have the same type.
    pub fn select(
        &self,
        cond: IntValue<'ll>,
        then_val: IntValue<'ll>,
        else_val: IntValue<'ll>,
        name: &str,
    ) -> IntValue<'ll> {
        self.llbuilder
            .build_select(cond, then_val, else_val, name)
            .expect("select")
            .into_int_value()
    }

    // -- Memory operations --

    pub fn alloca(&self, ty: BasicTypeEnum<'ll>, name: &str) -> PointerValue<'ll> {
        self.llbuilder.build_alloca(ty, name).expect("alloca")
    }

    /// Load a cell-typed value.
    pub fn load_cell(&self, ptr: PointerValue<'ll>, name: &str) -> IntValue<'ll> {
        self.llbuilder
            .build_load(self.cx.cell_ty, ptr, name)
            .expect("load")
            .into_int_value()
    }

    pub fn store(&self, val: impl Into<BasicValueEnum<'ll>>, ptr: PointerValue<'ll>) {
        self.llbuilder.build_store(ptr, val.into()).expect("store");
    }

    /// Address of element `index` of a cell array starting at `base`.
    ///
    /// # Safety
    /// The caller must ensure `index` stays within the array `base`
    /// points to; the GEP is emitted `inbounds`.
    #[allow(unsafe_code)]
    pub fn cell_gep(
        &self,
        base: PointerValue<'ll>,
        index: IntValue<'ll>,
        name: &str,
    ) -> PointerValue<'ll> {
        // SAFETY: indices are either constant register numbers below
        // REGISTER_COUNT or `x * height + y` for an in-grid cell.
        unsafe {
            self.llbuilder
                .build_in_bounds_gep(self.cx.cell_ty, base, &[index], name)
                .expect("gep")
        }
    }

    // -- Calls --

    pub fn call(
        &self,
        callee: FunctionValue<'ll>,
        args: &[BasicValueEnum<'ll>],
        name: &str,
    ) -> Option<BasicValueEnum<'ll>> {
        let args_meta: Vec<inkwell::values::BasicMetadataValueEnum> =
            args.iter().map(|v| (*v).into()).collect();

        let call_val = self
            .llbuilder
            .build_call(callee, &args_meta, name)
            .expect("call");

        call_val.try_as_basic_value().basic()
    }

    // -- Phi nodes --

    pub fn phi(&self, ty: BasicTypeEnum<'ll>, name: &str) -> PhiValue<'ll> {
        self.llbuilder.build_phi(ty, name).expect("phi")
    }
}
