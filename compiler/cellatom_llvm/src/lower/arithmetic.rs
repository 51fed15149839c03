//! Arithmetic statements.

use inkwell::values::IntValue;
use inkwell::IntPredicate;

use cellatom_ir::{Arithmetic, Op};

use super::Lowerer;

impl<'ll> Lowerer<'_, 'll> {
    /// Operand, then the target's old value, then the store. The value of
    /// the node is a fresh load of the target.
    pub(super) fn lower_arithmetic(&self, arith: &Arithmetic) -> IntValue<'ll> {
        let operand = self.lower(&arith.value);
        let old = self.read(arith.target);
        let result = self.apply_op(arith.op, old, operand);
        self.write(arith.target, result);
        self.read(arith.target)
    }

    /// Emit `op(old, value)` with the same results as [`Op::apply`].
    fn apply_op(&self, op: Op, old: IntValue<'ll>, value: IntValue<'ll>) -> IntValue<'ll> {
        let b = self.builder;
        match op {
            Op::Assign => value,
            Op::Add => b.add(old, value, "add"),
            Op::Sub => b.sub(old, value, "sub"),
            Op::Mul => b.mul(old, value, "mul"),
            Op::Div => self.guarded_div(old, value),
            Op::Min => {
                let lt = b.icmp(IntPredicate::SLT, old, value, "min.cmp");
                b.select(lt, old, value, "min")
            }
            Op::Max => {
                let gt = b.icmp(IntPredicate::SGT, old, value, "max.cmp");
                b.select(gt, old, value, "max")
            }
        }
    }

    /// Signed division that is total: `x / 0 == 0` and `MIN / -1 == MIN`.
    ///
    /// The `sdiv` itself only ever sees a divisor other than 0 and -1; the
    /// two special cases are patched in with selects.
    fn guarded_div(&self, dividend: IntValue<'ll>, divisor: IntValue<'ll>) -> IntValue<'ll> {
        let b = self.builder;
        let cx = self.cx();
        let zero = cx.const_cell(0);
        let is_zero = b.icmp(IntPredicate::EQ, divisor, zero, "div.zero");
        let is_neg_one = b.icmp(IntPredicate::EQ, divisor, cx.const_cell(-1), "div.neg1");
        let special = b.or(is_zero, is_neg_one, "div.special");
        let safe_divisor = b.select(special, cx.const_cell(1), divisor, "div.divisor");
        let quotient = b.sdiv(dividend, safe_divisor, "div.quot");
        // x / -1 == -x, wrapping at MIN
        let negated = b.sub(zero, dividend, "div.neg");
        let quotient = b.select(is_neg_one, negated, quotient, "div.q");
        b.select(is_zero, zero, quotient, "div")
    }
}
