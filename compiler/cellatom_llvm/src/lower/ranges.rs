//! Range maps.
//!
//! ```text
//!   test0 ──match──▶ arm0 ──┐
//!     │ no                  │
//!   test1 ──match──▶ arm1 ──┤
//!     │ no                  ▼
//!   fallthrough ───────▶ range.end: phi [arm0, arm1, 0]
//! ```

use inkwell::basic_block::BasicBlock;
use inkwell::values::{BasicValue, IntValue};
use inkwell::IntPredicate;
use tracing::instrument;

use cellatom_ir::{Range, RangeExpr};

use super::Lowerer;

impl<'ll> Lowerer<'_, 'll> {
    #[instrument(level = "trace", skip_all, fields(arms = range.arms.len()))]
    pub(super) fn lower_range(&self, range: &RangeExpr) -> IntValue<'ll> {
        let b = self.builder;
        let scrutinee = self.read(range.scrutinee);

        let mut incoming: Vec<(IntValue<'ll>, BasicBlock<'ll>)> =
            Vec::with_capacity(range.arms.len() + 1);
        for arm in &range.arms {
            let arm_bb = b.append_block(self.function, "range.arm");
            let next_bb = b.append_block(self.function, "range.next");
            let matches = self.arm_matches(arm, scrutinee);
            b.cond_br(matches, arm_bb, next_bb);

            b.position_at_end(arm_bb);
            let value = self.lower(&arm.value);
            // The arm may have opened blocks of its own.
            incoming.push((value, b.current_block()));

            b.position_at_end(next_bb);
        }
        incoming.push((self.cx().const_cell(0), b.current_block()));

        let end_bb = b.append_block(self.function, "range.end");
        for &(_, block) in &incoming {
            b.position_at_end(block);
            b.br(end_bb);
        }

        b.position_at_end(end_bb);
        let phi = b.phi(self.cx().cell_ty.into(), "range");
        let incoming: Vec<(&dyn BasicValue<'ll>, BasicBlock<'ll>)> = incoming
            .iter()
            .map(|(value, block)| (value as &dyn BasicValue<'ll>, *block))
            .collect();
        phi.add_incoming(&incoming);
        phi.as_basic_value().into_int_value()
    }

    /// `i1` that is true when `scrutinee` falls into `arm` (signed compare).
    fn arm_matches(&self, arm: &Range, scrutinee: IntValue<'ll>) -> IntValue<'ll> {
        let b = self.builder;
        let end = self.cx().const_cell(arm.end.get());
        match arm.start {
            Some(start) => {
                let start = self.cx().const_cell(start.get());
                let above = b.icmp(IntPredicate::SGE, scrutinee, start, "range.ge");
                let below = b.icmp(IntPredicate::SLE, scrutinee, end, "range.le");
                b.and(above, below, "range.in")
            }
            None => b.icmp(IntPredicate::EQ, scrutinee, end, "range.eq"),
        }
    }
}
