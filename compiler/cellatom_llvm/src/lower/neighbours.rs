//! `neighbours` blocks.
//!
//! Two nested counted loops over the clamped 3x3 block around `(x, y)`.
//! The block always contains the centre, so both loops run at least once
//! and are emitted bottom-tested:
//!
//! ```text
//! preheader ─▶ nb.x ─▶ nb.y ──centre──▶ nb.y.latch ─▶ nb.y | nb.x.latch
//!                        └─▶ nb.body ─▶ nb.y.latch
//!                                       nb.x.latch ─▶ nb.x | nb.exit
//! ```

use inkwell::values::IntValue;
use inkwell::IntPredicate;
use tracing::instrument;

use cellatom_ir::{Neighbours, Register, RegisterIndex};

use super::Lowerer;

impl<'ll> Lowerer<'_, 'll> {
    #[instrument(level = "trace", skip_all, fields(statements = block.body.len()))]
    pub(super) fn lower_neighbours(&self, block: &Neighbours) {
        let b = self.builder;
        let cx = self.cx();
        let state = self.state;
        let one = cx.const_isize(1);

        let (x_min, x_max) = self.clamped_bounds(state.x, state.width, "nb.x");
        let (y_min, y_max) = self.clamped_bounds(state.y, state.height, "nb.y");

        let preheader = b.current_block();
        let x_header = b.append_block(self.function, "nb.x");
        let y_header = b.append_block(self.function, "nb.y");
        let body = b.append_block(self.function, "nb.body");
        let y_latch = b.append_block(self.function, "nb.y.latch");
        let x_latch = b.append_block(self.function, "nb.x.latch");
        let exit = b.append_block(self.function, "nb.exit");
        b.br(x_header);

        b.position_at_end(x_header);
        let nx_phi = b.phi(cx.isize_ty.into(), "nx");
        let nx = nx_phi.as_basic_value().into_int_value();
        b.br(y_header);

        b.position_at_end(y_header);
        let ny_phi = b.phi(cx.isize_ty.into(), "ny");
        let ny = ny_phi.as_basic_value().into_int_value();
        let same_x = b.icmp(IntPredicate::EQ, nx, state.x, "nb.same_x");
        let same_y = b.icmp(IntPredicate::EQ, ny, state.y, "nb.same_y");
        let is_centre = b.and(same_x, same_y, "nb.centre");
        b.cond_br(is_centre, y_latch, body);

        b.position_at_end(body);
        let column = b.mul(nx, state.height, "nb.column");
        let index = b.add(column, ny, "nb.index");
        let address = b.cell_gep(state.old, index, "nb.ptr");
        let neighbour = b.load_cell(address, "nb.value");
        self.write(Register::Local(RegisterIndex::NEIGHBOUR), neighbour);
        self.lower_list(&block.body);
        // The body may end in a block other than `body`.
        b.br(y_latch);

        b.position_at_end(y_latch);
        let ny_next = b.add(ny, one, "ny.next");
        let y_done = b.icmp(IntPredicate::EQ, ny, y_max, "nb.y.done");
        b.cond_br(y_done, x_latch, y_header);

        b.position_at_end(x_latch);
        let nx_next = b.add(nx, one, "nx.next");
        let x_done = b.icmp(IntPredicate::EQ, nx, x_max, "nb.x.done");
        b.cond_br(x_done, exit, x_header);

        nx_phi.add_incoming(&[(&x_min, preheader), (&nx_next, x_latch)]);
        ny_phi.add_incoming(&[(&y_min, x_header), (&ny_next, y_latch)]);

        b.position_at_end(exit);
    }

    /// `(max(c - 1, 0), min(c + 1, limit - 1))` for a coordinate `c` inside
    /// `0..limit`.
    fn clamped_bounds(
        &self,
        coordinate: IntValue<'ll>,
        limit: IntValue<'ll>,
        name: &str,
    ) -> (IntValue<'ll>, IntValue<'ll>) {
        let b = self.builder;
        let cx = self.cx();
        let zero = cx.const_isize(0);
        let one = cx.const_isize(1);

        let below = b.sub(coordinate, one, &format!("{name}.prev"));
        let has_below = b.icmp(IntPredicate::SGT, coordinate, zero, &format!("{name}.has_prev"));
        let min = b.select(has_below, below, zero, &format!("{name}.min"));

        let above = b.add(coordinate, one, &format!("{name}.next"));
        let last = b.sub(limit, one, &format!("{name}.last"));
        let has_above = b.icmp(IntPredicate::SLT, above, limit, &format!("{name}.has_next"));
        let max = b.select(has_above, above, last, &format!("{name}.max"));
        (min, max)
    }
}
