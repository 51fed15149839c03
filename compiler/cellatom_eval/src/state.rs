//! Register storage for one cell evaluation.

use cellatom_ir::{Cell, Register, RegisterIndex, REGISTER_COUNT};

/// The `g0..g9` bank. Zeroed once per sweep and shared by every cell of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalRegisters([Cell; REGISTER_COUNT]);

impl GlobalRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, index: RegisterIndex) -> Cell {
        self.0[index.get()]
    }

    #[inline]
    pub fn set(&mut self, index: RegisterIndex, value: Cell) {
        self.0[index.get()] = value;
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.0
    }
}

/// Everything a statement can observe or modify while one cell is evaluated.
///
/// Local registers and `v` belong to this cell only. The globals are
/// borrowed from the enclosing sweep; the old grid is borrowed read-only.
#[derive(Debug)]
pub struct CellState<'s> {
    locals: [Cell; REGISTER_COUNT],
    v: Cell,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    old: &'s [Cell],
    globals: &'s mut GlobalRegisters,
}

impl<'s> CellState<'s> {
    /// Fresh state for cell `(x, y)`: locals zeroed, `v` set to `value`.
    pub fn new(
        old: &'s [Cell],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        value: Cell,
        globals: &'s mut GlobalRegisters,
    ) -> Self {
        CellState {
            locals: [0; REGISTER_COUNT],
            v: value,
            x,
            y,
            width,
            height,
            old,
            globals,
        }
    }

    #[inline]
    pub fn read(&self, register: Register) -> Cell {
        match register {
            Register::V => self.v,
            Register::Local(i) => self.locals[i.get()],
            Register::Global(i) => self.globals.get(i),
        }
    }

    #[inline]
    pub fn write(&mut self, register: Register, value: Cell) {
        match register {
            Register::V => self.v = value,
            Register::Local(i) => self.locals[i.get()] = value,
            Register::Global(i) => self.globals.set(i, value),
        }
    }

    /// Current contents of `v`, which become the cell's next value.
    #[inline]
    pub fn value(&self) -> Cell {
        self.v
    }

    pub fn coordinates(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Value of `(x, y)` in the old grid.
    #[inline]
    pub fn old_cell(&self, x: usize, y: usize) -> Cell {
        self.old[cellatom_ir::cell_index(x, y, self.height)]
    }
}
