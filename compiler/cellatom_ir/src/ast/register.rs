//! Register references.

use std::fmt;

use crate::error::AstError;

/// Number of local registers and of global registers.
pub const REGISTER_COUNT: usize = 10;

/// A validated register number in `0..REGISTER_COUNT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterIndex(u8);

impl RegisterIndex {
    /// Local register `a0`, which `neighbours` loads each neighbour into.
    pub const NEIGHBOUR: RegisterIndex = RegisterIndex(0);

    pub fn new(index: u32) -> Result<Self, AstError> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < REGISTER_COUNT)
            .map(RegisterIndex)
            .ok_or(AstError::RegisterOutOfRange { index })
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// A register operand.
///
/// Each variant names exactly one storage slot; reading and writing a given
/// register always address that same slot, in both engines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    /// `v`: the current cell value. Its final contents become the cell's
    /// value in the next grid.
    V,
    /// `aN`: per-cell scratch, zeroed at the start of every cell.
    Local(RegisterIndex),
    /// `gN`: per-sweep storage, zeroed once per sweep.
    Global(RegisterIndex),
}

impl Register {
    /// Local register `aN`.
    pub fn local(index: u32) -> Result<Self, AstError> {
        RegisterIndex::new(index).map(Register::Local)
    }

    /// Global register `gN`.
    pub fn global(index: u32) -> Result<Self, AstError> {
        RegisterIndex::new(index).map(Register::Global)
    }

    #[inline]
    pub fn is_global(self) -> bool {
        matches!(self, Register::Global(_))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::V => write!(f, "v"),
            Register::Local(i) => write!(f, "a{}", i.get()),
            Register::Global(i) => write!(f, "g{}", i.get()),
        }
    }
}
