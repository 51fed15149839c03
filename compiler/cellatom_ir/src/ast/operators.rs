//! Arithmetic operators.
//!
//! Every arithmetic statement is a read-modify-write of its target:
//! `result = op(old, operand)`. The table lives here so the interpreter
//! and the code generator cannot drift apart.

use std::fmt;

/// Operation of an arithmetic statement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Op {
    /// `=`: replace the target.
    Assign,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `min`
    Min,
    /// `max`
    Max,
}

impl Op {
    /// All operators, in surface-syntax order.
    pub const ALL: [Op; 7] = [
        Op::Assign,
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::Min,
        Op::Max,
    ];

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Combine the target's old value `old` with the operand `value`.
    ///
    /// `Add`, `Sub` and `Mul` wrap on overflow. See [`Op::divide`] for the
    /// division policy.
    #[inline]
    pub fn apply(self, old: i16, value: i16) -> i16 {
        match self {
            Self::Assign => value,
            Self::Add => old.wrapping_add(value),
            Self::Sub => old.wrapping_sub(value),
            Self::Mul => old.wrapping_mul(value),
            Self::Div => Self::divide(old, value),
            Self::Min => old.min(value),
            Self::Max => old.max(value),
        }
    }

    /// Signed truncating division with total semantics.
    ///
    /// Division by zero yields 0, and `i16::MIN / -1` wraps to `i16::MIN`.
    #[inline]
    pub fn divide(dividend: i16, divisor: i16) -> i16 {
        if divisor == 0 {
            0
        } else {
            dividend.wrapping_div(divisor)
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
