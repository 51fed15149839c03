//! AST node set for the Cellatom language.
//!
//! The tree is built once (by the parser or directly in tests) and is
//! read-only afterwards. Every node is owned by exactly one parent: child
//! statements live in `Box`/`Vec`, so there is no sharing and no cycles.
//!
//! Node kinds:
//!
//! | Kind | Produces a value | Side effects |
//! |------|------------------|--------------|
//! | [`Literal`] | the constant | none |
//! | [`Register`] | the register's contents | none |
//! | [`Arithmetic`] | target after the write | writes the target |
//! | [`RangeExpr`] | first matching arm, else 0 | those of the taken arm |
//! | [`Neighbours`] | 0 | writes `a0`, runs its body per neighbour |
//! | [`StatementList`] | 0 | those of its statements |

mod display;
mod literal;
mod operators;
mod register;

#[cfg(test)]
mod tests;

pub use literal::Literal;
pub use operators::Op;
pub use register::{Register, RegisterIndex, REGISTER_COUNT};

/// A single node of a Cellatom program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Statement {
    /// A constant.
    Literal(Literal),
    /// A read of `v`, `aN` or `gN`.
    Register(Register),
    /// A read-modify-write of a register, e.g. `+ a0 12`.
    Arithmetic(Arithmetic),
    /// A range map, e.g. `[a0 | (2,3) => 1]`.
    Range(RangeExpr),
    /// A `neighbours( ... )` block.
    Neighbours(Neighbours),
    /// A nested sequence of statements.
    List(StatementList),
}

impl Statement {
    /// Build `op target value`.
    pub fn arithmetic(op: Op, target: Register, value: Statement) -> Self {
        Statement::Arithmetic(Arithmetic::new(op, target, value))
    }

    /// Does this node (or any descendant) read or write a global register?
    pub fn uses_global_registers(&self) -> bool {
        match self {
            Statement::Literal(_) => false,
            Statement::Register(reg) => reg.is_global(),
            Statement::Arithmetic(arith) => {
                arith.target.is_global() || arith.value.uses_global_registers()
            }
            Statement::Range(range) => {
                range.scrutinee.is_global()
                    || range
                        .arms
                        .iter()
                        .any(|arm| arm.value.uses_global_registers())
            }
            Statement::Neighbours(block) => block.body.uses_global_registers(),
            Statement::List(list) => list.uses_global_registers(),
        }
    }
}

impl From<Literal> for Statement {
    fn from(literal: Literal) -> Self {
        Statement::Literal(literal)
    }
}

impl From<Register> for Statement {
    fn from(reg: Register) -> Self {
        Statement::Register(reg)
    }
}

impl From<RangeExpr> for Statement {
    fn from(range: RangeExpr) -> Self {
        Statement::Range(range)
    }
}

impl From<Neighbours> for Statement {
    fn from(block: Neighbours) -> Self {
        Statement::Neighbours(block)
    }
}

/// An ordered list of statements executed sequentially.
///
/// The top level of every program is a `StatementList`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatementList {
    pub statements: Vec<Statement>,
}

impl StatementList {
    pub fn new(statements: Vec<Statement>) -> Self {
        StatementList { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Does any statement read or write a global register?
    ///
    /// Programs that never do are free of cross-cell dependencies within a
    /// sweep, which is what makes a column-parallel sweep legal.
    pub fn uses_global_registers(&self) -> bool {
        self.statements.iter().any(Statement::uses_global_registers)
    }
}

impl FromIterator<Statement> for StatementList {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        StatementList::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Read-modify-write of a register: `op target value`.
///
/// Evaluation order is operand, then the target's old value, then the write.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arithmetic {
    pub op: Op,
    pub target: Register,
    pub value: Box<Statement>,
}

impl Arithmetic {
    pub fn new(op: Op, target: Register, value: Statement) -> Self {
        Arithmetic {
            op,
            target,
            value: Box::new(value),
        }
    }
}

/// One arm of a range map.
///
/// With `start` absent the arm matches when the scrutinee equals `end`;
/// otherwise it matches the inclusive interval `[start, end]`. An interval
/// whose start exceeds its end never matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Option<Literal>,
    pub end: Literal,
    pub value: Box<Statement>,
}

impl Range {
    /// Arm matching exactly `value`.
    pub fn single(value: Literal, then: Statement) -> Self {
        Range {
            start: None,
            end: value,
            value: Box::new(then),
        }
    }

    /// Arm matching the inclusive interval `[start, end]`.
    pub fn interval(start: Literal, end: Literal, then: Statement) -> Self {
        Range {
            start: Some(start),
            end,
            value: Box::new(then),
        }
    }

    /// Does `scrutinee` fall into this arm? Comparisons are signed.
    #[inline]
    pub fn matches(&self, scrutinee: i16) -> bool {
        match self.start {
            Some(start) => scrutinee >= start.get() && scrutinee <= self.end.get(),
            None => scrutinee == self.end.get(),
        }
    }
}

/// Range map: `[reg | range => expr, ...]`.
///
/// Arms are tested in declaration order and the first match wins; only the
/// matching arm's value is evaluated. No match yields 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RangeExpr {
    pub scrutinee: Register,
    pub arms: Vec<Range>,
}

impl RangeExpr {
    pub fn new(scrutinee: Register, arms: Vec<Range>) -> Self {
        RangeExpr { scrutinee, arms }
    }

    /// The first arm matching `scrutinee`, if any.
    pub fn select(&self, scrutinee: i16) -> Option<&Range> {
        self.arms.iter().find(|arm| arm.matches(scrutinee))
    }
}

/// `neighbours( body )`: run `body` once per in-grid Moore neighbour, with
/// the neighbour's old value loaded into `a0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Neighbours {
    pub body: StatementList,
}

impl Neighbours {
    pub fn new(body: StatementList) -> Self {
        Neighbours { body }
    }
}
