//! Source-form printing.
//!
//! `Display` renders a tree back into the surface syntax, which the parser
//! accepts again. Top-level statements go one per line; statements nested in
//! a `neighbours` block are separated by single spaces.

use std::fmt;

use super::{Arithmetic, Neighbours, Range, RangeExpr, Statement, StatementList};

fn write_joined(f: &mut fmt::Formatter<'_>, list: &StatementList, sep: &str) -> fmt::Result {
    for (i, stmt) in list.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{stmt}")?;
    }
    Ok(())
}

impl fmt::Display for StatementList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self, "\n")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Literal(lit) => write!(f, "{lit}"),
            Statement::Register(reg) => write!(f, "{reg}"),
            Statement::Arithmetic(arith) => write!(f, "{arith}"),
            Statement::Range(range) => write!(f, "{range}"),
            Statement::Neighbours(block) => write!(f, "{block}"),
            Statement::List(list) => write_joined(f, list, " "),
        }
    }
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.op, self.target, self.value)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "({start},{}) => {}", self.end, self.value),
            None => write!(f, "{} => {}", self.end, self.value),
        }
    }
}

impl fmt::Display for RangeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} | ", self.scrutinee)?;
        for (i, arm) in self.arms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arm}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Neighbours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("neighbours(")?;
        write_joined(f, &self.body, " ")?;
        f.write_str(")")
    }
}
