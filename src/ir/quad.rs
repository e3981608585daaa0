//! Quadruple instruction records
//!
//! A [`Quadruple`] is a numbered four-field instruction
//! `(operator, operand1, operand2, result)`. Line numbers double as the jump
//! address space: the result field of [`Operator::Jmp`], [`Operator::Je`] and
//! every relational operator is an [`Operand::Line`] target.

use std::fmt;

/// Relational comparison used directly as a quadruple operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq, // =
    Ne, // #
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

impl RelOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Eq => "=",
            RelOp::Ne => "#",
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
        }
    }
}

/// Quadruple operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// `:=`
    Assign,
    /// `@`, unary negation
    Neg,
    /// Unconditional jump
    Jmp,
    /// Conditional jump on the condition place
    Je,
    /// Compare-and-branch
    Rel(RelOp),
}

impl Operator {
    /// Returns true if the result field of this operator holds a line number.
    pub fn is_jump(self) -> bool {
        matches!(self, Operator::Jmp | Operator::Je | Operator::Rel(_))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Assign => ":=",
            Operator::Neg => "@",
            Operator::Jmp => "jmp",
            Operator::Je => "je",
            Operator::Rel(op) => op.as_str(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quadruple field.
///
/// Places produced by the parser are either [`Operand::Name`] (a declared
/// identifier or a temporary) or [`Operand::Int`] (a literal used in place).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Unused field, rendered as `_`
    Empty,
    Int(i64),
    Name(String),
    /// Jump target line
    Line(usize),
}

impl Operand {
    pub fn name(name: impl Into<String>) -> Self {
        Operand::Name(name.into())
    }

    pub fn as_line(&self) -> Option<usize> {
        match self {
            Operand::Line(line) => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Empty => write!(f, "_"),
            Operand::Int(n) => write!(f, "{}", n),
            Operand::Name(name) => write!(f, "{}", name),
            Operand::Line(line) => write!(f, "{}", line),
        }
    }
}

/// One emitted instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadruple {
    pub line: usize,
    pub op: Operator,
    pub arg1: Operand,
    pub arg2: Operand,
    pub result: Operand,
}

impl Quadruple {
    /// Jump target of a jump quadruple, `None` for everything else.
    pub fn target(&self) -> Option<usize> {
        if self.op.is_jump() {
            self.result.as_line()
        } else {
            None
        }
    }
}

/// Renders the durable text form `line: (op, arg1, arg2, result)`.
impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({}, {}, {}, {})",
            self.line, self.op, self.arg1, self.arg2, self.result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let quad = Quadruple {
            line: 1,
            op: Operator::Add,
            arg1: Operand::Int(1),
            arg2: Operand::Int(2),
            result: Operand::name("#TEMP1"),
        };
        assert_eq!(quad.to_string(), "1: (+, 1, 2, #TEMP1)");

        let jump = Quadruple {
            line: 3,
            op: Operator::Jmp,
            arg1: Operand::Empty,
            arg2: Operand::Empty,
            result: Operand::Line(5),
        };
        assert_eq!(jump.to_string(), "3: (jmp, _, _, 5)");
        assert_eq!(jump.target(), Some(5));
    }

    #[test]
    fn test_relational_tags() {
        assert_eq!(Operator::Rel(RelOp::Ne).as_str(), "#");
        assert_eq!(Operator::Rel(RelOp::Ge).as_str(), ">=");
        assert!(Operator::Rel(RelOp::Lt).is_jump());
        assert!(!Operator::Assign.is_jump());
    }
}
