use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "^",
        }
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub(crate) const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Pow => 4,
        }
    }

    #[must_use]
    pub(crate) const fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Func {
    Sin,
    Cos,
    Tan,
    /// Base 10.
    Log,
    Ln,
    Sqrt,
}

impl Func {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "log" => Self::Log,
            "ln" => Self::Ln,
            "sqrt" => Self::Sqrt,
            _ => return None,
        })
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Neg(Box<Expr>),
    BinOp { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    UnaryFn { func: Func, arg: Box<Expr> },
}

impl Expr {
    pub(crate) fn binary(op: BinOp, lhs: Self, rhs: Self) -> Self {
        Self::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }
}

/// Fully parenthesized form, handy for checking how input was grouped.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Neg(ref inner) => write!(f, "(-{inner})"),
            Self::BinOp { op, ref lhs, ref rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Self::UnaryFn { func, ref arg } => write!(f, "{}({arg})", func.as_str()),
        }
    }
}
