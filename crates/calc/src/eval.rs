use crate::ast::{BinOp, Expr, Func};
use crate::error::CalcError;

/// Evaluate a parsed tree. Every result is finite; anything else is an error.
pub fn eval(expr: &Expr) -> Result<f64, CalcError> {
    let value = match *expr {
        Expr::Num(n) => n,
        Expr::Neg(ref inner) => -eval(inner)?,
        Expr::BinOp { op, ref lhs, ref rhs } => binary(op, eval(lhs)?, eval(rhs)?)?,
        Expr::UnaryFn { func, ref arg } => apply(func, eval(arg)?)?,
    };
    finite(value)
}

fn binary(op: BinOp, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
    let value = match op {
        BinOp::Add => lhs + rhs,
        BinOp::Sub => lhs - rhs,
        BinOp::Mul => lhs * rhs,
        BinOp::Div | BinOp::Rem if rhs == 0.0 => return Err(CalcError::DivisionByZero),
        BinOp::Div => lhs / rhs,
        BinOp::Rem => lhs % rhs,
        BinOp::Pow => {
            let value = lhs.powf(rhs);
            if value.is_nan() {
                return Err(CalcError::Domain { func: "pow", arg: lhs });
            }
            value
        },
    };
    finite(value)
}

fn apply(func: Func, arg: f64) -> Result<f64, CalcError> {
    let domain = || CalcError::Domain { func: func.as_str(), arg };
    match func {
        Func::Sqrt if arg < 0.0 => Err(domain()),
        Func::Log | Func::Ln if arg <= 0.0 => Err(domain()),
        Func::Sin => Ok(arg.sin()),
        Func::Cos => Ok(arg.cos()),
        Func::Tan => Ok(arg.tan()),
        Func::Log => Ok(arg.log10()),
        Func::Ln => Ok(arg.ln()),
        Func::Sqrt => Ok(arg.sqrt()),
    }
}

fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_nan() {
        Err(CalcError::Domain { func: "result", arg: value })
    } else if value.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(value)
    }
}
