//! Scientific calculator for recordkit
//!
//! `tokenize` → `parse` → `eval`, plus a keypad [`Calculator`] that keeps the
//! typed buffer, the display line and a bounded history.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::float_cmp, reason = "Zero divisor check is exact by intent")]

mod ast;
mod error;
mod eval;
mod keypad;
mod parser;
mod token;

pub use ast::{BinOp, Expr, Func};
pub use error::CalcError;
pub use eval::eval;
pub use keypad::{Calculator, ERROR_DISPLAY, HistoryEntry, Key, format_number};
pub use parser::{MAX_DEPTH, parse};
pub use token::{Span, Token, TokenKind, tokenize};

/// Parse and evaluate `input` in one step.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    eval(&parse(input)?)
}
