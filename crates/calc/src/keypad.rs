//! Keypad state machine: an input buffer, a display line and a bounded history.

use std::collections::VecDeque;

use recordkit_core::constants::CALC_HISTORY_LIMIT;
use serde::Serialize;

use crate::ast::{BinOp, Func};
use crate::error::CalcError;

/// Text shown after any failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// One keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Op(BinOp),
    Open,
    Close,
    Func(Func),
    Pi,
    E,
    Clear,
    Backspace,
    Equals,
}

impl Key {
    /// Map a typed character to a key. Letters are not keys; functions are
    /// entered through [`Key::Func`].
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '0'..='9' => Self::Digit(ch as u8 - b'0'),
            '.' => Self::Point,
            '+' => Self::Op(BinOp::Add),
            '-' | '−' => Self::Op(BinOp::Sub),
            '*' | '×' => Self::Op(BinOp::Mul),
            '/' | '÷' => Self::Op(BinOp::Div),
            '%' => Self::Op(BinOp::Rem),
            '^' => Self::Op(BinOp::Pow),
            '(' => Self::Open,
            ')' => Self::Close,
            'π' => Self::Pi,
            '√' => Self::Func(Func::Sqrt),
            '=' | '\n' => Self::Equals,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

#[derive(Debug, Default)]
pub struct Calculator {
    buffer: String,
    display: String,
    history: VecDeque<HistoryEntry>,
    just_evaluated: bool,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display line. Shows `0` when nothing has been typed.
    #[must_use]
    pub fn display(&self) -> &str {
        if self.display.is_empty() { "0" } else { &self.display }
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Successful evaluations, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Apply one key and return the new display line.
    pub fn press(&mut self, key: Key) -> &str {
        match key {
            Key::Clear => {
                self.buffer.clear();
                self.display.clear();
                self.just_evaluated = false;
            },
            Key::Backspace => {
                if self.just_evaluated {
                    self.buffer.clear();
                    self.just_evaluated = false;
                } else {
                    let trimmed = strip_last_token(&self.buffer).len();
                    self.buffer.truncate(trimmed);
                }
                self.display.clone_from(&self.buffer);
            },
            Key::Equals => {
                let _ = self.evaluate_buffer();
            },
            Key::Op(op) => {
                // An operator continues from the previous result.
                self.just_evaluated = false;
                self.push(op.symbol());
            },
            Key::Digit(d) => self.type_fresh(&char::from(b'0' + d.min(9)).to_string()),
            Key::Point => self.type_fresh("."),
            Key::Open => self.type_fresh("("),
            Key::Close => self.type_fresh(")"),
            Key::Pi => self.type_fresh("π"),
            Key::E => self.type_fresh("e"),
            Key::Func(func) => {
                let text = format!("{}(", func.as_str());
                self.type_fresh(&text);
            },
        }
        self.display()
    }

    /// Replace the buffer with `expression` and evaluate it.
    pub fn submit(&mut self, expression: &str) -> Result<f64, CalcError> {
        self.buffer = expression.trim().to_owned();
        self.evaluate_buffer()
    }

    fn evaluate_buffer(&mut self) -> Result<f64, CalcError> {
        let expression = std::mem::take(&mut self.buffer);
        match crate::evaluate(&expression) {
            Ok(value) => {
                let shown = format_number(value);
                tracing::debug!(%expression, result = %shown, "evaluated");
                self.record(HistoryEntry { expression, result: shown.clone() });
                self.buffer = operand(&shown);
                self.display = shown;
                self.just_evaluated = true;
                Ok(value)
            },
            Err(e) => {
                tracing::debug!(%expression, error = %e, "evaluation failed");
                self.display = ERROR_DISPLAY.to_owned();
                self.just_evaluated = false;
                Err(e)
            },
        }
    }

    fn record(&mut self, entry: HistoryEntry) {
        if self.history.len() == CALC_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(entry);
    }

    /// Typing after a result starts a new expression.
    fn type_fresh(&mut self, text: &str) {
        if self.just_evaluated {
            self.buffer.clear();
            self.just_evaluated = false;
        }
        self.push(text);
    }

    fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.display.clone_from(&self.buffer);
    }
}

/// A result as it re-enters the buffer. Signed and exponent forms are
/// grouped so a following operator applies to the whole value.
fn operand(shown: &str) -> String {
    if shown.starts_with('-') || shown.contains('e') {
        format!("({shown})")
    } else {
        shown.to_owned()
    }
}

/// Drop the last char, or a whole function name with its `(`.
fn strip_last_token(buffer: &str) -> &str {
    let Some(head) = buffer.strip_suffix('(') else {
        return buffer.char_indices().next_back().map_or("", |(i, _)| &buffer[..i]);
    };
    head.trim_end_matches(|c: char| c.is_ascii_alphabetic())
}

/// Render a result with at most 12 decimals, trailing zeros removed.
///
/// Magnitudes from 1e15 upwards use exponent notation.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.abs() >= 1e15 {
        return format!("{value:e}");
    }
    let fixed = format!("{value:.12}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}
