use std::io::{self, BufRead};

use anyhow::Result;
use recordkit_calc::{Calculator, ERROR_DISPLAY, format_number};

/// Evaluate the joined arguments, or every stdin line when none are given.
pub(crate) fn run(expression: &[String]) -> Result<()> {
    if expression.is_empty() {
        return run_lines(io::stdin().lock());
    }
    let input = expression.join(" ");
    match recordkit_calc::evaluate(&input) {
        Ok(value) => {
            println!("{}", format_number(value));
            Ok(())
        },
        Err(e) => {
            println!("{ERROR_DISPLAY}");
            Err(e.into())
        },
    }
}

/// One display line per input line. A failing line prints `Error` and the
/// session carries on.
fn run_lines(input: impl BufRead) -> Result<()> {
    let mut calc = Calculator::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = calc.submit(&line) {
            tracing::debug!(line = %line, error = %e, "line failed");
        }
        println!("{}", calc.display());
    }
    Ok(())
}
