use std::io;

use crate::evaluator::Result;
use crate::value::Value;

static ERROR_PREFIX: &str = "Error: ";

pub fn print(value: &Value) -> String {
    value.to_string()
}

/// render formats one evaluation outcome the way the REPL reports it.
pub fn render(result: &Result<Value>) -> String {
    match result {
        Ok(value) => print(value),
        Err(e) => format!("{}{}", ERROR_PREFIX, e),
    }
}

pub fn print_expr_to(mut out: impl io::Write, value: &Value) -> io::Result<()> {
    write!(&mut out, "{}", value)
}

pub fn println_to(mut out: impl io::Write, results: &[Result<Value>]) -> io::Result<()> {
    for result in results {
        writeln!(&mut out, "{}", render(result))?;
    }
    Ok(())
}
