mod env;
mod evaluator;
pub mod prelude;

use crate::reader;
use crate::value::Value;

pub use self::env::Env;
pub use self::evaluator::{apply, eval_expr, Error, ErrorKind, Result};

/// eval reads the first form in `input` and evaluates it against `env`.
pub fn eval(input: &str, env: &mut Env) -> Result<Value> {
    let expr = reader::read(input)?;
    eval_expr(&expr, env)
}

/// eval_all evaluates every top-level form in `input` in order, one result per form.
/// A syntax error anywhere in `input` yields that single error and evaluates nothing.
pub fn eval_all(input: &str, env: &mut Env) -> Vec<Result<Value>> {
    match reader::read_all(input) {
        Ok(exprs) => evaluator::eval(&exprs, env),
        Err(e) => vec![Err(e.into())],
    }
}
