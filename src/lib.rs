pub mod config;
pub mod evaluator;
pub mod printer;
pub mod reader;
pub mod repl;
pub mod value;

pub use crate::evaluator::{Env, Error, ErrorKind, Result};
pub use crate::value::{Closure, Value};
