mod lexer;
mod parser;

use self::lexer::Lexer;
use self::parser::Parser;
use crate::value::Value;

pub use self::lexer::{lex, tokenize, Token};
pub use self::parser::{Error, Result};

/// read parses the first form in `input`; anything after it is ignored.
pub fn read(input: &str) -> Result<Value> {
    let mut lexer = Lexer::new(input);

    let mut parser = Parser::new();
    parser.parse_form(&mut lexer)
}

/// read_all parses every top-level form in `input`.
pub fn read_all(input: &str) -> Result<Vec<Value>> {
    let mut tokens = Lexer::new(input).peekable();

    let mut parser = Parser::new();
    parser.parse_all(&mut tokens)
}
