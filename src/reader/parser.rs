use std::iter;
use std::result;

use thiserror::Error;

use super::lexer::Token;
use crate::value::Value;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum Error {
    /// UnexpectedEof indicates the token stream held no form at all.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// UnterminatedList points to the token index of the `(` that was never closed.
    #[error("missing closing parenthesis for list opened at token {0}")]
    UnterminatedList(usize),
    /// UnexpectedClose points to the token index of a `)` without a matching `(`.
    #[error("unexpected closing parenthesis at token {0}")]
    UnexpectedClose(usize),
}

/// Parser builds `Value` trees from a token stream by recursive descent.
#[derive(Debug, Default)]
pub struct Parser {
    consumed: usize,
}

impl<'a> Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// parse_form parses exactly one form from `tokens`, leaving any trailing tokens unread.
    pub fn parse_form<T>(&mut self, tokens: &mut T) -> Result<Value>
    where
        T: Iterator<Item = Token<'a>>,
    {
        match self.next_token(tokens) {
            None => Err(Error::UnexpectedEof),
            Some(token) => self.parse_node(token, tokens),
        }
    }

    /// parse_all parses forms until `tokens` is exhausted.
    pub fn parse_all<T>(&mut self, tokens: &mut iter::Peekable<T>) -> Result<Vec<Value>>
    where
        T: Iterator<Item = Token<'a>>,
    {
        let mut forms = vec![];
        while tokens.peek().is_some() {
            forms.push(self.parse_form(tokens)?);
        }
        Ok(forms)
    }

    fn next_token<T>(&mut self, tokens: &mut T) -> Option<Token<'a>>
    where
        T: Iterator<Item = Token<'a>>,
    {
        let token = tokens.next();
        if token.is_some() {
            self.consumed += 1;
        }
        token
    }

    fn token_index(&self) -> usize {
        self.consumed.saturating_sub(1)
    }

    fn parse_node<T>(&mut self, token: Token<'a>, tokens: &mut T) -> Result<Value>
    where
        T: Iterator<Item = Token<'a>>,
    {
        match token {
            Token::Open => self.parse_list(tokens),
            Token::Close => Err(Error::UnexpectedClose(self.token_index())),
            Token::Atom(text) | Token::String(text) => Ok(Value::atom(text)),
        }
    }

    fn parse_list<T>(&mut self, tokens: &mut T) -> Result<Value>
    where
        T: Iterator<Item = Token<'a>>,
    {
        let open_index = self.token_index();
        let mut elements = vec![];

        loop {
            match self.next_token(tokens) {
                None => return Err(Error::UnterminatedList(open_index)),
                Some(Token::Close) => return Ok(Value::List(elements)),
                Some(token) => elements.push(self.parse_node(token, tokens)?),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::Lexer;
    use super::*;

    fn run_parse(input: &str) -> Result<Value> {
        let mut lexer = Lexer::new(input);
        Parser::new().parse_form(&mut lexer)
    }

    fn atom(text: &str) -> Value {
        Value::atom(text)
    }

    macro_rules! parse_tests {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (input, expected): (&str, Value) = $value;
                    assert_eq!(run_parse(input), Ok(expected));
                }
            )*
        }
    }

    parse_tests! {
        can_parse_number: ("42", atom("42")),
        can_parse_symbol_with_punctuation: ("+-*/", atom("+-*/")),
        can_parse_string_literal: (r#""Hello, World!""#, atom(r#""Hello, World!""#)),
        can_parse_empty_list: ("()", Value::List(vec![])),
        can_parse_simple_list: ("(+ 1 2 3)", Value::List(vec![
            atom("+"),
            atom("1"),
            atom("2"),
            atom("3"),
        ])),
        can_parse_nested_list: ("(define x (10 20))", Value::List(vec![
            atom("define"),
            atom("x"),
            Value::List(vec![atom("10"), atom("20")]),
        ])),
        can_parse_deeply_nested_lists: ("(a (b (c (d))))", Value::List(vec![
            atom("a"),
            Value::List(vec![
                atom("b"),
                Value::List(vec![atom("c"), Value::List(vec![atom("d")])]),
            ]),
        ])),
        can_parse_with_comment: ("(+ 1 2) ; this is a comment", Value::List(vec![
            atom("+"),
            atom("1"),
            atom("2"),
        ])),
        parses_only_first_form: ("(1 2) (3 4)", Value::List(vec![atom("1"), atom("2")])),
        ignores_trailing_close: ("x)", atom("x")),
    }

    #[test]
    fn can_find_unterminated_lists() {
        assert_eq!(run_parse("(+ 1 2"), Err(Error::UnterminatedList(0)));
        assert_eq!(run_parse("("), Err(Error::UnterminatedList(0)));
        assert_eq!(run_parse("(a (b)"), Err(Error::UnterminatedList(0)));
        assert_eq!(run_parse("(a (b"), Err(Error::UnterminatedList(2)));
    }

    #[test]
    fn can_find_stray_close() {
        assert_eq!(run_parse(")"), Err(Error::UnexpectedClose(0)));
        assert_eq!(run_parse(") (1 2)"), Err(Error::UnexpectedClose(0)));
    }

    #[test]
    fn can_find_empty_input() {
        assert_eq!(run_parse(""), Err(Error::UnexpectedEof));
        assert_eq!(run_parse("   ; nothing here"), Err(Error::UnexpectedEof));
    }

    #[test]
    fn can_parse_all_forms() {
        let mut tokens = Lexer::new("(1 2) x ()").peekable();
        let forms = Parser::new().parse_all(&mut tokens);
        assert_eq!(
            forms,
            Ok(vec![
                Value::List(vec![atom("1"), atom("2")]),
                atom("x"),
                Value::List(vec![]),
            ])
        );

        let mut tokens = Lexer::new("(1 2) )").peekable();
        assert_eq!(
            Parser::new().parse_all(&mut tokens),
            Err(Error::UnexpectedClose(4))
        );
    }
}
