use std::iter;
use std::str;

const OPEN_PAREN: char = '(';
const CLOSE_PAREN: char = ')';
const COMMENT_CHAR: char = ';';
const STRING_CHAR: char = '"';
const ESCAPE_CHAR: char = '\\';
const NEWLINE_CHAR: char = '\n';

/// lex is a convenience function to take some `input` and produce the resulting `Vec<Token>`.
pub fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// tokenize returns the literal text of every token in `input`, in order.
pub fn tokenize(input: &str) -> Vec<String> {
    Lexer::new(input)
        .map(|token| String::from(token.text()))
        .collect()
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Token represents an atomic component of this language's syntax.
pub enum Token<'input> {
    Open,
    Close,
    Atom(&'input str),
    /// String holds a string literal verbatim, surrounding quotes and escapes included.
    String(&'input str),
}

impl<'input> Token<'input> {
    pub fn text(&self) -> &'input str {
        match self {
            Token::Open => "(",
            Token::Close => ")",
            Token::Atom(text) | Token::String(text) => *text,
        }
    }
}

/// Lexer contains the logic to lex individual tokens from the input source.
#[derive(Debug)]
pub struct Lexer<'input> {
    input: &'input str,
    iter: iter::Peekable<str::CharIndices<'input>>,
}

impl<'input> Lexer<'input> {
    /// new constructs a Lexer instance from the input but does not do any lexing.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            iter: input.char_indices().peekable(),
        }
    }

    /// advance_if advances the state of the lexer while the upcoming chars satisfy the `predicate`. Returns Some(span) of
    /// the byte range in `input` that was advanced over; returns None if not even the first char matched.
    fn advance_if<P>(&mut self, predicate: P) -> Option<(usize, usize)>
    where
        P: Fn(char) -> bool,
    {
        let start = match self.peek() {
            Some(&(index, ch)) if predicate(ch) => index,
            _ => return None,
        };
        let mut end = start;

        while let Some(&(index, ch)) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.consume();
            end = index + ch.len_utf8();
        }

        Some((start, end))
    }

    /// consume advances the state of the lexer to the next char, yielding an Option of the current char from the input source
    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }

    /// peek returns the next element in the iterator without consuming it
    fn peek(&mut self) -> Option<&(usize, char)> {
        self.iter.peek()
    }

    /// take_while advances the input while `predicate` is true and then returns a str slice of the traversed span.
    fn take_while<P>(&mut self, predicate: P) -> Option<&'input str>
    where
        P: Fn(char) -> bool,
    {
        let input = self.input;
        self.advance_if(predicate)
            .map(|(start, end)| &input[start..end])
    }

    fn consume_delimiter(&mut self, token: Token<'input>) -> Option<Token<'input>> {
        self.consume().map(|_| token)
    }

    // An unterminated literal runs to the end of the input.
    fn consume_string(&mut self, start: usize) -> Option<Token<'input>> {
        self.consume();
        let mut end = self.input.len();

        while let Some((index, ch)) = self.consume() {
            match ch {
                STRING_CHAR => {
                    end = index + ch.len_utf8();
                    break;
                }
                ESCAPE_CHAR => {
                    self.consume();
                }
                _ => {}
            }
        }

        Some(Token::String(&self.input[start..end]))
    }

    fn skip_comment(&mut self) {
        self.consume();
        self.advance_if(|ch| ch != NEWLINE_CHAR);
    }

    fn is_atomic(ch: char) -> bool {
        !Lexer::is_whitespace(ch) && ch != OPEN_PAREN && ch != CLOSE_PAREN && ch != COMMENT_CHAR
    }

    fn consume_atom(&mut self) -> Option<Token<'input>> {
        self.take_while(Lexer::is_atomic).map(Token::Atom)
    }

    fn is_whitespace(ch: char) -> bool {
        ch.is_whitespace()
    }
}

impl<'a> iter::Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.advance_if(Lexer::is_whitespace);

            return match self.peek() {
                None => None,
                // The order is important here
                Some(&(_, COMMENT_CHAR)) => {
                    self.skip_comment();
                    continue;
                }
                Some(&(_, OPEN_PAREN)) => self.consume_delimiter(Token::Open),
                Some(&(_, CLOSE_PAREN)) => self.consume_delimiter(Token::Close),
                Some(&(start, STRING_CHAR)) => self.consume_string(start),
                Some(_) => self.consume_atom(),
            };
        }
    }
}
