use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

use crate::evaluator::Env;

pub static NIL_LITERAL: &str = "nil";
pub static TRUTH_LITERAL: &str = "#t";

/// Value is every entity the interpreter can read, evaluate or print.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Nil,
    Truth,
    /// Atom carries the literal token text; whether it is a number or a symbol is decided on demand.
    Atom(String),
    List(Vec<Value>),
    /// Pair is a cons cell, distinct from `List`.
    Pair(Box<Value>, Box<Value>),
    Closure(Closure),
}

/// Closure is a user-defined function produced by `fn`.
#[derive(Debug, PartialEq, Clone)]
pub struct Closure {
    pub name: String,
    pub params: Rc<[String]>,
    pub body: Rc<Value>,
    /// env is the snapshot of the defining environment.
    pub env: Env,
}

impl Closure {
    pub fn new(name: &str, params: Vec<String>, body: Value, env: Env) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            body: Rc::new(body),
            env,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Value {
    pub fn atom(text: impl Into<String>) -> Self {
        Value::Atom(text.into())
    }

    pub fn number(n: i64) -> Self {
        Value::Atom(n.to_string())
    }

    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(elements)
    }

    pub fn cons(head: Value, tail: Value) -> Self {
        Value::Pair(Box::new(head), Box::new(tail))
    }

    pub fn from_bool(b: bool) -> Self {
        if b {
            Value::Truth
        } else {
            Value::Nil
        }
    }

    pub fn is_nil(&self) -> bool {
        match self {
            Value::Nil => true,
            _ => false,
        }
    }

    /// is_truthy holds for everything except `Nil`.
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Atom(text) => text.parse().ok(),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// sentinel maps the atoms spelled `nil` and `#t` onto their sentinel values.
    pub fn sentinel(&self) -> Option<Value> {
        match self {
            Value::Atom(text) if text == NIL_LITERAL => Some(Value::Nil),
            Value::Atom(text) if text == TRUTH_LITERAL => Some(Value::Truth),
            _ => None,
        }
    }

    /// as_symbol returns the name of an atom that denotes a binding: anything but a number or a sentinel spelling.
    /// String literals are symbols too.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Atom(text) if !self.is_number() && self.sentinel().is_none() => Some(text.as_str()),
            _ => None,
        }
    }

    fn fmt_pair(f: &mut fmt::Formatter, head: &Value, tail: &Value) -> fmt::Result {
        write!(f, "{}", head)?;
        match tail {
            Value::Nil => Ok(()),
            Value::Pair(head, tail) => {
                write!(f, " ")?;
                Value::fmt_pair(f, head, tail)
            }
            tail => write!(f, " . {}", tail),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "{}", NIL_LITERAL),
            Value::Truth => write!(f, "{}", TRUTH_LITERAL),
            Value::Atom(text) => write!(f, "{}", text),
            Value::List(elements) => write!(f, "({})", elements.iter().format(" ")),
            Value::Pair(head, tail) => {
                write!(f, "(")?;
                Value::fmt_pair(f, head, tail)?;
                write!(f, ")")
            }
            Value::Closure(closure) => write!(
                f,
                "#<fn {} ({})>",
                closure.name,
                closure.params.iter().format(" ")
            ),
        }
    }
}
