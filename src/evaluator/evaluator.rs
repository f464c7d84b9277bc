use std::result;

use log::{debug, trace};
use thiserror::Error;

use super::env::Env;
use super::prelude;
use crate::reader::Error as ReaderError;
use crate::value::{Closure, Value};

const QUOTE_SYMBOL: &str = "quote";
const SET_SYMBOL: &str = "set";
const DEFINE_SYMBOL: &str = "define";
const FN_SYMBOL: &str = "fn";
const IF_SYMBOL: &str = "if";
const COND_SYMBOL: &str = "cond";
const AND_SYMBOL: &str = "and";
const OR_SYMBOL: &str = "or";
const CONS_SYMBOL: &str = "cons";
const CAR_SYMBOL: &str = "car";
const CDR_SYMBOL: &str = "cdr";

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] ReaderError),
    #[error("undefined symbol: {0}")]
    UnboundSymbol(String),
    /// WrongArity indicates a call where the number of args passed did not match the number of params requested.
    #[error("{name} expects {expected} argument(s) but was given {provided}")]
    WrongArity {
        name: String,
        expected: usize,
        provided: usize,
    },
    /// WrongArityRange is WrongArity for forms with optional operands.
    #[error("{name} expects {min} to {max} argument(s) but was given {provided}")]
    WrongArityRange {
        name: String,
        min: usize,
        max: usize,
        provided: usize,
    },
    #[error("expected a number but found {0}")]
    NotANumber(Value),
    #[error("cannot take {op} of {value}")]
    NotAPair { op: &'static str, value: Value },
    #[error("malformed {form}: {reason}")]
    MalformedForm {
        form: &'static str,
        reason: &'static str,
    },
    #[error("undefined function: {0}")]
    UndefinedFunction(String),
    #[error("symbol {0} is not a function")]
    NotAFunction(String),
    #[error("integer overflow in {0}")]
    Overflow(&'static str),
}

/// ErrorKind groups errors by the layer and rule that raised them.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Syntax,
    UnboundSymbol,
    Arity,
    Type,
    UndefinedOperation,
    Overflow,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::UnboundSymbol(_) => ErrorKind::UnboundSymbol,
            Error::WrongArity { .. } | Error::WrongArityRange { .. } => ErrorKind::Arity,
            Error::NotANumber(_) | Error::NotAPair { .. } | Error::MalformedForm { .. } => {
                ErrorKind::Type
            }
            Error::UndefinedFunction(_) | Error::NotAFunction(_) => ErrorKind::UndefinedOperation,
            Error::Overflow(_) => ErrorKind::Overflow,
        }
    }
}

fn wrong_arity(name: &str, expected: usize, provided: usize) -> Error {
    Error::WrongArity {
        name: name.into(),
        expected,
        provided,
    }
}

pub fn eval(exprs: &[Value], env: &mut Env) -> Vec<Result<Value>> {
    exprs
        .iter()
        .map(|expr| eval_expr(expr, env))
        .collect::<Vec<Result<_>>>()
}

pub fn eval_expr(expr: &Value, env: &mut Env) -> Result<Value> {
    trace!("eval {}", expr);

    match expr {
        Value::Nil | Value::Truth | Value::Pair(..) | Value::Closure(_) => Ok(expr.clone()),
        Value::Atom(_) => eval_atom(expr, env),
        Value::List(elements) => eval_list(elements, env),
    }
}

// Numbers stand for themselves; `nil` and `#t` name the sentinels. Every other atom is a symbol.
fn eval_atom(atom: &Value, env: &Env) -> Result<Value> {
    if let Some(sentinel) = atom.sentinel() {
        return Ok(sentinel);
    }
    match atom.as_symbol() {
        Some(symbol) => eval_symbol(symbol, env),
        None => Ok(atom.clone()),
    }
}

fn eval_symbol(symbol: &str, env: &Env) -> Result<Value> {
    env.lookup(symbol)
        .cloned()
        .ok_or_else(|| Error::UnboundSymbol(String::from(symbol)))
}

fn eval_list(exprs: &[Value], env: &mut Env) -> Result<Value> {
    match exprs.split_first() {
        Some((first, rest)) => match first.as_symbol() {
            Some(symbol) => eval_list_dispatch(prelude::canonical_name(symbol), rest, env),
            None => eval_data(exprs, env),
        },
        None => Ok(Value::List(vec![])),
    }
}

// A list that does not start with a symbol is data: its elements are evaluated in place.
fn eval_data(exprs: &[Value], env: &mut Env) -> Result<Value> {
    eval_args(exprs, env).map(Value::List)
}

fn eval_args(exprs: &[Value], env: &mut Env) -> Result<Vec<Value>> {
    exprs
        .iter()
        .map(|expr| eval_expr(expr, env))
        .collect::<Result<Vec<_>>>()
}

fn eval_list_dispatch(op: &str, rest: &[Value], env: &mut Env) -> Result<Value> {
    match op {
        QUOTE_SYMBOL => eval_quote(rest),
        SET_SYMBOL => eval_set(SET_SYMBOL, rest, env),
        DEFINE_SYMBOL => eval_set(DEFINE_SYMBOL, rest, env),
        FN_SYMBOL => eval_fn(rest, env),
        IF_SYMBOL => eval_if(rest, env),
        COND_SYMBOL => eval_cond(rest, env),
        AND_SYMBOL => eval_and(rest, env),
        OR_SYMBOL => eval_or(rest, env),
        CONS_SYMBOL => eval_cons(rest, env),
        CAR_SYMBOL => eval_car_cdr(CAR_SYMBOL, rest, env),
        CDR_SYMBOL => eval_car_cdr(CDR_SYMBOL, rest, env),
        _ => eval_call(op, rest, env),
    }
}

// (quote <form>)
fn eval_quote(exprs: &[Value]) -> Result<Value> {
    match exprs {
        [form] => Ok(form.clone()),
        _ => Err(wrong_arity(QUOTE_SYMBOL, 1, exprs.len())),
    }
}

// (set <symbol> <form>)
fn eval_set(form: &'static str, exprs: &[Value], env: &mut Env) -> Result<Value> {
    match exprs {
        [name, value] => {
            let name = name.as_symbol().ok_or(Error::MalformedForm {
                form,
                reason: "variable name must be a symbol",
            })?;
            let value = eval_expr(value, env)?;
            debug!("binding {} to {}", name, value);
            env.define(name, value.clone());
            Ok(value)
        }
        _ => Err(wrong_arity(form, 2, exprs.len())),
    }
}

fn param_names(params: &Value) -> Result<Vec<String>> {
    match params {
        Value::List(params) => params
            .iter()
            .map(|param| {
                param.as_symbol().map(String::from).ok_or(Error::MalformedForm {
                    form: FN_SYMBOL,
                    reason: "parameters must be symbols",
                })
            })
            .collect(),
        _ => Err(Error::MalformedForm {
            form: FN_SYMBOL,
            reason: "parameters must be a list",
        }),
    }
}

// (fn <name> (<params>) <body>)
fn eval_fn(exprs: &[Value], env: &mut Env) -> Result<Value> {
    match exprs {
        [name, params, body] => {
            let name = name.as_symbol().ok_or(Error::MalformedForm {
                form: FN_SYMBOL,
                reason: "function name must be a symbol",
            })?;
            let params = param_names(params)?;

            debug!("defining function {} with {} parameter(s)", name, params.len());
            let closure = Closure::new(name, params, body.clone(), env.extend());
            env.define(name, Value::Closure(closure));
            Ok(Value::atom(name))
        }
        _ => Err(wrong_arity(FN_SYMBOL, 3, exprs.len())),
    }
}

// (if <test> <then> [<else>])
fn eval_if(exprs: &[Value], env: &mut Env) -> Result<Value> {
    let (test, then, otherwise) = match exprs {
        [test, then] => (test, then, None),
        [test, then, otherwise] => (test, then, Some(otherwise)),
        _ => {
            return Err(Error::WrongArityRange {
                name: IF_SYMBOL.into(),
                min: 2,
                max: 3,
                provided: exprs.len(),
            })
        }
    };

    if eval_expr(test, env)?.is_truthy() {
        eval_expr(then, env)
    } else {
        otherwise.map_or(Ok(Value::Nil), |otherwise| eval_expr(otherwise, env))
    }
}

// (cond (<test> <result>) ...)
fn eval_cond(clauses: &[Value], env: &mut Env) -> Result<Value> {
    for clause in clauses {
        match clause {
            Value::List(parts) if parts.len() == 2 => {
                if eval_expr(&parts[0], env)?.is_truthy() {
                    return eval_expr(&parts[1], env);
                }
            }
            _ => {
                return Err(Error::MalformedForm {
                    form: COND_SYMBOL,
                    reason: "each clause must be a (test result) list",
                })
            }
        }
    }
    Ok(Value::Nil)
}

fn eval_and(exprs: &[Value], env: &mut Env) -> Result<Value> {
    let mut last = Value::Truth;
    for expr in exprs {
        last = eval_expr(expr, env)?;
        if last.is_nil() {
            return Ok(Value::Nil);
        }
    }
    Ok(last)
}

fn eval_or(exprs: &[Value], env: &mut Env) -> Result<Value> {
    for expr in exprs {
        let result = eval_expr(expr, env)?;
        if result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(Value::Nil)
}

// (cons <head> <tail>)
fn eval_cons(exprs: &[Value], env: &mut Env) -> Result<Value> {
    match exprs {
        [head, tail] => Ok(Value::cons(eval_expr(head, env)?, eval_expr(tail, env)?)),
        _ => Err(wrong_arity(CONS_SYMBOL, 2, exprs.len())),
    }
}

// (car <pair>) and (cdr <pair>); a non-empty list counts as a pair of its head and the rest.
fn eval_car_cdr(op: &'static str, exprs: &[Value], env: &mut Env) -> Result<Value> {
    let value = match exprs {
        [expr] => eval_expr(expr, env)?,
        _ => return Err(wrong_arity(op, 1, exprs.len())),
    };

    let (head, tail) = match value {
        Value::Pair(head, tail) => (*head, *tail),
        Value::List(ref elements) if !elements.is_empty() => {
            (elements[0].clone(), Value::List(elements[1..].to_vec()))
        }
        value => return Err(Error::NotAPair { op, value }),
    };

    if op == CAR_SYMBOL {
        Ok(head)
    } else {
        Ok(tail)
    }
}

// Primitives take precedence over user bindings of the same name.
fn eval_call(op: &str, exprs: &[Value], env: &mut Env) -> Result<Value> {
    if let Some(primitive) = prelude::find(op) {
        let args = eval_args(exprs, env)?;
        return primitive.apply(&args);
    }

    match env.lookup(op).cloned() {
        Some(Value::Closure(closure)) => {
            let args = eval_args(exprs, env)?;
            apply(&closure, &args)
        }
        Some(_) => Err(Error::NotAFunction(String::from(op))),
        None => Err(Error::UndefinedFunction(String::from(op))),
    }
}

// zip_for_env zips the `params` to the `args` so that the environment can be extended with the appropriate bindings.
fn zip_for_env(params: &[String], args: &[Value]) -> Vec<(String, Value)> {
    params
        .iter()
        .cloned()
        .zip(args.iter().cloned())
        .collect::<Vec<_>>()
}

/// apply invokes `closure` on already-evaluated `args` in a private copy of its captured environment.
///
/// The closure is bound under its own name in that copy before the parameters are, which is what lets a function
/// call itself recursively by name.
pub fn apply(closure: &Closure, args: &[Value]) -> Result<Value> {
    if closure.arity() != args.len() {
        return Err(wrong_arity(&closure.name, closure.arity(), args.len()));
    }

    debug!("applying {} to {} argument(s)", closure.name, args.len());

    let mut local_env = closure.env.extend();
    local_env.define(&closure.name, Value::Closure(closure.clone()));
    let bindings = zip_for_env(&closure.params, args);
    local_env.add_bindings(bindings.as_slice());

    eval_expr(&closure.body, &mut local_env)
}
