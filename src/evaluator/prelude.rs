use std::collections::HashMap;

use lazy_static::lazy_static;

use super::evaluator::Error;
use super::Result;
use crate::value::Value;

/// UNDEFINED is what `div` and `mod` produce for a zero divisor.
pub static UNDEFINED: &str = "undefined";

/// HostFn is the Rust implementation of a primitive; its variant fixes the primitive's arity.
#[derive(Clone, Copy)]
pub enum HostFn {
    Unary(fn(&Value) -> Result<Value>),
    Binary(fn(&Value, &Value) -> Result<Value>),
}

/// Primitive is a built-in operation over already-evaluated arguments.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    host_fn: HostFn,
}

impl Primitive {
    pub fn arity(&self) -> usize {
        match self.host_fn {
            HostFn::Unary(_) => 1,
            HostFn::Binary(_) => 2,
        }
    }

    pub fn apply(&self, args: &[Value]) -> Result<Value> {
        match (self.host_fn, args) {
            (HostFn::Unary(f), [a]) => f(a),
            (HostFn::Binary(f), [a, b]) => f(a, b),
            _ => Err(Error::WrongArity {
                name: self.name.into(),
                expected: self.arity(),
                provided: args.len(),
            }),
        }
    }
}

fn number(value: &Value) -> Result<i64> {
    value
        .as_number()
        .ok_or_else(|| Error::NotANumber(value.clone()))
}

fn arithmetic(name: &'static str, a: &Value, b: &Value, op: fn(i64, i64) -> Option<i64>) -> Result<Value> {
    op(number(a)?, number(b)?)
        .map(Value::number)
        .ok_or(Error::Overflow(name))
}

// A zero divisor yields `undefined` rather than an error.
fn division(name: &'static str, a: &Value, b: &Value, op: fn(i64, i64) -> Option<i64>) -> Result<Value> {
    match (number(a)?, number(b)?) {
        (_, 0) => Ok(Value::atom(UNDEFINED)),
        (a, b) => op(a, b).map(Value::number).ok_or(Error::Overflow(name)),
    }
}

fn add(a: &Value, b: &Value) -> Result<Value> {
    arithmetic("add", a, b, i64::checked_add)
}

fn sub(a: &Value, b: &Value) -> Result<Value> {
    arithmetic("sub", a, b, i64::checked_sub)
}

fn mul(a: &Value, b: &Value) -> Result<Value> {
    arithmetic("mul", a, b, i64::checked_mul)
}

fn div(a: &Value, b: &Value) -> Result<Value> {
    division("div", a, b, i64::checked_div)
}

fn rem(a: &Value, b: &Value) -> Result<Value> {
    division("mod", a, b, i64::checked_rem)
}

fn relation(a: &Value, b: &Value, op: fn(&i64, &i64) -> bool) -> Result<Value> {
    Ok(Value::from_bool(op(&number(a)?, &number(b)?)))
}

fn lt(a: &Value, b: &Value) -> Result<Value> {
    relation(a, b, i64::lt)
}

fn gt(a: &Value, b: &Value) -> Result<Value> {
    relation(a, b, i64::gt)
}

fn lte(a: &Value, b: &Value) -> Result<Value> {
    relation(a, b, i64::le)
}

fn gte(a: &Value, b: &Value) -> Result<Value> {
    relation(a, b, i64::ge)
}

// Only atoms compare, by text. The sentinels, lists, pairs and closures are never equal, not even to themselves.
fn eq(a: &Value, b: &Value) -> Result<Value> {
    let equal = match (a, b) {
        (Value::Atom(a), Value::Atom(b)) => a == b,
        _ => false,
    };
    Ok(Value::from_bool(equal))
}

fn not(value: &Value) -> Result<Value> {
    Ok(Value::from_bool(value.is_nil()))
}

static PRELUDE_BINDINGS: &[(&str, HostFn)] = &[
    ("add", HostFn::Binary(add)),
    ("sub", HostFn::Binary(sub)),
    ("mul", HostFn::Binary(mul)),
    ("div", HostFn::Binary(div)),
    ("mod", HostFn::Binary(rem)),
    ("lt", HostFn::Binary(lt)),
    ("gt", HostFn::Binary(gt)),
    ("lte", HostFn::Binary(lte)),
    ("gte", HostFn::Binary(gte)),
    ("eq", HostFn::Binary(eq)),
    ("not", HostFn::Unary(not)),
];

static ALIASES: &[(&str, &str)] = &[
    ("+", "add"),
    ("-", "sub"),
    ("*", "mul"),
    ("/", "div"),
    ("%", "mod"),
    ("<", "lt"),
    (">", "gt"),
    ("<=", "lte"),
    (">=", "gte"),
    ("=", "eq"),
];

lazy_static! {
    static ref PRIMITIVES: HashMap<&'static str, Primitive> = PRELUDE_BINDINGS
        .iter()
        .map(|&(name, host_fn)| (name, Primitive { name, host_fn }))
        .collect();
    static ref ALIAS_TABLE: HashMap<&'static str, &'static str> = ALIASES.iter().cloned().collect();
}

/// canonical_name resolves an operator alias such as `+` to the primitive name it stands for.
pub fn canonical_name(symbol: &str) -> &str {
    ALIAS_TABLE.get(symbol).cloned().unwrap_or(symbol)
}

pub fn find(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[&str]) -> Result<Value> {
        let args = args.iter().map(|&arg| Value::atom(arg)).collect::<Vec<_>>();
        find(name).expect("primitive exists").apply(&args)
    }

    macro_rules! primitive_tests {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (op, args, expected): (&str, Vec<&str>, Value) = $value;
                    assert_eq!(call(op, &args), Ok(expected));
                }
            )*
        }
    }

    primitive_tests! {
        can_add: ("add", vec!["2", "3"], Value::atom("5")),
        can_add_negatives: ("add", vec!["-1", "1"], Value::atom("0")),
        can_sub: ("sub", vec!["3", "2"], Value::atom("1")),
        can_mul: ("mul", vec!["2", "3"], Value::atom("6")),
        can_div: ("div", vec!["6", "3"], Value::atom("2")),
        div_truncates: ("div", vec!["-7", "2"], Value::atom("-3")),
        can_mod: ("mod", vec!["5", "3"], Value::atom("2")),
        mod_keeps_dividend_sign: ("mod", vec!["-5", "3"], Value::atom("-2")),
        div_by_zero_is_undefined: ("div", vec!["1", "0"], Value::atom("undefined")),
        mod_by_zero_is_undefined: ("mod", vec!["1", "0"], Value::atom("undefined")),
        can_lt: ("lt", vec!["2", "3"], Value::Truth),
        can_gt: ("gt", vec!["3", "2"], Value::Truth),
        can_lte: ("lte", vec!["2", "2"], Value::Truth),
        can_gte: ("gte", vec!["3", "2"], Value::Truth),
        lt_false_is_nil: ("lt", vec!["3", "2"], Value::Nil),
        eq_numbers: ("eq", vec!["2", "2"], Value::Truth),
        eq_different: ("eq", vec!["2", "3"], Value::Nil),
        eq_symbols: ("eq", vec!["abc", "abc"], Value::Truth),
        eq_is_textual: ("eq", vec!["007", "7"], Value::Nil),
    }

    #[test]
    fn not_inverts_nil() {
        let not = find("not").unwrap();
        assert_eq!(not.apply(&[Value::Nil]), Ok(Value::Truth));
        assert_eq!(not.apply(&[Value::Truth]), Ok(Value::Nil));
        assert_eq!(not.apply(&[Value::atom("0")]), Ok(Value::Nil));
    }

    #[test]
    fn eq_never_matches_compound_values() {
        let eq = find("eq").unwrap();
        let list = Value::list(vec![Value::atom("1")]);
        assert_eq!(eq.apply(&[list.clone(), list]), Ok(Value::Nil));

        let pair = Value::cons(Value::atom("1"), Value::atom("2"));
        assert_eq!(eq.apply(&[pair.clone(), pair]), Ok(Value::Nil));

        assert_eq!(eq.apply(&[Value::Nil, Value::Nil]), Ok(Value::Nil));
        assert_eq!(eq.apply(&[Value::Truth, Value::Truth]), Ok(Value::Nil));
        assert_eq!(eq.apply(&[Value::Nil, Value::atom("nil")]), Ok(Value::Nil));
    }

    #[test]
    fn rejects_non_numeric_operands() {
        assert_eq!(
            call("add", &["1", "x"]),
            Err(Error::NotANumber(Value::atom("x")))
        );
        let list = Value::list(vec![]);
        assert_eq!(
            find("lt").unwrap().apply(&[list.clone(), Value::atom("1")]),
            Err(Error::NotANumber(list))
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(
            call("add", &["1", "2", "3"]),
            Err(Error::WrongArity {
                name: "add".into(),
                expected: 2,
                provided: 3
            })
        );
        assert_eq!(
            call("not", &[]),
            Err(Error::WrongArity {
                name: "not".into(),
                expected: 1,
                provided: 0
            })
        );
        assert_eq!(find("eq").unwrap().arity(), 2);
        assert_eq!(find("not").unwrap().arity(), 1);
    }

    #[test]
    fn reports_overflow() {
        assert_eq!(
            call("mul", &["9223372036854775807", "2"]),
            Err(Error::Overflow("mul"))
        );
        assert_eq!(
            call("div", &["-9223372036854775808", "-1"]),
            Err(Error::Overflow("div"))
        );
        assert_eq!(
            call("mod", &["-9223372036854775808", "-1"]),
            Err(Error::Overflow("mod"))
        );
    }

    #[test]
    fn resolves_aliases() {
        assert_eq!(canonical_name("+"), "add");
        assert_eq!(canonical_name("<="), "lte");
        assert_eq!(canonical_name("add"), "add");
        assert_eq!(canonical_name("fact"), "fact");
        assert!(find(canonical_name(">=")).is_some());
        assert!(find("fact").is_none());
    }
}
