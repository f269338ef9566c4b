//! Character primitives: comparison family and classification predicates.

use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::Ctx;
use crate::printer::print_value;
use crate::value::Value;

use super::{def_builtin, def_single};

fn as_char(v: &Value, op: &str) -> Result<char, EvalError> {
    match v {
        Value::Character(c) => Ok(**c),
        other => Err(EvalError::TypeMismatch { context: op.into(), expected: "char".into(), received: print_value(other) }),
    }
}

fn char_compare(operands: &[Value], name: &str, op: impl Fn(char, char) -> bool) -> Result<Value, EvalError> {
    if operands.len() < 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::AtLeast(2), received: operands.len() });
    }
    let chars: Vec<char> = operands.iter().map(|v| as_char(v, name)).collect::<Result<_, _>>()?;
    Ok(Value::Boolean(chars.windows(2).all(|w| op(w[0], w[1]))))
}

fn char_eq(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    char_compare(o, "char=?", |a, b| a == b)
}
fn char_lt(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    char_compare(o, "char<?", |a, b| a < b)
}
fn char_gt(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    char_compare(o, "char>?", |a, b| a > b)
}
fn char_le(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    char_compare(o, "char<=?", |a, b| a <= b)
}
fn char_ge(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    char_compare(o, "char>=?", |a, b| a >= b)
}

fn char_alphabetic(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_char(v, "char-alphabetic?")?.is_alphabetic()))
}
fn char_numeric(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_char(v, "char-numeric?")?.is_numeric()))
}
fn char_whitespace(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_char(v, "char-whitespace?")?.is_whitespace()))
}
fn char_lower_case(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_char(v, "char-lower-case?")?.is_lowercase()))
}
fn char_upper_case(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_char(v, "char-upper-case?")?.is_uppercase()))
}
fn char_upcase(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::character(as_char(v, "char-upcase")?.to_ascii_uppercase()))
}
fn char_downcase(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::character(as_char(v, "char-downcase")?.to_ascii_lowercase()))
}

pub fn register(frame: &Frame) {
    def_builtin(frame, "char=?", char_eq);
    def_builtin(frame, "char<?", char_lt);
    def_builtin(frame, "char>?", char_gt);
    def_builtin(frame, "char<=?", char_le);
    def_builtin(frame, "char>=?", char_ge);
    def_single(frame, "char-alphabetic?", char_alphabetic);
    def_single(frame, "char-numeric?", char_numeric);
    def_single(frame, "char-whitespace?", char_whitespace);
    def_single(frame, "char-lower-case?", char_lower_case);
    def_single(frame, "char-upper-case?", char_upper_case);
    def_single(frame, "char-upcase", char_upcase);
    def_single(frame, "char-downcase", char_downcase);
}
