//! The primitive library: one module per family, each mirroring a slice of the
//! original system's primitive set. `global_frame` builds the root frame every
//! program runs in.

mod chars;
mod conversion;
mod io;
mod list;
mod numeric;
mod predicate;
mod string;
mod vector;

use std::rc::Rc;

use crate::env::Frame;
use crate::error::{Arity, EvalError};
use crate::printer::print_value;
use crate::value::{BuiltIn, Callable, SingleOperandPrimitive, Value};

use super::apply::apply as apply_callable;
use super::interpreter::{eval, Ctx};

pub(crate) fn def_builtin(frame: &Frame, name: &'static str, func: fn(&[Value], &Frame, &mut Ctx<'_>) -> Result<Value, EvalError>) {
    frame.define(crate::value::Symbol::new(name), Value::Callable(Callable::BuiltIn(Rc::new(BuiltIn { name, func }))));
}

pub(crate) fn def_single(frame: &Frame, name: &'static str, func: fn(&Value) -> Result<Value, EvalError>) {
    frame.define(
        crate::value::Symbol::new(name),
        Value::Callable(Callable::SingleOperand(Rc::new(SingleOperandPrimitive { name, func }))),
    );
}

/// `(apply proc arg... final-list)`: flattens the trailing list into the operand
/// vector and applies `proc` to the result.
fn apply_fn(operands: &[Value], frame: &Frame, ctx: &mut Ctx<'_>) -> Result<Value, EvalError> {
    if operands.len() < 2 {
        return Err(EvalError::ArityError { callable: "apply".into(), expected: Arity::AtLeast(2), received: operands.len() });
    }
    let proc = operands[0].clone();
    let mut args: Vec<Value> = operands[1..operands.len() - 1].to_vec();
    let tail = operands.last().unwrap();
    let rest = tail.list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
        context: "apply".into(),
        expected: "proper list".into(),
        received: print_value(tail),
    })?;
    args.extend(rest);
    apply_callable(&proc, args, frame, ctx)
}

/// `(eval expr)`: re-evaluates a datum in the calling frame, matching the
/// original system's single-argument `eval` (no explicit environment parameter).
fn eval_fn(operands: &[Value], frame: &Frame, ctx: &mut Ctx<'_>) -> Result<Value, EvalError> {
    if operands.len() != 1 {
        return Err(EvalError::ArityError { callable: "eval".into(), expected: Arity::Exact(1), received: operands.len() });
    }
    eval(&operands[0], frame, ctx)
}

/// `(map proc list...)`: applies `proc` to the successive elements of one or more
/// lists, stopping at the shortest.
fn map_fn(operands: &[Value], frame: &Frame, ctx: &mut Ctx<'_>) -> Result<Value, EvalError> {
    if operands.len() < 2 {
        return Err(EvalError::ArityError { callable: "map".into(), expected: Arity::AtLeast(2), received: operands.len() });
    }
    let proc = operands[0].clone();
    let lists: Vec<Vec<Value>> = operands[1..]
        .iter()
        .map(|l| {
            l.list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
                context: "map".into(),
                expected: "proper list".into(),
                received: print_value(l),
            })
        })
        .collect::<Result<_, _>>()?;
    let len = lists.iter().map(Vec::len).min().unwrap_or(0);
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let args: Vec<Value> = lists.iter().map(|l| l[i].clone()).collect();
        out.push(apply_callable(&proc, args, frame, ctx)?);
    }
    Ok(Value::list(out))
}

/// `(for-each proc list...)`: like `map`, but for side effects; returns undefined.
fn for_each_fn(operands: &[Value], frame: &Frame, ctx: &mut Ctx<'_>) -> Result<Value, EvalError> {
    map_fn(operands, frame, ctx)?;
    Ok(Value::Undefined)
}

/// Builds the global frame, pre-populated with every primitive in the library.
pub fn global_frame() -> Frame {
    let frame = Frame::root();
    numeric::register(&frame);
    list::register(&frame);
    string::register(&frame);
    chars::register(&frame);
    vector::register(&frame);
    predicate::register(&frame);
    conversion::register(&frame);
    io::register(&frame);
    def_builtin(&frame, "apply", apply_fn);
    def_builtin(&frame, "eval", eval_fn);
    def_builtin(&frame, "map", map_fn);
    def_builtin(&frame, "for-each", for_each_fn);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::hooks::NullHooks;
    use crate::reader::Reader;

    fn run(src: &str) -> Value {
        let frame = global_frame();
        let mut hooks = NullHooks;
        let mut ctx = Ctx::new(Config::default(), &mut hooks);
        let mut last = Value::Undefined;
        for datum in Reader::new(src, Config::default()).unwrap().read_all().unwrap() {
            last = eval(&datum, &frame, &mut ctx).unwrap();
        }
        last
    }

    #[test]
    fn apply_spreads_trailing_list() {
        let v = run("(apply + 1 2 '(3 4))");
        assert!(matches!(v, Value::Number(n) if n.as_i64() == Some(10)));
    }

    #[test]
    fn map_over_two_lists() {
        let v = run("(map + '(1 2 3) '(10 20 30))");
        assert_eq!(crate::printer::print_value(&v), "(11 22 33)");
    }

    #[test]
    fn eval_reevaluates_a_quoted_datum() {
        let v = run("(eval (list '+ 1 2))");
        assert!(matches!(v, Value::Number(n) if n.as_i64() == Some(3)));
    }
}
