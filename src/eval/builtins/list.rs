//! Pair and list primitives, plus the auto-generated `c[ad]{2,4}r` accessor
//! family (`caar`, `cadr`, `cddr`, ... `cddddr`): one generated function per
//! combination of up to four `a`/`d` steps.

use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::Ctx;
use crate::printer::print_value;
use crate::value::{Value, VectorRef};

use super::{def_builtin, def_single};

fn as_pair_parts(v: &Value, op: &str) -> Result<(Value, Value), EvalError> {
    match v {
        Value::Pair(p) => {
            let cell = p.borrow();
            Ok((cell.car.clone(), cell.cdr.clone()))
        }
        other => Err(EvalError::TypeMismatch { context: op.into(), expected: "pair".into(), received: print_value(other) }),
    }
}

fn car(v: &Value) -> Result<Value, EvalError> {
    as_pair_parts(v, "car").map(|(car, _)| car)
}

fn cdr(v: &Value) -> Result<Value, EvalError> {
    as_pair_parts(v, "cdr").map(|(_, cdr)| cdr)
}

fn cons(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: "cons".into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    Ok(Value::cons(operands[0].clone(), operands[1].clone()))
}

fn list_fn(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    Ok(Value::list(operands.to_vec()))
}

fn length(v: &Value) -> Result<Value, EvalError> {
    let items = v
        .list_to_vec()
        .ok_or_else(|| EvalError::TypeMismatch { context: "length".into(), expected: "proper list".into(), received: print_value(v) })?;
    Ok(Value::int(items.len() as i64))
}

fn append(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.is_empty() {
        return Ok(Value::Nil);
    }
    let mut out = Vec::new();
    for l in &operands[..operands.len() - 1] {
        let items = l
            .list_to_vec()
            .ok_or_else(|| EvalError::TypeMismatch { context: "append".into(), expected: "proper list".into(), received: print_value(l) })?;
        out.extend(items);
    }
    Ok(Value::improper_list(out, operands.last().unwrap().clone()))
}

fn reverse(v: &Value) -> Result<Value, EvalError> {
    let mut items = v
        .list_to_vec()
        .ok_or_else(|| EvalError::TypeMismatch { context: "reverse".into(), expected: "proper list".into(), received: print_value(v) })?;
    items.reverse();
    Ok(Value::list(items))
}

fn set_car(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "set-car!".into() });
    }
    let (pair, value) = require_pair_and_value(operands, "set-car!")?;
    pair.borrow_mut().car = value;
    Ok(Value::Undefined)
}

fn set_cdr(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "set-cdr!".into() });
    }
    let (pair, value) = require_pair_and_value(operands, "set-cdr!")?;
    pair.borrow_mut().cdr = value;
    Ok(Value::Undefined)
}

fn require_pair_and_value(operands: &[Value], name: &str) -> Result<(crate::value::PairRef, Value), EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let pair = operands[0]
        .as_pair()
        .ok_or_else(|| EvalError::TypeMismatch { context: name.into(), expected: "pair".into(), received: print_value(&operands[0]) })?;
    Ok((pair, operands[1].clone()))
}

fn member_by(operands: &[Value], name: &str, same: impl Fn(&Value, &Value) -> bool) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let mut cur = operands[1].clone();
    loop {
        match cur {
            Value::Pair(p) => {
                let cell = p.borrow();
                if same(&operands[0], &cell.car) {
                    return Ok(Value::Pair(p.clone()));
                }
                let next = cell.cdr.clone();
                drop(cell);
                cur = next;
            }
            _ => return Ok(Value::Boolean(false)),
        }
    }
}

fn memq(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    member_by(o, "memq", Value::is_eq)
}
fn memv(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    member_by(o, "memv", Value::is_eqv)
}
fn member(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    member_by(o, "member", Value::is_equal)
}

fn assoc_by(operands: &[Value], name: &str, same: impl Fn(&Value, &Value) -> bool) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let items = operands[1].list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
        context: name.into(),
        expected: "proper list of pairs".into(),
        received: print_value(&operands[1]),
    })?;
    for entry in items {
        let (entry_key, _) = as_pair_parts(&entry, name)?;
        if same(&operands[0], &entry_key) {
            return Ok(entry);
        }
    }
    Ok(Value::Boolean(false))
}

fn assq(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    assoc_by(o, "assq", Value::is_eq)
}
fn assv(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    assoc_by(o, "assv", Value::is_eqv)
}
fn assoc(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    assoc_by(o, "assoc", Value::is_equal)
}

fn list_to_vector(v: &Value) -> Result<Value, EvalError> {
    let items = v.list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
        context: "list->vector".into(),
        expected: "proper list".into(),
        received: print_value(v),
    })?;
    let cells: VectorRef = std::rc::Rc::new(std::cell::RefCell::new(items));
    Ok(Value::Vector(cells))
}

/// Applies a sequence of `a`/`d` steps, innermost first, matching the reading
/// order of the combinator's name (`cadr` reads the `car` of the `cdr`).
fn run_steps(v: &Value, steps: &[u8]) -> Result<Value, EvalError> {
    let mut cur = v.clone();
    for &step in steps.iter().rev() {
        cur = if step == b'a' { car(&cur)? } else { cdr(&cur)? };
    }
    Ok(cur)
}

/// Generates one `fn` item per `c[ad]{2,4}r` combinator and a `register_all`
/// that binds each, mirroring `lists.py`'s `make_combinator` table.
macro_rules! combinators {
    ($($fn_name:ident => $steps:literal),+ $(,)?) => {
        $(
            fn $fn_name(v: &Value) -> Result<Value, EvalError> {
                run_steps(v, $steps)
            }
        )+

        fn register_combinators(frame: &Frame) {
            $(
                def_single(frame, stringify!($fn_name), $fn_name);
            )+
        }
    };
}

combinators! {
    caar => b"aa", cadr => b"ad", cdar => b"da", cddr => b"dd",
    caaar => b"aaa", caadr => b"aad", cadar => b"ada", caddr => b"add",
    cdaar => b"daa", cdadr => b"dad", cddar => b"dda", cdddr => b"ddd",
    caaaar => b"aaaa", caaadr => b"aaad", caadar => b"aada", caaddr => b"aadd",
    cadaar => b"adaa", cadadr => b"adad", caddar => b"adda", cadddr => b"addd",
    cdaaar => b"daaa", cdaadr => b"daad", cdadar => b"dada", cdaddr => b"dadd",
    cddaar => b"ddaa", cddadr => b"ddad", cdddar => b"ddda", cddddr => b"dddd",
}

pub fn register(frame: &Frame) {
    def_single(frame, "car", car);
    def_single(frame, "cdr", cdr);
    def_builtin(frame, "cons", cons);
    def_builtin(frame, "list", list_fn);
    def_single(frame, "length", length);
    def_builtin(frame, "append", append);
    def_single(frame, "reverse", reverse);
    def_builtin(frame, "set-car!", set_car);
    def_builtin(frame, "set-cdr!", set_cdr);
    def_builtin(frame, "memq", memq);
    def_builtin(frame, "memv", memv);
    def_builtin(frame, "member", member);
    def_builtin(frame, "assq", assq);
    def_builtin(frame, "assv", assv);
    def_builtin(frame, "assoc", assoc);
    def_single(frame, "list->vector", list_to_vector);

    register_combinators(frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::builtins::global_frame;
    use crate::eval::{eval, Ctx};
    use crate::hooks::NullHooks;
    use crate::reader::Reader;

    fn run(src: &str) -> Value {
        let frame = global_frame();
        let mut hooks = NullHooks;
        let mut ctx = Ctx::new(Default::default(), &mut hooks);
        let datum = Reader::new(src, Default::default()).unwrap().read().unwrap().unwrap();
        eval(&datum, &frame, &mut ctx).unwrap()
    }

    #[test]
    fn cadr_and_friends() {
        assert_eq!(crate::printer::print_value(&run("(cadr '(1 2 3))")), "2");
        assert_eq!(crate::printer::print_value(&run("(cddr '(1 2 3))")), "(3)");
        assert_eq!(crate::printer::print_value(&run("(caddr '(1 2 3))")), "3");
    }

    #[test]
    fn append_and_reverse() {
        assert_eq!(crate::printer::print_value(&run("(append '(1 2) '(3 4))")), "(1 2 3 4)");
        assert_eq!(crate::printer::print_value(&run("(reverse '(1 2 3))")), "(3 2 1)");
    }

    #[test]
    fn assoc_family() {
        assert_eq!(crate::printer::print_value(&run("(assq 'b '((a . 1) (b . 2)))")), "(b . 2)");
        assert_eq!(crate::printer::print_value(&run("(member 2 '(1 2 3))")), "(2 3)");
    }
}
