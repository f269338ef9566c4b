//! Numeric tower: exact integers and inexact floats. No complex or rational
//! support; the corresponding R5RS operators are registered as explicitly
//! unsupported (see `register`).

use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::Ctx;
use crate::printer::print_value;
use crate::value::{Num, Value};

use super::{def_builtin, def_single};

fn as_num(v: &Value, op: &str) -> Result<Num, EvalError> {
    v.as_number().ok_or_else(|| EvalError::OperandDeduce(format!("{op} expects a number, received: {}", print_value(v))))
}

fn nums(operands: &[Value], op: &str) -> Result<Vec<Num>, EvalError> {
    operands.iter().map(|v| as_num(v, op)).collect()
}

fn add(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    let ns = nums(operands, "+")?;
    Ok(fold_numeric(&ns, Num::Int(0), |a, b| a + b))
}

fn sub(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    let ns = nums(operands, "-")?;
    if ns.is_empty() {
        return Err(EvalError::ArityError { callable: "-".into(), expected: crate::error::Arity::AtLeast(1), received: 0 });
    }
    if ns.len() == 1 {
        return Ok(negate(ns[0]));
    }
    let mut acc = ns[0];
    for n in &ns[1..] {
        acc = arith(acc, *n, |a, b| a - b);
    }
    Ok(num_value(acc))
}

fn mul(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    let ns = nums(operands, "*")?;
    Ok(fold_numeric(&ns, Num::Int(1), |a, b| a * b))
}

fn div(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    let ns = nums(operands, "/")?;
    if ns.is_empty() {
        return Err(EvalError::ArityError { callable: "/".into(), expected: crate::error::Arity::AtLeast(1), received: 0 });
    }
    let divide = |a: Num, b: Num| -> Result<Num, EvalError> {
        if b.as_f64() == 0.0 {
            return Err(EvalError::OperandDeduce("division by zero".into()));
        }
        if let (Num::Int(x), Num::Int(y)) = (a, b) {
            if x % y == 0 {
                return Ok(Num::Int(x / y));
            }
        }
        Ok(Num::Float(a.as_f64() / b.as_f64()))
    };
    if ns.len() == 1 {
        return Ok(num_value(divide(Num::Int(1), ns[0])?));
    }
    let mut acc = ns[0];
    for n in &ns[1..] {
        acc = divide(acc, *n)?;
    }
    Ok(num_value(acc))
}

fn fold_numeric(ns: &[Num], init: Num, op: impl Fn(f64, f64) -> f64) -> Value {
    let result = ns.iter().fold(init, |a, b| arith(a, *b, &op));
    num_value(result)
}

fn arith(a: Num, b: Num, op: impl Fn(f64, f64) -> f64) -> Num {
    if a.is_exact() && b.is_exact() {
        let r = op(a.as_f64(), b.as_f64());
        if r.fract() == 0.0 && r.abs() < i64::MAX as f64 {
            return Num::Int(r as i64);
        }
        return Num::Float(r);
    }
    Num::Float(op(a.as_f64(), b.as_f64()))
}

fn negate(n: Num) -> Value {
    num_value(match n {
        Num::Int(i) => Num::Int(-i),
        Num::Float(f) => Num::Float(-f),
    })
}

fn num_value(n: Num) -> Value {
    Value::number(n)
}

fn abs_fn(v: &Value) -> Result<Value, EvalError> {
    let n = as_num(v, "abs")?;
    Ok(num_value(match n {
        Num::Int(i) => Num::Int(i.abs()),
        Num::Float(f) => Num::Float(f.abs()),
    }))
}

fn expt(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: "expt".into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let base = as_num(&operands[0], "expt")?;
    let exp = as_num(&operands[1], "expt")?;
    if let (Num::Int(b), Num::Int(e)) = (base, exp) {
        if e >= 0 {
            return Ok(num_value(Num::Int(b.pow(e as u32))));
        }
    }
    Ok(num_value(Num::Float(base.as_f64().powf(exp.as_f64()))))
}

fn int_binop(operands: &[Value], name: &str, op: impl Fn(i64, i64) -> Result<i64, EvalError>) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let a = as_num(&operands[0], name)?.as_i64().ok_or_else(|| EvalError::OperandDeduce(format!("{name} expects integers")))?;
    let b = as_num(&operands[1], name)?.as_i64().ok_or_else(|| EvalError::OperandDeduce(format!("{name} expects integers")))?;
    Ok(num_value(Num::Int(op(a, b)?)))
}

fn modulo(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    int_binop(operands, "modulo", |a, b| {
        if b == 0 {
            return Err(EvalError::OperandDeduce("modulo by zero".into()));
        }
        Ok(((a % b) + b) % b)
    })
}

fn quotient(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    int_binop(operands, "quotient", |a, b| {
        if b == 0 {
            return Err(EvalError::OperandDeduce("quotient by zero".into()));
        }
        Ok(a / b)
    })
}

fn remainder(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    int_binop(operands, "remainder", |a, b| {
        if b == 0 {
            return Err(EvalError::OperandDeduce("remainder by zero".into()));
        }
        Ok(a % b)
    })
}

fn chain_compare(operands: &[Value], name: &str, op: impl Fn(f64, f64) -> bool) -> Result<Value, EvalError> {
    if operands.len() < 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::AtLeast(2), received: operands.len() });
    }
    let ns = nums(operands, name)?;
    for pair in ns.windows(2) {
        if !op(pair[0].as_f64(), pair[1].as_f64()) {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

fn num_eq(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    chain_compare(o, "=", |a, b| a == b)
}
fn lt(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    chain_compare(o, "<", |a, b| a < b)
}
fn le(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    chain_compare(o, "<=", |a, b| a <= b)
}
fn gt(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    chain_compare(o, ">", |a, b| a > b)
}
fn ge(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    chain_compare(o, ">=", |a, b| a >= b)
}

fn even_p(v: &Value) -> Result<Value, EvalError> {
    let n = as_num(v, "even?")?.as_i64().ok_or_else(|| EvalError::OperandDeduce("even? expects an integer".into()))?;
    Ok(Value::Boolean(n % 2 == 0))
}
fn odd_p(v: &Value) -> Result<Value, EvalError> {
    let n = as_num(v, "odd?")?.as_i64().ok_or_else(|| EvalError::OperandDeduce("odd? expects an integer".into()))?;
    Ok(Value::Boolean(n % 2 != 0))
}
fn zero_p(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_num(v, "zero?")?.as_f64() == 0.0))
}
fn positive_p(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_num(v, "positive?")?.as_f64() > 0.0))
}
fn negative_p(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_num(v, "negative?")?.as_f64() < 0.0))
}
fn exact_p(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(as_num(v, "exact?")?.is_exact()))
}
fn inexact_p(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(!as_num(v, "inexact?")?.is_exact()))
}

fn not_fn(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(!v.is_truthy()))
}

fn eq_p(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_two(operands, "eq?").map(|(a, b)| Value::Boolean(a.is_eq(b)))
}
fn eqv_p(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_two(operands, "eqv?").map(|(a, b)| Value::Boolean(a.is_eqv(b)))
}
fn equal_p(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_two(operands, "equal?").map(|(a, b)| Value::Boolean(a.is_equal(b)))
}

fn require_two<'a>(operands: &'a [Value], name: &str) -> Result<(&'a Value, &'a Value), EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    Ok((&operands[0], &operands[1]))
}

/// Banker's rounding: ties round to the nearest even integer.
fn round_fn(v: &Value) -> Result<Value, EvalError> {
    let n = as_num(v, "round")?;
    match n {
        Num::Int(i) => Ok(Value::number(Num::Int(i))),
        Num::Float(f) => {
            let floor = f.floor();
            let diff = f - floor;
            let rounded = if diff < 0.5 {
                floor
            } else if diff > 0.5 {
                floor + 1.0
            } else if (floor as i64) % 2 == 0 {
                floor
            } else {
                floor + 1.0
            };
            Ok(Value::number(Num::Float(rounded)))
        }
    }
}

fn max_fn(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    minmax(operands, "max", |a, b| a > b)
}
fn min_fn(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    minmax(operands, "min", |a, b| a < b)
}

fn minmax(operands: &[Value], name: &str, better: impl Fn(f64, f64) -> bool) -> Result<Value, EvalError> {
    if operands.is_empty() {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::AtLeast(1), received: 0 });
    }
    let ns = nums(operands, name)?;
    let inexact = ns.iter().any(|n| !n.is_exact());
    let mut best = ns[0];
    for n in &ns[1..] {
        if better(n.as_f64(), best.as_f64()) {
            best = *n;
        }
    }
    Ok(Value::number(if inexact { Num::Float(best.as_f64()) } else { best }))
}

pub fn register(frame: &Frame) {
    def_builtin(frame, "+", add);
    def_builtin(frame, "-", sub);
    def_builtin(frame, "*", mul);
    def_builtin(frame, "/", div);
    def_single(frame, "abs", abs_fn);
    def_builtin(frame, "expt", expt);
    def_builtin(frame, "modulo", modulo);
    def_builtin(frame, "quotient", quotient);
    def_builtin(frame, "remainder", remainder);
    def_builtin(frame, "=", num_eq);
    def_builtin(frame, "<", lt);
    def_builtin(frame, "<=", le);
    def_builtin(frame, ">", gt);
    def_builtin(frame, ">=", ge);
    def_single(frame, "even?", even_p);
    def_single(frame, "odd?", odd_p);
    def_single(frame, "zero?", zero_p);
    def_single(frame, "not", not_fn);
    def_builtin(frame, "eqv?", eqv_p);
    def_builtin(frame, "eq?", eq_p);
    def_builtin(frame, "equal?", equal_p);
    def_single(frame, "round", round_fn);
    def_builtin(frame, "max", max_fn);
    def_builtin(frame, "min", min_fn);
    def_single(frame, "positive?", positive_p);
    def_single(frame, "negative?", negative_p);
    def_single(frame, "exact?", exact_p);
    def_single(frame, "inexact?", inexact_p);

    def_single(frame, "rationalize", rationalize);
    def_single(frame, "make-rectangular", make_rectangular);
    def_single(frame, "make-polar", make_polar);
    def_single(frame, "real-part", real_part);
    def_single(frame, "imag-part", imag_part);
    def_single(frame, "magnitude", magnitude);
    def_single(frame, "angle", angle);
}

fn rationalize(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("rationalize".into()))
}
fn make_rectangular(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("make-rectangular".into()))
}
fn make_polar(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("make-polar".into()))
}
fn real_part(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("real-part".into()))
}
fn imag_part(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("imag-part".into()))
}
fn magnitude(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("magnitude".into()))
}
fn angle(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("angle".into()))
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
    fn arithmetic_contagion() {
        assert!(matches!(run("(+ 1 2)"), Value::Number(n) if *n == Num::Int(3)));
        assert!(matches!(run("(+ 1 2.0)"), Value::Number(n) if *n == Num::Float(3.0)));
    }

    #[test]
    fn division_exact_and_inexact() {
        assert!(matches!(run("(/ 6 2)"), Value::Number(n) if *n == Num::Int(3)));
        assert!(matches!(run("(/ 1 2)"), Value::Number(n) if *n == Num::Float(0.5)));
    }

    #[test]
    fn banker_rounding() {
        assert!(matches!(run("(round 2.5)"), Value::Number(n) if *n == Num::Float(2.0)));
        assert!(matches!(run("(round 3.5)"), Value::Number(n) if *n == Num::Float(4.0)));
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        assert!(matches!(run("(modulo -7 3)"), Value::Number(n) if *n == Num::Int(2)));
    }
}
