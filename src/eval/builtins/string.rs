//! String primitives. `string-set!`/`string-fill!` are not supported: strings
//! are shared via `Rc<RefCell<String>>`, but in-place mutation by character
//! index would require UTF-8 reindexing this interpreter does not attempt.

use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::Ctx;
use crate::printer::print_value;
use crate::value::Value;

use super::{def_builtin, def_single};

fn as_string(v: &Value, op: &str) -> Result<std::rc::Rc<std::cell::RefCell<String>>, EvalError> {
    match v {
        Value::Str(s) => Ok(s.clone()),
        other => Err(EvalError::TypeMismatch { context: op.into(), expected: "string".into(), received: print_value(other) }),
    }
}

fn as_int(v: &Value, op: &str) -> Result<usize, EvalError> {
    v.as_number()
        .and_then(|n| n.as_i64())
        .filter(|n| *n >= 0)
        .map(|n| n as usize)
        .ok_or_else(|| EvalError::TypeMismatch { context: op.into(), expected: "non-negative integer".into(), received: print_value(v) })
}

fn make_string(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.is_empty() || operands.len() > 2 {
        return Err(EvalError::ArityError { callable: "make-string".into(), expected: crate::error::Arity::Range(1, 2), received: operands.len() });
    }
    let n = as_int(&operands[0], "make-string")?;
    let fill = match operands.get(1) {
        Some(Value::Character(c)) => **c,
        Some(other) => {
            return Err(EvalError::TypeMismatch { context: "make-string".into(), expected: "char".into(), received: print_value(other) })
        }
        None => ' ',
    };
    Ok(Value::string(fill.to_string().repeat(n)))
}

fn string_fn(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    let mut out = String::new();
    for v in operands {
        match v {
            Value::Character(c) => out.push(**c),
            other => return Err(EvalError::TypeMismatch { context: "string".into(), expected: "char".into(), received: print_value(other) }),
        }
    }
    Ok(Value::string(out))
}

fn string_length(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::int(as_string(v, "string-length")?.borrow().chars().count() as i64))
}

fn string_ref(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: "string-ref".into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let s = as_string(&operands[0], "string-ref")?;
    let i = as_int(&operands[1], "string-ref")?;
    s.borrow()
        .chars()
        .nth(i)
        .map(Value::character)
        .ok_or_else(|| EvalError::OperandDeduce(format!("string-ref index {i} out of range")))
}

fn string_append(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    let mut out = String::new();
    for v in operands {
        out.push_str(&as_string(v, "string-append")?.borrow());
    }
    Ok(Value::string(out))
}

fn string_copy(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::string(as_string(v, "string-copy")?.borrow().clone()))
}

fn substring(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.len() != 3 {
        return Err(EvalError::ArityError { callable: "substring".into(), expected: crate::error::Arity::Exact(3), received: operands.len() });
    }
    let s = as_string(&operands[0], "substring")?;
    let start = as_int(&operands[1], "substring")?;
    let end = as_int(&operands[2], "substring")?;
    let chars: Vec<char> = s.borrow().chars().collect();
    if start > end || end > chars.len() {
        return Err(EvalError::OperandDeduce(format!("substring range {start}..{end} out of bounds")));
    }
    Ok(Value::string(chars[start..end].iter().collect::<String>()))
}

fn string_compare(operands: &[Value], name: &str, op: impl Fn(std::cmp::Ordering) -> bool) -> Result<Value, EvalError> {
    if operands.len() < 2 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::AtLeast(2), received: operands.len() });
    }
    let strs: Vec<_> = operands.iter().map(|v| as_string(v, name)).collect::<Result<_, _>>()?;
    for pair in strs.windows(2) {
        if !op(pair[0].borrow().cmp(&pair[1].borrow())) {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

fn string_eq(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    string_compare(o, "string=?", |o| o == std::cmp::Ordering::Equal)
}
fn string_lt(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    string_compare(o, "string<?", |o| o == std::cmp::Ordering::Less)
}
fn string_gt(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    string_compare(o, "string>?", |o| o == std::cmp::Ordering::Greater)
}
fn string_le(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    string_compare(o, "string<=?", |o| o != std::cmp::Ordering::Greater)
}
fn string_ge(o: &[Value], _f: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    string_compare(o, "string>=?", |o| o != std::cmp::Ordering::Less)
}

fn string_set(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("string-set!".into()))
}
fn string_fill(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("string-fill!".into()))
}

pub fn register(frame: &Frame) {
    def_builtin(frame, "make-string", make_string);
    def_builtin(frame, "string", string_fn);
    def_single(frame, "string-length", string_length);
    def_builtin(frame, "string-ref", string_ref);
    def_builtin(frame, "string-append", string_append);
    def_single(frame, "string-copy", string_copy);
    def_builtin(frame, "substring", substring);
    def_builtin(frame, "string=?", string_eq);
    def_builtin(frame, "string<?", string_lt);
    def_builtin(frame, "string>?", string_gt);
    def_builtin(frame, "string<=?", string_le);
    def_builtin(frame, "string>=?", string_ge);
    def_single(frame, "string-set!", string_set);
    def_single(frame, "string-fill!", string_fill);
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
    fn append_and_substring() {
        assert_eq!(crate::printer::print_value(&run(r#"(string-append "foo" "bar")"#)), "\"foobar\"");
        assert_eq!(crate::printer::print_value(&run(r#"(substring "hello" 1 3)"#)), "\"el\"");
    }

    #[test]
    fn comparison_chain() {
        assert!(matches!(run(r#"(string<? "a" "b" "c")"#), Value::Boolean(true)));
    }
}
