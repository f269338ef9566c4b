//! Conversions between the atomic data types. `exact->inexact`/`inexact->exact`
//! are not supported: this interpreter's numeric tower has no distinct exact
//! rational representation to convert into.

use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::Ctx;
use crate::printer::print_value;
use crate::value::{Symbol, Value};

use super::{def_builtin, def_single};

fn number_to_string(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.is_empty() || operands.len() > 2 {
        return Err(EvalError::ArityError { callable: "number->string".into(), expected: crate::error::Arity::Range(1, 2), received: operands.len() });
    }
    let n = operands[0].as_number().ok_or_else(|| EvalError::TypeMismatch {
        context: "number->string".into(),
        expected: "number".into(),
        received: print_value(&operands[0]),
    })?;
    if let Some(radix) = operands.get(1) {
        let radix = radix.as_number().and_then(|r| r.as_i64()).unwrap_or(10);
        if radix != 10 {
            let i = n.as_i64().ok_or_else(|| EvalError::OperandDeduce("number->string with a radix requires an integer".into()))?;
            return Ok(Value::string(to_radix(i, radix as u32)));
        }
    }
    Ok(Value::string(n.to_string()))
}

fn to_radix(mut n: i64, radix: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let negative = n < 0;
    if negative {
        n = -n;
    }
    let mut digits = Vec::new();
    while n > 0 {
        let d = (n % radix as i64) as u32;
        digits.push(std::char::from_digit(d, radix).unwrap());
        n /= radix as i64;
    }
    if negative {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

fn string_to_number(v: &Value) -> Result<Value, EvalError> {
    let text = match v {
        Value::Str(s) => s.borrow().clone(),
        other => return Err(EvalError::TypeMismatch { context: "string->number".into(), expected: "string".into(), received: print_value(other) }),
    };
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::int(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Ok(Value::float(f));
    }
    Ok(Value::Boolean(false))
}

fn symbol_to_string(v: &Value) -> Result<Value, EvalError> {
    match v {
        Value::Symbol(s) => Ok(Value::string(s.as_str())),
        other => Err(EvalError::TypeMismatch { context: "symbol->string".into(), expected: "symbol".into(), received: print_value(other) }),
    }
}

fn string_to_symbol(v: &Value) -> Result<Value, EvalError> {
    match v {
        Value::Str(s) => Ok(Value::Symbol(Symbol::new(&s.borrow()))),
        other => Err(EvalError::TypeMismatch { context: "string->symbol".into(), expected: "string".into(), received: print_value(other) }),
    }
}

fn char_to_integer(v: &Value) -> Result<Value, EvalError> {
    match v {
        Value::Character(c) => Ok(Value::int(**c as i64)),
        other => Err(EvalError::TypeMismatch { context: "char->integer".into(), expected: "char".into(), received: print_value(other) }),
    }
}

fn integer_to_char(v: &Value) -> Result<Value, EvalError> {
    let n = v.as_number().and_then(|n| n.as_i64()).ok_or_else(|| EvalError::TypeMismatch {
        context: "integer->char".into(),
        expected: "integer".into(),
        received: print_value(v),
    })?;
    char::from_u32(n as u32)
        .map(Value::character)
        .ok_or_else(|| EvalError::OperandDeduce(format!("{n} is not a valid character code")))
}

fn string_to_list(v: &Value) -> Result<Value, EvalError> {
    match v {
        Value::Str(s) => Ok(Value::list(s.borrow().chars().map(Value::character).collect())),
        other => Err(EvalError::TypeMismatch { context: "string->list".into(), expected: "string".into(), received: print_value(other) }),
    }
}

fn list_to_string(v: &Value) -> Result<Value, EvalError> {
    let items = v.list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
        context: "list->string".into(),
        expected: "proper list of chars".into(),
        received: print_value(v),
    })?;
    let mut out = String::new();
    for item in items {
        match item {
            Value::Character(c) => out.push(*c),
            other => return Err(EvalError::TypeMismatch { context: "list->string".into(), expected: "char".into(), received: print_value(&other) }),
        }
    }
    Ok(Value::string(out))
}

fn exact_to_inexact(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("exact->inexact".into()))
}
fn inexact_to_exact(_v: &Value) -> Result<Value, EvalError> {
    Err(EvalError::UnsupportedOperation("inexact->exact".into()))
}

pub fn register(frame: &Frame) {
    def_builtin(frame, "number->string", number_to_string);
    def_single(frame, "string->number", string_to_number);
    def_single(frame, "symbol->string", symbol_to_string);
    def_single(frame, "string->symbol", string_to_symbol);
    def_single(frame, "char->integer", char_to_integer);
    def_single(frame, "integer->char", integer_to_char);
    def_single(frame, "string->list", string_to_list);
    def_single(frame, "list->string", list_to_string);
    def_single(frame, "exact->inexact", exact_to_inexact);
    def_single(frame, "inexact->exact", inexact_to_exact);
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
    fn symbol_string_round_trip_is_eq() {
        assert!(matches!(run("(eq? (string->symbol (symbol->string 'abc)) 'abc)"), Value::Boolean(true)));
    }

    #[test]
    fn number_to_string_with_radix() {
        assert_eq!(crate::printer::print_value(&run("(number->string 255 16)")), "\"ff\"");
    }
}
