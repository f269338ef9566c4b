//! Type predicates. `procedure?` only recognizes user-defined `lambda`/`mu`
//! procedures, matching the narrower notion of "procedure" the original
//! system's `type_checking.py` used (built-in primitives are not considered
//! procedures there either). `eof-object?` is hardcoded `#f`: this interpreter
//! has no port objects that could produce one.

use crate::env::Frame;
use crate::value::{Callable, Value};

use super::def_single;

fn atom_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(!v.is_pair()))
}
fn boolean_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Boolean(_))))
}
fn integer_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(v.as_number().and_then(|n| n.as_i64()).is_some()))
}
fn list_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(v.list_to_vec().is_some()))
}
fn number_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Number(_))))
}
fn null_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(v.is_nil()))
}
fn pair_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(v.is_pair()))
}
fn procedure_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Callable(Callable::Procedure(p)) if p.kind != crate::value::ProcKind::Macro)))
}
fn string_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Str(_))))
}
fn symbol_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Symbol(_))))
}
fn char_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Character(_))))
}
fn vector_p(v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(matches!(v, Value::Vector(_))))
}
fn input_port_p(_v: &Value) -> Result<Value, crate::error::EvalError> {
    Err(crate::error::EvalError::UnsupportedOperation("input-port?".into()))
}
fn output_port_p(_v: &Value) -> Result<Value, crate::error::EvalError> {
    Err(crate::error::EvalError::UnsupportedOperation("output-port?".into()))
}
fn eof_object_p(_v: &Value) -> Result<Value, crate::error::EvalError> {
    Ok(Value::Boolean(false))
}

pub fn register(frame: &Frame) {
    def_single(frame, "atom?", atom_p);
    def_single(frame, "boolean?", boolean_p);
    def_single(frame, "integer?", integer_p);
    def_single(frame, "list?", list_p);
    def_single(frame, "number?", number_p);
    def_single(frame, "null?", null_p);
    def_single(frame, "pair?", pair_p);
    def_single(frame, "procedure?", procedure_p);
    def_single(frame, "string?", string_p);
    def_single(frame, "symbol?", symbol_p);
    def_single(frame, "char?", char_p);
    def_single(frame, "vector?", vector_p);
    def_single(frame, "complex?", number_p);
    def_single(frame, "real?", number_p);
    def_single(frame, "rational?", integer_p);
    def_single(frame, "input-port?", input_port_p);
    def_single(frame, "output-port?", output_port_p);
    def_single(frame, "eof-object?", eof_object_p);
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
    fn procedure_excludes_builtins() {
        assert!(matches!(run("(procedure? car)"), Value::Boolean(false)));
        assert!(matches!(run("(procedure? (lambda (x) x))"), Value::Boolean(true)));
    }

    #[test]
    fn list_and_pair() {
        assert!(matches!(run("(list? '(1 2 3))"), Value::Boolean(true)));
        assert!(matches!(run("(list? '(1 . 2))"), Value::Boolean(false)));
        assert!(matches!(run("(pair? '(1 . 2))"), Value::Boolean(true)));
    }
}
