//! Vector primitives. `vector-set!`/`vector-fill!` honor `Config.fragile` like
//! the pair mutators.

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::Ctx;
use crate::printer::print_value;
use crate::value::{Value, VectorRef};

use super::{def_builtin, def_single};

fn as_vector(v: &Value, op: &str) -> Result<VectorRef, EvalError> {
    match v {
        Value::Vector(cells) => Ok(cells.clone()),
        other => Err(EvalError::TypeMismatch { context: op.into(), expected: "vector".into(), received: print_value(other) }),
    }
}

fn as_index(v: &Value, op: &str) -> Result<usize, EvalError> {
    v.as_number()
        .and_then(|n| n.as_i64())
        .filter(|n| *n >= 0)
        .map(|n| n as usize)
        .ok_or_else(|| EvalError::TypeMismatch { context: op.into(), expected: "non-negative integer".into(), received: print_value(v) })
}

fn make_vector(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.is_empty() || operands.len() > 2 {
        return Err(EvalError::ArityError { callable: "make-vector".into(), expected: crate::error::Arity::Range(1, 2), received: operands.len() });
    }
    let n = as_index(&operands[0], "make-vector")?;
    let fill = operands.get(1).cloned().unwrap_or(Value::int(0));
    Ok(Value::Vector(Rc::new(RefCell::new(vec![fill; n]))))
}

fn vector_fn(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    Ok(Value::Vector(Rc::new(RefCell::new(operands.to_vec()))))
}

fn vector_length(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::int(as_vector(v, "vector-length")?.borrow().len() as i64))
}

fn vector_ref(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: "vector-ref".into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let cells = as_vector(&operands[0], "vector-ref")?;
    let i = as_index(&operands[1], "vector-ref")?;
    cells.borrow().get(i).cloned().ok_or_else(|| EvalError::OperandDeduce(format!("vector-ref index {i} out of range")))
}

fn vector_set(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "vector-set!".into() });
    }
    if operands.len() != 3 {
        return Err(EvalError::ArityError { callable: "vector-set!".into(), expected: crate::error::Arity::Exact(3), received: operands.len() });
    }
    let cells = as_vector(&operands[0], "vector-set!")?;
    let i = as_index(&operands[1], "vector-set!")?;
    let mut cells = cells.borrow_mut();
    if i >= cells.len() {
        return Err(EvalError::OperandDeduce(format!("vector-set! index {i} out of range")));
    }
    cells[i] = operands[2].clone();
    Ok(Value::Undefined)
}

fn vector_fill(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "vector-fill!".into() });
    }
    if operands.len() != 2 {
        return Err(EvalError::ArityError { callable: "vector-fill!".into(), expected: crate::error::Arity::Exact(2), received: operands.len() });
    }
    let cells = as_vector(&operands[0], "vector-fill!")?;
    for slot in cells.borrow_mut().iter_mut() {
        *slot = operands[1].clone();
    }
    Ok(Value::Undefined)
}

fn vector_to_list(v: &Value) -> Result<Value, EvalError> {
    Ok(Value::list(as_vector(v, "vector->list")?.borrow().clone()))
}

pub fn register(frame: &Frame) {
    def_builtin(frame, "make-vector", make_vector);
    def_builtin(frame, "vector", vector_fn);
    def_single(frame, "vector-length", vector_length);
    def_builtin(frame, "vector-ref", vector_ref);
    def_builtin(frame, "vector-set!", vector_set);
    def_builtin(frame, "vector-fill!", vector_fill);
    def_single(frame, "vector->list", vector_to_list);
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
    fn make_ref_and_set() {
        assert_eq!(crate::printer::print_value(&run("(vector-ref (make-vector 3 'x) 1)")), "x");
        assert_eq!(crate::printer::print_value(&run("(let ((v (vector 1 2 3))) (vector-set! v 0 9) v)")), "#(9 2 3)");
    }

    #[test]
    fn fragile_mode_blocks_vector_set() {
        let frame = global_frame();
        let mut hooks = NullHooks;
        let cfg = crate::config::Config { fragile: true, ..Default::default() };
        let mut ctx = Ctx::new(cfg, &mut hooks);
        let datum = Reader::new("(vector-set! (vector 1) 0 2)", Default::default()).unwrap().read().unwrap().unwrap();
        assert!(matches!(eval(&datum, &frame, &mut ctx), Err(EvalError::IrreversibleOperation { .. })));
    }
}
