//! Parameter-list parsing and binding, shared by `lambda`, `mu`, and `define-macro`.

use std::rc::Rc;

use crate::config::Config;
use crate::env::Frame;
use crate::error::{Arity, EvalError};
use crate::printer::print_value;
use crate::value::{ProcKind, Procedure, Symbol, Value};

use super::interpreter::{eval, Ctx};

/// Splits a `lambda`/`mu`/`define-macro` parameter form into its fixed names and
/// an optional variadic tail name. Accepts a bare symbol (capture-everything), a
/// proper list of symbols, a dotted tail (only when `config.dotted`), or a proper
/// list whose final element is the `(variadic name)` wrapper.
pub fn parse_params(params: &Value, config: &Config) -> Result<(Vec<Symbol>, Option<Symbol>), EvalError> {
    if let Some(sym) = params.as_symbol() {
        return Ok((vec![], Some(sym.clone())));
    }
    let mut fixed = Vec::new();
    let mut cur = params.clone();
    loop {
        match cur {
            Value::Nil => return Ok((fixed, None)),
            Value::Pair(p) => {
                let (car, cdr) = {
                    let cell = p.borrow();
                    (cell.car.clone(), cell.cdr.clone())
                };
                if let Some(items) = car.list_to_vec() {
                    if items.len() == 2 && items[0].as_symbol().is_some_and(|s| s.as_str() == "variadic") {
                        if !cdr.is_nil() {
                            return Err(EvalError::OperandDeduce(
                                "(variadic name) must be the last parameter".into(),
                            ));
                        }
                        let name = items[1].as_symbol().ok_or_else(|| {
                            EvalError::OperandDeduce("variadic parameter name must be a symbol".into())
                        })?;
                        return Ok((fixed, Some(name.clone())));
                    }
                }
                let name = car.as_symbol().ok_or_else(|| {
                    EvalError::OperandDeduce(format!(
                        "parameter must be a symbol, received: {}",
                        print_value(&car)
                    ))
                })?;
                fixed.push(name.clone());
                cur = cdr;
            }
            other => {
                if !config.dotted {
                    return Err(EvalError::UnsupportedOperation(
                        "dotted parameter lists (no-dotted mode is active)".into(),
                    ));
                }
                let name = other
                    .as_symbol()
                    .ok_or_else(|| EvalError::OperandDeduce("variadic parameter must be a symbol".into()))?;
                return Ok((fixed, Some(name.clone())));
            }
        }
    }
}

/// Builds the child frame for a call: parent is the procedure's captured frame
/// for `lambda`/`macro`, or the caller's own frame for `mu`.
pub fn bind_params(proc: &Procedure, operands: Vec<Value>, caller_frame: &Frame) -> Result<Frame, EvalError> {
    let parent = match proc.kind {
        ProcKind::Mu => caller_frame.clone(),
        ProcKind::Lambda | ProcKind::Macro => proc.frame.clone(),
    };
    let new_frame = parent.child();
    let min = proc.params.len();
    let name = proc.name.borrow().clone();
    if proc.variadic.is_none() && operands.len() != min {
        return Err(EvalError::ArityError { callable: name, expected: Arity::Exact(min), received: operands.len() });
    }
    if proc.variadic.is_some() && operands.len() < min {
        return Err(EvalError::ArityError { callable: name, expected: Arity::AtLeast(min), received: operands.len() });
    }
    let mut it = operands.into_iter();
    for param in &proc.params {
        new_frame.define(param.clone(), it.next().expect("arity already checked"));
    }
    if let Some(variadic) = &proc.variadic {
        let rest: Vec<Value> = it.collect();
        new_frame.define(variadic.clone(), Value::list(rest));
    }
    Ok(new_frame)
}

/// The two-phase `define-macro` expansion: bind unevaluated operands like a
/// procedure call, evaluate the macro body to produce a new expression. The
/// caller re-enters `eval` on that expression in its own frame (see
/// `interpreter.rs`'s tail loop).
pub fn expand_macro(proc: &Rc<Procedure>, raw_operands: Vec<Value>, caller_frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    let macro_frame = bind_params(proc, raw_operands, caller_frame)?;
    let mut result = Value::Undefined;
    for stmt in proc.body.iter() {
        result = eval(stmt, &macro_frame, ctx)?;
    }
    Ok(result)
}
