//! The public applicator entry point, used by the `apply`, `eval`, and `map`
//! primitives. Unlike the evaluator's internal trampoline (`interpreter.rs`),
//! this recurses through Rust's call stack per indirection; see the "Tail-call
//! guarantee scope" note in `DESIGN.md`.

use crate::env::Frame;
use crate::error::{Arity, EvalError};
use crate::printer::print_value;
use crate::value::{Callable, Value};

use super::interpreter::{eval, Ctx};
use super::macros::{bind_params, expand_macro};

/// Applies `callable` to already-evaluated `operands`.
pub fn apply(callable: &Value, operands: Vec<Value>, caller_frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    let callable = match callable {
        Value::Callable(c) => c.clone(),
        other => return Err(EvalError::CallableResolution(print_value(other))),
    };
    ctx.hooks.on_apply(&Value::Callable(callable.clone()), &operands);
    match callable {
        Callable::BuiltIn(b) => (b.func)(&operands, caller_frame, ctx),
        Callable::SingleOperand(s) => {
            if operands.len() != 1 {
                return Err(EvalError::ArityError {
                    callable: s.name.to_string(),
                    expected: Arity::Exact(1),
                    received: operands.len(),
                });
            }
            (s.func)(&operands[0])
        }
        Callable::Procedure(proc) if proc.kind == crate::value::ProcKind::Macro => {
            let expanded = expand_macro(&proc, operands, caller_frame, ctx)?;
            eval(&expanded, caller_frame, ctx)
        }
        Callable::Procedure(proc) => {
            let new_frame = bind_params(&proc, operands, caller_frame)?;
            if proc.body.is_empty() {
                return Err(EvalError::OperandDeduce("procedure body must not be empty".into()));
            }
            let mut result = Value::Undefined;
            for stmt in proc.body.iter() {
                result = eval(stmt, &new_frame, ctx)?;
            }
            Ok(result)
        }
    }
}
