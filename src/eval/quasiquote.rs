//! The `quasiquote` template walker: `unquote` substitutes a value,
//! `unquote-splicing` splices a list into the surrounding template, and a nested
//! `quasiquote` is passed through literally rather than re-entered.

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Frame;
use crate::error::EvalError;
use crate::printer::print_value;
use crate::value::Value;

use super::interpreter::{eval, Ctx};

fn is_tagged(v: &Value, tag: &str) -> bool {
    v.as_symbol().is_some_and(|s| s.as_str() == tag)
}

fn unary_operand(datum: &Value, form: &str) -> Result<Value, EvalError> {
    datum
        .list_to_vec()
        .filter(|items| items.len() == 2)
        .map(|items| items[1].clone())
        .ok_or_else(|| EvalError::OperandDeduce(format!("malformed {form}")))
}

pub fn eval_quasiquote(template: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if let Value::Pair(p) = template {
        if is_tagged(&p.borrow().car, "unquote-splicing") {
            return Err(EvalError::CallableResolution(
                "unquote-splicing used outside a list template".into(),
            ));
        }
    }
    walk(template, frame, ctx)
}

fn walk(template: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    match template {
        Value::Pair(p) => {
            let (car, cdr) = {
                let cell = p.borrow();
                (cell.car.clone(), cell.cdr.clone())
            };
            if is_tagged(&car, "unquote") {
                return eval(&unary_operand(template, "unquote")?, frame, ctx);
            }
            if is_tagged(&car, "quasiquote") {
                return Ok(template.clone());
            }
            if let Value::Pair(car_pair) = &car {
                if is_tagged(&car_pair.borrow().car, "unquote-splicing") {
                    let spliced = eval(&unary_operand(&car, "unquote-splicing")?, frame, ctx)?;
                    let items = spliced.list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
                        context: "unquote-splicing".into(),
                        expected: "proper list".into(),
                        received: print_value(&spliced),
                    })?;
                    let rest = walk(&cdr, frame, ctx)?;
                    return Ok(Value::improper_list(items, rest));
                }
            }
            let new_car = walk(&car, frame, ctx)?;
            let new_cdr = walk(&cdr, frame, ctx)?;
            Ok(Value::cons(new_car, new_cdr))
        }
        Value::Vector(items) => {
            let mut out = Vec::new();
            for item in items.borrow().iter() {
                if let Value::Pair(p) = item {
                    if is_tagged(&p.borrow().car, "unquote-splicing") {
                        let spliced = eval(&unary_operand(item, "unquote-splicing")?, frame, ctx)?;
                        let spliced_items = spliced.list_to_vec().ok_or_else(|| EvalError::TypeMismatch {
                            context: "unquote-splicing".into(),
                            expected: "proper list".into(),
                            received: print_value(&spliced),
                        })?;
                        out.extend(spliced_items);
                        continue;
                    }
                }
                out.push(walk(item, frame, ctx)?);
            }
            Ok(Value::Vector(Rc::new(RefCell::new(out))))
        }
        other => Ok(other.clone()),
    }
}
