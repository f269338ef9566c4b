//! Console output and file loading. Output primitives write through
//! `Ctx::hooks` rather than directly to stdout, so a host (the REPL, a test, a
//! future visualization server) controls where program output actually goes.
//! Port objects are not implemented; the corresponding R5RS operators are
//! registered as explicitly unsupported.

use crate::config::Config;
use crate::env::Frame;
use crate::error::EvalError;
use crate::eval::{eval, Ctx};
use crate::printer::{display_value, print_value};
use crate::reader::Reader;
use crate::value::Value;

use super::{def_builtin, def_single};

fn write_fn(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_one(operands, "write")?;
    ctx.hooks.raw_out(&print_value(&operands[0]));
    Ok(Value::Undefined)
}

fn display_fn(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_one(operands, "display")?;
    ctx.hooks.raw_out(&display_value(&operands[0]));
    Ok(Value::Undefined)
}

fn newline_fn(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if !operands.is_empty() {
        return Err(EvalError::ArityError { callable: "newline".into(), expected: crate::error::Arity::Exact(0), received: operands.len() });
    }
    ctx.hooks.raw_out("\n");
    Ok(Value::Undefined)
}

fn write_char_fn(operands: &[Value], _frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_one(operands, "write-char")?;
    match &operands[0] {
        Value::Character(c) => {
            ctx.hooks.raw_out(&c.to_string());
            Ok(Value::Undefined)
        }
        other => Err(EvalError::TypeMismatch { context: "write-char".into(), expected: "char".into(), received: print_value(other) }),
    }
}

/// `(error x)`: raises `x` as a user-level error, unwinding out of the
/// current evaluation.
fn error_fn(operand: &Value) -> Result<Value, EvalError> {
    Err(EvalError::User(print_value(operand)))
}

fn require_one(operands: &[Value], name: &str) -> Result<(), EvalError> {
    if operands.len() != 1 {
        return Err(EvalError::ArityError { callable: name.into(), expected: crate::error::Arity::Exact(1), received: operands.len() });
    }
    Ok(())
}

fn require_path(v: &Value, name: &str) -> Result<String, EvalError> {
    match v {
        Value::Symbol(s) => Ok(s.as_str().to_string()),
        Value::Str(s) => Ok(s.borrow().clone()),
        other => Err(EvalError::TypeMismatch { context: name.into(), expected: "symbol or string".into(), received: print_value(other) }),
    }
}

/// `(load 'name)`: reads and evaluates every datum in `name.scm` in the calling
/// frame, in order.
fn load(operands: &[Value], frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    require_one(operands, "load")?;
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "load".into() });
    }
    let path = resolve_path(&require_path(&operands[0], "load")?);
    load_file(&path, frame, ctx)?;
    Ok(Value::Undefined)
}

/// `(load-all 'name...)`: like `load`, but continues past a file that fails to
/// parse, logging a warning instead of aborting.
fn load_all(operands: &[Value], frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "load-all".into() });
    }
    for op in operands {
        let path = resolve_path(&require_path(op, "load-all")?);
        if let Err(err) = load_file(&path, frame, ctx) {
            log::warn!("load-all: skipping {path}: {err}");
        }
    }
    Ok(Value::Undefined)
}

fn resolve_path(name: &str) -> String {
    if name.ends_with(".scm") {
        name.to_string()
    } else {
        format!("{name}.scm")
    }
}

fn load_file(path: &str, frame: &Frame, ctx: &mut Ctx) -> Result<(), EvalError> {
    log::info!("loading {path}");
    let source = std::fs::read_to_string(path).map_err(|e| EvalError::LoadError { path: path.to_string(), reason: e.to_string() })?;
    let datums = Reader::new(&source, Config { dotted: ctx.config.dotted, fragile: false })
        .map_err(|e| EvalError::LoadError { path: path.to_string(), reason: e.to_string() })?
        .read_all()
        .map_err(|e| EvalError::LoadError { path: path.to_string(), reason: e.to_string() })?;
    for datum in datums {
        eval(&datum, frame, ctx)?;
    }
    Ok(())
}

macro_rules! unsupported_ports {
    ($($fn_name:ident => $label:literal),+ $(,)?) => {
        $(
            fn $fn_name(operands: &[Value], _frame: &Frame, _ctx: &mut Ctx) -> Result<Value, EvalError> {
                let _ = operands;
                Err(EvalError::UnsupportedOperation($label.into()))
            }
        )+
    };
}

unsupported_ports! {
    open_input_file => "open-input-file",
    open_output_file => "open-output-file",
    close_input_port => "close-input-port",
    close_output_port => "close-output-port",
    read_fn => "read",
    read_char_fn => "read-char",
    peek_char_fn => "peek-char",
    current_output_port => "current-output-port",
    current_input_port => "current-input-port",
    with_output_to_string => "with-output-to-string",
}

pub fn register(frame: &Frame) {
    def_builtin(frame, "write", write_fn);
    def_builtin(frame, "display", display_fn);
    def_builtin(frame, "newline", newline_fn);
    def_builtin(frame, "write-char", write_char_fn);
    def_builtin(frame, "load", load);
    def_builtin(frame, "load-all", load_all);
    def_single(frame, "error", error_fn);

    def_builtin(frame, "open-input-file", open_input_file);
    def_builtin(frame, "open-output-file", open_output_file);
    def_builtin(frame, "close-input-port", close_input_port);
    def_builtin(frame, "close-output-port", close_output_port);
    def_builtin(frame, "read", read_fn);
    def_builtin(frame, "read-char", read_char_fn);
    def_builtin(frame, "peek-char", peek_char_fn);
    def_builtin(frame, "current-output-port", current_output_port);
    def_builtin(frame, "current-input-port", current_input_port);
    def_builtin(frame, "with-output-to-string", with_output_to_string);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::builtins::global_frame;
    use crate::hooks::EvaluatorHooks;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Capture(Rc<RefCell<String>>);
    impl EvaluatorHooks for Capture {
        fn raw_out(&mut self, text: &str) {
            self.0.borrow_mut().push_str(text);
        }
    }

    #[test]
    fn display_and_write_differ_on_strings() {
        let frame = global_frame();
        let sink = Rc::new(RefCell::new(String::new()));
        let mut hooks = Capture(sink.clone());
        let mut ctx = Ctx::new(Config::default(), &mut hooks);
        for src in [r#"(display "hi")"#, r#"(write "hi")"#] {
            let datum = Reader::new(src, Config::default()).unwrap().read().unwrap().unwrap();
            eval(&datum, &frame, &mut ctx).unwrap();
        }
        assert_eq!(sink.borrow().as_str(), "hi\"hi\"");
    }

    #[test]
    fn error_primitive_unwinds_with_the_printed_operand() {
        let frame = global_frame();
        let mut hooks = crate::hooks::NullHooks;
        let mut ctx = Ctx::new(Config::default(), &mut hooks);
        let datum = Reader::new("(error \"boom\")", Config::default()).unwrap().read().unwrap().unwrap();
        match eval(&datum, &frame, &mut ctx) {
            Err(EvalError::User(msg)) => assert_eq!(msg, "\"boom\""),
            other => panic!("expected EvalError::User, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_a_load_error() {
        let frame = global_frame();
        let mut hooks = crate::hooks::NullHooks;
        let mut ctx = Ctx::new(Config::default(), &mut hooks);
        let datum = Reader::new("(load 'does-not-exist)", Config::default()).unwrap().read().unwrap().unwrap();
        assert!(matches!(eval(&datum, &frame, &mut ctx), Err(EvalError::LoadError { .. })));
    }
}
