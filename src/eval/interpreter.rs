//! The evaluator: a single trampolined loop dispatching special forms and
//! procedure application, guaranteeing constant control-state for Scheme tail
//! calls (see "Tail position" in the module-level docs).

use std::rc::Rc;

use crate::config::Config;
use crate::env::Frame;
use crate::error::{Arity, EvalError};
use crate::hooks::EvaluatorHooks;
use crate::printer::print_value;
use crate::value::{Callable, ProcKind, Procedure, Value};

use super::macros::{bind_params, expand_macro, parse_params};
use super::quasiquote::eval_quasiquote;

/// Bounds non-tail recursion so a runaway recursive Scheme program reports
/// [`EvalError::RecursionLimit`] instead of overflowing the host stack.
const MAX_DEPTH: usize = 4000;

/// Threaded through every evaluation: configuration flags, the trace-hook sink,
/// and the current non-tail recursion depth.
pub struct Ctx<'h> {
    pub config: Config,
    pub hooks: &'h mut dyn EvaluatorHooks,
    depth: usize,
}

impl<'h> Ctx<'h> {
    pub fn new(config: Config, hooks: &'h mut dyn EvaluatorHooks) -> Self {
        Ctx { config, hooks, depth: 0 }
    }
}

const SPECIAL_FORMS: &[&str] = &[
    "quote", "if", "cond", "case", "and", "or", "begin", "let", "let*", "define", "define-macro", "set!",
    "lambda", "mu", "delay", "force", "quasiquote", "unquote", "unquote-splicing", "expect", "begin-noexcept",
    "variadic",
];

pub fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS.contains(&name)
}

enum Action {
    Value(Value),
    Tail(Value, Frame),
}

/// Evaluates `expr` in `frame`. Tracks recursion depth so non-tail recursive
/// calls (through this function, from operand/test/body evaluation) eventually
/// fail cleanly rather than blowing the Rust stack; the internal trampoline loop
/// does not recurse for tail calls, so it never counts against the budget.
pub fn eval(expr: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    ctx.depth += 1;
    if ctx.depth > MAX_DEPTH {
        ctx.depth -= 1;
        return Err(EvalError::RecursionLimit);
    }
    let result = eval_loop(expr.clone(), frame.clone(), ctx);
    ctx.depth -= 1;
    result
}

fn eval_operands(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Vec<Value>, EvalError> {
    let raw = operand_list
        .list_to_vec()
        .ok_or_else(|| EvalError::OperandDeduce("operand list must be a proper list".into()))?;
    raw.iter().map(|e| eval(e, frame, ctx)).collect()
}

fn eval_loop(mut expr: Value, mut frame: Frame, ctx: &mut Ctx) -> Result<Value, EvalError> {
    loop {
        ctx.hooks.on_enter(&expr, &frame);
        match &expr {
            Value::Symbol(s) => {
                let v = frame.lookup(s)?;
                ctx.hooks.on_complete(&expr, &v);
                return Ok(v);
            }
            Value::Pair(p) => {
                let (head, operand_list) = {
                    let cell = p.borrow();
                    (cell.car.clone(), cell.cdr.clone())
                };
                if let Some(name) = head.as_symbol().map(|s| s.as_str().to_string()) {
                    if is_special_form(&name) {
                        match dispatch_special_form(&name, &operand_list, &frame, ctx)? {
                            Action::Value(v) => {
                                ctx.hooks.on_complete(&expr, &v);
                                return Ok(v);
                            }
                            Action::Tail(next_expr, next_frame) => {
                                expr = next_expr;
                                frame = next_frame;
                                continue;
                            }
                        }
                    }
                }
                let operator = eval(&head, &frame, ctx)?;
                match operator {
                    Value::Callable(Callable::Procedure(proc)) if proc.kind == ProcKind::Macro => {
                        let raw_operands = operand_list
                            .list_to_vec()
                            .ok_or_else(|| EvalError::OperandDeduce("macro operand list must be a proper list".into()))?;
                        log::debug!("expanding macro {} ({} operand(s))", proc.name.borrow(), raw_operands.len());
                        let expanded = expand_macro(&proc, raw_operands, &frame, ctx)?;
                        expr = expanded;
                        continue;
                    }
                    Value::Callable(callable) => {
                        let operands = eval_operands(&operand_list, &frame, ctx)?;
                        ctx.hooks.on_apply(&Value::Callable(callable.clone()), &operands);
                        match callable {
                            Callable::BuiltIn(b) => {
                                let v = (b.func)(&operands, &frame, ctx)?;
                                ctx.hooks.on_complete(&expr, &v);
                                return Ok(v);
                            }
                            Callable::SingleOperand(s) => {
                                if operands.len() != 1 {
                                    return Err(EvalError::ArityError {
                                        callable: s.name.to_string(),
                                        expected: Arity::Exact(1),
                                        received: operands.len(),
                                    });
                                }
                                let v = (s.func)(&operands[0])?;
                                ctx.hooks.on_complete(&expr, &v);
                                return Ok(v);
                            }
                            Callable::Procedure(proc) => {
                                log::debug!("applying {} ({} operand(s))", proc.name.borrow(), operands.len());
                                let new_frame = bind_params(&proc, operands, &frame)?;
                                if proc.body.is_empty() {
                                    return Err(EvalError::OperandDeduce("procedure body must not be empty".into()));
                                }
                                for stmt in &proc.body[..proc.body.len() - 1] {
                                    eval(stmt, &new_frame, ctx)?;
                                }
                                expr = proc.body.last().unwrap().clone();
                                frame = new_frame;
                                continue;
                            }
                        }
                    }
                    other => return Err(EvalError::CallableResolution(print_value(&other))),
                }
            }
            self_evaluating => {
                let v = self_evaluating.clone();
                ctx.hooks.on_complete(&expr, &v);
                return Ok(v);
            }
        }
    }
}

fn list_items(v: &Value, what: &str) -> Result<Vec<Value>, EvalError> {
    v.list_to_vec().ok_or_else(|| EvalError::OperandDeduce(format!("{what} must be a proper list")))
}

fn dispatch_special_form(name: &str, operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    match name {
        "quote" => {
            let items = list_items(operand_list, "quote")?;
            require_arity(name, &items, Arity::Exact(1))?;
            Ok(Action::Value(items[0].clone()))
        }
        "if" => {
            let items = list_items(operand_list, "if")?;
            if items.len() < 2 || items.len() > 3 {
                return Err(arity_error(name, &items, Arity::Range(2, 3)));
            }
            let test = eval(&items[0], frame, ctx)?;
            if test.is_truthy() {
                Ok(Action::Tail(items[1].clone(), frame.clone()))
            } else if items.len() == 3 {
                Ok(Action::Tail(items[2].clone(), frame.clone()))
            } else {
                Ok(Action::Value(Value::Undefined))
            }
        }
        "cond" => eval_cond(operand_list, frame, ctx),
        "case" => eval_case(operand_list, frame, ctx),
        "and" => {
            let items = list_items(operand_list, "and")?;
            if items.is_empty() {
                return Ok(Action::Value(Value::Boolean(true)));
            }
            for e in &items[..items.len() - 1] {
                let v = eval(e, frame, ctx)?;
                if !v.is_truthy() {
                    return Ok(Action::Value(v));
                }
            }
            Ok(Action::Tail(items.last().unwrap().clone(), frame.clone()))
        }
        "or" => {
            let items = list_items(operand_list, "or")?;
            if items.is_empty() {
                return Ok(Action::Value(Value::Boolean(false)));
            }
            for e in &items[..items.len() - 1] {
                let v = eval(e, frame, ctx)?;
                if v.is_truthy() {
                    return Ok(Action::Value(v));
                }
            }
            Ok(Action::Tail(items.last().unwrap().clone(), frame.clone()))
        }
        "begin" => {
            let items = list_items(operand_list, "begin")?;
            if items.is_empty() {
                return Err(EvalError::ArityError { callable: "begin".into(), expected: Arity::AtLeast(1), received: 0 });
            }
            for e in &items[..items.len() - 1] {
                eval(e, frame, ctx)?;
            }
            Ok(Action::Tail(items.last().unwrap().clone(), frame.clone()))
        }
        "let" => eval_let(operand_list, frame, ctx),
        "let*" => eval_let_star(operand_list, frame, ctx),
        "define" => eval_define(operand_list, frame, ctx, ProcKind::Lambda),
        "define-macro" => eval_define(operand_list, frame, ctx, ProcKind::Macro),
        "set!" => {
            let items = list_items(operand_list, "set!")?;
            require_arity(name, &items, Arity::Exact(2))?;
            let sym = items[0]
                .as_symbol()
                .ok_or_else(|| EvalError::OperandDeduce("set! target must be a symbol".into()))?;
            let val = eval(&items[1], frame, ctx)?;
            frame.set(sym, val)?;
            Ok(Action::Value(Value::Undefined))
        }
        "lambda" => eval_lambda(operand_list, frame, ctx, ProcKind::Lambda),
        "mu" => eval_lambda(operand_list, frame, ctx, ProcKind::Mu),
        "delay" => {
            let items = list_items(operand_list, "delay")?;
            require_arity(name, &items, Arity::Exact(1))?;
            let promise = crate::value::PromiseCell {
                expr: items[0].clone(),
                frame: frame.clone(),
                forced: false,
                value: Value::Undefined,
            };
            Ok(Action::Value(Value::Promise(Rc::new(std::cell::RefCell::new(promise)))))
        }
        "force" => eval_force(operand_list, frame, ctx),
        "quasiquote" => {
            let items = list_items(operand_list, "quasiquote")?;
            require_arity(name, &items, Arity::Exact(1))?;
            Ok(Action::Value(eval_quasiquote(&items[0], frame, ctx)?))
        }
        "unquote" | "unquote-splicing" => {
            Err(EvalError::CallableResolution(format!("{name} used outside quasiquote")))
        }
        "variadic" => Err(EvalError::CallableResolution("variadic used outside a parameter list".into())),
        "expect" => eval_expect(operand_list, frame, ctx),
        "begin-noexcept" => eval_begin_noexcept(operand_list, frame, ctx),
        _ => unreachable!("dispatch_special_form called with non-special-form name {name}"),
    }
}

fn require_arity(name: &str, items: &[Value], arity: Arity) -> Result<(), EvalError> {
    let ok = match &arity {
        Arity::Exact(n) => items.len() == *n,
        Arity::AtLeast(n) => items.len() >= *n,
        Arity::Range(lo, hi) => items.len() >= *lo && items.len() <= *hi,
    };
    if ok {
        Ok(())
    } else {
        Err(arity_error(name, items, arity))
    }
}

fn arity_error(name: &str, items: &[Value], expected: Arity) -> EvalError {
    EvalError::ArityError { callable: name.to_string(), expected, received: items.len() }
}

fn eval_cond(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let clauses = list_items(operand_list, "cond")?;
    for (i, clause) in clauses.iter().enumerate() {
        let parts = list_items(clause, "cond clause")?;
        if parts.is_empty() {
            return Err(EvalError::OperandDeduce("cond clause must not be empty".into()));
        }
        let is_else = parts[0].as_symbol().is_some_and(|s| s.as_str() == "else");
        if is_else && i != clauses.len() - 1 {
            return Err(EvalError::OperandDeduce("else clause must be last in cond".into()));
        }
        let test_value = if is_else { None } else { Some(eval(&parts[0], frame, ctx)?) };
        let matched = test_value.as_ref().map(Value::is_truthy).unwrap_or(true);
        if !matched {
            continue;
        }
        let body = &parts[1..];
        if body.is_empty() {
            return Ok(Action::Value(test_value.unwrap_or(Value::Undefined)));
        }
        for e in &body[..body.len() - 1] {
            eval(e, frame, ctx)?;
        }
        return Ok(Action::Tail(body.last().unwrap().clone(), frame.clone()));
    }
    Ok(Action::Value(Value::Undefined))
}

fn eval_case(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let items = list_items(operand_list, "case")?;
    if items.is_empty() {
        return Err(EvalError::ArityError { callable: "case".into(), expected: Arity::AtLeast(1), received: 0 });
    }
    let key = eval(&items[0], frame, ctx)?;
    let clauses = &items[1..];
    for (i, clause) in clauses.iter().enumerate() {
        let parts = list_items(clause, "case clause")?;
        if parts.is_empty() {
            return Err(EvalError::OperandDeduce("case clause must not be empty".into()));
        }
        let is_else = parts[0].as_symbol().is_some_and(|s| s.as_str() == "else");
        if is_else && i != clauses.len() - 1 {
            return Err(EvalError::OperandDeduce("else clause must be last in case".into()));
        }
        let matched = if is_else {
            true
        } else {
            let datums = list_items(&parts[0], "case datum list")?;
            datums.iter().any(|d| d.is_eqv(&key))
        };
        if !matched {
            continue;
        }
        let body = &parts[1..];
        if body.is_empty() {
            return Ok(Action::Value(Value::Undefined));
        }
        for e in &body[..body.len() - 1] {
            eval(e, frame, ctx)?;
        }
        return Ok(Action::Tail(body.last().unwrap().clone(), frame.clone()));
    }
    Ok(Action::Value(Value::Undefined))
}

fn eval_let(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let items = list_items(operand_list, "let")?;
    if items.is_empty() {
        return Err(EvalError::ArityError { callable: "let".into(), expected: Arity::AtLeast(1), received: 0 });
    }
    let bindings = list_items(&items[0], "let bindings")?;
    let mut names = Vec::new();
    let mut values = Vec::new();
    for binding in &bindings {
        let parts = list_items(binding, "let binding")?;
        if parts.len() != 2 {
            return Err(EvalError::OperandDeduce("let binding must be (name expr)".into()));
        }
        let name = parts[0]
            .as_symbol()
            .ok_or_else(|| EvalError::OperandDeduce("let binding name must be a symbol".into()))?;
        if names.iter().any(|n: &crate::value::Symbol| n == name) {
            return Err(EvalError::OperandDeduce(format!("duplicate let binding: {name}")));
        }
        names.push(name.clone());
        values.push(eval(&parts[1], frame, ctx)?);
    }
    let child = frame.child();
    for (name, value) in names.into_iter().zip(values) {
        child.define(name, value);
    }
    let body = &items[1..];
    if body.is_empty() {
        return Err(EvalError::OperandDeduce("let body must not be empty".into()));
    }
    for e in &body[..body.len() - 1] {
        eval(e, &child, ctx)?;
    }
    Ok(Action::Tail(body.last().unwrap().clone(), child))
}

fn eval_let_star(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let items = list_items(operand_list, "let*")?;
    if items.is_empty() {
        return Err(EvalError::ArityError { callable: "let*".into(), expected: Arity::AtLeast(1), received: 0 });
    }
    let bindings = list_items(&items[0], "let* bindings")?;
    let mut cur = frame.clone();
    for binding in &bindings {
        let parts = list_items(binding, "let* binding")?;
        if parts.len() != 2 {
            return Err(EvalError::OperandDeduce("let* binding must be (name expr)".into()));
        }
        let name = parts[0]
            .as_symbol()
            .ok_or_else(|| EvalError::OperandDeduce("let* binding name must be a symbol".into()))?;
        let value = eval(&parts[1], &cur, ctx)?;
        let next = cur.child();
        next.define(name.clone(), value);
        cur = next;
    }
    let body = &items[1..];
    if body.is_empty() {
        return Err(EvalError::OperandDeduce("let* body must not be empty".into()));
    }
    for e in &body[..body.len() - 1] {
        eval(e, &cur, ctx)?;
    }
    Ok(Action::Tail(body.last().unwrap().clone(), cur))
}

fn eval_define(operand_list: &Value, frame: &Frame, ctx: &mut Ctx, kind: ProcKind) -> Result<Action, EvalError> {
    let form = if kind == ProcKind::Macro { "define-macro" } else { "define" };
    let items = list_items(operand_list, form)?;
    if items.is_empty() {
        return Err(EvalError::ArityError { callable: form.into(), expected: Arity::AtLeast(2), received: items.len() });
    }
    match &items[0] {
        Value::Symbol(name) => {
            if kind == ProcKind::Macro {
                return Err(EvalError::OperandDeduce("define-macro requires a (name params...) target".into()));
            }
            if items.len() != 2 {
                return Err(arity_error(form, &items, Arity::Exact(2)));
            }
            let value = eval(&items[1], frame, ctx)?;
            if let Value::Callable(Callable::Procedure(proc)) = &value {
                if proc.name.borrow().is_empty() {
                    *proc.name.borrow_mut() = name.as_str().to_string();
                }
            }
            frame.define(name.clone(), value);
            Ok(Action::Value(Value::Undefined))
        }
        Value::Pair(p) => {
            let cell = p.borrow();
            let name = cell
                .car
                .as_symbol()
                .ok_or_else(|| EvalError::OperandDeduce(format!("{form} target name must be a symbol")))?
                .clone();
            let params_raw = cell.cdr.clone();
            drop(cell);
            let body = items[1..].to_vec();
            if body.is_empty() {
                return Err(EvalError::OperandDeduce(format!("{form} body must not be empty")));
            }
            let (params, variadic) = parse_params(&params_raw, &ctx.config)?;
            let proc = Procedure {
                name: std::cell::RefCell::new(name.as_str().to_string()),
                params,
                variadic,
                body,
                frame: frame.clone(),
                kind,
            };
            frame.define(name, Value::Callable(Callable::Procedure(Rc::new(proc))));
            Ok(Action::Value(Value::Undefined))
        }
        other => Err(EvalError::OperandDeduce(format!(
            "{form} target must be a symbol or (name params...), received: {}",
            print_value(other)
        ))),
    }
}

fn eval_lambda(operand_list: &Value, frame: &Frame, ctx: &mut Ctx, kind: ProcKind) -> Result<Action, EvalError> {
    let form = if kind == ProcKind::Mu { "mu" } else { "lambda" };
    let items = list_items(operand_list, form)?;
    if items.is_empty() {
        return Err(EvalError::ArityError { callable: form.into(), expected: Arity::AtLeast(2), received: items.len() });
    }
    let (params, variadic) = parse_params(&items[0], &ctx.config)?;
    let body = items[1..].to_vec();
    if body.is_empty() {
        return Err(EvalError::OperandDeduce(format!("{form} body must not be empty")));
    }
    let proc = Procedure { name: std::cell::RefCell::new(String::new()), params, variadic, body, frame: frame.clone(), kind };
    Ok(Action::Value(Value::Callable(Callable::Procedure(Rc::new(proc)))))
}

fn eval_force(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let items = list_items(operand_list, "force")?;
    require_arity("force", &items, Arity::Exact(1))?;
    let value = eval(&items[0], frame, ctx)?;
    let promise = match value {
        Value::Promise(p) => p,
        other => {
            return Err(EvalError::TypeMismatch {
                context: "force".into(),
                expected: "promise".into(),
                received: print_value(&other),
            })
        }
    };
    if ctx.config.fragile {
        return Err(EvalError::IrreversibleOperation { operation: "force".into() });
    }
    if promise.borrow().forced {
        return Ok(Action::Value(promise.borrow().value.clone()));
    }
    let (inner_expr, inner_frame) = {
        let b = promise.borrow();
        (b.expr.clone(), b.frame.clone())
    };
    let result = eval(&inner_expr, &inner_frame, ctx)?;
    if !ctx.config.dotted && !(result.is_pair() || result.is_nil()) {
        return Err(EvalError::TypeMismatch {
            context: "force (no-dotted mode)".into(),
            expected: "pair or nil".into(),
            received: print_value(&result),
        });
    }
    {
        let mut b = promise.borrow_mut();
        b.forced = true;
        b.value = result.clone();
    }
    Ok(Action::Value(result))
}

fn eval_expect(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let items = list_items(operand_list, "expect")?;
    require_arity("expect", &items, Arity::Exact(2))?;
    let actual = eval(&items[0], frame, ctx)?;
    let expected = eval(&items[1], frame, ctx)?;
    if actual.is_equal(&expected) {
        ctx.hooks.out(&format!("expect: ok {}", print_value(&actual)));
    } else {
        ctx.hooks.out(&format!("expect: FAILED expected {} got {}", print_value(&expected), print_value(&actual)));
    }
    Ok(Action::Value(Value::Undefined))
}

fn eval_begin_noexcept(operand_list: &Value, frame: &Frame, ctx: &mut Ctx) -> Result<Action, EvalError> {
    let items = list_items(operand_list, "begin-noexcept")?;
    for e in &items {
        if let Err(err) = eval(e, frame, ctx) {
            log::warn!("begin-noexcept caught error: {err}");
            ctx.hooks.out(&format!("error: {err}"));
        }
    }
    Ok(Action::Value(Value::Undefined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::hooks::NullHooks;
    use crate::reader::Reader;

    fn run(src: &str) -> Value {
        let frame = crate::eval::builtins::global_frame();
        let mut hooks = NullHooks;
        let mut ctx = Ctx::new(Config::default(), &mut hooks);
        let mut last = Value::Undefined;
        for datum in Reader::new(src, Config::default()).unwrap().read_all().unwrap() {
            last = eval(&datum, &frame, &mut ctx).unwrap();
        }
        last
    }

    #[test]
    fn arithmetic_and_let() {
        assert!(matches!(run("(+ 1 2 3)"), Value::Number(n) if n.as_i64() == Some(6)));
        assert!(matches!(run("(let ((x 2) (y 3)) (* x y))"), Value::Number(n) if n.as_i64() == Some(6)));
    }

    #[test]
    fn recursive_factorial() {
        let v = run("(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 5)");
        assert!(matches!(v, Value::Number(n) if n.as_i64() == Some(120)));
    }

    #[test]
    fn tail_recursive_loop_does_not_overflow() {
        let v = run("(define (loop n) (if (= n 0) 'done (loop (- n 1)))) (loop 1000000)");
        assert_eq!(crate::printer::print_value(&v), "done");
    }

    #[test]
    fn lexical_scope_survives_outer_mutation() {
        let v = run("(define make (lambda (x) (lambda () x))) (define t (make 1)) (define x 99) (t)");
        assert!(matches!(v, Value::Number(n) if n.as_i64() == Some(1)));
    }

    #[test]
    fn mu_is_dynamically_scoped() {
        let v = run("(define f (mu () x)) (define (g x) (f)) (g 42)");
        assert!(matches!(v, Value::Number(n) if n.as_i64() == Some(42)));
    }

    #[test]
    fn quasiquote_splices() {
        let v = run("(let ((x 3)) `(a ,x ,@(list 'b 'c)))");
        assert_eq!(crate::printer::print_value(&v), "(a 3 b c)");
    }

    #[test]
    fn define_macro_expands_and_evaluates() {
        let v = run("(define-macro (when t . b) `(if ,t (begin ,@b) #f)) (when #t 1 2 3)");
        assert!(matches!(v, Value::Number(n) if n.as_i64() == Some(3)));
    }

    #[test]
    fn promise_is_memoized() {
        use std::cell::RefCell;
        use std::rc::Rc;
        struct Capture(Rc<RefCell<String>>);
        impl EvaluatorHooks for Capture {
            fn raw_out(&mut self, text: &str) {
                self.0.borrow_mut().push_str(text);
            }
        }
        let sink = Rc::new(RefCell::new(String::new()));
        let frame = crate::eval::builtins::global_frame();
        let mut hooks = Capture(sink.clone());
        let mut ctx = Ctx::new(Config::default(), &mut hooks);
        for datum in Reader::new(
            r#"(define p (delay (begin (display "!") 42))) (force p) (force p)"#,
            Config::default(),
        )
        .unwrap()
        .read_all()
        .unwrap()
        {
            eval(&datum, &frame, &mut ctx).unwrap();
        }
        assert_eq!(sink.borrow().as_str(), "!");
    }

    #[test]
    fn cond_and_case() {
        assert!(matches!(run("(cond (#f 1) (#t 2) (else 3))"), Value::Number(n) if n.as_i64() == Some(2)));
        assert!(matches!(run("(case 2 ((1) 'one) ((2 3) 'two-or-three) (else 'other))"), Value::Symbol(s) if s.as_str() == "two-or-three"));
    }
}
