//! End-to-end evaluation scenarios, run through the public library surface
//! exactly as an embedding caller would use it.

use schemecore::config::Config;
use schemecore::eval::{builtins::global_frame, eval, Ctx};
use schemecore::hooks::{EvaluatorHooks, NullHooks};
use schemecore::printer::print_value;
use schemecore::reader::Reader;
use schemecore::Value;

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

fn eval_all(src: &str, ctx: &mut Ctx) -> Value {
    let frame = global_frame();
    let mut last = Value::Undefined;
    for datum in Reader::new(src, ctx.config).unwrap().read_all().unwrap() {
        last = eval(&datum, &frame, ctx).unwrap();
    }
    last
}

fn run(src: &str) -> Value {
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);
    eval_all(src, &mut ctx)
}

#[test]
fn scenario_1_simple_arithmetic() {
    assert_eq!(print_value(&run("(+ 1 2 3)")), "6");
}

#[test]
fn scenario_2_let_binding() {
    assert_eq!(print_value(&run("(let ((x 2) (y 3)) (* x y))")), "6");
}

#[test]
fn scenario_3_recursive_factorial() {
    let src = "(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 5)";
    assert_eq!(print_value(&run(src)), "120");
}

#[test]
fn scenario_4_quasiquote_with_splicing() {
    let src = "(let ((x 3)) `(a ,x ,@(list 'b 'c)))";
    assert_eq!(print_value(&run(src)), "(a 3 b c)");
}

#[test]
fn scenario_5_promise_is_forced_once() {
    struct Capture(Rc<RefCell<String>>);
    impl EvaluatorHooks for Capture {
        fn raw_out(&mut self, text: &str) {
            self.0.borrow_mut().push_str(text);
        }
    }
    let sink = Rc::new(RefCell::new(String::new()));
    let mut hooks = Capture(sink.clone());
    let mut ctx = Ctx::new(Config::default(), &mut hooks);
    let src = r#"(define p (delay (begin (display "!") 42))) (force p) (force p)"#;
    let result = eval_all(src, &mut ctx);
    assert_eq!(print_value(&result), "42");
    assert_eq!(sink.borrow().as_str(), "!");
}

#[test]
fn scenario_6_define_macro_when() {
    let src = "(define-macro (when t . b) `(if ,t (begin ,@b) #f)) (when #t 1 2 3)";
    assert_eq!(print_value(&run(src)), "3");
}

#[test]
fn deep_tail_recursion_does_not_overflow_the_host_stack() {
    let src = "(define (loop n acc) (if (= n 0) acc (loop (- n 1) (+ acc 1)))) (loop 1000000 0)";
    assert_eq!(print_value(&run(src)), "1000000");
}

#[test]
fn mutual_recursion_through_and_or_in_tail_position() {
    let src = "\
        (define (my-even? n) (or (= n 0) (my-odd? (- n 1)))) \
        (define (my-odd? n) (and (not (= n 0)) (my-even? (- n 1)))) \
        (my-even? 100000)";
    assert_eq!(print_value(&run(src)), "#t");
}

#[test]
fn cond_else_and_case_fallthrough() {
    assert_eq!(print_value(&run("(cond (#f 'a) (#f 'b))")), "");
    assert_eq!(print_value(&run("(case 9 ((1) 'one) (else 'fallback))")), "fallback");
}

#[test]
fn dynamic_vs_lexical_scope_distinguish_lambda_and_mu() {
    let lexical = "(define (make) (let ((x 'captured)) (lambda () x))) (define x 'outer) ((make))";
    assert_eq!(print_value(&run(lexical)), "captured");

    let dynamic = "(define f (mu () x)) (define (g x) (f)) (g 'dynamic)";
    assert_eq!(print_value(&run(dynamic)), "dynamic");
}
