//! Coverage for each `EvalError` variant named in the error handling design,
//! exercised through the public API.

use schemecore::config::Config;
use schemecore::error::EvalError;
use schemecore::eval::{builtins::global_frame, eval, Ctx};
use schemecore::hooks::NullHooks;
use schemecore::reader::Reader;

fn eval_one(src: &str, config: Config) -> Result<schemecore::Value, EvalError> {
    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(config, &mut hooks);
    let datum = Reader::new(src, config).unwrap().read().unwrap().unwrap();
    eval(&datum, &frame, &mut ctx)
}

#[test]
fn unbound_name_is_a_name_not_found_error() {
    assert!(matches!(eval_one("no-such-binding", Config::default()), Err(EvalError::NameNotFound { .. })));
}

#[test]
fn wrong_argument_count_is_an_arity_error() {
    assert!(matches!(eval_one("(cons 1)", Config::default()), Err(EvalError::ArityError { .. })));
}

#[test]
fn adding_a_non_number_is_a_type_mismatch() {
    assert!(matches!(eval_one("(+ 1 \"two\")", Config::default()), Err(EvalError::TypeMismatch { .. })));
}

#[test]
fn calling_a_non_callable_is_a_callable_resolution_error() {
    assert!(matches!(eval_one("(1 2 3)", Config::default()), Err(EvalError::CallableResolution(_))));
}

#[test]
fn rationalize_is_an_unsupported_operation() {
    assert!(matches!(eval_one("(rationalize 1 2)", Config::default()), Err(EvalError::UnsupportedOperation(_))));
}

#[test]
fn set_car_in_fragile_mode_is_an_irreversible_operation() {
    let config = Config { dotted: true, fragile: true };
    let err = eval_one("(set-car! (cons 1 2) 3)", config);
    assert!(matches!(err, Err(EvalError::IrreversibleOperation { .. })));
}

#[test]
fn loading_a_missing_file_is_a_load_error() {
    assert!(matches!(eval_one("(load 'this-path-does-not-exist-anywhere)", Config::default()), Err(EvalError::LoadError { .. })));
}

#[test]
fn unbounded_non_tail_recursion_is_a_recursion_limit_error() {
    let src = "(define (sum n) (if (= n 0) 0 (+ n (sum (- n 1))))) (sum 1000000)";
    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);
    let mut last = Ok(schemecore::Value::Undefined);
    for datum in Reader::new(src, Config::default()).unwrap().read_all().unwrap() {
        last = eval(&datum, &frame, &mut ctx);
    }
    assert!(matches!(last, Err(EvalError::RecursionLimit)));
}

#[test]
fn error_primitive_raises_a_user_error() {
    assert!(matches!(eval_one("(error \"boom\")", Config::default()), Err(EvalError::User(_))));
}

#[test]
fn force_on_a_non_promise_is_a_type_mismatch() {
    assert!(matches!(eval_one("(force 5)", Config::default()), Err(EvalError::TypeMismatch { .. })));
}

#[test]
fn rendered_error_text_begins_with_its_kind_tag() {
    let err = eval_one("no-such-binding", Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("NameNotFound:"), "got {err}");

    let err = eval_one("(cons 1)", Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("ArityError:"), "got {err}");

    let err = eval_one("(error \"boom\")", Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("User:"), "got {err}");
}

#[test]
fn forcing_a_non_pair_result_in_no_dotted_mode_is_a_type_mismatch() {
    let config = Config { dotted: false, fragile: false };
    assert!(matches!(eval_one("(force (delay 42))", config), Err(EvalError::TypeMismatch { .. })));
}
