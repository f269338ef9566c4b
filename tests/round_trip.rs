//! Reader/printer round-trip and value-equality invariants.

use schemecore::config::Config;
use schemecore::eval::{builtins::global_frame, eval, Ctx};
use schemecore::hooks::NullHooks;
use schemecore::printer::print_value;
use schemecore::reader::Reader;
use schemecore::Value;

use pretty_assertions::assert_eq;

fn run(src: &str) -> Value {
    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);
    let mut last = Value::Undefined;
    for datum in Reader::new(src, Config::default()).unwrap().read_all().unwrap() {
        last = eval(&datum, &frame, &mut ctx).unwrap();
    }
    last
}

#[test]
fn printed_datums_re_read_to_an_equal_value() {
    for src in ["(1 2 3)", "(a . b)", "#(1 2 3)", "\"hi\"", "#\\a", "3.5", "-7", "sym"] {
        let original = Reader::new(src, Config::default()).unwrap().read().unwrap().unwrap();
        let printed = print_value(&original);
        let reread = Reader::new(&printed, Config::default()).unwrap().read().unwrap().unwrap();
        assert!(original.is_equal(&reread), "{src:?} did not round-trip: printed {printed:?}");
    }
}

#[test]
fn equal_is_reflexive_over_structured_values() {
    for src in ["'(1 2 (3 4) 5)", "#(1 2 3)", "\"a string\"", "42", "3.14", "'sym"] {
        let v = run(src);
        assert!(v.is_equal(&v));
    }
}

#[test]
fn reverse_is_its_own_inverse_and_preserves_length() {
    let original = run("'(1 2 3 4 5)");
    let twice_reversed = run("(reverse (reverse '(1 2 3 4 5)))");
    assert!(original.is_equal(&twice_reversed));
    assert_eq!(print_value(&run("(length '(1 2 3 4 5))")), print_value(&run("(length (reverse '(1 2 3 4 5)))")));
}

#[test]
fn eq_implies_eqv_implies_equal_for_the_same_object() {
    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);
    let src = "(define p (cons 1 2))";
    eval(&Reader::new(src, Config::default()).unwrap().read().unwrap().unwrap(), &frame, &mut ctx).unwrap();
    for check in ["(eq? p p)", "(eqv? p p)", "(equal? p p)"] {
        let result = eval(&Reader::new(check, Config::default()).unwrap().read().unwrap().unwrap(), &frame, &mut ctx).unwrap();
        assert_eq!(print_value(&result), "#t", "failed: {check}");
    }
}

#[test]
fn eq_may_distinguish_separately_computed_numbers_that_eqv_does_not() {
    let a = run("(+ 1 1)");
    let b = run("(+ 1 1)");
    assert!(!a.is_eq(&b), "two freshly computed numbers should not be eq?");
    assert!(a.is_eqv(&b), "two numbers equal in value must be eqv?");
    assert!(a.is_equal(&b));
}

#[test]
fn distinct_delay_expressions_produce_distinct_promise_identities() {
    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);
    let src = "(define a (delay 1)) (define b (delay 1))";
    for datum in Reader::new(src, Config::default()).unwrap().read_all().unwrap() {
        eval(&datum, &frame, &mut ctx).unwrap();
    }
    let same = eval(&Reader::new("(eq? a a)", Config::default()).unwrap().read().unwrap().unwrap(), &frame, &mut ctx).unwrap();
    let different = eval(&Reader::new("(eq? a b)", Config::default()).unwrap().read().unwrap().unwrap(), &frame, &mut ctx).unwrap();
    assert_eq!(print_value(&same), "#t");
    assert_eq!(print_value(&different), "#f");
}

#[test]
fn symbols_that_would_not_round_trip_print_bracket_escaped() {
    let weird = run("(string->symbol \"has space\")");
    let printed = print_value(&weird);
    assert!(printed.starts_with('[') && printed.ends_with(']'), "got {printed:?}");
    let reread = Reader::new(&printed, Config::default()).unwrap().read().unwrap().unwrap();
    assert!(weird.is_equal(&reread));
}
