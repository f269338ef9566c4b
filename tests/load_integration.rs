//! `load`/`load-all` integration tests against real files on disk.

use schemecore::config::Config;
use schemecore::error::EvalError;
use schemecore::eval::{builtins::global_frame, eval, Ctx};
use schemecore::hooks::NullHooks;
use schemecore::printer::print_value;
use schemecore::reader::Reader;

use std::io::Write;
use tempfile::{tempdir, Builder};

use pretty_assertions::assert_eq;

fn eval_src(src: &str, frame: &schemecore::env::Frame, ctx: &mut Ctx) -> schemecore::Value {
    let mut last = schemecore::Value::Undefined;
    for datum in Reader::new(src, ctx.config).unwrap().read_all().unwrap() {
        last = eval(&datum, frame, ctx).unwrap();
    }
    last
}

#[test]
fn load_defines_bindings_from_a_real_file_in_the_calling_frame() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defs.scm");
    std::fs::write(&path, "(define answer 42)\n(define (double x) (* x 2))\n").unwrap();

    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);

    let load_form = format!("(load \"{}\")", path.display());
    eval_src(&load_form, &frame, &mut ctx);

    assert_eq!(print_value(&eval_src("answer", &frame, &mut ctx)), "42");
    assert_eq!(print_value(&eval_src("(double 21)", &frame, &mut ctx)), "42");
}

#[test]
fn load_resolves_a_bare_symbol_name_by_appending_scm() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("greeting.scm");
    std::fs::write(&path, "(define greeting 'hello)\n").unwrap();

    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);

    let stem = path.with_extension("");
    let load_form = format!("(load '{})", stem.display());
    eval_src(&load_form, &frame, &mut ctx);

    assert_eq!(print_value(&eval_src("greeting", &frame, &mut ctx)), "hello");
}

#[test]
fn load_all_continues_past_a_file_that_fails_to_parse() {
    let good = Builder::new().suffix(".scm").tempfile().unwrap();
    writeln!(good.as_file(), "(define ok 'fine)").unwrap();

    let mut bad = Builder::new().suffix(".scm").tempfile().unwrap();
    write!(bad, "(unterminated \"string").unwrap();

    let frame = global_frame();
    let mut hooks = NullHooks;
    let mut ctx = Ctx::new(Config::default(), &mut hooks);

    let load_form = format!("(load-all \"{}\" \"{}\")", bad.path().display(), good.path().display());
    eval_src(&load_form, &frame, &mut ctx);

    assert_eq!(print_value(&eval_src("ok", &frame, &mut ctx)), "fine");
}

#[test]
fn load_in_fragile_mode_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defs.scm");
    std::fs::write(&path, "(define x 1)\n").unwrap();

    let frame = global_frame();
    let mut hooks = NullHooks;
    let config = Config { dotted: true, fragile: true };
    let mut ctx = Ctx::new(config, &mut hooks);

    let datum = Reader::new(&format!("(load \"{}\")", path.display()), config).unwrap().read().unwrap().unwrap();
    assert!(matches!(eval(&datum, &frame, &mut ctx), Err(EvalError::IrreversibleOperation { .. })));
}
