//! # schemecore
//!
//! An educational R5RS-subset Scheme interpreter: lexer, reader, environment,
//! and a tail-call-safe evaluator/applicator, plus a primitive library covering
//! numbers, pairs, strings, characters, vectors, and I/O.
//!
//! Scheme is homoiconic here in the usual way: [`value::Value`] is both the
//! parsed program and the data a running program manipulates. There is no
//! separate AST type; the [`reader`] turns source text directly into `Value`
//! trees, and [`eval::eval`] walks those same trees as code.
//!
//! ## Quick start
//!
//! ```rust
//! use schemecore::config::Config;
//! use schemecore::eval::{builtins::global_frame, eval, Ctx};
//! use schemecore::hooks::NullHooks;
//! use schemecore::reader::Reader;
//!
//! let frame = global_frame();
//! let mut hooks = NullHooks;
//! let mut ctx = Ctx::new(Config::default(), &mut hooks);
//! let datum = Reader::new("(+ 1 2 3)", Config::default()).unwrap().read().unwrap().unwrap();
//! let result = eval(&datum, &frame, &mut ctx).unwrap();
//! assert_eq!(schemecore::printer::print_value(&result), "6");
//! ```
//!
//! ## Modules
//!
//! - [`error`]: lexer/reader/evaluator error types
//! - [`value`]: the `Value` data model (pairs, symbols, numbers, procedures, promises)
//! - [`env`]: lexical environments (`Frame`)
//! - [`config`]: `dotted`/`fragile` interpreter-wide toggles
//! - [`lexer`]: tokenization of Scheme source text
//! - [`reader`]: recursive-descent datum reader
//! - [`printer`]: `write`/`display`-style rendering back to source text
//! - [`hooks`]: evaluator trace hooks for external observers
//! - [`eval`]: the trampolined evaluator, applicator, and primitive library
//! - [`format`]: the structural source formatter (`scheme fmt`)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod format;
pub mod hooks;
pub mod lexer;
pub mod printer;
pub mod reader;
pub mod value;

pub use config::Config;
pub use error::{EvalError, LexError, ReadError};
pub use eval::{eval, Ctx};
pub use hooks::EvaluatorHooks;
pub use value::Value;
