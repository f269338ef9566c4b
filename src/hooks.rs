//! Evaluator trace hooks.
//!
//! The interpreter core reports evaluation events through this trait so that an
//! external collaborator (a step-through debugger, a visualization server) can
//! observe a run without the core depending on it. Building that collaborator is
//! out of scope here; [`NullHooks`] and [`StdoutHooks`] are the two hosts this
//! crate ships.

use crate::env::Frame;
use crate::value::Value;

/// Observes evaluator progress. All methods have a default no-op body so
/// implementors only override what they need.
pub trait EvaluatorHooks {
    /// Called when an expression begins evaluating in a frame.
    fn on_enter(&mut self, _expr: &Value, _frame: &Frame) {}

    /// Called when an expression finishes evaluating, with its result.
    fn on_complete(&mut self, _expr: &Value, _result: &Value) {}

    /// Called immediately before a procedure is applied to its operands.
    fn on_apply(&mut self, _callable: &Value, _operands: &[Value]) {}

    /// Receives output from `display`/`write`/`newline`/`write-char`, exactly as
    /// those primitives format it (no added newline).
    fn raw_out(&mut self, _text: &str) {}

    /// Receives a line of output with a trailing newline already applied.
    fn out(&mut self, text: &str) {
        self.raw_out(text);
        self.raw_out("\n");
    }
}

/// Discards every event. Used by library callers who only want a return value.
#[derive(Debug, Default)]
pub struct NullHooks;

impl EvaluatorHooks for NullHooks {}

/// Writes `display`/`write` output to stdout. Used by the `scheme` CLI binary.
#[derive(Debug, Default)]
pub struct StdoutHooks;

impl EvaluatorHooks for StdoutHooks {
    fn raw_out(&mut self, text: &str) {
        use std::io::Write;
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}
