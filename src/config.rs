//! Interpreter-wide feature toggles.

/// Runtime configuration threaded through the reader and evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// When `true` (the default), the reader accepts dotted-pair notation
    /// (`(a . b)`) and `lambda`/`mu` accept a bare symbol or improper parameter
    /// list as a variadic parameter. When `false`, dotted notation is a read
    /// error and variadic parameters must use `(variadic name)` instead; `force`
    /// also additionally requires its promise to resolve to a pair or `Nil`.
    pub dotted: bool,
    /// When `true`, mutators that cannot be undone (`set-car!`, `set-cdr!`,
    /// `vector-set!`, `vector-fill!`, `force`, `load`) raise
    /// [`crate::error::EvalError::IrreversibleOperation`] instead of running.
    pub fragile: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config { dotted: true, fragile: false }
    }
}
