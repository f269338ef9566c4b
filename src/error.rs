//! Error types produced by each phase of the interpreter.
//!
//! - [`LexError`]: raised while turning source text into tokens.
//! - [`ReadError`]: raised while turning tokens into data (wraps [`LexError`]).
//! - [`EvalError`]: raised while evaluating data as code.

use std::fmt;
use thiserror::Error;

/// A location in source text, used to annotate lexer and reader errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Starting byte offset (inclusive)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self { start, end, line, column }
    }
}

/// Errors produced while tokenizing source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("ParseError: unexpected character '{ch}' at line {}, column {}", span.line, span.column)]
    UnexpectedChar { ch: char, span: Span },

    #[error("ParseError: unterminated string literal starting at line {}, column {}", span.line, span.column)]
    UnterminatedString { span: Span },

    #[error("ParseError: unterminated character literal starting at line {}, column {}", span.line, span.column)]
    UnterminatedChar { span: Span },

    #[error("ParseError: unterminated bracket-escaped symbol starting at line {}, column {}", span.line, span.column)]
    UnterminatedSymbol { span: Span },

    #[error("ParseError: invalid character literal '#\\{text}' at line {}, column {}", span.line, span.column)]
    InvalidCharLiteral { text: String, span: Span },

    #[error("ParseError: invalid escape sequence '\\{ch}' at line {}, column {}", span.line, span.column)]
    InvalidEscape { ch: char, span: Span },

    #[error("ParseError: malformed number literal '{text}' at line {}, column {}", span.line, span.column)]
    MalformedNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedChar { span }
            | LexError::UnterminatedSymbol { span }
            | LexError::InvalidCharLiteral { span, .. }
            | LexError::InvalidEscape { span, .. }
            | LexError::MalformedNumber { span, .. } => *span,
        }
    }
}

/// Errors produced while reading a token stream into data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    #[error("ParseError: unexpected end of input while reading {context} (started at line {}, column {})", span.line, span.column)]
    UnexpectedEof { context: String, span: Span },

    #[error("ParseError: expected {expected}, found {found} at line {}, column {}", span.line, span.column)]
    UnexpectedToken { expected: String, found: String, span: Span },

    #[error("ParseError: dotted pair notation is disabled at line {}, column {}", span.line, span.column)]
    DottedPairDisabled { span: Span },

    #[error("ParseError: ill-formed dotted list at line {}, column {}: only one datum may follow '.'", span.line, span.column)]
    IllFormedDottedList { span: Span },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ReadError {
    pub fn span(&self) -> Span {
        match self {
            ReadError::UnexpectedEof { span, .. }
            | ReadError::UnexpectedToken { span, .. }
            | ReadError::DottedPairDisabled { span }
            | ReadError::IllFormedDottedList { span } => *span,
            ReadError::Lex(e) => e.span(),
        }
    }
}

/// The operand-count contract of a callable, used by [`EvalError::ArityError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Range(lo, hi) => write!(f, "between {lo} and {hi}"),
        }
    }
}

/// Errors produced while evaluating data as code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("NameNotFound: unbound name: {name}")]
    NameNotFound { name: String },

    #[error("ArityError: {callable} expects {expected} argument(s), received {received}")]
    ArityError { callable: String, expected: Arity, received: usize },

    #[error("OperandDeduce: {0}")]
    OperandDeduce(String),

    #[error("TypeMismatch: {context} expects {expected}, received: {received}")]
    TypeMismatch { context: String, expected: String, received: String },

    #[error("CallableResolution: cannot call {0}: not a callable")]
    CallableResolution(String),

    #[error("UnsupportedOperation: {0} is not supported by this interpreter")]
    UnsupportedOperation(String),

    #[error("IrreversibleOperation: {operation} is disabled in fragile mode")]
    IrreversibleOperation { operation: String },

    #[error("LoadError: could not load {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("RecursionLimit: maximum recursion depth exceeded")]
    RecursionLimit,

    #[error("User: {0}")]
    User(String),

    #[error(transparent)]
    Read(#[from] ReadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_errors_begin_with_their_kind_tag() {
        assert!(EvalError::NameNotFound { name: "x".into() }.to_string().starts_with("NameNotFound:"));
        assert!(EvalError::ArityError { callable: "f".into(), expected: Arity::Exact(1), received: 0 }
            .to_string()
            .starts_with("ArityError:"));
        assert!(EvalError::User("boom".into()).to_string().starts_with("User:"));
        let span = Span::default();
        assert!(LexError::UnterminatedString { span }.to_string().starts_with("ParseError:"));
        assert!(EvalError::from(ReadError::DottedPairDisabled { span }).to_string().starts_with("ParseError:"));
    }
}
