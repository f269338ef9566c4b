//! Runtime and syntactic data representation.
//!
//! Scheme is homoiconic: the same [`Value`] enum stands for both the parsed program
//! (a tree of pairs, symbols, and self-evaluating atoms) and the data a running
//! program manipulates. There is no separate AST type.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::env::Frame;

/// A Scheme number. `Int` is exact, `Float` is inexact; arithmetic promotes to
/// `Float` as soon as either operand is inexact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn is_exact(&self) -> bool {
        matches!(self, Num::Int(_))
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Num::Int(n) => *n as f64,
            Num::Float(f) => *f,
        }
    }

    /// Returns the integer value if this number has no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Num::Int(n) => Some(*n),
            Num::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Num::Float(_) => None,
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(n) => write!(f, "{n}"),
            Num::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
        }
    }
}

thread_local! {
    static INTERNER: RefCell<HashMap<Box<str>, Rc<str>>> = RefCell::new(HashMap::new());
}

/// An interned identifier. Two symbols built from the same text are the same
/// allocation, so `eq?` on symbols is a pointer comparison (see `string->symbol`
/// round-tripping in the printer module).
#[derive(Debug, Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(text: &str) -> Self {
        let rc = INTERNER.with(|table| {
            let mut table = table.borrow_mut();
            if let Some(existing) = table.get(text) {
                return existing.clone();
            }
            let rc: Rc<str> = Rc::from(text);
            table.insert(text.into(), rc.clone());
            rc
        });
        Symbol(rc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn ptr_eq(a: &Symbol, b: &Symbol) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}
impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mutable cons cell. Shared via [`PairRef`] so `set-car!`/`set-cdr!` are visible
/// through every alias.
#[derive(Debug)]
pub struct PairCell {
    pub car: Value,
    pub cdr: Value,
}

pub type PairRef = Rc<RefCell<PairCell>>;
pub type VectorRef = Rc<RefCell<Vec<Value>>>;
pub type StringRef = Rc<RefCell<String>>;

/// A `delay`-created promise: an unevaluated expression plus the frame it closes
/// over, memoizing its value the first time `force` runs it.
#[derive(Debug)]
pub struct PromiseCell {
    pub expr: Value,
    pub frame: Frame,
    pub forced: bool,
    pub value: Value,
}

pub type PromiseRef = Rc<RefCell<PromiseCell>>;

/// What kind of applicable procedure a [`Procedure`] is. `Lambda` closes over its
/// defining frame; `Mu` instead resolves free variables in the caller's frame at
/// each call; `Macro` receives unevaluated operands and its result is re-evaluated
/// in the caller's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcKind {
    Lambda,
    Mu,
    Macro,
}

/// A user-defined lambda, mu, or macro.
#[derive(Debug)]
pub struct Procedure {
    pub name: RefCell<String>,
    pub params: Vec<Symbol>,
    pub variadic: Option<Symbol>,
    pub body: Vec<Value>,
    pub frame: Frame,
    pub kind: ProcKind,
}

/// A built-in primitive taking the full, already-evaluated operand vector. Also
/// receives the evaluator context so primitives like `apply`/`eval`/`map` can
/// recursively evaluate Scheme values.
pub struct BuiltIn {
    pub name: &'static str,
    pub func: fn(&[Value], &Frame, &mut crate::eval::Ctx<'_>) -> Result<Value, crate::error::EvalError>,
}

impl fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltIn").field("name", &self.name).finish()
    }
}

/// A built-in primitive that takes exactly one already-evaluated operand. Mirrors
/// the `SingleOperandPrimitive` shape of the original system's primitive library.
pub struct SingleOperandPrimitive {
    pub name: &'static str,
    pub func: fn(&Value) -> Result<Value, crate::error::EvalError>,
}

impl fmt::Debug for SingleOperandPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleOperandPrimitive").field("name", &self.name).finish()
    }
}

/// Every invocable value. See `src/eval/apply.rs` for dispatch.
#[derive(Debug, Clone)]
pub enum Callable {
    BuiltIn(Rc<BuiltIn>),
    SingleOperand(Rc<SingleOperandPrimitive>),
    Procedure(Rc<Procedure>),
}

impl Callable {
    pub fn name(&self) -> String {
        match self {
            Callable::BuiltIn(b) => b.name.to_string(),
            Callable::SingleOperand(s) => s.name.to_string(),
            Callable::Procedure(p) => p.name.borrow().clone(),
        }
    }
}

/// The single runtime/syntactic value domain.
#[derive(Debug, Clone)]
pub enum Value {
    /// `()`, the empty list. A process-wide singleton; `eq?` on `Nil` is always true.
    Nil,
    /// The unspecified value returned by mutators and `define`.
    Undefined,
    Boolean(bool),
    /// Boxed so distinct allocations are distinguishable by `eq?` (§3 invariant
    /// 2): two freshly computed numbers equal in value need not be the same
    /// object, even though `eqv?` treats them as equivalent.
    Number(Rc<Num>),
    /// Boxed for the same reason as `Number`.
    Character(Rc<char>),
    /// A mutable string cell; `eqv?`/`eq?` compare by identity.
    Str(StringRef),
    Symbol(Symbol),
    Pair(PairRef),
    Vector(VectorRef),
    Promise(PromiseRef),
    Callable(Callable),
}

impl Value {
    pub fn symbol(text: &str) -> Self {
        Value::Symbol(Symbol::new(text))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(Rc::new(RefCell::new(text.into())))
    }

    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Pair(Rc::new(RefCell::new(PairCell { car, cdr })))
    }

    /// Wraps a freshly computed `Num` in a new allocation, so it is `eq?`
    /// only to itself, never to another number of the same value.
    pub fn number(n: Num) -> Self {
        Value::Number(Rc::new(n))
    }

    /// Wraps a freshly computed `char` in a new allocation, for the same
    /// `eq?`-vs-`eqv?` reason as `number`.
    pub fn character(c: char) -> Self {
        Value::Character(Rc::new(c))
    }

    pub fn int(n: i64) -> Self {
        Value::number(Num::Int(n))
    }

    pub fn float(f: f64) -> Self {
        Value::number(Num::Float(f))
    }

    /// Every value except `#f` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn as_pair(&self) -> Option<PairRef> {
        match self {
            Value::Pair(p) => Some(p.clone()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Num> {
        match self {
            Value::Number(n) => Some(**n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Character(_) => "char",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Vector(_) => "vector",
            Value::Promise(_) => "promise",
            Value::Callable(_) => "procedure",
        }
    }

    /// Builds a proper list from a `Vec<Value>`.
    pub fn list(items: Vec<Value>) -> Value {
        items.into_iter().rev().fold(Value::Nil, |tail, item| Value::cons(item, tail))
    }

    /// Builds a dotted (improper) list ending in `tail` instead of `Nil`.
    pub fn improper_list(items: Vec<Value>, tail: Value) -> Value {
        items.into_iter().rev().fold(tail, |tail, item| Value::cons(item, tail))
    }

    /// Collects a proper list into a `Vec<Value>`. Fails if the list is improper.
    pub fn list_to_vec(&self) -> Option<Vec<Value>> {
        let mut out = Vec::new();
        let mut cur = self.clone();
        loop {
            match cur {
                Value::Nil => return Some(out),
                Value::Pair(p) => {
                    let cell = p.borrow();
                    out.push(cell.car.clone());
                    cur = cell.cdr.clone();
                }
                _ => return None,
            }
        }
    }

    /// `eq?`: identity comparison. Numbers and characters are boxed (see
    /// `Value::number`/`Value::character`) precisely so two separately
    /// allocated values equal in value are not necessarily `eq?` to one
    /// another, matching §3 invariant 2.
    pub fn is_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) | (Undefined, Undefined) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Number(a), Number(b)) => Rc::ptr_eq(a, b),
            (Character(a), Character(b)) => Rc::ptr_eq(a, b),
            (Symbol(a), Symbol(b)) => Symbol::ptr_eq(a, b) || a == b,
            (Str(a), Str(b)) => Rc::ptr_eq(a, b),
            (Pair(a), Pair(b)) => Rc::ptr_eq(a, b),
            (Vector(a), Vector(b)) => Rc::ptr_eq(a, b),
            (Promise(a), Promise(b)) => Rc::ptr_eq(a, b),
            (Callable(a), Callable(b)) => callable_eq(a, b),
            _ => false,
        }
    }

    /// `eqv?`: like `eq?`, but numbers and characters compare by value instead
    /// of by identity (§3 invariant 2).
    pub fn is_eqv(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Number(a), Number(b)) => a.is_exact() == b.is_exact() && a.as_f64() == b.as_f64(),
            (Character(a), Character(b)) => a == b,
            _ => self.is_eq(other),
        }
    }

    /// `equal?`: structural equality, recursing into pairs, vectors, and strings.
    pub fn is_equal(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Str(a), Str(b)) => *a.borrow() == *b.borrow(),
            (Pair(a), Pair(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.car.is_equal(&b.car) && a.cdr.is_equal(&b.cdr)
            }
            (Vector(a), Vector(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_equal(y))
            }
            _ => self.is_eqv(other),
        }
    }
}

fn callable_eq(a: &Callable, b: &Callable) -> bool {
    match (a, b) {
        (Callable::BuiltIn(a), Callable::BuiltIn(b)) => Rc::ptr_eq(a, b),
        (Callable::SingleOperand(a), Callable::SingleOperand(b)) => Rc::ptr_eq(a, b),
        (Callable::Procedure(a), Callable::Procedure(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
