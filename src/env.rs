//! Lexical environments: chained frames of name-to-value bindings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::EvalError;
use crate::value::{Symbol, Value};

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(0);

struct FrameInner {
    id: u64,
    bindings: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Frame>,
}

/// A lexical scope. Cheap to clone (an `Rc` handle), so closures and child calls
/// can each hold their own reference to a shared, mutable binding table.
#[derive(Clone)]
pub struct Frame(Rc<FrameInner>);

impl Frame {
    pub fn root() -> Self {
        Frame(Rc::new(FrameInner {
            id: NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed),
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        }))
    }

    pub fn child(&self) -> Self {
        Frame(Rc::new(FrameInner {
            id: NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed),
            bindings: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Binds (or rebinds) `name` in this frame only, as `define` does.
    pub fn define(&self, name: Symbol, value: Value) {
        self.0.bindings.borrow_mut().insert(name, value);
    }

    /// Looks a name up through the parent chain.
    pub fn lookup(&self, name: &Symbol) -> Result<Value, EvalError> {
        if let Some(v) = self.0.bindings.borrow().get(name) {
            return Ok(v.clone());
        }
        match &self.0.parent {
            Some(parent) => parent.lookup(name),
            None => Err(EvalError::NameNotFound { name: name.as_str().to_string() }),
        }
    }

    /// Mutates an existing binding (as `set!` does), searching outward. Errors if
    /// no frame in the chain already binds `name`.
    pub fn set(&self, name: &Symbol, value: Value) -> Result<(), EvalError> {
        if self.0.bindings.borrow().contains_key(name) {
            self.0.bindings.borrow_mut().insert(name.clone(), value);
            return Ok(());
        }
        match &self.0.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::NameNotFound { name: name.as_str().to_string() }),
        }
    }

    pub fn is_bound(&self, name: &Symbol) -> bool {
        self.0.bindings.borrow().contains_key(name)
            || self.0.parent.as_ref().is_some_and(|p| p.is_bound(name))
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#[frame {}]", self.0.id)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_parent_chain() {
        let root = Frame::root();
        root.define(Symbol::new("x"), Value::int(1));
        let child = root.child();
        child.define(Symbol::new("y"), Value::int(2));
        assert!(matches!(child.lookup(&Symbol::new("x")), Ok(Value::Number(_))));
        assert!(root.lookup(&Symbol::new("y")).is_err());
    }

    #[test]
    fn set_requires_existing_binding() {
        let root = Frame::root();
        let child = root.child();
        assert!(child.set(&Symbol::new("z"), Value::int(1)).is_err());
        root.define(Symbol::new("z"), Value::int(1));
        assert!(child.set(&Symbol::new("z"), Value::int(2)).is_ok());
        assert!(matches!(root.lookup(&Symbol::new("z")), Ok(Value::Number(n)) if n.as_i64() == Some(2)));
    }
}
