use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// A lexical scope: a binding table plus an optional outer scope. `get`
/// walks outward until it finds a binding or runs out of scopes; `set`
/// always binds in *this* scope, shadowing an outer binding of the same
/// name rather than updating it.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn enclosed_by(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref()?.borrow().get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn inner_scope_sees_outer_bindings() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Value::Integer(BigInt::from(1)));
        let inner = Environment::enclosed_by(outer);
        assert_eq!(inner.borrow().get("a"), Some(Value::Integer(BigInt::from(1))));
    }

    #[test]
    fn inner_set_shadows_without_touching_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Value::Integer(BigInt::from(1)));
        let inner = Environment::enclosed_by(outer.clone());
        inner.borrow_mut().set("a", Value::Integer(BigInt::from(2)));
        assert_eq!(inner.borrow().get("a"), Some(Value::Integer(BigInt::from(2))));
        assert_eq!(outer.borrow().get("a"), Some(Value::Integer(BigInt::from(1))));
    }

    #[test]
    fn unknown_name_is_none() {
        let env = Environment::new();
        assert_eq!(env.borrow().get("nope"), None);
    }
}
