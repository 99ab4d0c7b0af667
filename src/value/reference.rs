use std::cell::RefCell;
use std::rc::Rc;

use super::hashkey::HashKey;
use super::{ArrayObj, HashObj, Value};

/// A transient L-value: a pointer to a cell inside a *mutable* container,
/// produced only by indexing. It must be unwrapped before participating in
/// any operator as an R-value; only the assignment operator writes through
/// it. Never stored in a variable binding (`Let` and argument binding both
/// unwrap it first) — this is the idiomatic-Rust stand-in for a raw
/// pointer into the container's backing storage.
#[derive(Debug, Clone)]
pub enum Ref {
    ArrayIndex(Rc<RefCell<ArrayObj>>, usize),
    HashKey(Rc<RefCell<HashObj>>, HashKey),
}

impl Ref {
    pub fn get(&self) -> Value {
        match self {
            Ref::ArrayIndex(array, idx) => array
                .borrow()
                .elements
                .get(*idx)
                .cloned()
                .unwrap_or(Value::Null),
            Ref::HashKey(hash, key) => hash
                .borrow()
                .pairs
                .iter()
                .find(|(k, ..)| k == key)
                .map(|(_, _, v)| v.clone())
                .unwrap_or(Value::Null),
        }
    }

    pub fn set(&self, value: Value) {
        match self {
            Ref::ArrayIndex(array, idx) => {
                if let Some(slot) = array.borrow_mut().elements.get_mut(*idx) {
                    *slot = value;
                }
            }
            Ref::HashKey(hash, key) => {
                let mut hash = hash.borrow_mut();
                if let Some(entry) = hash.pairs.iter_mut().find(|(k, ..)| k == key) {
                    entry.2 = value;
                }
            }
        }
    }
}
