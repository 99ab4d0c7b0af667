use crate::token::Position;
use crate::value::{Mutability, Ref, Value};

/// `left[index]`. `left` must already be unwrapped; `index` must already
/// be unwrapped and evaluated.
pub fn eval_index(left: Value, index: Value, position: &Position) -> Value {
    match left {
        Value::Array(array) => {
            let Value::Integer(i) = &index else {
                return Value::error("only integer index on array", position.clone());
            };
            let len = array.borrow().elements.len();
            let Some(idx) = to_usize_index(i, len) else {
                return Value::Null;
            };

            let mutable = array.borrow().mutability == Mutability::Mutable;
            if mutable {
                Value::Ref(Ref::ArrayIndex(array, idx))
            } else {
                array.borrow().elements[idx].clone()
            }
        }
        Value::Hash(hash) => {
            let Some(key) = index.hash_key() else {
                return Value::error(format!("not hashable: {}", index.type_tag()), position.clone());
            };

            let found = hash.borrow().pairs.iter().any(|(k, ..)| *k == key);
            if found {
                let mutable = hash.borrow().mutability == Mutability::Mutable;
                if mutable {
                    return Value::Ref(Ref::HashKey(hash, key));
                }
                return hash
                    .borrow()
                    .pairs
                    .iter()
                    .find(|(k, ..)| *k == key)
                    .map(|(_, _, v)| v.clone())
                    .unwrap_or(Value::Null);
            }

            if hash.borrow().mutability == Mutability::Mutable {
                // autovivification: absent key in a mutable hash becomes a
                // fresh Null cell, and indexing yields a Ref to it.
                hash.borrow_mut().pairs.push((key, index, Value::Null));
                Value::Ref(Ref::HashKey(hash, key))
            } else {
                Value::Null
            }
        }
        other => Value::error(
            format!("index operator not supported for: {}", other.type_tag()),
            position.clone(),
        ),
    }
}

fn to_usize_index(i: &num_bigint::BigInt, len: usize) -> Option<usize> {
    let i: i64 = i.try_into().ok()?;
    if i < 0 || i as usize >= len {
        return None;
    }
    Some(i as usize)
}
