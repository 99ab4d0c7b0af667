use num_traits::{Signed, Zero};

use crate::ast::expression::{InfixOperator, PrefixOperator};
use crate::token::Position;
use crate::value::{Mutability, Value};

/// `!x`, `-x`, `hằng x`, `biến x`. The caller has already unwrapped any
/// `Ref` on `right` — prefix operators only ever see R-values.
pub fn apply_prefix(operator: PrefixOperator, right: Value, position: &Position) -> Value {
    match operator {
        PrefixOperator::Bang => Value::Boolean(!right.truthy()),
        PrefixOperator::Minus => match right {
            Value::Integer(i) => Value::Integer(-i),
            Value::Float(f) => Value::Float(-f),
            other => Value::error(
                format!("unknown operator: -{}", other.type_tag()),
                position.clone(),
            ),
        },
        PrefixOperator::Const => retag(right, Mutability::Immutable, position),
        PrefixOperator::Mut => retag(right, Mutability::Mutable, position),
    }
}

/// Clones a container with the requested mutability; never aliases the
/// source, per §3.3. Errors on anything that isn't Array/Hash.
fn retag(value: Value, mutability: Mutability, position: &Position) -> Value {
    match value {
        Value::Array(arr) => {
            let data = arr.borrow().clone();
            Value::new_array(data.elements, mutability)
        }
        Value::Hash(hash) => {
            let data = hash.borrow().clone();
            Value::new_hash(data.pairs, mutability)
        }
        other => Value::error(
            format!("unknown operator: mutability tag on {}", other.type_tag()),
            position.clone(),
        ),
    }
}

/// The kind-specific dispatch table from §4.3 step 4. `left`/`right` have
/// both already been unwrapped to R-values; `=` is handled by the caller
/// before this is ever reached.
pub fn apply_infix(left: Value, operator: InfixOperator, right: Value, position: &Position) -> Value {
    use InfixOperator::*;

    if operator == In {
        return match right {
            Value::Hash(hash) => {
                let Some(key) = left.hash_key() else {
                    return Value::error(
                        format!("not hashable: {}", left.type_tag()),
                        position.clone(),
                    );
                };
                let present = hash.borrow().pairs.iter().any(|(k, ..)| *k == key);
                Value::Boolean(present)
            }
            other => Value::error(
                format!("thuộc requires a hash on the right, got {}", other.type_tag()),
                position.clone(),
            ),
        };
    }

    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => integer_infix(l, r, operator, position),
        (Value::Float(l), Value::Float(r)) => float_infix(l, r, operator, position),
        (Value::Str(l), Value::Str(r)) => string_infix(l, r, operator, position),
        (Value::Boolean(l), Value::Boolean(r)) => boolean_infix(l, r, operator, position),
        (Value::Array(l), Value::Array(r)) => array_infix(l, r, operator, position),
        (l, r) => Value::error(
            format!("incompatible types: {} {} {}", l.type_tag(), operator, r.type_tag()),
            position.clone(),
        ),
    }
}

fn integer_infix(
    l: num_bigint::BigInt,
    r: num_bigint::BigInt,
    operator: InfixOperator,
    position: &Position,
) -> Value {
    use InfixOperator::*;
    match operator {
        Plus => Value::Integer(l + r),
        Minus => Value::Integer(l - r),
        Asterisk => Value::Integer(l * r),
        Slash => {
            if r.is_zero() {
                return Value::error("division by zero", position.clone());
            }
            Value::Integer(l / r)
        }
        Percent => {
            if r.is_zero() {
                return Value::error("division by zero", position.clone());
            }
            // Euclidean Mod: remainder is always non-negative, 0 <= m < |r|.
            let r_abs = r.abs();
            Value::Integer(((&l % &r_abs) + &r_abs) % &r_abs)
        }
        Lt => Value::Boolean(l < r),
        Gt => Value::Boolean(l > r),
        LtEq => Value::Boolean(l <= r),
        GtEq => Value::Boolean(l >= r),
        Eq => Value::Boolean(l == r),
        NotEq => Value::Boolean(l != r),
        other => strange_operator("INTEGER", other, position),
    }
}

fn float_infix(l: f64, r: f64, operator: InfixOperator, position: &Position) -> Value {
    use InfixOperator::*;
    match operator {
        Plus => Value::Float(l + r),
        Minus => Value::Float(l - r),
        Asterisk => Value::Float(l * r),
        Slash => Value::Float(l / r),
        Lt => Value::Boolean(l < r),
        Gt => Value::Boolean(l > r),
        LtEq => Value::Boolean(l <= r),
        GtEq => Value::Boolean(l >= r),
        Eq => Value::Boolean(l == r),
        NotEq => Value::Boolean(l != r),
        other => strange_operator("FLOAT", other, position),
    }
}

fn string_infix(l: String, r: String, operator: InfixOperator, position: &Position) -> Value {
    use InfixOperator::*;
    match operator {
        Plus => Value::Str(l + &r),
        Lt => Value::Boolean(l < r),
        Gt => Value::Boolean(l > r),
        LtEq => Value::Boolean(l <= r),
        GtEq => Value::Boolean(l >= r),
        Eq => Value::Boolean(l == r),
        NotEq => Value::Boolean(l != r),
        other => strange_operator("STRING", other, position),
    }
}

fn boolean_infix(l: bool, r: bool, operator: InfixOperator, position: &Position) -> Value {
    use InfixOperator::*;
    match operator {
        Eq => Value::Boolean(l == r),
        NotEq => Value::Boolean(l != r),
        And => Value::Boolean(l && r),
        Or => Value::Boolean(l || r),
        other => strange_operator("BOOLEAN", other, position),
    }
}

fn array_infix(
    l: std::rc::Rc<std::cell::RefCell<crate::value::ArrayObj>>,
    r: std::rc::Rc<std::cell::RefCell<crate::value::ArrayObj>>,
    operator: InfixOperator,
    position: &Position,
) -> Value {
    match operator {
        InfixOperator::Plus => {
            let mut elements = l.borrow().elements.clone();
            elements.extend(r.borrow().elements.clone());
            Value::new_array(elements, Mutability::Immutable)
        }
        other => strange_operator("ARRAY", other, position),
    }
}

fn strange_operator(kind: &str, operator: InfixOperator, position: &Position) -> Value {
    Value::error(
        format!("strange operator: {kind} {operator} {kind}"),
        position.clone(),
    )
}
