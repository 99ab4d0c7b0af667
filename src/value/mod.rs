pub mod function;
pub mod hashkey;
pub mod reference;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;

pub use function::Function;
pub use hashkey::HashKey;
pub use reference::Ref;

use crate::token::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Immutable,
    Mutable,
}

#[derive(Debug, Clone)]
pub struct ArrayObj {
    pub elements: Vec<Value>,
    pub mutability: Mutability,
}

#[derive(Debug, Clone)]
pub struct HashObj {
    /// Insertion-ordered so `Inspect()` output is deterministic; lookups
    /// are linear, which is fine for a tree-walking interpreter's scale.
    pub pairs: Vec<(HashKey, Value, Value)>,
    pub mutability: Mutability,
}

/// One activation record: the position of the call, a rendering of the
/// callee, and renderings of the arguments, kept for diagnostic printing
/// rather than the live AST/Value themselves, so a frame can outlive the
/// call it describes.
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub position: Position,
    pub callee: String,
    pub args: Vec<String>,
}

pub type NativeFn = fn(&mut crate::evaluator::Evaluator, &Position, Vec<Value>) -> Value;

#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(BigInt),
    Float(f64),
    Str(String),
    Array(Rc<RefCell<ArrayObj>>),
    Hash(Rc<RefCell<HashObj>>),
    Function(Rc<Function>),
    Builtin(&'static str, NativeFn),
    ReturnValue(Box<Value>),
    BreakSignal,
    ContinueSignal,
    Error {
        message: String,
        position: Position,
        stack: Vec<CallFrame>,
    },
    Ref(Ref),
}

impl Value {
    pub fn new_array(elements: Vec<Value>, mutability: Mutability) -> Self {
        Value::Array(Rc::new(RefCell::new(ArrayObj {
            elements,
            mutability,
        })))
    }

    pub fn new_hash(pairs: Vec<(HashKey, Value, Value)>, mutability: Mutability) -> Self {
        Value::Hash(Rc::new(RefCell::new(HashObj { pairs, mutability })))
    }

    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Value::Error {
            message: message.into(),
            position,
            stack: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error { .. })
    }

    /// Non-local control values that must short-circuit everything up to
    /// the construct that consumes them (loop, function call, or the top
    /// of the program).
    pub fn is_control_signal(&self) -> bool {
        matches!(
            self,
            Value::ReturnValue(_) | Value::BreakSignal | Value::ContinueSignal | Value::Error { .. }
        )
    }

    pub fn truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Unwraps a `Ref` to the value it points at; a no-op on every other
    /// variant. Called before any R-value use.
    pub fn unwrap_ref(self) -> Value {
        match self {
            Value::Ref(r) => r.get(),
            other => other,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(_) => "BOOLEAN",
            Value::Integer(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::Str(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(..) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::BreakSignal => "BREAK",
            Value::ContinueSignal => "CONTINUE",
            Value::Error { .. } => "ERROR",
            Value::Ref(_) => "REF",
        }
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(i) => Some(HashKey::for_integer(i)),
            Value::Boolean(b) => Some(HashKey::for_boolean(*b)),
            Value::Str(s) => Some(HashKey::for_string(s)),
            _ => None,
        }
    }

    /// The human-readable form the `xâu` builtin and the REPL print, and
    /// the form nested containers use for their own elements.
    pub fn inspect(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
            Value::Array(arr) => {
                let elements: Vec<String> =
                    arr.borrow().elements.iter().map(|v| v.inspect()).collect();
                format!("[{}]", elements.join(", "))
            }
            Value::Hash(hash) => {
                let pairs: Vec<String> = hash
                    .borrow()
                    .pairs
                    .iter()
                    .map(|(_, k, v)| format!("{}: {}", k.inspect(), v.inspect()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            Value::Function(f) => format!("hàm({}) {{ ... }}", f.params.join(", ")),
            Value::Builtin(name, _) => format!("builtin {name}"),
            Value::ReturnValue(v) => v.inspect(),
            Value::BreakSignal => "break".to_string(),
            Value::ContinueSignal => "continue".to_string(),
            Value::Error { message, .. } => format!("ERROR: {message}"),
            Value::Ref(r) => r.get().inspect(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_tag(), self.inspect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.borrow().elements == b.borrow().elements
            }
            (Value::Hash(a), Value::Hash(b)) => {
                let a = a.borrow();
                let b = b.borrow();
                a.pairs.len() == b.pairs.len()
                    && a.pairs.iter().all(|(k, _, v)| {
                        b.pairs
                            .iter()
                            .any(|(k2, _, v2)| k == k2 && v == v2)
                    })
            }
            _ => false,
        }
    }
}
