use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;

use crate::evaluator::Evaluator;
use crate::token::Position;
use crate::value::{Mutability, NativeFn, Value};

/// The fixed builtin table from §6.2, built once and shared by every
/// `lookup` call rather than re-matched per call.
static BUILTINS: Lazy<HashMap<&'static str, NativeFn>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, NativeFn> = HashMap::new();
    table.insert("độ_dài", length);
    table.insert("kiểu", type_of);
    table.insert("thực", to_float);
    table.insert("nguyên", to_integer);
    table.insert("xâu", to_string_builtin);
    table.insert("in_ra", print_values);
    table.insert("đầu", first);
    table.insert("đuôi", last);
    table.insert("trừ_đầu", rest);
    table.insert("đẩy", push);
    table.insert("sử_dụng", use_module);
    table.insert("thoát", exit);
    table.insert("thăm_dò", probe);
    table
});

/// Looks a name up in the fixed builtin table (§6.2); `None` means the
/// name isn't a recognised builtin, so the caller falls through to its own
/// "unknown identifier" error.
pub fn lookup(name: &str) -> Option<Value> {
    let (&name, &f) = BUILTINS.get_key_value(name)?;
    Some(Value::Builtin(name, f))
}

fn wrong_args(name: &str, expected: &str, got: usize, position: &Position) -> Value {
    Value::error(
        format!("wrong number of arguments to {name}: expected {expected}, got {got}"),
        position.clone(),
    )
}

fn wrong_type(name: &str, value: &Value, position: &Position) -> Value {
    Value::error(
        format!("wrong argument type to {name}: got {}", value.type_tag()),
        position.clone(),
    )
}

fn length(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("độ_dài", "1", args.len(), position);
    }
    match &args[0] {
        Value::Str(s) => Value::Integer(BigInt::from(s.chars().count())),
        Value::Array(arr) => Value::Integer(BigInt::from(arr.borrow().elements.len())),
        other => wrong_type("độ_dài", other, position),
    }
}

fn type_of(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("kiểu", "1", args.len(), position);
    }
    Value::Str(args[0].type_tag().to_string())
}

fn to_float(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("thực", "1", args.len(), position);
    }
    match &args[0] {
        Value::Integer(i) => Value::Float(i.to_f64().unwrap_or(f64::NAN)),
        Value::Float(f) => Value::Float(*f),
        other => wrong_type("thực", other, position),
    }
}

fn to_integer(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("nguyên", "1", args.len(), position);
    }
    match &args[0] {
        Value::Integer(i) => Value::Integer(i.clone()),
        Value::Float(f) => Value::Integer(BigInt::from(f.trunc() as i64)),
        other => wrong_type("nguyên", other, position),
    }
}

fn to_string_builtin(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("xâu", "1", args.len(), position);
    }
    Value::Str(args[0].inspect())
}

fn print_values(_: &mut Evaluator, _position: &Position, args: Vec<Value>) -> Value {
    let rendered: Vec<String> = args.iter().map(|v| v.inspect()).collect();
    println!("{}", rendered.join(" "));
    Value::Null
}

fn first(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("đầu", "1", args.len(), position);
    }
    match &args[0] {
        Value::Array(arr) => arr.borrow().elements.first().cloned().unwrap_or(Value::Null),
        other => wrong_type("đầu", other, position),
    }
}

fn last(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("đuôi", "1", args.len(), position);
    }
    match &args[0] {
        Value::Array(arr) => arr.borrow().elements.last().cloned().unwrap_or(Value::Null),
        other => wrong_type("đuôi", other, position),
    }
}

fn rest(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("trừ_đầu", "1", args.len(), position);
    }
    match &args[0] {
        Value::Array(arr) => {
            let elements = &arr.borrow().elements;
            if elements.is_empty() {
                Value::Null
            } else {
                Value::new_array(elements[1..].to_vec(), Mutability::Immutable)
            }
        }
        other => wrong_type("trừ_đầu", other, position),
    }
}

fn push(_: &mut Evaluator, position: &Position, mut args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return wrong_args("đẩy", "2", args.len(), position);
    }
    let element = args.pop().unwrap();
    match args.pop().unwrap() {
        Value::Array(arr) => {
            let mutable = arr.borrow().mutability == Mutability::Mutable;
            if mutable {
                arr.borrow_mut().elements.push(element);
                Value::Array(arr)
            } else {
                let mut elements = arr.borrow().elements.clone();
                elements.push(element);
                Value::new_array(elements, Mutability::Immutable)
            }
        }
        other => wrong_type("đẩy", &other, position),
    }
}

fn use_module(evaluator: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_args("sử_dụng", "1", args.len(), position);
    }
    match &args[0] {
        Value::Str(path) => evaluator.import_file(path, position),
        other => wrong_type("sử_dụng", other, position),
    }
}

fn exit(_: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if args.len() > 1 {
        return wrong_args("thoát", "0 or 1", args.len(), position);
    }
    let code = match args.first() {
        Some(Value::Integer(i)) => i.to_i32().unwrap_or(0),
        Some(other) => return wrong_type("thoát", other, position),
        None => 0,
    };
    std::process::exit(code);
}

fn probe(evaluator: &mut Evaluator, position: &Position, args: Vec<Value>) -> Value {
    if !args.is_empty() {
        return wrong_args("thăm_dò", "0", args.len(), position);
    }
    crate::repl::run_nested(evaluator);
    Value::Null
}
