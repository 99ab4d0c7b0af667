mod common;

use common::{eval, inspect};
use vnlang::value::Value;

#[test]
fn literal_lookup() {
    assert_eq!(inspect(r#"{"one": 1, "two": 2}["two"];"#), "2");
}

#[test]
fn bare_identifier_key_desugars_to_string_key() {
    let src = r#"
        đặt name = "Monkey";
        {name}["name"];
    "#;
    assert_eq!(inspect(src), "Monkey");
}

#[test]
fn duplicate_keys_overwrite_earlier_entries() {
    assert_eq!(inspect(r#"{"a": 1, "a": 2}["a"];"#), "2");
}

#[test]
fn dot_expression_desugars_to_string_index() {
    assert_eq!(inspect(r#"{"name": "Monkey"}.name;"#), "Monkey");
}

#[test]
fn function_keys_are_not_hashable() {
    let result = eval(r#"{"name":"Monkey"}[hàm(x){x}];"#);
    match result {
        Value::Error { message, .. } => assert_eq!(message, "not hashable: FUNCTION"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn thuoc_tests_key_presence() {
    assert_eq!(inspect(r#""a" thuộc {"a": 1};"#), "true");
    assert_eq!(inspect(r#""b" thuộc {"a": 1};"#), "false");
}

#[test]
fn indexing_an_integer_is_unsupported() {
    let result = eval("999[1];");
    match result {
        Value::Error { message, .. } => {
            assert_eq!(message, "index operator not supported for: INTEGER")
        }
        other => panic!("expected error, got {other:?}"),
    }
}
