mod common;

use common::inspect;

#[test]
fn mutable_array_index_assignment() {
    assert_eq!(
        inspect("đặt a = biến [1,2,3]; a[1] = 9; a;"),
        "[1, 9, 3]"
    );
}

#[test]
fn immutable_array_index_assignment_is_an_error() {
    let result = common::eval("đặt a = [1,2,3]; a[1] = 9;");
    assert!(matches!(result, vnlang::value::Value::Error { .. }));
}

#[test]
fn mut_const_round_trip_is_structurally_equal_but_mutable() {
    let src = r#"
        đặt a = biến (hằng (biến [1, 2, 3]));
        a[0] = 99;
        a;
    "#;
    assert_eq!(inspect(src), "[99, 2, 3]");
}

#[test]
fn const_and_mut_never_alias_the_source() {
    let src = r#"
        đặt a = biến [1, 2, 3];
        đặt b = hằng a;
        a[0] = 99;
        b;
    "#;
    assert_eq!(inspect(src), "[1, 2, 3]");
}

#[test]
fn hash_autovivification_on_mutable_hash() {
    let src = r#"
        đặt h = biến {};
        h["x"] = 1;
        h["x"];
    "#;
    assert_eq!(inspect(src), "1");
}

#[test]
fn indexing_absent_key_on_immutable_hash_is_null() {
    assert_eq!(inspect(r#"{"a": 1}["b"];"#), "null");
}
