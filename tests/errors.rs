mod common;

use common::eval;
use vnlang::value::Value;

fn error_message(result: Value) -> String {
    match result {
        Value::Error { message, .. } => message,
        other => panic!("expected an Error value, got {other:?}"),
    }
}

#[test]
fn unknown_identifier() {
    let message = error_message(eval("foo_bar_baz;"));
    assert_eq!(message, "unknown identifier: foo_bar_baz");
}

#[test]
fn calling_a_non_function() {
    let message = error_message(eval("5();"));
    assert!(message.contains("not a function"));
}

#[test]
fn wrong_argument_count() {
    let message = error_message(eval("đặt f = hàm(x, y) { x + y }; f(1);"));
    assert!(message.contains("wrong number of arguments"));
}

#[test]
fn assigning_to_a_non_ref_is_rejected() {
    let message = error_message(eval("5 = 6;"));
    assert_eq!(message, "left side is not assignable");
}

#[test]
fn negating_a_non_numeric_value_is_an_error() {
    let message = error_message(eval(r#"-"nope";"#));
    assert!(message.starts_with("unknown operator: -"));
}

#[test]
fn errors_propagate_through_arithmetic_without_being_evaluated_twice() {
    let message = error_message(eval("1 + foo_bar_baz;"));
    assert_eq!(message, "unknown identifier: foo_bar_baz");
}

#[test]
fn errors_carry_the_call_stack_at_the_point_they_were_raised() {
    let result = eval(
        r#"
        đặt inner = hàm() { unknown_name };
        đặt outer = hàm() { inner() };
        outer();
        "#,
    );
    match result {
        Value::Error { stack, .. } => assert!(!stack.is_empty()),
        other => panic!("expected error, got {other:?}"),
    }
}
