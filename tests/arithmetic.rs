mod common;

use common::{eval, inspect};
use vnlang::value::Value;

#[test]
fn let_bindings_and_addition() {
    let result = eval("đặt a = 5; đặt b = a; đặt c = a + b + 5; c;");
    assert_eq!(inspect("đặt a = 5; đặt b = a; đặt c = a + b + 5; c;"), "15");
    assert!(matches!(result, Value::Integer(_)));
}

#[test]
fn bigint_does_not_overflow_i64() {
    let result = inspect("9223372036854775807 + 9223372036854775807;");
    assert_eq!(result, "18446744073709551614");
}

#[test]
fn integer_division_truncates_toward_zero() {
    assert_eq!(inspect("7 / 2;"), "3");
    assert_eq!(inspect("-7 / 2;"), "-3");
}

#[test]
fn modulo_is_euclidean_and_always_non_negative() {
    assert_eq!(inspect("-7 % 3;"), "2");
    assert_eq!(inspect("7 % -3;"), "1");
    assert_eq!(inspect("-7 % -3;"), "2");
}

#[test]
fn division_by_zero_is_an_error() {
    let result = eval("5 / 0;");
    assert!(matches!(result, Value::Error { .. }));
}

#[test]
fn float_arithmetic() {
    assert_eq!(inspect("1.5 + 2.5;"), "4");
}

#[test]
fn string_concatenation() {
    assert_eq!(inspect(r#""Hello" + " " + "World!";"#), "Hello World!");
}
