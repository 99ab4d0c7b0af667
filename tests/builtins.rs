mod common;

use common::inspect;

#[test]
fn do_dai_on_string_and_array() {
    assert_eq!(inspect(r#"độ_dài("hello");"#), "5");
    assert_eq!(inspect("độ_dài([1,2,3]);"), "3");
}

#[test]
fn kieu_reports_the_type_tag() {
    assert_eq!(inspect("kiểu(5);"), "INTEGER");
    assert_eq!(inspect(r#"kiểu("x");"#), "STRING");
    assert_eq!(inspect("kiểu([1]);"), "ARRAY");
}

#[test]
fn thuc_and_nguyen_coerce_between_numeric_kinds() {
    assert_eq!(inspect("thực(5);"), "5");
    assert_eq!(inspect("nguyên(5.9);"), "5");
}

#[test]
fn xau_inspects_any_value_as_a_string() {
    assert_eq!(inspect("xâu([1, 2]);"), "[1, 2]");
}

#[test]
fn dau_duoi_tru_dau_on_arrays() {
    assert_eq!(inspect("đầu([1,2,3]);"), "1");
    assert_eq!(inspect("đuôi([1,2,3]);"), "3");
    assert_eq!(inspect("trừ_đầu([1,2,3]);"), "[2, 3]");
}

#[test]
fn dau_duoi_on_empty_array_is_null() {
    assert_eq!(inspect("đầu([]);"), "null");
    assert_eq!(inspect("đuôi([]);"), "null");
    assert_eq!(inspect("trừ_đầu([]);"), "null");
}

#[test]
fn day_on_immutable_array_returns_a_new_array() {
    let src = r#"
        đặt a = [1, 2];
        đặt b = đẩy(a, 3);
        xâu(a) + " " + xâu(b);
    "#;
    assert_eq!(inspect(src), "[1, 2] [1, 2, 3]");
}

#[test]
fn day_on_mutable_array_mutates_in_place() {
    let src = r#"
        đặt a = biến [1, 2];
        đẩy(a, 3);
        a;
    "#;
    assert_eq!(inspect(src), "[1, 2, 3]");
}
