mod common;

use common::inspect;

#[test]
fn early_return_short_circuits_the_function_body() {
    assert_eq!(
        inspect("đặt f = hàm(x) { trả_về x; x + 10; }; f(10);"),
        "10"
    );
}

#[test]
fn nested_closures_capture_the_outer_argument() {
    assert_eq!(
        inspect("đặt newAdder = hàm(x) { hàm(y) { x + y } }; newAdder(2)(2);"),
        "4"
    );
}

#[test]
fn recursive_closure_sees_its_own_binding() {
    let src = r#"
        đặt fact = hàm(n) {
            nếu (n <= 1) {
                trả_về 1;
            }
            trả_về n * fact(n - 1);
        };
        fact(10);
    "#;
    assert_eq!(inspect(src), "3628800");
}

#[test]
fn each_call_gets_its_own_activation_scope() {
    let src = r#"
        đặt counter = hàm() {
            đặt n = 0;
            hàm() { n }
        };
        đặt a = counter();
        đặt b = counter();
        a();
    "#;
    assert_eq!(inspect(src), "0");
}
