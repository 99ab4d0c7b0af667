use vnlang::evaluator::Evaluator;
use vnlang::parser::parse_program;
use vnlang::value::Value;

/// Writes a module file, runs an importing script against it in a fresh
/// evaluator rooted at the importer's directory, and returns the result.
fn run_with_module(module_source: &str, importer_source: &str) -> Value {
    let dir = tempfile::tempdir().expect("tempdir");
    let module_path = dir.path().join("mod.vn");
    std::fs::write(&module_path, module_source).expect("write module");

    let importer_path = dir.path().join("main.vn");
    std::fs::write(&importer_path, importer_source).expect("write importer");

    let (program, errors) = parse_program(importer_path.to_string_lossy().to_string(), importer_source);
    assert!(errors.is_empty(), "parse errors: {errors:?}");

    let mut evaluator = Evaluator::new(importer_path.to_string_lossy().to_string());
    evaluator.eval_program(&program)
}

#[test]
fn import_harvests_the_export_binding() {
    let result = run_with_module(
        r#"đặt xuất = 42;"#,
        r#"đặt mod = sử_dụng("mod.vn"); mod;"#,
    );
    assert_eq!(result.inspect(), "42");
}

#[test]
fn import_without_an_export_binding_yields_null() {
    let result = run_with_module(r#"đặt secret = 1;"#, r#"sử_dụng("mod.vn");"#);
    assert_eq!(result.inspect(), "null");
}

#[test]
fn module_internals_are_not_visible_to_the_importer() {
    let result = run_with_module(
        r#"đặt secret = 1; đặt xuất = 2;"#,
        r#"sử_dụng("mod.vn"); secret;"#,
    );
    match result {
        Value::Error { message, .. } => assert_eq!(message, "unknown identifier: secret"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn exported_function_closes_over_its_module_scope() {
    let result = run_with_module(
        r#"
            đặt base = 100;
            đặt xuất = hàm(n) { base + n };
        "#,
        r#"
            đặt add_base = sử_dụng("mod.vn");
            add_base(5);
        "#,
    );
    assert_eq!(result.inspect(), "105");
}
