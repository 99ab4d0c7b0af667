use vnlang::evaluator::Evaluator;
use vnlang::parser::parse_program;
use vnlang::value::Value;

/// Parses and evaluates a whole program in a fresh evaluator, panicking on
/// parse errors so a test failure points straight at the syntax mistake
/// rather than an opaque `Null`.
pub fn eval(source: &str) -> Value {
    let (program, errors) = parse_program("<test>", source);
    assert!(
        errors.is_empty(),
        "unexpected parse errors: {}",
        vnlang::parser::error::render_errors(&errors)
    );
    let mut evaluator = Evaluator::new("<test>");
    evaluator.eval_program(&program)
}

pub fn inspect(source: &str) -> String {
    eval(source).inspect()
}
