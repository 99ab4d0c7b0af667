use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::evaluator::Evaluator;
use crate::parser::error::render_errors;
use crate::parser::parse_one_statement;
use crate::value::Value;

const PROMPT: &str = ">> ";
const GREETING: &str = "Chào mừng bạn đến với VNlang!";

/// The top-level REPL: installs a SIGINT handler that flips the
/// evaluator's interrupt flag (§4.4), then reads and evaluates exactly
/// one statement per prompt (§4.6).
pub fn run() -> anyhow::Result<()> {
    println!("{GREETING}");

    let interrupt = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(interrupt.clone());

    let mut evaluator = Evaluator::with_interrupt("<repl>", interrupt);
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                eval_and_print(&mut evaluator, &line);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                log::error!("readline error: {err}");
                break;
            }
        }
    }

    Ok(())
}

/// `thăm_dò`'s nested prompt: same loop, but bound to the caller's live
/// environment instead of a fresh one, and exits back to the caller on
/// EOF (^D) rather than terminating the process.
pub fn run_nested(parent: &mut Evaluator) {
    let mut evaluator = parent.child_with_env(parent.env.clone());
    let mut editor = match DefaultEditor::new() {
        Ok(e) => e,
        Err(err) => {
            log::error!("could not start nested REPL: {err}");
            return;
        }
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                eval_and_print(&mut evaluator, &line);
            }
            Err(ReadlineError::Interrupted) => continue,
            _ => break,
        }
    }
}

fn eval_and_print(evaluator: &mut Evaluator, line: &str) {
    let (stmt, errors) = parse_one_statement(line);
    if !errors.is_empty() {
        eprintln!("{}", render_errors(&errors).red());
        return;
    }
    let Some(stmt) = stmt else {
        return;
    };

    let program = crate::ast::Program::new(vec![stmt]);
    let result = evaluator.eval_program(&program);
    print_result(&result);
}

fn print_result(result: &Value) {
    match result {
        Value::Null => {}
        Value::Error {
            message,
            position,
            stack,
        } => {
            let (file, line, col) = position;
            eprintln!("{} {file}:{line}:{col}: {message}", "LỖI".red().bold());
            print_stack_frames(stack);
        }
        other => println!("{}", other.inspect()),
    }
}

const MAX_FRAMES: usize = 10;

/// Prints up to `MAX_FRAMES` call-stack frames, newest-first, per §6.3.
/// Shared between the REPL's own error printing and the script-mode CLI.
pub fn print_stack_frames(stack: &[crate::value::CallFrame]) {
    for (i, frame) in stack.iter().rev().take(MAX_FRAMES).enumerate() {
        let (file, line, col) = &frame.position;
        eprintln!(
            "  {i}: {file}:{line}:{col}: {}({})",
            frame.callee,
            frame.args.join(", ")
        );
    }
    if stack.len() > MAX_FRAMES {
        eprintln!("  ...");
    }
}

fn install_interrupt_handler(interrupt: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        interrupt.store(true, Ordering::SeqCst);
    });
    if let Err(err) = result {
        log::warn!("could not install interrupt handler: {err}");
    }
}
