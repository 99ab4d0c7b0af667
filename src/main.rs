use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser as _;
use colored::Colorize;
use log::{debug, info};

use vnlang::cli::Cli;
use vnlang::evaluator::Evaluator;
use vnlang::parser::error::render_errors;
use vnlang::parser::parse_program;
use vnlang::value::{Mutability, Value};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    simple_logger::init_with_level(level.to_level().unwrap_or(log::Level::Info))
        .unwrap_or_else(|err| eprintln!("could not install logger: {err}"));

    if let Some(perf_out) = &args.perf_out {
        debug!(
            "profiling hook -đo_đạc {} accepted but not implemented; see DESIGN.md",
            perf_out.display()
        );
    }

    let Some(script) = args.script.clone() else {
        return vnlang::repl::run();
    };

    let source = std::fs::read_to_string(&script)
        .map_err(|e| anyhow::anyhow!("could not open file {}: {e}", script.display()))?;

    let file_name = script.to_string_lossy().to_string();
    info!("running {file_name}");

    let (program, errors) = parse_program(file_name.clone(), &source);
    if !errors.is_empty() {
        eprintln!("{}", render_errors(&errors).red());
        std::process::exit(1);
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(interrupt.clone());

    let mut evaluator = Evaluator::with_interrupt(file_name, interrupt);
    bind_script_args(&mut evaluator, &script, &args.args);

    let result = evaluator.eval_program(&program);
    match result {
        Value::Null => Ok(()),
        Value::Error {
            message,
            position,
            stack,
        } => {
            let (file, line, col) = position;
            eprintln!("{} {file}:{line}:{col}: {message}", "LỖI".red().bold());
            vnlang::repl::print_stack_frames(&stack);
            std::process::exit(1);
        }
        other => {
            println!("{}", other.inspect());
            Ok(())
        }
    }
}

/// Binds `tham_số` to an Array of String arguments starting at the script
/// path, per §6.1.
fn bind_script_args(evaluator: &mut Evaluator, script: &std::path::Path, trailing: &[String]) {
    let mut elements = vec![Value::Str(script.to_string_lossy().to_string())];
    elements.extend(trailing.iter().cloned().map(Value::Str));
    evaluator
        .env
        .borrow_mut()
        .set("tham_số", Value::new_array(elements, Mutability::Immutable));
}

fn install_interrupt_handler(interrupt: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        interrupt.store(true, std::sync::atomic::Ordering::SeqCst);
    });
    if let Err(err) = result {
        log::warn!("could not install interrupt handler: {err}");
    }
}
