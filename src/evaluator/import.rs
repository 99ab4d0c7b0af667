use std::path::{Path, PathBuf};

use crate::environment::Environment;
use crate::parser::error::render_errors;
use crate::parser::parse_program;
use crate::token::Position;
use crate::value::Value;

use super::Evaluator;

impl Evaluator {
    /// Implements `sử_dụng`: run `path` in a fresh environment (sharing
    /// this evaluator's builtins and call stack) and harvest the `xuất`
    /// binding, per §4.5.
    pub fn import_file(&mut self, path: &str, position: &Position) -> Value {
        let resolved = self.resolve_import_path(path);
        let source = match std::fs::read_to_string(&resolved) {
            Ok(s) => s,
            Err(e) => {
                return Value::error(
                    format!("could not open file {}: {e}", resolved.display()),
                    position.clone(),
                )
            }
        };

        let (program, errors) = parse_program(resolved.to_string_lossy().to_string(), &source);
        if !errors.is_empty() {
            return Value::error(render_errors(&errors), position.clone());
        }

        let fresh_env = Environment::new();
        let previous_env = std::mem::replace(&mut self.env, fresh_env);
        let previous_file = std::mem::replace(&mut self.file, resolved.to_string_lossy().to_string());
        let result = self.eval_program(&program);
        let module_env = std::mem::replace(&mut self.env, previous_env);
        self.file = previous_file;

        if result.is_error() {
            return result;
        }

        module_env.borrow().get("xuất").unwrap_or(Value::Null)
    }

    fn resolve_import_path(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            return candidate.to_path_buf();
        }
        match Path::new(&self.file).parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(candidate),
            _ => candidate.to_path_buf(),
        }
    }
}
