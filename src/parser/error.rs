use std::fmt;

use colored::Colorize;

use crate::token::Position;

/// A single accumulated parse error. The parser never aborts on one of
/// these; it records it and keeps going so a single run can report more
/// than one syntax mistake.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
    pub line_text: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position, line_text: Option<String>) -> Self {
        Self {
            message: message.into(),
            position,
            line_text,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (file, line, col) = &self.position;
        writeln!(
            f,
            "{} {}:{}:{}: {}",
            "parse error".red().bold(),
            file,
            line,
            col,
            self.message
        )?;
        if let Some(text) = &self.line_text {
            writeln!(f, "  {line} | {text}")?;
            let pad = " ".repeat(line.to_string().len()) + "  | ";
            let caret_pad = if *col > 0 { col - 1 } else { 0 };
            writeln!(f, "{}{}{}", pad, " ".repeat(caret_pad), "^".red())?;
        }
        Ok(())
    }
}

/// Renders the full accumulated error list as the single aggregated
/// message a caller (the evaluator's `Error` value, or the CLI) sees.
pub fn render_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
