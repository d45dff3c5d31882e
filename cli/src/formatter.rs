use crossterm::style::Stylize;
use prelog::{Sink, Syntax};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct Formatter {
    format: OutputFormat,
    color: bool,
}

impl Formatter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// One emitted term, rendered on a single line
    pub fn format_term(&self, term: &Syntax) -> String {
        match self.format {
            OutputFormat::Json => to_json_line(&json!(term)),
            OutputFormat::Text if self.color && is_error_term(term) => {
                term.to_string().red().to_string()
            }
            OutputFormat::Text => term.to_string(),
        }
    }

    /// The final program reported by the exit command
    pub fn format_exit(&self, program: &Syntax) -> String {
        match self.format {
            OutputFormat::Json => to_json_line(&json!({ "exit": program })),
            OutputFormat::Text => program.to_string(),
        }
    }
}

fn to_json_line(value: &serde_json::Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

/// Reflected error values are lists headed by the `error` symbol.
fn is_error_term(term: &Syntax) -> bool {
    matches!(term, Syntax::List(items) if items.first().and_then(Syntax::as_symbol) == Some("error"))
}

/// Sink that prints every emitted term to stdout as it arrives.
pub struct Printer {
    formatter: Formatter,
    exit: Option<Syntax>,
}

impl Printer {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            exit: None,
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// The program reported by a pending exit request, if any
    pub fn take_exit(&mut self) -> Option<Syntax> {
        self.exit.take()
    }
}

impl Sink for Printer {
    fn emit(&mut self, term: Syntax) {
        println!("{}", self.formatter.format_term(&term));
    }

    fn exit(&mut self, program: Syntax) {
        self.exit = Some(program);
    }
}
