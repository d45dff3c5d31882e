use thiserror::Error;

/// Span representing a location in source code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }
}

/// Host-level errors.
///
/// Failures of the language itself are values (see [`crate::Value::Error`]);
/// these errors only describe violated contracts of the host: unreadable
/// source text, a callable reading past the end of its input, or an exceeded
/// resource limit. The interpreter converts them into syntax error values at
/// a single boundary.
#[derive(Debug, Clone, Error)]
pub enum PrelogError {
    /// Source text does not match the grammar
    #[error("Parse error: {message} at {}:{}", .span.line, .span.col)]
    Parse { message: String, span: Span },

    /// A callable needed more input than was pending
    #[error("{expected} expected")]
    UnexpectedEnd { expected: &'static str },

    /// A configured resource limit was exceeded
    #[error("Resource limit exceeded: {limit_name} (limit {limit_value}, got {actual_value})")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
    },
}

impl PrelogError {
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::Parse {
            message: message.into(),
            span,
        }
    }

    pub fn limit_exceeded(
        limit_name: impl Into<String>,
        limit_value: impl ToString,
        actual_value: impl ToString,
    ) -> Self {
        Self::ResourceLimitExceeded {
            limit_name: limit_name.into(),
            limit_value: limit_value.to_string(),
            actual_value: actual_value.to_string(),
        }
    }
}
