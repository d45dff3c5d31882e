use ariadne::{Color, Label, Report, ReportKind, Source};
use prelog::PrelogError;

/// Format a PrelogError with fancy terminal output using Ariadne
pub fn format_error(error: &PrelogError, source_id: &str, source: &str) -> String {
    match error {
        PrelogError::Parse { message, span } => {
            let mut output = Vec::new();

            let start = span.start.min(source.len());
            let end = if span.end > start {
                span.end.min(source.len())
            } else {
                (start + 1).min(source.len())
            };

            let report = Report::build(ReportKind::Error, source_id, start)
                .with_message(format!(
                    "Parse error: {} (at {}:{}:{})",
                    message, source_id, span.line, span.col
                ))
                .with_label(
                    Label::new((source_id, start..end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            match report
                .finish()
                .write((source_id, Source::from(source)), &mut output)
            {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        PrelogError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}",
                limit_name, limit_value, actual_value
            )
        }
        PrelogError::UnexpectedEnd { .. } => format!("Error: {}", error),
    }
}
