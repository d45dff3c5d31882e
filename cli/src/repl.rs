use crate::error_formatter;
use crate::formatter::Printer;
use anyhow::Result;
use crossterm::tty::IsTty;
use directories::ProjectDirs;
use prelog::Session;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::debug;

const PROMPT: &str = "?- ";
const CONTINUATION_PROMPT: &str = ".. ";

/// What happened to one submitted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Done,
    Failed,
    Exit,
}

/// Sends one batch of source to the session, reporting parse errors on stderr.
pub fn submit(session: &mut Session<Printer>, source_id: &str, batch: &str) -> Submission {
    let outcome = match session.send_code(batch) {
        Ok(()) => Submission::Done,
        Err(e) => {
            eprintln!("{}", error_formatter::format_error(&e, source_id, batch));
            Submission::Failed
        }
    };
    let printer = session.sink_mut();
    match printer.take_exit() {
        Some(program) => {
            println!("{}", printer.formatter().format_exit(&program));
            Submission::Exit
        }
        None => outcome,
    }
}

/// Joins input lines until every opened group is closed again.
#[derive(Debug, Default)]
pub struct Batcher {
    pending: String,
}

impl Batcher {
    pub fn is_pending(&self) -> bool {
        !self.pending.trim().is_empty()
    }

    /// Adds a line; returns the batch once it is complete.
    pub fn push(&mut self, line: &str) -> Option<String> {
        self.pending.push_str(line);
        self.pending.push('\n');
        if open_groups(&self.pending) > 0 {
            return None;
        }
        self.finish()
    }

    /// Whatever is pending, complete or not
    pub fn finish(&mut self) -> Option<String> {
        let batch = std::mem::take(&mut self.pending);
        if batch.trim().is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Opening delimiters minus closing ones, outside strings and comments.
pub fn open_groups(source: &str) -> i64 {
    let mut depth = 0;
    let mut in_string = false;
    let mut in_comment = false;
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        if in_comment {
            in_comment = c != '\n';
            continue;
        }
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '#' => in_comment = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
    }
    // An unterminated string keeps the batch open.
    if in_string {
        depth.max(1)
    } else {
        depth
    }
}

/// Reads batches from stdin until exit or end of input.
pub fn run(session: &mut Session<Printer>) -> Result<()> {
    if io::stdin().is_tty() {
        run_editor(session)
    } else {
        run_lines(session, io::stdin().lock())
    }
}

fn history_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("org", "prelog", "prelog")?;
    let dir = dirs.config_dir();
    std::fs::create_dir_all(dir).ok()?;
    Some(dir.join("history.txt"))
}

fn run_editor(session: &mut Session<Printer>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        if editor.load_history(path).is_err() {
            debug!(path = %path.display(), "no previous history");
        }
    }

    let mut batcher = Batcher::default();
    loop {
        let prompt = if batcher.is_pending() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                batcher.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let Some(batch) = batcher.push(&line) else {
            continue;
        };
        editor.add_history_entry(batch.trim_end())?;
        if submit(session, "<repl>", &batch) == Submission::Exit {
            break;
        }
    }

    if let Some(path) = &history {
        editor.save_history(path)?;
    }
    Ok(())
}

fn run_lines(session: &mut Session<Printer>, input: impl BufRead) -> Result<()> {
    let mut batcher = Batcher::default();
    for line in input.lines() {
        let line = line?;
        if let Some(batch) = batcher.push(&line) {
            if submit(session, "<stdin>", &batch) == Submission::Exit {
                return Ok(());
            }
        }
    }
    if let Some(batch) = batcher.finish() {
        submit(session, "<stdin>", &batch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_groups_counts_delimiters() {
        assert_eq!(open_groups("def x 1"), 0);
        assert_eq!(open_groups("def x (proc"), 1);
        assert_eq!(open_groups("[{ (a"), 3);
        assert_eq!(open_groups("a)"), -1);
    }

    #[test]
    fn test_open_groups_ignores_strings_and_comments() {
        assert_eq!(open_groups("\"(\" # ( [\n"), 0);
        assert_eq!(open_groups("\"a \\\" (\""), 0);
        assert_eq!(open_groups("\"open"), 1);
    }

    #[test]
    fn test_batcher_joins_continued_lines() {
        let mut batcher = Batcher::default();
        assert_eq!(batcher.push("def greet (proc"), None);
        assert!(batcher.is_pending());
        assert_eq!(
            batcher.push("  \"hello\")").as_deref(),
            Some("def greet (proc\n  \"hello\")\n")
        );
        assert!(!batcher.is_pending());
    }

    #[test]
    fn test_batcher_skips_blank_lines() {
        let mut batcher = Batcher::default();
        assert_eq!(batcher.push("   "), None);
        assert_eq!(batcher.finish(), None);
    }

    #[test]
    fn test_batcher_releases_unbalanced_closer() {
        let mut batcher = Batcher::default();
        assert_eq!(batcher.push("a )").as_deref(), Some("a )\n"));
    }
}
