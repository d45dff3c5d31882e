mod error_formatter;
mod formatter;
mod repl;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crossterm::tty::IsTty;
use formatter::{Formatter, OutputFormat, Printer};
use prelog::{ResourceLimits, Session};
use repl::{Batcher, Submission};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "prelog")]
#[command(about = "Logic through shortcut combinators.")]
#[command(
    long_about = "Prelog accumulates clauses into a single program value, combining them through a ranked lattice.\nWithout a command the CLI starts an interactive session; it can also run .prelog files or evaluate a single line."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: Options,
}

#[derive(Args, Clone, Copy)]
struct Options {
    /// Print every result as one JSON document per line
    #[arg(long, global = true)]
    json: bool,

    /// Maximum nesting of groups and deferred bodies
    #[arg(long, global = true, default_value_t = ResourceLimits::default().max_depth)]
    max_depth: usize,

    /// Maximum application steps for a single term
    #[arg(long, global = true, default_value_t = ResourceLimits::default().max_apply_steps)]
    max_apply_steps: usize,

    /// Maximum size of one input batch, in bytes
    #[arg(long, global = true, default_value_t = ResourceLimits::default().max_input_bytes)]
    max_input_bytes: usize,
}

impl Options {
    fn limits(&self) -> ResourceLimits {
        ResourceLimits {
            max_input_bytes: self.max_input_bytes,
            max_depth: self.max_depth,
            max_apply_steps: self.max_apply_steps,
        }
    }

    fn session(&self) -> Session<Printer> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        let color = !self.json && io::stdout().is_tty();
        Session::with_limits(Printer::new(Formatter::new(format, color)), self.limits())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    ///
    /// Lines are read until every opened group is closed, then interpreted
    /// as one batch. Type @help for the administrative commands.
    Repl,
    /// Interpret a .prelog file, or every .prelog file under a directory
    ///
    /// Files share one session and are read in file name order.
    Run {
        /// File or directory to interpret
        path: PathBuf,
    },
    /// Interpret a single batch given on the command line
    Eval {
        /// Source text to interpret
        code: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        None | Some(Commands::Repl) => repl_command(&cli.options),
        Some(Commands::Run { path }) => run_command(&cli.options, path),
        Some(Commands::Eval { code }) => eval_command(&cli.options, code),
    };

    if let Err(e) = result {
        if let Some(prelog_err) = e.downcast_ref::<prelog::PrelogError>() {
            eprintln!("{}", error_formatter::format_error(prelog_err, "<input>", ""));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PRELOG_LOG").unwrap_or_else(|_| "prelog=warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn repl_command(options: &Options) -> Result<()> {
    let mut session = options.session();
    repl::run(&mut session)
}

fn eval_command(options: &Options, code: &str) -> Result<()> {
    let mut session = options.session();
    if repl::submit(&mut session, "<eval>", code) == Submission::Failed {
        anyhow::bail!("input could not be parsed");
    }
    Ok(())
}

fn run_command(options: &Options, path: &Path) -> Result<()> {
    let files = collect_files(path)?;
    if files.is_empty() {
        anyhow::bail!("no .prelog files found in {}", path.display());
    }

    let mut session = options.session();
    let mut failures = 0;
    for file in &files {
        let source_id = file.to_string_lossy().to_string();
        let source = fs::read_to_string(file)?;
        match run_source(&mut session, &source_id, &source) {
            Submission::Exit => break,
            Submission::Failed => failures += 1,
            Submission::Done => {}
        }
    }

    if failures > 0 {
        anyhow::bail!("{} file(s) contained input that could not be parsed", failures);
    }
    Ok(())
}

/// Feeds `source` to the session batch by batch, as if typed line by line.
fn run_source(session: &mut Session<Printer>, source_id: &str, source: &str) -> Submission {
    let mut batcher = Batcher::default();
    let mut outcome = Submission::Done;
    let batches = source
        .lines()
        .filter_map(|line| batcher.push(line))
        .collect::<Vec<_>>();
    for batch in batches.into_iter().chain(batcher.finish()) {
        match repl::submit(session, source_id, &batch) {
            Submission::Exit => return Submission::Exit,
            Submission::Failed => outcome = Submission::Failed,
            Submission::Done => {}
        }
    }
    outcome
}

fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some("prelog") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
