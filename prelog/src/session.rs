//! The outward surface of the engine: one session per REPL or batch run.

use crate::interpreter::{Frame, Interpreter};
use crate::meta::{self, MetaAction, MetaCommand, META_COMMANDS};
use crate::native::NativeLibrary;
use crate::syntax::{Syntax, SyntaxReader};
use crate::theory::Runtime;
use crate::value::Value;
use crate::{parser, PrelogResult, ResourceLimits};
use std::rc::Rc;
use tracing::debug;

/// Receives everything a session reports.
pub trait Sink {
    /// One reflected result
    fn emit(&mut self, term: Syntax);

    /// The exit command ran; `program` is the reflected final program.
    fn exit(&mut self, program: Syntax);
}

/// A sink that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub emitted: Vec<Syntax>,
    pub exit: Option<Syntax>,
}

impl Transcript {
    /// Emitted terms rendered one per entry
    pub fn lines(&self) -> Vec<String> {
        self.emitted.iter().map(ToString::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.emitted.clear();
    }
}

impl Sink for Transcript {
    fn emit(&mut self, term: Syntax) {
        self.emitted.push(term);
    }

    fn exit(&mut self, program: Syntax) {
        self.exit = Some(program);
    }
}

/// A root scope over the native bindings, fed one input batch at a time.
pub struct Session<S: Sink> {
    runtime: Rc<Runtime>,
    natives: Rc<Frame>,
    program: Value,
    sink: S,
}

impl<S: Sink> Session<S> {
    pub fn new(sink: S) -> Self {
        Self::with_limits(sink, ResourceLimits::default())
    }

    pub fn with_limits(sink: S, limits: ResourceLimits) -> Self {
        Self::with_natives(sink, limits, NativeLibrary::standard())
    }

    pub fn with_natives(sink: S, limits: ResourceLimits, natives: NativeLibrary) -> Self {
        let runtime = Rc::new(Runtime::new(limits));
        let theory = runtime.conjunctive().clone();
        let native_program = natives.build(&theory, runtime.atoms());
        let program = theory.unit().clone();
        Self {
            natives: Rc::new(Frame::new(theory, native_program, None)),
            runtime,
            program,
            sink,
        }
    }

    pub fn runtime(&self) -> &Rc<Runtime> {
        &self.runtime
    }

    /// Everything accumulated so far, without the native bindings
    pub fn program(&self) -> &Value {
        &self.program
    }

    pub fn native_program(&self) -> &Value {
        self.natives.program()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Interprets one batch of input.
    ///
    /// Every result other than the unit is reflected to the sink. Error
    /// results are reported but not folded into the program, so a bad line
    /// never blocks the session.
    pub fn send(&mut self, input: &Syntax) {
        if let Some(command) = meta::recognize(input) {
            self.run_meta(command);
            return;
        }
        let theory = self.runtime.conjunctive().clone();
        let mut ip = Interpreter::new(self.runtime.clone(), theory, Some(self.natives.clone()))
            .with_program(self.program.clone());
        let mut reader = SyntaxReader::new(input.terms());
        while !ip.saturated() {
            let Some(value) = ip.interpret_next(&mut reader) else {
                break;
            };
            if !value.is_error() {
                ip.accumulate(value.clone());
            }
            if !value.struct_eq(ip.theory().unit()) {
                self.sink.emit(value.reflect());
            }
        }
        self.program = ip.into_program();
    }

    /// Parses `source` and sends it as one batch.
    pub fn send_code(&mut self, source: &str) -> PrelogResult<()> {
        let input = parser::parse(source, self.runtime.limits())?;
        self.send(&input);
        Ok(())
    }

    /// The value bound to `name` in the program or the native bindings.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let name = Value::symbol(name);
        let theory = self.runtime.conjunctive();
        theory
            .lookup(&self.program, &name)
            .or_else(|| theory.lookup(self.natives.program(), &name))
    }

    fn run_meta(&mut self, command: &MetaCommand) {
        debug!(command = command.name(), "meta command");
        match command.action {
            MetaAction::List => {
                let unit = self.runtime.conjunctive().unit();
                for clause in meta::listing(&self.program, unit) {
                    self.sink.emit(clause);
                }
            }
            MetaAction::Reset => {
                self.program = self.runtime.conjunctive().unit().clone();
            }
            MetaAction::Exit => {
                self.sink.exit(self.program.reflect());
            }
            MetaAction::Help => {
                for command in META_COMMANDS {
                    self.sink.emit(command.help_term());
                }
            }
        }
    }
}
