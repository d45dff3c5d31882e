//! The interpreter loop.
//!
//! An [`Interpreter`] owns the program of one scope. Nested scopes get a child
//! interpreter whose parent chain is a list of immutable [`Frame`] snapshots;
//! a child never writes to its ancestors.

use crate::syntax::{Syntax, SyntaxReader};
use crate::theory::{Runtime, Theory};
use crate::value::{Binding, Value};
use crate::{PrelogError, PrelogResult};
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Read-only snapshot of an enclosing scope.
#[derive(Debug)]
pub struct Frame {
    theory: Theory,
    program: Value,
    parent: Option<Rc<Frame>>,
}

impl Frame {
    pub fn new(theory: Theory, program: Value, parent: Option<Rc<Frame>>) -> Self {
        Self {
            theory,
            program,
            parent,
        }
    }

    pub fn theory(&self) -> &Theory {
        &self.theory
    }

    pub fn program(&self) -> &Value {
        &self.program
    }
}

pub struct Interpreter {
    runtime: Rc<Runtime>,
    theory: Theory,
    program: Value,
    parent: Option<Rc<Frame>>,
    depth: usize,
}

impl Interpreter {
    /// A fresh scope whose program starts at the theory's unit.
    pub fn new(runtime: Rc<Runtime>, theory: Theory, parent: Option<Rc<Frame>>) -> Self {
        Self {
            runtime,
            program: theory.unit().clone(),
            theory,
            parent,
            depth: 0,
        }
    }

    pub fn with_program(mut self, program: Value) -> Self {
        self.program = program;
        self
    }

    pub fn runtime(&self) -> &Rc<Runtime> {
        &self.runtime
    }

    pub fn theory(&self) -> &Theory {
        &self.theory
    }

    pub fn program(&self) -> &Value {
        &self.program
    }

    pub fn into_program(self) -> Value {
        self.program
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn snapshot(&self) -> Rc<Frame> {
        Rc::new(Frame::new(
            self.theory.clone(),
            self.program.clone(),
            self.parent.clone(),
        ))
    }

    /// Opens a nested scope under `theory` with this scope as its parent.
    pub fn child(&self, theory: Theory) -> Interpreter {
        Interpreter {
            runtime: self.runtime.clone(),
            program: theory.unit().clone(),
            theory,
            parent: Some(self.snapshot()),
            depth: self.depth,
        }
    }

    /// Every scope from this one outward, with its theory and program.
    pub fn scopes(&self) -> Scopes<'_> {
        Scopes {
            current: Some((&self.theory, &self.program)),
            frame: self.parent.as_deref(),
        }
    }

    pub fn saturated(&self) -> bool {
        self.theory.saturated(&self.program)
    }

    /// Translates one term in this scope.
    ///
    /// Nesting past `max_depth` yields a syntax error value instead of
    /// recursing further.
    pub fn translate(&mut self, term: &Syntax) -> Value {
        let max_depth = self.runtime.limits().max_depth;
        if self.depth >= max_depth {
            warn!(max_depth, "nesting limit reached");
            return Value::syntax_error("maximum nesting depth exceeded", term.clone());
        }
        trace!(term = %term, depth = self.depth, "translate");
        self.depth += 1;
        let rules = self.runtime.rules().clone();
        let value = rules.translate.apply(self, term);
        self.depth -= 1;
        value
    }

    /// Resolves `value` against every scope, innermost first.
    pub fn resolve_upward(&self, value: Value) -> Value {
        self.scopes()
            .fold(value, |value, (theory, program)| theory.resolve(program, &value))
    }

    /// Interprets the next pending term up to its fixed point.
    ///
    /// Host errors raised while doing so become a syntax error value naming
    /// the term. Returns `None` when no input is pending.
    pub fn interpret_next(&mut self, reader: &mut SyntaxReader<'_>) -> Option<Value> {
        let head = reader.peek()?;
        Some(match self.evaluate(reader) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, term = %head, "recovered from host error");
                Value::syntax_error(error.to_string(), head.clone())
            }
        })
    }

    fn evaluate(&mut self, reader: &mut SyntaxReader<'_>) -> PrelogResult<Value> {
        let term = reader.read("term")?;
        let mut value = self.translate(term);
        // Deferred bodies only run when a term names them; a deferred value
        // produced by an application is data.
        let mut named = true;
        let max_steps = self.runtime.limits().max_apply_steps;
        for step in 0..max_steps {
            value = self.resolve_upward(value);
            let callable = match &value {
                Value::Native(_) => true,
                Value::Deferred(_) => named,
                _ => false,
            };
            if !callable {
                return Ok(value);
            }
            trace!(step, callable = %value, "apply");
            let next = value.apply(self, reader)?;
            if next.struct_eq(&value) {
                return Ok(value);
            }
            value = next;
            named = false;
        }
        Err(PrelogError::limit_exceeded(
            "max_apply_steps",
            max_steps,
            max_steps + 1,
        ))
    }

    /// Folds `value` into this scope's program with the signature's append.
    pub fn accumulate(&mut self, value: Value) {
        let program = std::mem::replace(&mut self.program, self.theory.unit().clone());
        self.program = self.theory.append(program, || value);
    }

    /// Interprets `terms` in order until they run out or the scope saturates.
    pub fn interpret_all(&mut self, terms: &[Syntax]) -> Value {
        let mut reader = SyntaxReader::new(terms);
        while !self.saturated() {
            let Some(value) = self.interpret_next(&mut reader) else {
                break;
            };
            self.accumulate(value);
        }
        if reader.has_next() {
            debug!(skipped = reader.remaining().len(), "scope saturated");
        }
        self.program.clone()
    }

    /// Installs a user binding in this scope.
    ///
    /// A native binding of the same name with another value is a semantics
    /// error. An existing binding of the same name in the current conjunction
    /// is replaced in place and the unit is returned; otherwise the binding is
    /// resolved against the program and returned for accumulation.
    pub fn define(&mut self, binding: Value) -> Value {
        let Some(new) = binding.as_binding() else {
            return self.theory.resolve(&self.program, &binding);
        };
        let conflict = self
            .scopes()
            .filter_map(|(_, program)| find_native(program, new.name()))
            .any(|native| !native.value().struct_eq(new.value()));
        if conflict {
            return Value::semantics_error("native binding cannot be redefined", binding);
        }
        if let Some(program) = rebind(&self.program, &binding) {
            debug!(binding = %binding, "rebinding");
            self.program = program;
            return self.theory.unit().clone();
        }
        self.theory.resolve(&self.program, &binding)
    }
}

/// The native binding of `name` among the conjuncts of `program`.
fn find_native<'v>(program: &'v Value, name: &Value) -> Option<&'v Binding> {
    match program {
        Value::Binding(binding) if binding.is_native() && binding.name().struct_eq(name) => {
            Some(binding)
        }
        Value::Intersection(both) => {
            find_native(both.right(), name).or_else(|| find_native(both.left(), name))
        }
        _ => None,
    }
}

fn rebind(program: &Value, binding: &Value) -> Option<Value> {
    let name = binding.as_binding()?.name();
    match program {
        Value::Binding(old) if !old.is_native() && old.name().struct_eq(name) => {
            Some(binding.clone())
        }
        Value::Intersection(both) => match rebind(both.right(), binding) {
            Some(right) => Some(Value::intersection(both.left().clone(), right, both.rank())),
            None => rebind(both.left(), binding)
                .map(|left| Value::intersection(left, both.right().clone(), both.rank())),
        },
        _ => None,
    }
}

/// Iterator over the scopes visible from an interpreter.
pub struct Scopes<'a> {
    current: Option<(&'a Theory, &'a Value)>,
    frame: Option<&'a Frame>,
}

impl<'a> Iterator for Scopes<'a> {
    type Item = (&'a Theory, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = self.current.take() {
            return Some(current);
        }
        let frame = self.frame?;
        self.frame = frame.parent.as_deref();
        Some((&frame.theory, &frame.program))
    }
}
