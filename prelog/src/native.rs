//! Bootstrap bindings installed beneath every session.

use crate::interpreter::Interpreter;
use crate::syntax::{Syntax, SyntaxReader};
use crate::theory::Theory;
use crate::value::{NativeFn, Value};
use crate::{PrelogResult, Rank};
use std::rc::Rc;
use tracing::debug;

/// The four constants every runtime starts with.
///
/// Atoms compare by identity, so each runtime owns exactly one of each.
#[derive(Debug, Clone)]
pub struct Atoms {
    /// Top; identity of conjunctive scopes
    pub success: Value,
    /// Bottom; identity of disjunctive scopes
    pub failure: Value,
    pub truth: Value,
    pub falsehood: Value,
}

impl Atoms {
    pub fn new() -> Self {
        Self {
            success: Value::atom(Rank::Top, Syntax::symbol("success")),
            failure: Value::atom(Rank::Bottom, Syntax::symbol("failure")),
            truth: Value::atom(Rank::True, Syntax::symbol("true")),
            falsehood: Value::atom(Rank::False, Syntax::symbol("false")),
        }
    }
}

impl Default for Atoms {
    fn default() -> Self {
        Self::new()
    }
}

enum Entry {
    Value(Value),
    Callable(NativeFn),
}

/// Builder for the native program.
///
/// The atoms are always bound; `standard()` adds `def`, `proc` and `rank`.
pub struct NativeLibrary {
    entries: Vec<(String, Entry)>,
}

impl NativeLibrary {
    /// Only the atoms
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        Self::new()
            .with_callable("def", define)
            .with_callable("proc", process)
            .with_callable("rank", rank)
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entries.push((name.into(), Entry::Value(value)));
        self
    }

    pub fn with_callable(
        mut self,
        name: impl Into<String>,
        function: impl Fn(&mut Interpreter, &mut SyntaxReader<'_>) -> PrelogResult<Value> + 'static,
    ) -> Self {
        self.entries
            .push((name.into(), Entry::Callable(Rc::new(function))));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Folds every entry into one conjunction of native bindings.
    pub fn build(&self, theory: &Theory, atoms: &Atoms) -> Value {
        let constants = [
            ("true", &atoms.truth),
            ("false", &atoms.falsehood),
            ("success", &atoms.success),
            ("failure", &atoms.failure),
        ];
        let bindings = constants
            .into_iter()
            .map(|(name, atom)| Value::native_binding(Value::symbol(name), atom.clone()))
            .chain(self.entries.iter().map(|(name, entry)| {
                let name = Value::symbol(name.as_str());
                let value = match entry {
                    Entry::Value(value) => value.clone(),
                    Entry::Callable(function) => Value::native(name.clone(), function.clone()),
                };
                Value::native_binding(name, value)
            }));
        bindings.fold(theory.unit().clone(), |program, binding| {
            theory.append(program, || binding)
        })
    }
}

impl Default for NativeLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

/// `def <name> <value>`
fn define(ip: &mut Interpreter, reader: &mut SyntaxReader<'_>) -> PrelogResult<Value> {
    let name = reader.read("name")?;
    let Some(symbol) = name.as_symbol() else {
        return Ok(Value::syntax_error("name expected", name.clone()));
    };
    let term = reader.read("value")?;
    let value = ip.translate(term);
    debug!(name = symbol, "definition");
    Ok(ip.define(Value::binding(Value::symbol(symbol), value)))
}

/// `proc <body>`
fn process(_: &mut Interpreter, reader: &mut SyntaxReader<'_>) -> PrelogResult<Value> {
    let body = reader.read("process body")?;
    Ok(Value::deferred(body.clone()))
}

/// `rank <term>`
fn rank(ip: &mut Interpreter, reader: &mut SyntaxReader<'_>) -> PrelogResult<Value> {
    let term = reader.read("term")?;
    let value = ip.translate(term);
    Ok(Value::number(value.rank().ordinal()))
}
