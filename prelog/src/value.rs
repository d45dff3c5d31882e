//! The semantic value domain.
//!
//! Values are immutable once built and form a DAG: compound nodes share
//! their children through `Rc`. Every value has a [`Rank`].

use crate::dispatch::Tagged;
use crate::interpreter::Interpreter;
use crate::syntax::{Syntax, SyntaxReader};
use crate::{PrelogResult, Rank};
use rust_decimal::Decimal;
use std::fmt;
use std::rc::Rc;

/// Host function behind a native callable.
pub type NativeFn = Rc<dyn Fn(&mut Interpreter, &mut SyntaxReader<'_>) -> PrelogResult<Value>>;

#[derive(Debug, Clone)]
pub enum Value {
    Symbol(Rc<str>),
    String(Rc<str>),
    Number(Decimal),
    /// Opaque constant compared by identity
    Atom(Rc<Atom>),
    /// Disjunction of two unrelated values of the same rank
    Union(Rc<Junction>),
    /// Conjunction of two unrelated values of the same rank
    Intersection(Rc<Junction>),
    Binding(Rc<Binding>),
    /// An unevaluated term, translated when a later term names it
    Deferred(Rc<Syntax>),
    Native(Rc<NativeCallable>),
    Error(Rc<ErrorValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Symbol,
    String,
    Number,
    Atom,
    Union,
    Intersection,
    Binding,
    Deferred,
    Native,
    Error,
}

#[derive(Debug)]
pub struct Atom {
    rank: Rank,
    syntax: Syntax,
}

/// The two children of a Union or Intersection.
///
/// Both children share the junction's rank.
#[derive(Debug)]
pub struct Junction {
    left: Value,
    right: Value,
    rank: Rank,
}

impl Junction {
    pub fn left(&self) -> &Value {
        &self.left
    }

    pub fn right(&self) -> &Value {
        &self.right
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }
}

/// A single name-to-value fact.
#[derive(Debug)]
pub struct Binding {
    name: Value,
    value: Value,
    native: bool,
    hypothetical: bool,
}

impl Binding {
    pub fn name(&self) -> &Value {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Installed by the native library rather than by a program
    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Produced by a disjunctive scope; invisible to name lookup
    pub fn is_hypothetical(&self) -> bool {
        self.hypothetical
    }

    /// A binding of the same name and kind holding `value`.
    pub(crate) fn with_value(&self, value: Value, native: bool) -> Value {
        Value::Binding(Rc::new(Binding {
            name: self.name.clone(),
            value,
            native,
            hypothetical: self.hypothetical,
        }))
    }
}

pub struct NativeCallable {
    name: Value,
    function: NativeFn,
}

impl NativeCallable {
    pub fn name(&self) -> &Value {
        &self.name
    }
}

impl fmt::Debug for NativeCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCallable")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Translation failed: malformed term or missing arguments
    Syntax,
    /// Combination failed: irreconcilable values
    Semantics,
}

#[derive(Debug, Clone)]
pub enum Offending {
    Syntax(Syntax),
    Value(Value),
}

#[derive(Debug)]
pub struct ErrorValue {
    kind: ErrorKind,
    description: String,
    offending: Offending,
}

impl ErrorValue {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn offending(&self) -> &Offending {
        &self.offending
    }
}

impl Value {
    pub fn symbol(name: impl Into<Rc<str>>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::String(text.into())
    }

    pub fn number(value: impl Into<Decimal>) -> Self {
        Value::Number(value.into())
    }

    pub fn atom(rank: Rank, syntax: Syntax) -> Self {
        Value::Atom(Rc::new(Atom { rank, syntax }))
    }

    pub fn binding(name: Value, value: Value) -> Self {
        Value::Binding(Rc::new(Binding {
            name,
            value,
            native: false,
            hypothetical: false,
        }))
    }

    pub fn native_binding(name: Value, value: Value) -> Self {
        Value::Binding(Rc::new(Binding {
            name,
            value,
            native: true,
            hypothetical: false,
        }))
    }

    pub fn deferred(body: Syntax) -> Self {
        Value::Deferred(Rc::new(body))
    }

    pub fn native(name: Value, function: NativeFn) -> Self {
        Value::Native(Rc::new(NativeCallable { name, function }))
    }

    pub fn syntax_error(description: impl Into<String>, syntax: Syntax) -> Self {
        Value::Error(Rc::new(ErrorValue {
            kind: ErrorKind::Syntax,
            description: description.into(),
            offending: Offending::Syntax(syntax),
        }))
    }

    pub fn semantics_error(description: impl Into<String>, value: Value) -> Self {
        Value::Error(Rc::new(ErrorValue {
            kind: ErrorKind::Semantics,
            description: description.into(),
            offending: Offending::Value(value),
        }))
    }

    /// Builds a Union of two values that already share `rank`.
    ///
    /// Only the lattice combinators call this; they compare ranks first.
    pub(crate) fn union(left: Value, right: Value, rank: Rank) -> Self {
        debug_assert!(left.rank() == rank && right.rank() == rank);
        Value::Union(Rc::new(Junction { left, right, rank }))
    }

    /// Builds an Intersection of two values that already share `rank`.
    pub(crate) fn intersection(left: Value, right: Value, rank: Rank) -> Self {
        debug_assert!(left.rank() == rank && right.rank() == rank);
        Value::Intersection(Rc::new(Junction { left, right, rank }))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Symbol(_) => ValueKind::Symbol,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Atom(_) => ValueKind::Atom,
            Value::Union(_) => ValueKind::Union,
            Value::Intersection(_) => ValueKind::Intersection,
            Value::Binding(_) => ValueKind::Binding,
            Value::Deferred(_) => ValueKind::Deferred,
            Value::Native(_) => ValueKind::Native,
            Value::Error(_) => ValueKind::Error,
        }
    }

    pub fn rank(&self) -> Rank {
        match self {
            Value::Atom(atom) => atom.rank,
            Value::Union(junction) | Value::Intersection(junction) => junction.rank,
            Value::Error(_) => Rank::Bottom,
            Value::Symbol(_)
            | Value::String(_)
            | Value::Number(_)
            | Value::Binding(_)
            | Value::Deferred(_)
            | Value::Native(_) => Rank::Neutral,
        }
    }

    pub fn as_union(&self) -> Option<&Junction> {
        match self {
            Value::Union(junction) => Some(junction),
            _ => None,
        }
    }

    pub fn as_intersection(&self) -> Option<&Junction> {
        match self {
            Value::Intersection(junction) => Some(junction),
            _ => None,
        }
    }

    pub fn as_binding(&self) -> Option<&Binding> {
        match self {
            Value::Binding(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Deferred(_) | Value::Native(_))
    }

    /// True when both values are the same allocation.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) | (Value::String(a), Value::String(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Atom(a), Value::Atom(b)) => Rc::ptr_eq(a, b),
            (Value::Union(a), Value::Union(b))
            | (Value::Intersection(a), Value::Intersection(b)) => Rc::ptr_eq(a, b),
            (Value::Binding(a), Value::Binding(b)) => Rc::ptr_eq(a, b),
            (Value::Deferred(a), Value::Deferred(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Error(a), Value::Error(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Structural equality: kind first, then fields.
    ///
    /// Atoms and native callables are only equal to themselves.
    pub fn struct_eq(&self, other: &Value) -> bool {
        if self.same(other) {
            return true;
        }
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) | (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Union(a), Value::Union(b))
            | (Value::Intersection(a), Value::Intersection(b)) => {
                a.left.struct_eq(&b.left) && a.right.struct_eq(&b.right)
            }
            (Value::Binding(a), Value::Binding(b)) => {
                a.name.struct_eq(&b.name) && a.value.struct_eq(&b.value)
            }
            (Value::Deferred(a), Value::Deferred(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => {
                a.kind == b.kind
                    && a.description == b.description
                    && match (&a.offending, &b.offending) {
                        (Offending::Syntax(x), Offending::Syntax(y)) => x == y,
                        (Offending::Value(x), Offending::Value(y)) => x.struct_eq(y),
                        _ => false,
                    }
            }
            _ => false,
        }
    }

    /// The same value with every binding hidden from name lookup.
    ///
    /// Junctions are rebuilt around their hidden leaves; binding values are
    /// left alone since lookup never descends into them.
    pub fn hypothetical(&self) -> Value {
        match self {
            Value::Binding(binding) if !binding.hypothetical => Value::Binding(Rc::new(Binding {
                name: binding.name.clone(),
                value: binding.value.clone(),
                native: binding.native,
                hypothetical: true,
            })),
            Value::Union(junction) => Value::union(
                junction.left.hypothetical(),
                junction.right.hypothetical(),
                junction.rank,
            ),
            Value::Intersection(junction) => Value::intersection(
                junction.left.hypothetical(),
                junction.right.hypothetical(),
                junction.rank,
            ),
            _ => self.clone(),
        }
    }

    /// Invokes a callable against the pending input.
    ///
    /// A deferred body runs in a child scope of `ip`. Values that are not
    /// callable apply to themselves.
    pub fn apply(&self, ip: &mut Interpreter, reader: &mut SyntaxReader<'_>) -> PrelogResult<Value> {
        match self {
            Value::Deferred(body) => {
                let mut child = ip.child(ip.theory().clone());
                Ok(child.translate(body))
            }
            Value::Native(callable) => (callable.function)(ip, reader),
            _ => Ok(self.clone()),
        }
    }

    /// Leaves of a conjunction, depth first, left to right.
    pub fn conjuncts(&self) -> Vec<&Value> {
        let mut leaves = Vec::new();
        collect_leaves(self, ValueKind::Intersection, &mut leaves);
        leaves
    }

    /// Leaves of a disjunction, depth first, left to right.
    pub fn disjuncts(&self) -> Vec<&Value> {
        let mut leaves = Vec::new();
        collect_leaves(self, ValueKind::Union, &mut leaves);
        leaves
    }

    /// Converts the value back into its concrete syntax form.
    pub fn reflect(&self) -> Syntax {
        match self {
            Value::Symbol(name) => Syntax::Symbol(name.to_string()),
            Value::String(text) => Syntax::String(text.to_string()),
            Value::Number(value) => Syntax::Number(*value),
            Value::Atom(atom) => atom.syntax.clone(),
            Value::Union(_) => {
                Syntax::Brackets(self.disjuncts().into_iter().map(Value::reflect).collect())
            }
            Value::Intersection(_) => {
                Syntax::Braces(self.conjuncts().into_iter().map(Value::reflect).collect())
            }
            Value::Binding(binding) => Syntax::List(vec![
                Syntax::symbol("def"),
                binding.name.reflect(),
                binding.value.reflect(),
            ]),
            Value::Deferred(body) => {
                Syntax::List(vec![Syntax::symbol("proc"), body.as_ref().clone()])
            }
            Value::Native(callable) => callable.name.reflect(),
            Value::Error(error) => Syntax::List(vec![
                Syntax::symbol("error"),
                Syntax::string(error.description.clone()),
                match &error.offending {
                    Offending::Syntax(syntax) => syntax.clone(),
                    Offending::Value(value) => value.reflect(),
                },
            ]),
        }
    }
}

fn collect_leaves<'v>(value: &'v Value, kind: ValueKind, leaves: &mut Vec<&'v Value>) {
    match value {
        Value::Union(junction) | Value::Intersection(junction) if value.kind() == kind => {
            collect_leaves(&junction.left, kind, leaves);
            collect_leaves(&junction.right, kind, leaves);
        }
        _ => leaves.push(value),
    }
}

impl Tagged for Value {
    type Tag = ValueKind;

    fn tag(&self) -> ValueKind {
        self.kind()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reflect())
    }
}
