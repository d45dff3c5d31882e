//! Rule tables: every composite operation of the engine as a dispatch table.
//!
//! `Rules::standard()` builds the tables the engine ships with. The fields
//! are public so an embedder can register further cases on top of them.

mod combine;
mod lookup;
mod resolve;
mod translate;

use crate::dispatch::{BinaryDispatcher, UnaryDispatcher};
use crate::interpreter::Interpreter;
use crate::syntax::Syntax;
use crate::theory::Theory;
use crate::value::Value;
use std::fmt;

pub type TranslateRules = UnaryDispatcher<Interpreter, Syntax, Value>;
pub type CombineRules = BinaryDispatcher<Theory, Value, Value, Value>;
pub type LookupRules = BinaryDispatcher<Theory, Value, Value, Option<Value>>;

pub struct Rules {
    /// Syntax to value
    pub translate: TranslateRules,
    /// Folds a new value into an accumulated program
    pub resolve: CombineRules,
    /// Name resolution inside a program
    pub lookup: LookupRules,
    pub join: CombineRules,
    pub meet: CombineRules,
}

impl Rules {
    pub fn standard() -> Self {
        Self {
            translate: translate::rules(),
            resolve: resolve::rules(),
            lookup: lookup::rules(),
            join: combine::join_rules(),
            meet: combine::meet_rules(),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("translate", &self.translate.len())
            .field("resolve", &self.resolve.len())
            .field("lookup", &self.lookup.len())
            .field("join", &self.join.len())
            .field("meet", &self.meet.len())
            .finish()
    }
}
