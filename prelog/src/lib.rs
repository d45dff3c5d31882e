//! # Prelog Engine
//!
//! **Logic through shortcut combinators**
//!
//! Prelog programs are sequences of clauses that accumulate into a single
//! semantic program value. Conjunction and disjunction of clauses are computed
//! through a ranked lattice whose combinators stop evaluating as soon as the
//! outcome is decided.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prelog::{PrelogResult, Session, Transcript};
//!
//! fn main() -> PrelogResult<()> {
//!     let mut session = Session::new(Transcript::default());
//!
//!     session.send_code("{ def x 1 def y 2 }")?;
//!     session.send_code("[ 1 2 ]")?;
//!
//!     for term in &session.sink().emitted {
//!         println!("{}", term);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Ranks
//! Every value carries a [`Rank`], from `Bottom` (definite failure) to `Top`
//! (definite success). Ranks drive every short-circuit decision.
//!
//! ### Scopes
//! Braces open a conjunctive scope, brackets a disjunctive one. Each scope
//! folds its clauses with the append combinator of its [`Signature`] and stops
//! reading input once the result can no longer change.
//!
//! ### Rule tables
//! Translation, resolution, lookup, join and meet are [`dispatch`] tables keyed
//! on the runtime kind of their operands.

pub mod dispatch;
pub mod error;
pub mod interpreter;
pub mod meta;
pub mod native;
pub mod parser;
pub mod rank;
pub mod resource_limits;
pub mod rules;
pub mod session;
pub mod syntax;
pub mod theory;
pub mod threshold;
pub mod value;

pub use error::{PrelogError, Span};
pub use interpreter::{Frame, Interpreter};
pub use meta::{MetaAction, MetaCommand, META_COMMANDS, META_PREFIX};
pub use native::{Atoms, NativeLibrary};
pub use parser::parse;
pub use rank::Rank;
pub use resource_limits::ResourceLimits;
pub use rules::Rules;
pub use session::{Session, Sink, Transcript};
pub use syntax::{Syntax, SyntaxKind, SyntaxReader};
pub use theory::{Runtime, Theory};
pub use threshold::{Polarity, Signature, Threshold, LOWER_JOIN, LOWER_MEET, UPPER_JOIN, UPPER_MEET};
pub use value::{ErrorKind, Value, ValueKind};

/// Result type for host-level Prelog operations
pub type PrelogResult<T> = Result<T, PrelogError>;

#[cfg(test)]
mod tests;
