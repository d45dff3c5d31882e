//! Administrative commands.
//!
//! Meta commands are recognized before any rule table runs, so they keep
//! working when the program itself is in a broken state.

use crate::syntax::Syntax;
use crate::value::Value;

/// Reserved prefix of meta command names
pub const META_PREFIX: &str = "@";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAction {
    List,
    Reset,
    Exit,
    Help,
}

#[derive(Debug)]
pub struct MetaCommand {
    /// Alias first, then the full name, both without the prefix
    pub names: &'static [&'static str],
    pub help: &'static str,
    pub action: MetaAction,
}

pub const META_COMMANDS: &[MetaCommand] = &[
    MetaCommand {
        names: &["l", "list"],
        help: "Lists the current program",
        action: MetaAction::List,
    },
    MetaCommand {
        names: &["r", "reset"],
        help: "Resets the interpreter",
        action: MetaAction::Reset,
    },
    MetaCommand {
        names: &["x", "exit"],
        help: "Leaves the interpreter",
        action: MetaAction::Exit,
    },
    MetaCommand {
        names: &["h", "help"],
        help: "Prints help",
        action: MetaAction::Help,
    },
];

impl MetaCommand {
    pub fn name(&self) -> &'static str {
        self.names.last().copied().unwrap_or_default()
    }

    /// `(command ["@l" "@list"] "Lists the current program")`
    pub fn help_term(&self) -> Syntax {
        let names = self
            .names
            .iter()
            .map(|name| Syntax::string(format!("{META_PREFIX}{name}")))
            .collect();
        Syntax::List(vec![
            Syntax::symbol("command"),
            Syntax::Brackets(names),
            Syntax::string(self.help),
        ])
    }
}

/// The command named by the first term of `input`, if any.
///
/// A prefixed symbol that names no command is ordinary input.
pub fn recognize(input: &Syntax) -> Option<&'static MetaCommand> {
    let name = input
        .terms()
        .first()?
        .as_symbol()?
        .strip_prefix(META_PREFIX)?;
    META_COMMANDS
        .iter()
        .find(|command| command.names.contains(&name))
}

/// Clauses of `program` for listing, without the unit or native bindings.
pub fn listing(program: &Value, unit: &Value) -> Vec<Syntax> {
    let mut clauses = Vec::new();
    collect(program, unit, &mut clauses);
    clauses
}

fn collect(program: &Value, unit: &Value, clauses: &mut Vec<Syntax>) {
    if program.struct_eq(unit) {
        return;
    }
    match program {
        Value::Intersection(both) => {
            collect(both.left(), unit, clauses);
            collect(both.right(), unit, clauses);
        }
        Value::Binding(binding) if binding.is_native() => {}
        _ => clauses.push(program.reflect()),
    }
}
