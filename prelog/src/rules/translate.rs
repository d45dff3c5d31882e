use super::TranslateRules;
use crate::dispatch::Slot;
use crate::syntax::{Syntax, SyntaxKind, SyntaxReader};
use crate::value::Value;
use tracing::debug;

pub(super) fn rules() -> TranslateRules {
    TranslateRules::new(|_, term| Value::syntax_error("cannot interpret syntax", term.clone()))
        .case(Slot::Is(SyntaxKind::Nil), |ip, _| {
            Some(ip.theory().unit().clone())
        })
        // A nested sequence accumulates in a fresh scope under the same theory
        .case(Slot::Is(SyntaxKind::List), |ip, term| {
            let theory = ip.theory().clone();
            let mut child = ip.child(theory);
            Some(child.interpret_all(term.terms()))
        })
        .case(Slot::Is(SyntaxKind::Parens), |ip, term| {
            let Syntax::Parens(items) = term else {
                return None;
            };
            let mut reader = SyntaxReader::new(items);
            let Some(value) = ip.interpret_next(&mut reader) else {
                return Some(Value::syntax_error("term expected", term.clone()));
            };
            if reader.has_next() {
                return Some(Value::syntax_error("')' expected", term.clone()));
            }
            Some(value)
        })
        .case(Slot::Is(SyntaxKind::Brackets), |ip, term| {
            let Syntax::Brackets(items) = term else {
                return None;
            };
            debug!(terms = items.len(), "opening disjunctive scope");
            let theory = ip.runtime().disjunctive().clone();
            let mut child = ip.child(theory);
            // Whichever alternative wins, its names stay hypothetical
            Some(child.interpret_all(items).hypothetical())
        })
        .case(Slot::Is(SyntaxKind::Braces), |ip, term| {
            let Syntax::Braces(items) = term else {
                return None;
            };
            debug!(terms = items.len(), "opening conjunctive scope");
            let theory = ip.runtime().conjunctive().clone();
            let mut child = ip.child(theory);
            Some(child.interpret_all(items))
        })
        // Disjunctive scopes hold hypothetical alternatives and publish no names
        .case(Slot::Is(SyntaxKind::Symbol), |ip, term| {
            let name = Value::symbol(term.as_symbol()?);
            let found = ip
                .scopes()
                .filter(|(theory, _)| theory.is_conjunctive())
                .find_map(|(theory, program)| theory.lookup(program, &name));
            Some(found.unwrap_or(name))
        })
        .case(Slot::Is(SyntaxKind::String), |_, term| match term {
            Syntax::String(text) => Some(Value::string(text.as_str())),
            _ => None,
        })
        .case(Slot::Is(SyntaxKind::Number), |_, term| match term {
            Syntax::Number(value) => Some(Value::Number(*value)),
            _ => None,
        })
}
