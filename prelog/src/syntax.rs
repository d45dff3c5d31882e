//! The syntax tree exchanged with the front-end and the printer.
//!
//! The core consumes this tree (after parsing) and produces it again through
//! reflection; it never touches source text.

use crate::dispatch::Tagged;
use crate::{PrelogError, PrelogResult};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Syntax {
    /// A sequence of terms; the empty list is the empty program
    List(Vec<Syntax>),
    /// `( … )`: transparent grouping of exactly one term
    Parens(Vec<Syntax>),
    /// `[ … ]`: disjunctive block
    Brackets(Vec<Syntax>),
    /// `{ … }`: conjunctive block
    Braces(Vec<Syntax>),
    Symbol(String),
    String(String),
    Number(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Nil,
    List,
    Parens,
    Brackets,
    Braces,
    Symbol,
    String,
    Number,
}

impl Syntax {
    pub fn symbol(name: impl Into<String>) -> Self {
        Syntax::Symbol(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Syntax::String(text.into())
    }

    pub fn number(value: impl Into<Decimal>) -> Self {
        Syntax::Number(value.into())
    }

    pub fn nil() -> Self {
        Syntax::List(Vec::new())
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            Syntax::List(items) if items.is_empty() => SyntaxKind::Nil,
            Syntax::List(_) => SyntaxKind::List,
            Syntax::Parens(_) => SyntaxKind::Parens,
            Syntax::Brackets(_) => SyntaxKind::Brackets,
            Syntax::Braces(_) => SyntaxKind::Braces,
            Syntax::Symbol(_) => SyntaxKind::Symbol,
            Syntax::String(_) => SyntaxKind::String,
            Syntax::Number(_) => SyntaxKind::Number,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Syntax::Symbol(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Terms of a sequence; any other term is a sequence of itself.
    pub fn terms(&self) -> &[Syntax] {
        match self {
            Syntax::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Syntax::List(items) if nested => fmt_block(f, "(", items, ")"),
            Syntax::List(items) => fmt_items(f, items),
            Syntax::Parens(items) => fmt_block(f, "(", items, ")"),
            Syntax::Brackets(items) => fmt_block(f, "[", items, "]"),
            Syntax::Braces(items) => fmt_block(f, "{", items, "}"),
            Syntax::Symbol(name) => f.write_str(name),
            Syntax::String(text) => fmt_string(f, text),
            Syntax::Number(value) => write!(f, "{}", value),
        }
    }
}

impl Tagged for Syntax {
    type Tag = SyntaxKind;

    fn tag(&self) -> SyntaxKind {
        self.kind()
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, false)
    }
}

fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Syntax]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        item.fmt_nested(f, true)?;
    }
    Ok(())
}

fn fmt_block(f: &mut fmt::Formatter<'_>, open: &str, items: &[Syntax], close: &str) -> fmt::Result {
    f.write_str(open)?;
    fmt_items(f, items)?;
    f.write_str(close)
}

fn fmt_string(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// Cursor over the pending terms of a block.
///
/// Callables consume exactly the terms they need from the reader they are
/// applied to; cloning a reader forks it.
#[derive(Debug, Clone)]
pub struct SyntaxReader<'a> {
    terms: &'a [Syntax],
}

impl<'a> SyntaxReader<'a> {
    pub fn new(terms: &'a [Syntax]) -> Self {
        Self { terms }
    }

    pub fn has_next(&self) -> bool {
        !self.terms.is_empty()
    }

    pub fn peek(&self) -> Option<&'a Syntax> {
        self.terms.first()
    }

    /// Reads the next term, failing when the input is exhausted.
    pub fn read(&mut self, expected: &'static str) -> PrelogResult<&'a Syntax> {
        self.next()
            .ok_or(PrelogError::UnexpectedEnd { expected })
    }

    pub fn remaining(&self) -> &'a [Syntax] {
        self.terms
    }
}

impl<'a> Iterator for SyntaxReader<'a> {
    type Item = &'a Syntax;

    fn next(&mut self) -> Option<&'a Syntax> {
        let (first, rest) = self.terms.split_first()?;
        self.terms = rest;
        Some(first)
    }
}
