//! A minimal front-end producing [`Syntax`] trees from source text.

use crate::error::{PrelogError, Span};
use crate::resource_limits::ResourceLimits;
use crate::syntax::Syntax;
use crate::PrelogResult;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Parser)]
#[grammar = "src/parser/prelog.pest"]
pub struct PrelogParser;

/// Parses `source` into a top-level list of terms.
pub fn parse(source: &str, limits: &ResourceLimits) -> PrelogResult<Syntax> {
    if source.len() > limits.max_input_bytes {
        return Err(PrelogError::limit_exceeded(
            "max_input_bytes",
            format!("{} bytes", limits.max_input_bytes),
            format!("{} bytes", source.len()),
        ));
    }

    let mut pairs = PrelogParser::parse(Rule::program, source).map_err(from_pest_error)?;
    let program = pairs
        .next()
        .ok_or_else(|| PrelogError::parse("empty parse result", Span::default()))?;
    Ok(Syntax::List(parse_terms(program)?))
}

fn parse_terms(pair: Pair<Rule>) -> PrelogResult<Vec<Syntax>> {
    pair.into_inner()
        .filter(|inner| inner.as_rule() != Rule::EOI)
        .map(parse_term)
        .collect()
}

fn parse_term(pair: Pair<Rule>) -> PrelogResult<Syntax> {
    let span = Span::from_pest_span(pair.as_span());
    match pair.as_rule() {
        Rule::parens => Ok(Syntax::Parens(parse_terms(pair)?)),
        Rule::brackets => Ok(Syntax::Brackets(parse_terms(pair)?)),
        Rule::braces => Ok(Syntax::Braces(parse_terms(pair)?)),
        Rule::symbol => Ok(Syntax::symbol(pair.as_str())),
        Rule::number => Decimal::from_str(pair.as_str())
            .map(Syntax::Number)
            .map_err(|e| PrelogError::parse(format!("invalid number: {}", e), span)),
        Rule::string => {
            let raw = pair.into_inner().next().map(|inner| inner.as_str()).unwrap_or("");
            Ok(Syntax::String(unescape(raw)))
        }
        rule => Err(PrelogError::parse(format!("unexpected {:?}", rule), span)),
    }
}

/// Resolves the escapes the grammar admits inside string literals.
fn unescape(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some(other) => text.push(other),
            None => text.push('\\'),
        }
    }
    text
}

fn from_pest_error(error: pest::error::Error<Rule>) -> PrelogError {
    let (start, end) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span(span) => span,
    };
    let (line, col) = match error.line_col {
        pest::error::LineColLocation::Pos(pos) => pos,
        pest::error::LineColLocation::Span(start, _) => start,
    };
    PrelogError::parse(
        error.variant.message().to_string(),
        Span {
            start,
            end,
            line,
            col,
        },
    )
}
