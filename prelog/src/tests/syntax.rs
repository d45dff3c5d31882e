use crate::syntax::{Syntax, SyntaxKind, SyntaxReader};
use crate::PrelogError;

#[test]
fn test_syntax_kinds() {
    assert_eq!(Syntax::nil().kind(), SyntaxKind::Nil);
    assert_eq!(Syntax::List(vec![Syntax::number(1)]).kind(), SyntaxKind::List);
    assert_eq!(Syntax::Braces(vec![]).kind(), SyntaxKind::Braces);
    assert_eq!(Syntax::symbol("a").kind(), SyntaxKind::Symbol);
}

#[test]
fn test_display_top_level_and_nested_lists() {
    let term = Syntax::List(vec![
        Syntax::symbol("def"),
        Syntax::symbol("f"),
        Syntax::List(vec![Syntax::symbol("proc"), Syntax::string("hi")]),
    ]);
    assert_eq!(term.to_string(), "def f (proc \"hi\")");

    let group = Syntax::Brackets(vec![
        Syntax::List(vec![Syntax::symbol("a"), Syntax::symbol("b")]),
        Syntax::Braces(vec![]),
    ]);
    assert_eq!(group.to_string(), "[(a b) {}]");
}

#[test]
fn test_display_escapes_strings() {
    assert_eq!(Syntax::string("a\"b\\c\n").to_string(), r#""a\"b\\c\n""#);
}

#[test]
fn test_terms_of_single_term() {
    let term = Syntax::symbol("x");
    assert_eq!(term.terms(), &[Syntax::symbol("x")]);
    assert!(Syntax::nil().terms().is_empty());
}

#[test]
fn test_reader_consumes_in_order() {
    let terms = vec![Syntax::symbol("a"), Syntax::number(1)];
    let mut reader = SyntaxReader::new(&terms);

    assert!(reader.has_next());
    assert_eq!(reader.peek(), Some(&Syntax::symbol("a")));
    assert_eq!(reader.read("name").ok(), Some(&Syntax::symbol("a")));
    assert_eq!(reader.remaining().len(), 1);

    let mut fork = reader.clone();
    assert_eq!(fork.next(), Some(&Syntax::number(1)));
    assert!(reader.has_next());
}

#[test]
fn test_reader_past_end_is_an_error() {
    let mut reader = SyntaxReader::new(&[]);
    match reader.read("value") {
        Err(error @ PrelogError::UnexpectedEnd { .. }) => {
            assert_eq!(error.to_string(), "value expected");
        }
        other => panic!("expected UnexpectedEnd, got {:?}", other),
    }
}

#[test]
fn test_syntax_serializes_with_kind_tags() {
    let term = Syntax::Braces(vec![Syntax::symbol("a"), Syntax::number(1)]);
    let json = serde_json::to_value(&term).unwrap();
    assert_eq!(json["kind"], "braces");
    assert_eq!(json["value"][0]["kind"], "symbol");
    assert_eq!(json["value"][0]["value"], "a");
}
