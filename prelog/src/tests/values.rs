use crate::interpreter::Interpreter;
use crate::syntax::{Syntax, SyntaxReader};
use crate::theory::Runtime;
use crate::value::{ErrorKind, NativeFn, Value, ValueKind};
use crate::{PrelogResult, Rank};
use std::rc::Rc;

fn zero(_: &mut Interpreter, _: &mut SyntaxReader<'_>) -> PrelogResult<Value> {
    Ok(Value::number(0))
}

#[test]
fn test_literal_ranks_are_neutral() {
    for value in [Value::symbol("a"), Value::string("a"), Value::number(1)] {
        assert_eq!(value.rank(), Rank::Neutral);
    }
    let binding = Value::binding(Value::symbol("x"), Value::number(1));
    assert_eq!(binding.rank(), Rank::Neutral);
    assert_eq!(binding.kind(), ValueKind::Binding);
}

#[test]
fn test_error_values_are_bottom() {
    let error = Value::syntax_error("cannot interpret syntax", Syntax::symbol("x"));
    assert_eq!(error.rank(), Rank::Bottom);
    assert!(error.is_error());
    assert_eq!(error.as_error().map(|e| e.kind()), Some(ErrorKind::Syntax));

    let error = Value::semantics_error("conflict", Value::number(1));
    assert_eq!(error.as_error().map(|e| e.kind()), Some(ErrorKind::Semantics));
}

#[test]
fn test_literals_compare_by_value() {
    assert!(Value::symbol("a").struct_eq(&Value::symbol("a")));
    assert!(!Value::symbol("a").struct_eq(&Value::string("a")));
    assert!(Value::number(2).struct_eq(&Value::Number("2.0".parse().unwrap())));
    assert!(!Value::number(2).struct_eq(&Value::number(3)));
}

#[test]
fn test_atoms_compare_by_identity() {
    let first = Value::atom(Rank::Top, Syntax::symbol("ok"));
    let second = Value::atom(Rank::Top, Syntax::symbol("ok"));
    assert!(first.struct_eq(&first.clone()));
    assert!(!first.struct_eq(&second));
}

#[test]
fn test_natives_compare_by_identity() {
    let function: NativeFn = Rc::new(zero);
    let first = Value::native(Value::symbol("f"), function.clone());
    let second = Value::native(Value::symbol("f"), function);
    assert!(first.struct_eq(&first.clone()));
    assert!(!first.struct_eq(&second));
}

#[test]
fn test_compound_values_compare_structurally() {
    let a = Value::binding(Value::symbol("x"), Value::number(1));
    let b = Value::binding(Value::symbol("x"), Value::number(1));
    let c = Value::binding(Value::symbol("x"), Value::number(2));
    assert!(a.struct_eq(&b));
    assert!(!a.struct_eq(&c));

    let left = Value::union(a.clone(), c.clone(), Rank::Neutral);
    let right = Value::union(b, c.clone(), Rank::Neutral);
    assert!(left.struct_eq(&right));
    assert!(!left.struct_eq(&Value::intersection(a, c, Rank::Neutral)));
}

#[test]
fn test_reflect_literals() {
    assert_eq!(Value::symbol("a").reflect(), Syntax::symbol("a"));
    assert_eq!(Value::string("a b").reflect(), Syntax::string("a b"));
    assert_eq!(Value::number(42).reflect(), Syntax::number(42));
}

#[test]
fn test_reflect_flattens_nested_junctions() {
    let inner = Value::union(Value::number(1), Value::number(2), Rank::Neutral);
    let outer = Value::union(inner, Value::number(3), Rank::Neutral);
    assert_eq!(outer.to_string(), "[1 2 3]");

    let inner = Value::intersection(Value::number(1), Value::number(2), Rank::Neutral);
    let union = Value::union(Value::symbol("a"), Value::symbol("b"), Rank::Neutral);
    let outer = Value::intersection(inner, union, Rank::Neutral);
    assert_eq!(outer.to_string(), "{1 2 [a b]}");
}

#[test]
fn test_reflect_binding_and_deferred() {
    let body = Syntax::Parens(vec![Syntax::symbol("greet")]);
    let binding = Value::binding(Value::symbol("f"), Value::deferred(body));
    assert_eq!(binding.to_string(), "def f (proc (greet))");
}

#[test]
fn test_reflect_error() {
    let error = Value::semantics_error(
        "native binding cannot be redefined",
        Value::binding(Value::symbol("true"), Value::number(5)),
    );
    assert_eq!(
        error.to_string(),
        "error \"native binding cannot be redefined\" (def true 5)"
    );
}

#[test]
fn test_reflect_atoms_and_natives_by_name() {
    let runtime = Runtime::default();
    assert_eq!(runtime.atoms().success.to_string(), "success");
    assert_eq!(runtime.atoms().falsehood.to_string(), "false");

    let native = Value::native(Value::symbol("witness"), Rc::new(zero));
    assert_eq!(native.to_string(), "witness");
}

#[test]
fn test_conjuncts_and_disjuncts() {
    let both = Value::intersection(Value::number(1), Value::number(2), Rank::Neutral);
    let leaves: Vec<String> = both.conjuncts().iter().map(ToString::to_string).collect();
    assert_eq!(leaves, vec!["1", "2"]);

    assert_eq!(both.disjuncts().len(), 1);
    assert_eq!(Value::number(1).conjuncts().len(), 1);
}

#[test]
fn test_hypothetical_keeps_shape_and_rank() {
    let binding = Value::binding(Value::symbol("c"), Value::number(1));
    let union = Value::union(binding.clone(), Value::number(2), Rank::Neutral);
    let hidden = union.hypothetical();

    assert_eq!(hidden.to_string(), "[(def c 1) 2]");
    assert_eq!(hidden.rank(), Rank::Neutral);
    assert!(hidden.struct_eq(&union));
    assert!(hidden.disjuncts()[0]
        .as_binding()
        .is_some_and(|binding| binding.is_hypothetical()));
    assert!(binding.as_binding().is_some_and(|binding| !binding.is_hypothetical()));
}
