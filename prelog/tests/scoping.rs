use prelog::{NativeLibrary, ResourceLimits, Session, Transcript, Value};
use std::cell::Cell;
use std::rc::Rc;

/// A session with a `witness` native that records whether it ran.
fn witnessed_session() -> (Session<Transcript>, Rc<Cell<bool>>) {
    let invoked = Rc::new(Cell::new(false));
    let flag = invoked.clone();
    let natives = NativeLibrary::standard().with_callable("witness", move |_, _| {
        flag.set(true);
        Ok(Value::symbol("witnessed"))
    });
    let session = Session::with_natives(Transcript::default(), ResourceLimits::default(), natives);
    (session, invoked)
}

#[test]
fn test_or_scope_bindings_stay_in_their_alternative() {
    let mut session = Session::new(Transcript::default());
    session.send_code("[ { def a 1 a } { a } ]").unwrap();
    session.send_code("a").unwrap();

    // The sibling alternative sees `a` unbound, and so does the parent.
    assert_eq!(session.sink().lines(), vec!["[{(def a 1) 1} a]", "a"]);
    assert!(session.lookup("a").is_none());
}

#[test]
fn test_winning_alternative_does_not_publish_its_names() {
    let mut session = Session::new(Transcript::default());
    session.send_code("[ def c 1 false ]").unwrap();
    session.send_code("c").unwrap();

    assert_eq!(session.sink().lines(), vec!["def c 1", "c"]);
    assert!(session.lookup("c").is_none());
}

#[test]
fn test_winning_alternative_block_does_not_publish_its_names() {
    let mut session = Session::new(Transcript::default());
    session.send_code("[ { def a 1 a } false ]").unwrap();
    session.send_code("a").unwrap();

    assert_eq!(session.sink().lines(), vec!["{(def a 1) 1}", "a"]);
    assert!(session.lookup("a").is_none());
}

#[test]
fn test_hypothetical_name_can_be_defined_for_real() {
    let mut session = Session::new(Transcript::default());
    session.send_code("[ def c 1 false ]").unwrap();
    session.send_code("def c 2").unwrap();
    session.send_code("c").unwrap();

    assert_eq!(session.sink().lines(), vec!["def c 1", "2"]);
}

#[test]
fn test_and_scope_result_joins_parent_program() {
    let mut session = Session::new(Transcript::default());
    session.send_code("{ def b 1 } b").unwrap();

    assert_eq!(session.sink().lines(), vec!["def b 1", "1"]);
}

#[test]
fn test_inner_scope_sees_outer_bindings() {
    let mut session = Session::new(Transcript::default());
    session.send_code("def x 1").unwrap();
    session.send_code("{ x 2 }").unwrap();

    assert_eq!(session.sink().lines(), vec!["def x 1", "{1 2}"]);
}

#[test]
fn test_names_bound_in_or_scope_are_hypothetical() {
    let mut session = Session::new(Transcript::default());
    session.send_code("[ def c 1 c ]").unwrap();

    assert_eq!(session.sink().lines(), vec!["[(def c 1) c]"]);
}

#[test]
fn test_and_scope_stops_at_first_failure() {
    let (mut session, invoked) = witnessed_session();
    session.send_code("{ failure witness }").unwrap();

    assert!(!invoked.get(), "witness after a failure must not run");
    assert_eq!(session.sink().lines(), vec!["failure"]);
}

#[test]
fn test_and_scope_runs_witness_after_success() {
    let (mut session, invoked) = witnessed_session();
    session.send_code("{ success witness }").unwrap();

    assert!(invoked.get());
    assert_eq!(session.sink().lines(), vec!["witnessed"]);
}

#[test]
fn test_or_scope_stops_at_first_success() {
    let (mut session, invoked) = witnessed_session();
    session.send_code("rank [ success witness ]").unwrap();

    assert!(!invoked.get());
    assert_eq!(session.sink().lines(), vec!["2"]);
}

#[test]
fn test_error_poisons_conjunction() {
    let mut session = Session::new(Transcript::default());
    session.send_code("rank { 1 (2 3) 4 }").unwrap();

    assert_eq!(session.sink().lines(), vec!["-2"]);
}

#[test]
fn test_error_is_outranked_in_disjunction() {
    let mut session = Session::new(Transcript::default());
    session.send_code("[ (2 3) 4 ]").unwrap();

    assert_eq!(session.sink().lines(), vec!["4"]);
}
