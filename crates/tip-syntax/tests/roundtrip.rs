//! Whole-program parse → print → re-parse round trip (spec invariant #4).

use tip_syntax::parse_program;

fn assert_roundtrips(src: &str) {
    let first = parse_program(src).expect("first parse failed");
    let printed = first.to_string();
    let second = parse_program(&printed).unwrap_or_else(|e| {
        panic!("re-parsing printed output failed: {e}\n--- printed ---\n{printed}")
    });
    assert_eq!(first, second, "round trip changed the AST\n--- printed ---\n{printed}");
}

#[test]
fn scenario_1_roundtrips() {
    assert_roundtrips("main(){ var x; x = 42; return x; }");
}

#[test]
fn scenario_2_roundtrips() {
    assert_roundtrips("main(){ var x,y; x = 0; y = x - 1; return y; }");
}

#[test]
fn scenario_3_roundtrips() {
    assert_roundtrips("main(){ var p,x; x = 1; p = &x; *p = 2; return *p; }");
}

#[test]
fn scenario_4_roundtrips() {
    assert_roundtrips("main(){ var r; r = {a:1, b:2}; return r.a; }");
}

#[test]
fn scenario_5_roundtrips() {
    assert_roundtrips(
        "main(){ var x; x = input; if (x>0) { x = 1; } else { x = 0-1; } return x; }",
    );
}

#[test]
fn nested_while_and_calls_roundtrip() {
    assert_roundtrips(
        "fact(n){ var r; r = 1; while (n>0) { r = r * n; n = n - 1; } return r; }\n\
         main(){ var x; x = fact(5); output x; return x; }",
    );
}

#[test]
fn dereference_field_assignment_roundtrips() {
    assert_roundtrips(
        "main(){ var p,r; r = {a:1}; p = &r; (*p).a = 9; return (*p).a; }",
    );
}
