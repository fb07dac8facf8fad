//! End-to-end type inference over whole programs.

use tip_syntax::parse_program;
use tip_ty::{check, resolve_for_display, Expr, Ident, Type, TypeError};

fn type_of(src: &str, var: &str) -> String {
    let prog = parse_program(src).expect("parse failed");
    let mut solver = check(&prog).expect("type analysis failed");
    let ty = resolve_for_display(&mut solver, &Type::expr_var(Expr::Id(Ident::new(var))));
    ty.to_string()
}

#[test]
fn scenario_1_plain_int() {
    assert_eq!(type_of("main(){ var x; x = 42; return x; }", "x"), "int");
}

#[test]
fn scenario_2_arithmetic_stays_int() {
    assert_eq!(
        type_of("main(){ var x,y; x = 0; y = x - 1; return y; }", "y"),
        "int"
    );
}

#[test]
fn scenario_3_pointer_round_trip() {
    let prog =
        parse_program("main(){ var p,x; x = 1; p = &x; *p = 2; return *p; }").unwrap();
    let mut solver = check(&prog).unwrap();
    let p_ty = resolve_for_display(&mut solver, &Type::expr_var(Expr::Id(Ident::new("p"))));
    assert_eq!(p_ty.to_string(), "&int");
}

#[test]
fn scenario_5_branches_both_sides_int() {
    assert_eq!(
        type_of(
            "main(){ var x; x = input; if (x>0) { x = 1; } else { x = 0-1; } return x; }",
            "x"
        ),
        "int"
    );
}

#[test]
fn scenario_6_using_a_pointer_as_int_is_rejected() {
    let prog =
        parse_program("main(){ var p,x; x = 1; p = &x; p = p + 1; return p; }").unwrap();
    let err = check(&prog).unwrap_err();
    assert!(matches!(err, TypeError::ConstructorMismatch { .. }));
}

#[test]
fn functions_with_incompatible_call_arity_are_rejected() {
    let prog = parse_program(
        "add(a, b){ return a + b; }\n\
         main(){ var x; x = add(1); return x; }",
    )
    .unwrap();
    let err = check(&prog).unwrap_err();
    assert!(matches!(err, TypeError::ArityMismatch { .. }));
}

#[test]
fn main_parameters_and_return_are_forced_to_int() {
    let prog = parse_program("main(){ return 1; }").unwrap();
    assert!(check(&prog).is_ok());
}
