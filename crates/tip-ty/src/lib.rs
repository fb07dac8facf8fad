//! Constraint generation and union-find unification for TIP's type system.
//!
//! The pipeline is two phases, mirroring §4.1/§4.2: [`collect`] walks a
//! [`tip_syntax::Program`] and produces an unordered list of equality
//! constraints plus the global set of field names ever mentioned; [`check`]
//! (or [`UnificationSolver::solve`] directly) runs those constraints through
//! a union-find over compound type terms and reports the first failure.

mod collector;
mod constraint;
mod display;
mod error;
mod types;
mod unify;

pub use collector::{collect, CollectedConstraints};
pub use constraint::TypeEqualityConstraint;
pub use display::resolve_for_display;
pub use error::TypeError;
pub use tip_syntax::{Expr, Ident};
pub use types::Type;
pub use unify::UnificationSolver;

use tip_syntax::Program;

/// Runs constraint collection followed by unification over a whole program,
/// returning the solver (so callers can resolve and print any type) or the
/// first unification failure encountered.
pub fn check(program: &Program) -> Result<UnificationSolver, TypeError> {
    let collected = collect(program);
    tracing::debug!(
        constraints = collected.constraints.len(),
        record_fields = collected.record_fields.len(),
        "collected type constraints"
    );
    UnificationSolver::solve(&collected.constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tip_syntax::parse_program;

    fn type_of(solver: &mut UnificationSolver, src_var: &str) -> Type {
        let var = Type::expr_var(Expr::Id(Ident::new(src_var)));
        resolve_for_display(solver, &var)
    }

    #[test]
    fn scenario_1_infers_int() {
        let prog = parse_program("main(){ var x; x = 42; return x; }").unwrap();
        let mut solver = check(&prog).unwrap();
        assert_eq!(type_of(&mut solver, "x").to_string(), "int");
    }

    #[test]
    fn scenario_3_infers_pointer_to_int() {
        let prog =
            parse_program("main(){ var p,x; x = 1; p = &x; *p = 2; return *p; }").unwrap();
        let mut solver = check(&prog).unwrap();
        assert_eq!(type_of(&mut solver, "p").to_string(), "&int");
        assert_eq!(type_of(&mut solver, "x").to_string(), "int");
    }

    #[test]
    fn scenario_4_infers_record_with_absent_fields_padded() {
        let prog = parse_program(
            "main(){ var r,s; r = {a:1, b:2}; s = {a:3}; return r.a + s.a; }",
        )
        .unwrap();
        let mut solver = check(&prog).unwrap();
        let ty = type_of(&mut solver, "s");
        let text = ty.to_string();
        assert!(text.contains("a: int"));
        assert!(text.contains("b: absence") || text.contains("absence"));
    }

    #[test]
    fn using_an_int_as_a_function_fails() {
        let prog = parse_program("main(){ var x; x = 1; x = x(); return x; }").unwrap();
        let err = check(&prog).unwrap_err();
        assert!(matches!(err, TypeError::ConstructorMismatch { .. }));
    }

    #[test]
    fn mismatched_record_shapes_in_one_variable_fail() {
        let prog = parse_program(
            "main(){ var x; x = {a:1}; x = {b:2}; return 0; }",
        )
        .unwrap();
        // Both record literals share the same global field set ({a, b}),
        // and get padded to `{a: int, b: absence}` / `{a: absence, b: int}`
        // respectively; unifying those fails on the `a` field (int vs
        // absence).
        let err = check(&prog).unwrap_err();
        assert!(matches!(err, TypeError::AbsencePresentMismatch { .. }));
    }

    #[test]
    fn function_is_typed_by_its_params_and_return() {
        let prog = parse_program(
            "id(y){ return y; }\n\
             main(){ var x; x = id(7); return x; }",
        )
        .unwrap();
        let mut solver = check(&prog).unwrap();
        assert_eq!(type_of(&mut solver, "x").to_string(), "int");
    }
}
