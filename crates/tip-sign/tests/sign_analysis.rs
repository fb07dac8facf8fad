//! End-to-end sign analysis over whole `main` functions.

use tip_cfg::build_cfg;
use tip_sign::{analyze_main, Sign};
use tip_syntax::{parse_program, Ident};

#[test]
fn conditional_branches_join_to_top_at_the_merge_point() {
    let prog = parse_program(
        "main(){ var x; x = input; if (x>0) { x = 1; } else { x = 0-1; } return x; }",
    )
    .unwrap();
    let cfg = build_cfg(prog.main().unwrap());
    let result = analyze_main(&prog).unwrap();
    assert_eq!(result.in_env(cfg.exit()).get(&Ident::new("x")), Sign::Top);
}

#[test]
fn division_by_a_definite_zero_is_bottom() {
    let prog = parse_program("main(){ var x,y; x = 0; y = 5 / x; return y; }").unwrap();
    let cfg = build_cfg(prog.main().unwrap());
    let result = analyze_main(&prog).unwrap();
    assert_eq!(result.in_env(cfg.exit()).get(&Ident::new("y")), Sign::Bottom);
}

#[test]
fn main_with_a_formal_parameter_sees_it_as_top_not_bottom() {
    let prog = parse_program("main(x){ x = x + 1; return x; }").unwrap();
    let cfg = build_cfg(prog.main().unwrap());
    let result = analyze_main(&prog).unwrap();
    assert_eq!(result.in_env(cfg.exit()).get(&Ident::new("x")), Sign::Top);
}

#[test]
fn declared_but_never_assigned_variable_is_top_not_bottom() {
    let prog = parse_program("main(){ var x,y; x = 1; return x; }").unwrap();
    let cfg = build_cfg(prog.main().unwrap());
    let result = analyze_main(&prog).unwrap();
    assert_eq!(result.in_env(cfg.exit()).get(&Ident::new("y")), Sign::Top);
}
