//! Sign analysis for TIP: an abstract interpretation over the five-point
//! sign lattice, solved by a naive round-robin fixed-point iteration over
//! `main`'s control-flow graph.

mod env;
mod eval;
mod lattice;
mod solver;
mod transfer;

pub use env::Env;
pub use lattice::Sign;
pub use solver::{solve, AnalysisResult, NodeFacts};

use tip_cfg::build_cfg;
use tip_syntax::Program;

/// Builds `main`'s CFG and runs sign analysis over it in one step. Returns
/// `None` if the program has no `main` function (structurally invalid for
/// this analysis, but not itself a type or parse error).
pub fn analyze_main(program: &Program) -> Option<AnalysisResult> {
    let main = program.main()?;
    let cfg = build_cfg(main);
    tracing::debug!(nodes = cfg.len(), "built main's control-flow graph");
    Some(solve(&cfg, &main.params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tip_syntax::{parse_program, Ident};

    #[test]
    fn analyze_main_reports_final_sign() {
        let prog = parse_program("main(){ var x; x = 3 * 2; return x; }").unwrap();
        let result = analyze_main(&prog).unwrap();
        let cfg = build_cfg(prog.main().unwrap());
        assert_eq!(result.in_env(cfg.exit()).get(&Ident::new("x")), Sign::Pos);
    }

    #[test]
    fn missing_main_returns_none() {
        let prog = parse_program("f(x){ return x; }").unwrap();
        assert!(analyze_main(&prog).is_none());
    }
}
