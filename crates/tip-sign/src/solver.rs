//! The naive round-robin fixed-point solver (§4.5).
//!
//! This is deliberately the textbook algorithm, not a worklist: every pass
//! revisits every node in arena order and recomputes its `in`/`out` facts,
//! until a full pass leaves every node's facts unchanged. A worklist would
//! converge in fewer steps, but the naive algorithm is what the analysis
//! is specified against, and its termination only relies on the lattice
//! having finite height and the transfer functions being monotone — both
//! of which hold here.

use rustc_hash::FxHashMap;
use tip_cfg::{Cfg, NodeId};
use tip_syntax::Ident;

use crate::env::Env;
use crate::lattice::Sign;
use crate::transfer::transfer;

#[derive(Debug, Clone)]
pub struct NodeFacts {
    pub in_env: Env,
    pub out_env: Env,
}

pub struct AnalysisResult {
    facts: FxHashMap<NodeId, NodeFacts>,
}

impl AnalysisResult {
    pub fn in_env(&self, id: NodeId) -> &Env {
        &self.facts[&id].in_env
    }

    pub fn out_env(&self, id: NodeId) -> &Env {
        &self.facts[&id].out_env
    }
}

/// Runs the fixed-point solver over `cfg`. `params` are the analyzed
/// function's formal parameters: since they are bound on entry rather than
/// by any `Declaration` statement inside the body, they are seeded to `⊤`
/// in `Entry`'s environment directly, per §4.4's rule that entry's
/// predecessor join is `λx.⊤` for declared variables.
pub fn solve(cfg: &Cfg, params: &[Ident]) -> AnalysisResult {
    let mut entry_seed = Env::new();
    for p in params {
        entry_seed.set(p.clone(), Sign::Top);
    }

    let mut in_envs: FxHashMap<NodeId, Env> = FxHashMap::default();
    let mut out_envs: FxHashMap<NodeId, Env> = FxHashMap::default();
    for id in cfg.node_ids() {
        in_envs.insert(id, Env::new());
        out_envs.insert(id, Env::new());
    }

    let mut pass = 0;
    loop {
        pass += 1;
        let mut changed = false;

        for id in cfg.node_ids() {
            let new_in = if id == cfg.entry() {
                entry_seed.clone()
            } else {
                Env::join_all(cfg.predecessors(id).iter().map(|p| &out_envs[p]))
            };
            if new_in != in_envs[&id] {
                in_envs.insert(id, new_in.clone());
                changed = true;
            }

            let new_out = transfer(cfg.node(id), &new_in);
            if new_out != out_envs[&id] {
                out_envs.insert(id, new_out);
                changed = true;
            }
        }

        tracing::trace!(pass, changed, "fixed-point round-robin pass");
        if !changed {
            break;
        }
    }

    let facts = cfg
        .node_ids()
        .map(|id| {
            (id, NodeFacts { in_env: in_envs.remove(&id).unwrap(), out_env: out_envs.remove(&id).unwrap() })
        })
        .collect();
    AnalysisResult { facts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tip_cfg::build_cfg;
    use tip_syntax::{parse_program, Ident};

    #[test]
    fn straight_line_program_propagates_signs_to_exit() {
        let prog = parse_program("main(){ var x,y; x = 1; y = 0 - x; return y; }").unwrap();
        let cfg = build_cfg(prog.main().unwrap());
        let result = solve(&cfg, &[]);
        let exit_in = result.in_env(cfg.exit());
        assert_eq!(exit_in.get(&Ident::new("y")), crate::lattice::Sign::Neg);
    }

    #[test]
    fn loop_join_widens_to_top() {
        let prog = parse_program(
            "main(){ var x; x = 1; while (x>0) { x = 0 - x; } return x; }",
        )
        .unwrap();
        let cfg = build_cfg(prog.main().unwrap());
        let result = solve(&cfg, &[]);
        // `x` alternates sign each iteration around the loop header, so the
        // fixed point must widen it to `Top` there.
        let branch = cfg
            .node_ids()
            .find(|id| matches!(cfg.node(*id), tip_cfg::CfgNode::Branch(..)))
            .unwrap();
        assert_eq!(result.in_env(branch).get(&Ident::new("x")), crate::lattice::Sign::Top);
    }

    #[test]
    fn fixed_point_is_stable_under_one_more_pass() {
        let prog = parse_program("main(){ var x; x = 5; return x; }").unwrap();
        let cfg = build_cfg(prog.main().unwrap());
        let first = solve(&cfg, &[]);
        let second = solve(&cfg, &[]);
        for id in cfg.node_ids() {
            assert_eq!(first.in_env(id), second.in_env(id));
            assert_eq!(first.out_env(id), second.out_env(id));
        }
    }

    #[test]
    fn formal_parameters_are_seeded_to_top_at_entry() {
        let prog = parse_program("main(x){ return x + 1; }").unwrap();
        let cfg = build_cfg(prog.main().unwrap());
        let result = solve(&cfg, &prog.main().unwrap().params);
        assert_eq!(result.out_env(cfg.entry()).get(&Ident::new("x")), crate::lattice::Sign::Top);
        assert_eq!(result.in_env(cfg.exit()).get(&Ident::new("x")), crate::lattice::Sign::Top);
    }
}
