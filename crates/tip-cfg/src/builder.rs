//! Builds a [`Cfg`] from a function body (§4.3).
//!
//! Each statement list is linearized: building a block returns the id of
//! its first node (if any) and the set of "dangling" node ids that still
//! need an edge to whatever follows the block. `if`/`while` recurse into
//! their arms and wire the branch node to each arm's first node, letting
//! the caller connect both arms' dangling ends onward. `while` additionally
//! wires its body's dangling ends back to its own branch node, which is
//! what makes the graph cyclic.

use la_arena::Arena;
use rustc_hash::FxHashMap;
use tip_syntax::{Function, Stmt};

use crate::graph::Cfg;
use crate::node::{BranchKind, CfgNode, NodeId};

pub fn build_cfg(function: &Function) -> Cfg {
    let mut builder = Builder {
        nodes: Arena::new(),
        succ: FxHashMap::default(),
        pred: FxHashMap::default(),
    };

    let entry = builder.add_node(CfgNode::Entry);
    let exit = builder.add_node(CfgNode::Exit);
    let (first, exits) = builder.build_block(&function.body);
    let ret_node = builder.add_node(CfgNode::Normal(Stmt::Return(function.ret.clone())));

    match first {
        Some(f) => builder.add_edge(entry, f),
        None => builder.add_edge(entry, ret_node),
    }
    for e in &exits {
        builder.add_edge(*e, ret_node);
    }
    builder.add_edge(ret_node, exit);

    Cfg { nodes: builder.nodes, entry, exit, succ: builder.succ, pred: builder.pred }
}

struct Builder {
    nodes: Arena<CfgNode>,
    succ: FxHashMap<NodeId, Vec<NodeId>>,
    pred: FxHashMap<NodeId, Vec<NodeId>>,
}

impl Builder {
    fn add_node(&mut self, node: CfgNode) -> NodeId {
        self.nodes.alloc(node)
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.succ.entry(from).or_default().push(to);
        self.pred.entry(to).or_default().push(from);
    }

    /// Returns the block's first node (`None` for an empty block) and the
    /// set of node ids with no successor yet inside this block.
    fn build_block(&mut self, stmts: &[Stmt]) -> (Option<NodeId>, Vec<NodeId>) {
        let mut first: Option<NodeId> = None;
        let mut dangling: Vec<NodeId> = Vec::new();

        for stmt in stmts {
            let (stmt_first, stmt_exits) = self.build_stmt(stmt);
            if let Some(sf) = stmt_first {
                if first.is_none() {
                    first = Some(sf);
                }
                for d in &dangling {
                    self.add_edge(*d, sf);
                }
                dangling = stmt_exits;
            }
        }

        (first, dangling)
    }

    fn build_stmt(&mut self, stmt: &Stmt) -> (Option<NodeId>, Vec<NodeId>) {
        match stmt {
            Stmt::If(cond, then_branch, else_branch) => {
                let branch = self.add_node(CfgNode::Branch(cond.clone(), BranchKind::If));
                let mut dangling: Vec<NodeId> = Vec::new();
                // Tracks whether `branch` itself still needs to fall
                // straight through to whatever follows (an empty `then`,
                // or an empty/absent `else`); pushed onto `dangling` at
                // most once even when both arms are empty.
                let mut falls_through = false;

                let (then_first, then_exits) = self.build_block(then_branch);
                match then_first {
                    Some(tf) => {
                        self.add_edge(branch, tf);
                        dangling.extend(then_exits);
                    }
                    None => falls_through = true,
                }

                match else_branch {
                    Some(else_stmts) => {
                        let (else_first, else_exits) = self.build_block(else_stmts);
                        match else_first {
                            Some(ef) => {
                                self.add_edge(branch, ef);
                                dangling.extend(else_exits);
                            }
                            None => falls_through = true,
                        }
                    }
                    // No `else`: the false branch falls through directly.
                    None => falls_through = true,
                }

                if falls_through {
                    dangling.push(branch);
                }

                (Some(branch), dangling)
            }
            Stmt::While(cond, body) => {
                let branch = self.add_node(CfgNode::Branch(cond.clone(), BranchKind::While));
                let (body_first, body_exits) = self.build_block(body);
                if let Some(bf) = body_first {
                    self.add_edge(branch, bf);
                }
                for e in &body_exits {
                    self.add_edge(*e, branch);
                }
                (Some(branch), vec![branch])
            }
            other => {
                let id = self.add_node(CfgNode::Normal(other.clone()));
                (Some(id), vec![id])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tip_syntax::parse_program;

    fn main_cfg(src: &str) -> Cfg {
        let prog = parse_program(src).unwrap();
        build_cfg(prog.main().unwrap())
    }

    #[test]
    fn straight_line_program_chains_entry_to_exit() {
        let cfg = main_cfg("main(){ var x; x = 1; x = x + 1; return x; }");
        assert_eq!(cfg.successors(cfg.entry()).len(), 1);
        // entry -> decl -> assign -> assign -> return -> exit
        assert_eq!(cfg.len(), 6);
    }

    #[test]
    fn if_without_else_has_two_incoming_edges_at_join() {
        let cfg = main_cfg("main(){ var x; x = 1; if (x>0) { x = 2; } return x; }");
        // The branch node should reach both the `then` body and fall through.
        let branch = cfg
            .node_ids()
            .find(|id| matches!(cfg.node(*id), CfgNode::Branch(_, BranchKind::If)))
            .unwrap();
        assert_eq!(cfg.successors(branch).len(), 2);
    }

    #[test]
    fn if_with_both_arms_empty_does_not_duplicate_the_fallthrough_edge() {
        let cfg = main_cfg("main(){ var x; x = 1; if (x>0) {} else {} return x; }");
        let branch = cfg
            .node_ids()
            .find(|id| matches!(cfg.node(*id), CfgNode::Branch(_, BranchKind::If)))
            .unwrap();
        // Both arms are empty, so the branch falls straight through to
        // `return x` on both edges — but that's a single CFG edge, not two.
        assert_eq!(cfg.successors(branch).len(), 1);
        let join = cfg.successors(branch)[0];
        assert_eq!(cfg.predecessors(join).iter().filter(|p| **p == branch).count(), 1);
    }

    #[test]
    fn while_loop_has_a_back_edge_into_its_branch_node() {
        let cfg = main_cfg("main(){ var x; x = 0; while (x>0) { x = x - 1; } return x; }");
        let branch = cfg
            .node_ids()
            .find(|id| matches!(cfg.node(*id), CfgNode::Branch(_, BranchKind::While)))
            .unwrap();
        let preds = cfg.predecessors(branch);
        // predecessors: the statement before the loop, and the loop body's
        // last statement (the back edge).
        assert_eq!(preds.len(), 2);
    }

    #[test]
    fn entry_and_exit_are_unique() {
        let cfg = main_cfg("main(){ return 0; }");
        assert_eq!(cfg.predecessors(cfg.entry()).len(), 0);
        assert_eq!(cfg.successors(cfg.exit()).len(), 0);
    }
}
