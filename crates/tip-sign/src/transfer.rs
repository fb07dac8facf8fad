//! The per-node transfer function (§4.4).
//!
//! Only `Declaration` and `Assignment` change the abstract state; every
//! other statement (including both kinds of dereference/field assignment,
//! which this analysis does not attempt to track through pointers or
//! records) passes its incoming state through unchanged. Branch nodes
//! likewise pass their state through: the condition narrows reachability,
//! not variable values, in this analysis.

use tip_cfg::CfgNode;
use tip_syntax::Stmt;

use crate::env::Env;
use crate::eval::eval;
use crate::lattice::Sign;

pub fn transfer(node: &CfgNode, input: &Env) -> Env {
    match node {
        CfgNode::Entry | CfgNode::Exit => input.clone(),
        CfgNode::Branch(..) => input.clone(),
        CfgNode::Normal(stmt) => transfer_stmt(stmt, input),
    }
}

fn transfer_stmt(stmt: &Stmt, input: &Env) -> Env {
    match stmt {
        Stmt::Declaration(names) => {
            let mut out = input.clone();
            for name in names {
                out.set(name.clone(), Sign::Top);
            }
            out
        }
        Stmt::Assignment(x, e) => {
            let mut out = input.clone();
            let value = eval(input, e);
            out.set(x.clone(), value);
            out
        }
        Stmt::DereferenceAssignment(..)
        | Stmt::FieldAssignment(..)
        | Stmt::DereferenceFieldAssignment(..)
        | Stmt::Output(_)
        | Stmt::Return(_) => input.clone(),
        Stmt::If(..) | Stmt::While(..) => input.clone(),
    }
}
