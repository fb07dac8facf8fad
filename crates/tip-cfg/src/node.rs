//! The control-flow graph's node payloads.

use la_arena::Idx;
use tip_syntax::{Expr, Stmt};

/// Either kind of conditional a [`CfgNode::Branch`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    If,
    While,
}

/// A single control-flow node.
///
/// `Entry` and `Exit` are unique per graph and carry no statement.
/// `Normal` wraps any non-branching statement, including the synthetic
/// trailing `Stmt::Return` built from a function's `return e;`. `Branch`
/// wraps an `if`/`while` condition expression; the statement lists of its
/// arms are never stored on the node itself; they are linearized into
/// `Normal`/`Branch` chains by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CfgNode {
    Entry,
    Exit,
    Normal(Stmt),
    Branch(Expr, BranchKind),
}

pub type NodeId = Idx<CfgNode>;
