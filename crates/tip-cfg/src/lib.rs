//! Intraprocedural control-flow graph construction for TIP.
//!
//! Scoped to a single function at a time; the sign analysis only ever runs
//! this over `main`, but nothing here assumes that.

mod builder;
mod graph;
mod node;

pub use builder::build_cfg;
pub use graph::Cfg;
pub use node::{BranchKind, CfgNode, NodeId};
