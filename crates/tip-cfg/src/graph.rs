//! The CFG itself: an arena of nodes plus successor/predecessor adjacency.
//!
//! Nodes are addressed by arena index rather than any `Rc`/`Arc` cycle, so
//! a loop's back-edge (which makes the graph genuinely cyclic) is just
//! another entry in the adjacency maps, not a reference cycle to manage.

use rustc_hash::FxHashMap;

use crate::node::{CfgNode, NodeId};

pub struct Cfg {
    pub(crate) nodes: la_arena::Arena<CfgNode>,
    pub(crate) entry: NodeId,
    pub(crate) exit: NodeId,
    pub(crate) succ: FxHashMap<NodeId, Vec<NodeId>>,
    pub(crate) pred: FxHashMap<NodeId, Vec<NodeId>>,
}

impl Cfg {
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    pub fn exit(&self) -> NodeId {
        self.exit
    }

    pub fn node(&self, id: NodeId) -> &CfgNode {
        &self.nodes[id]
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        self.succ.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        self.pred.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All node ids, in arena (allocation) order. Not a traversal order;
    /// the fixed-point solver iterates this list repeatedly regardless of
    /// graph structure (see `tip-sign`'s naive round-robin solver).
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
