//! Owned arena backing the versions graph.
//!
//! Node and edge payloads live in append-only `Vec`s indexed by the raw id
//! value; adjacency is a per-vertex list of `(target, edge, weight)`
//! triples. The graph is small (tens of versions) and never shrinks, so no
//! tombstones or compaction exist.

use std::collections::HashMap;

use avm_core::{EdgeId, NodeId, VersionEdge, VersionNode};

fn node_index(id: NodeId) -> usize {
    id.as_raw() as usize
}

fn edge_index(id: EdgeId) -> usize {
    id.as_raw() as usize
}

#[derive(Debug, Default)]
pub(crate) struct GraphStore {
    nodes: Vec<VersionNode>,
    edges: Vec<VersionEdge>,
    adjacency: HashMap<NodeId, Vec<(NodeId, EdgeId, u32)>>,
}

impl GraphStore {
    /// Appends a vertex and returns its id.
    pub(crate) fn push_node(&mut self, node: VersionNode) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u64);
        self.nodes.push(node);
        id
    }

    /// Appends a directed arc between two existing vertices.
    pub(crate) fn push_edge(
        &mut self,
        origin: NodeId,
        target: NodeId,
        payload: VersionEdge,
    ) -> EdgeId {
        let id = EdgeId::from_raw(self.edges.len() as u64);
        let weight = payload.weight();
        self.edges.push(payload);
        self.adjacency
            .entry(origin)
            .or_default()
            .push((target, id, weight));
        id
    }

    /// Vertex payload lookup. Ids issued by another store are out of
    /// contract and panic.
    pub(crate) fn node(&self, id: NodeId) -> &VersionNode {
        &self.nodes[node_index(id)]
    }

    /// Edge payload lookup.
    pub(crate) fn edge(&self, id: EdgeId) -> &VersionEdge {
        &self.edges[edge_index(id)]
    }

    /// Returns the arc between two vertices, if the ordered pair is
    /// connected.
    pub(crate) fn arc(&self, origin: NodeId, target: NodeId) -> Option<(EdgeId, u32)> {
        self.neighbors(origin)
            .iter()
            .find(|(next, _, _)| *next == target)
            .map(|(_, edge, weight)| (*edge, *weight))
    }

    /// Returns the outgoing arcs of a vertex.
    pub(crate) fn neighbors(&self, origin: NodeId) -> &[(NodeId, EdgeId, u32)] {
        self.adjacency
            .get(&origin)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
