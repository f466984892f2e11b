//! The versions graph: dedup registries, arena storage and the query
//! surface.

use std::collections::HashMap;
use std::sync::RwLock;

use avm_core::{
    AvmError, EdgeId, LinkKey, NodeId, VersionEdge, VersionNode, VersionResolver,
};
use tracing::{debug, trace};

use crate::path;
use crate::store::GraphStore;

/// Directed weighted graph of schema versions and the patches between them.
///
/// Populated once at process initialization by the registration bootstrap,
/// then queried for the process lifetime. Registration is idempotent on
/// structural equality; nodes and edges are never removed or mutated.
///
/// Three independent reader-writer locks guard the node registry, the edge
/// registry and the graph storage. Query methods take read locks only and
/// may run concurrently. Lock order is registry before storage; the
/// storage lock is never held while waiting on a registry lock, and the
/// two registry locks are never held simultaneously.
#[derive(Debug, Default)]
pub struct VersionsGraph {
    nodes: RwLock<HashMap<VersionNode, NodeId>>,
    edges: RwLock<HashMap<VersionEdge, EdgeId>>,
    store: RwLock<GraphStore>,
}

impl VersionsGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema version, idempotently.
    ///
    /// A structurally equal node registered earlier yields the existing id
    /// and leaves the graph untouched.
    pub fn add_node(&self, node: VersionNode) -> NodeId {
        let mut registry = self.nodes.write().expect("nodes lock poisoned");
        if let Some(&id) = registry.get(&node) {
            trace!(name = node.name(), "schema version already registered");
            return id;
        }
        let mut store = self.store.write().expect("graph lock poisoned");
        let id = store.push_node(node.clone());
        debug!(
            name = node.name(),
            id = id.as_raw(),
            "registered schema version"
        );
        registry.insert(node, id);
        id
    }

    /// Registers a patch edge, idempotently.
    ///
    /// Both endpoints must have been registered through
    /// [`add_node`](Self::add_node) first; a missing endpoint is the
    /// contract error `unregistered-endpoint`. Re-adding a structurally
    /// equal edge yields the existing id; adding a *different* edge between
    /// an already-connected ordered pair is the contract error
    /// `duplicate-edge`.
    pub fn add_edge(&self, edge: VersionEdge) -> Result<EdgeId, AvmError> {
        let origin = self.endpoint_id(edge.origin_name())?;
        let target = self.endpoint_id(edge.target_name())?;

        let mut registry = self.edges.write().expect("edges lock poisoned");
        if let Some(&id) = registry.get(&edge) {
            trace!(patch = edge.patch_name(), "patch edge already registered");
            return Ok(id);
        }
        let mut store = self.store.write().expect("graph lock poisoned");
        if store.arc(origin, target).is_some() {
            return Err(AvmError::graph(
                "duplicate-edge",
                "a different edge already connects this ordered version pair",
            )
            .with_context("origin", edge.origin_name())
            .with_context("target", edge.target_name()));
        }
        debug!(
            patch = edge.patch_name(),
            origin = edge.origin_name(),
            target = edge.target_name(),
            weight = edge.weight(),
            "registered patch edge"
        );
        let id = store.push_edge(origin, target, edge.clone());
        registry.insert(edge, id);
        Ok(id)
    }

    /// Resolves a schema-version name to its id, exact and case-sensitive.
    ///
    /// Fails with `unknown-version` when no registered node matches. The
    /// registry holds tens to low-hundreds of versions, so a linear scan
    /// suffices.
    pub fn node_id(&self, name: &str) -> Result<NodeId, AvmError> {
        let registry = self.nodes.read().expect("nodes lock poisoned");
        registry
            .iter()
            .find(|(node, _)| node.name() == name)
            .map(|(_, &id)| id)
            .ok_or_else(|| unknown_version(name))
    }

    /// Returns a copy of the node registered under `id`.
    ///
    /// # Panics
    ///
    /// Ids are only valid for the graph that issued them; an id from
    /// another instance panics.
    pub fn node(&self, id: NodeId) -> VersionNode {
        self.store.read().expect("graph lock poisoned").node(id).clone()
    }

    /// Returns a copy of the directed edge between two adjacent vertices.
    ///
    /// Calling this for a non-adjacent pair is the contract error
    /// `missing-edge`; chain consumers are expected to only ask for pairs
    /// discovered via [`shortest_path`](Self::shortest_path).
    pub fn edge(&self, origin: NodeId, target: NodeId) -> Result<VersionEdge, AvmError> {
        let store = self.store.read().expect("graph lock poisoned");
        let (edge_id, _) = store
            .arc(origin, target)
            .ok_or_else(|| missing_edge(&store, origin, target))?;
        Ok(store.edge(edge_id).clone())
    }

    /// Computes the cheapest patch chain between two version names.
    pub fn shortest_path(&self, origin: &str, target: &str) -> Result<Vec<NodeId>, AvmError> {
        let origin = self.node_id(origin)?;
        let target = self.node_id(target)?;
        self.shortest_path_ids(origin, target)
    }

    /// Computes the cheapest patch chain between two registered versions.
    ///
    /// The returned sequence excludes the origin and is empty when origin
    /// and target coincide. An unreachable target is the typed error
    /// `no-path`.
    pub fn shortest_path_ids(
        &self,
        origin: NodeId,
        target: NodeId,
    ) -> Result<Vec<NodeId>, AvmError> {
        let store = self.store.read().expect("graph lock poisoned");
        trace!(
            origin = store.node(origin).name(),
            target = store.node(target).name(),
            "resolving patch chain"
        );
        path::shortest_chain(&store, origin, target).ok_or_else(|| {
            AvmError::version("no-path", "no patch chain connects these versions")
                .with_context("origin", store.node(origin).name())
                .with_context("target", store.node(target).name())
        })
    }

    /// Resolves the sub-version a nested structure takes when traversing
    /// the edge between `origin` and `target`.
    ///
    /// The edge's explicit link table is consulted first; without an exact
    /// entry, the target schema state's declared version for the structure
    /// type is adopted regardless of the origin sub-version. `Ok(None)`
    /// means the structure is untracked by this edge.
    pub fn linked_version(
        &self,
        origin: NodeId,
        target: NodeId,
        current: &LinkKey,
    ) -> Result<Option<String>, AvmError> {
        let store = self.store.read().expect("graph lock poisoned");
        let (edge_id, _) = store
            .arc(origin, target)
            .ok_or_else(|| missing_edge(&store, origin, target))?;
        if let Some(version) = store.edge(edge_id).linked_target(current) {
            return Ok(Some(version.to_string()));
        }
        Ok(store
            .node(target)
            .declared_version(&current.sub_type_id)
            .map(str::to_string))
    }

    /// Enumerates every version reachable from `name` in breadth-first
    /// discovery order, excluding `name` itself.
    ///
    /// Advisory query: an unknown name degrades to an empty list.
    pub fn connected_versions(&self, name: &str) -> Vec<String> {
        let origin = match self.node_id(name) {
            Ok(id) => id,
            Err(_) => return Vec::new(),
        };
        let store = self.store.read().expect("graph lock poisoned");
        let mut names: Vec<String> = path::discovery_order(&store, origin)
            .into_iter()
            .map(|id| store.node(id).name().to_string())
            .collect();
        // the origin always discovers itself first
        names.remove(0);
        names
    }

    /// Returns the number of registered schema versions.
    pub fn node_count(&self) -> usize {
        self.store.read().expect("graph lock poisoned").node_count()
    }

    /// Returns the number of registered patch edges.
    pub fn edge_count(&self) -> usize {
        self.store.read().expect("graph lock poisoned").edge_count()
    }

    fn endpoint_id(&self, name: &str) -> Result<NodeId, AvmError> {
        self.node_id(name).map_err(|_| {
            AvmError::graph(
                "unregistered-endpoint",
                "edge endpoint is not a registered schema version",
            )
            .with_context("name", name)
        })
    }
}

impl VersionResolver for VersionsGraph {
    fn node_id(&self, name: &str) -> Result<NodeId, AvmError> {
        VersionsGraph::node_id(self, name)
    }

    fn node(&self, id: NodeId) -> VersionNode {
        VersionsGraph::node(self, id)
    }

    fn edge(&self, origin: NodeId, target: NodeId) -> Result<VersionEdge, AvmError> {
        VersionsGraph::edge(self, origin, target)
    }

    fn shortest_path_ids(&self, origin: NodeId, target: NodeId) -> Result<Vec<NodeId>, AvmError> {
        VersionsGraph::shortest_path_ids(self, origin, target)
    }

    fn linked_version(
        &self,
        origin: NodeId,
        target: NodeId,
        current: &LinkKey,
    ) -> Result<Option<String>, AvmError> {
        VersionsGraph::linked_version(self, origin, target, current)
    }

    fn connected_versions(&self, name: &str) -> Vec<String> {
        VersionsGraph::connected_versions(self, name)
    }
}

fn unknown_version(name: &str) -> AvmError {
    AvmError::version(
        "unknown-version",
        "no schema version registered under that name",
    )
    .with_context("name", name)
}

fn missing_edge(store: &GraphStore, origin: NodeId, target: NodeId) -> AvmError {
    AvmError::graph("missing-edge", "these versions are not adjacent")
        .with_context("origin", store.node(origin).name())
        .with_context("target", store.node(target).name())
}
