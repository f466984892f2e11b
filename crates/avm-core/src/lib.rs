#![deny(missing_docs)]

//! Core types and contracts for the atom version-migration resolver.
//!
//! Serialized root objects carry a named schema version; upgrading (or
//! downgrading) stored data means walking a chain of incremental patches
//! between schema states. This crate defines the value types describing
//! those states and patches, the structured error type, and the
//! [`VersionResolver`] contract the migration collaborators program
//! against. The graph engine implementing the contract lives in
//! `avm-graph`.

use serde::{Deserialize, Serialize};

pub mod errors;
mod versions;

pub use errors::{AvmError, ErrorInfo};
pub use versions::{
    LinkDescriptor, LinkKey, VersionDescriptor, VersionEdge, VersionNode, DEFAULT_WEIGHT,
};

/// Identifier for a registered schema version within a resolver graph.
///
/// Ids are only meaningful to the graph instance that issued them; handing
/// an id to another instance is outside the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates an identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a registered patch edge within a resolver graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates an identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Query contract of the version-migration resolver.
///
/// The patch-chain consumer calls [`shortest_path`](Self::shortest_path)
/// for the ordered chain of versions to migrate through, then
/// [`edge`](Self::edge) per consecutive pair for the patch to apply. The
/// content filter calls [`linked_version`](Self::linked_version) once per
/// nested structure instance while rewriting an object. All methods are
/// safe to call from concurrent reader threads.
pub trait VersionResolver: Send + Sync {
    /// Resolves a schema-version name (exact, case-sensitive) to its id.
    ///
    /// Fails with the `unknown-version` error when no node matches.
    fn node_id(&self, name: &str) -> Result<NodeId, AvmError>;

    /// Returns a copy of the node registered under an id this resolver
    /// issued.
    fn node(&self, id: NodeId) -> VersionNode;

    /// Returns a copy of the directed edge between two adjacent versions.
    ///
    /// Calling this for a non-adjacent pair is a contract violation and
    /// fails with the `missing-edge` error.
    fn edge(&self, origin: NodeId, target: NodeId) -> Result<VersionEdge, AvmError>;

    /// Computes the cheapest patch chain between two registered versions.
    ///
    /// The returned sequence excludes the origin; it is empty when origin
    /// and target coincide. Fails with the `no-path` error when the target
    /// is unreachable.
    fn shortest_path_ids(&self, origin: NodeId, target: NodeId) -> Result<Vec<NodeId>, AvmError>;

    /// Resolves the sub-version a nested structure takes when traversing
    /// the edge between `origin` and `target`.
    ///
    /// The edge's explicit link table wins; otherwise the target schema
    /// state's declared version for the structure type is adopted. `None`
    /// means the structure is untracked by this edge and the caller decides
    /// how to treat it.
    fn linked_version(
        &self,
        origin: NodeId,
        target: NodeId,
        current: &LinkKey,
    ) -> Result<Option<String>, AvmError>;

    /// Enumerates the names of every version reachable from `name`, in
    /// discovery order, excluding `name` itself.
    ///
    /// Advisory query: unknown names degrade to an empty list, never an
    /// error.
    fn connected_versions(&self, name: &str) -> Vec<String>;

    /// Name-based convenience over [`shortest_path_ids`](Self::shortest_path_ids).
    fn shortest_path(&self, origin: &str, target: &str) -> Result<Vec<NodeId>, AvmError> {
        let origin = self.node_id(origin)?;
        let target = self.node_id(target)?;
        self.shortest_path_ids(origin, target)
    }
}
