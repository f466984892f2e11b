//! Value types describing schema versions, nested-structure descriptors and
//! migration patches.
//!
//! All types here are immutable values: they are built once by the
//! registration bootstrap, handed to the graph, and only ever copied back
//! out. Structural equality drives the idempotent-insertion registries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default weight of a patch edge: one ordinary patch step.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Names one version of one (root or nested) structure type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Identifier of the structure type.
    pub type_id: String,
    /// Version of that type declared at the owning schema state.
    pub version: String,
}

impl VersionDescriptor {
    /// Creates a descriptor for the given type and version.
    pub fn new(type_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            version: version.into(),
        }
    }
}

/// A named root-schema version together with the versions of every nested
/// structure known to exist at that state.
///
/// The descriptor set is keyed by `type_id`: a schema state declares at most
/// one version per structure type. Equality is structural (name plus the
/// full descriptor set), which is what the node registry deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionNode {
    name: String,
    descriptors: BTreeMap<String, String>,
}

impl VersionNode {
    /// Creates a node for the given root-schema version name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: BTreeMap::new(),
        }
    }

    /// Declares the version of a nested structure type at this schema state.
    ///
    /// Re-declaring a type replaces the previous entry.
    pub fn with_descriptor(
        mut self,
        type_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.descriptors.insert(type_id.into(), version.into());
        self
    }

    /// Returns the root-schema version name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version this schema state declares for a structure type.
    pub fn declared_version(&self, type_id: &str) -> Option<&str> {
        self.descriptors.get(type_id).map(String::as_str)
    }

    /// Iterates over the descriptor set.
    pub fn descriptors(&self) -> impl Iterator<Item = VersionDescriptor> + '_ {
        self.descriptors
            .iter()
            .map(|(type_id, version)| VersionDescriptor::new(type_id.clone(), version.clone()))
    }
}

/// Key of one explicit link entry: a nested structure type paired with its
/// sub-version on the origin side of an edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    /// Identifier of the nested structure type.
    pub sub_type_id: String,
    /// Sub-version of that type on the edge's origin side.
    pub origin_sub_version: String,
}

impl LinkKey {
    /// Creates a link-table key.
    pub fn new(sub_type_id: impl Into<String>, origin_sub_version: impl Into<String>) -> Self {
        Self {
            sub_type_id: sub_type_id.into(),
            origin_sub_version: origin_sub_version.into(),
        }
    }
}

/// One patch-author-declared remap: a nested structure's (type, origin
/// sub-version) pair mapped to its sub-version after the patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    /// Identifier of the nested structure type.
    pub sub_type_id: String,
    /// Sub-version on the edge's origin side.
    pub origin_sub_version: String,
    /// Sub-version on the edge's target side.
    pub target_sub_version: String,
}

impl LinkDescriptor {
    /// Creates a remap entry.
    pub fn new(
        sub_type_id: impl Into<String>,
        origin_sub_version: impl Into<String>,
        target_sub_version: impl Into<String>,
    ) -> Self {
        Self {
            sub_type_id: sub_type_id.into(),
            origin_sub_version: origin_sub_version.into(),
            target_sub_version: target_sub_version.into(),
        }
    }

    /// Returns the link-table key of this entry.
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.sub_type_id.clone(), self.origin_sub_version.clone())
    }
}

/// A directed, weighted patch between two registered schema versions.
///
/// Carries the logical patch name and the explicit link table. At most one
/// target exists per [`LinkKey`] within an edge; [`VersionEdge::with_link`]
/// replaces a previous entry for the same key. Equality is structural,
/// which is what the edge registry deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EdgeDef", into = "EdgeDef")]
pub struct VersionEdge {
    origin_name: String,
    target_name: String,
    patch_name: String,
    weight: u32,
    links: BTreeMap<LinkKey, String>,
}

impl VersionEdge {
    /// Creates a patch edge with [`DEFAULT_WEIGHT`] and an empty link table.
    pub fn new(
        origin_name: impl Into<String>,
        target_name: impl Into<String>,
        patch_name: impl Into<String>,
    ) -> Self {
        Self {
            origin_name: origin_name.into(),
            target_name: target_name.into(),
            patch_name: patch_name.into(),
            weight: DEFAULT_WEIGHT,
            links: BTreeMap::new(),
        }
    }

    /// Sets the edge weight. Weights below 1 are raised to 1.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight.max(1);
        self
    }

    /// Adds an explicit remap entry, replacing any previous entry for the
    /// same (type, origin sub-version) key.
    pub fn with_link(mut self, link: LinkDescriptor) -> Self {
        self.links.insert(link.key(), link.target_sub_version);
        self
    }

    /// Returns the origin schema-version name.
    pub fn origin_name(&self) -> &str {
        &self.origin_name
    }

    /// Returns the target schema-version name.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Returns the logical name of the patch this edge represents.
    pub fn patch_name(&self) -> &str {
        &self.patch_name
    }

    /// Returns the Dijkstra weight of this edge.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Looks up the explicit link table.
    pub fn linked_target(&self, key: &LinkKey) -> Option<&str> {
        self.links.get(key).map(String::as_str)
    }

    /// Iterates over the explicit link table.
    pub fn links(&self) -> impl Iterator<Item = LinkDescriptor> + '_ {
        self.links.iter().map(|(key, target)| {
            LinkDescriptor::new(
                key.sub_type_id.clone(),
                key.origin_sub_version.clone(),
                target.clone(),
            )
        })
    }
}

/// Declarative serialized form of a [`VersionEdge`]: the link table is a
/// plain list of remap entries so edge definitions stay readable in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeDef {
    origin_name: String,
    target_name: String,
    patch_name: String,
    #[serde(default = "EdgeDef::default_weight")]
    weight: u32,
    #[serde(default)]
    links: Vec<LinkDescriptor>,
}

impl EdgeDef {
    fn default_weight() -> u32 {
        DEFAULT_WEIGHT
    }
}

impl From<EdgeDef> for VersionEdge {
    fn from(def: EdgeDef) -> Self {
        let mut edge = VersionEdge::new(def.origin_name, def.target_name, def.patch_name)
            .with_weight(def.weight);
        for link in def.links {
            edge = edge.with_link(link);
        }
        edge
    }
}

impl From<VersionEdge> for EdgeDef {
    fn from(edge: VersionEdge) -> Self {
        let links = edge.links().collect();
        Self {
            origin_name: edge.origin_name,
            target_name: edge.target_name,
            patch_name: edge.patch_name,
            weight: edge.weight,
            links,
        }
    }
}
