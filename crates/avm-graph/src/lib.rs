#![deny(missing_docs)]

//! Version-migration graph engine implementing the `avm-core` contracts.
//!
//! A [`VersionsGraph`] holds every known schema version and the directed,
//! weighted patches between them. The migration bootstrap populates it
//! once; afterwards arbitrary reader threads resolve patch chains
//! ([`VersionsGraph::shortest_path`]), per-structure sub-version links
//! ([`VersionsGraph::linked_version`]) and reachable upgrade targets
//! ([`VersionsGraph::connected_versions`]). A [`VersionsCatalog`] groups
//! one graph per data context.

mod catalog;
mod graph;
mod path;
mod store;

pub use catalog::VersionsCatalog;
pub use graph::VersionsGraph;
