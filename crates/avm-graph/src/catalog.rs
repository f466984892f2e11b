//! Per-context catalog of versions graphs.
//!
//! The platform keeps one migration graph per data context (for example
//! `"MedicalData"`); writers fetch the graph for their context before
//! asking it for supported export versions. The catalog is an explicitly
//! owned value constructed at bootstrap, not a process-wide singleton.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::graph::VersionsGraph;

/// Explicitly owned map from context name to its versions graph.
#[derive(Debug, Default)]
pub struct VersionsCatalog {
    graphs: RwLock<BTreeMap<String, Arc<VersionsGraph>>>,
}

impl VersionsCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the graph for a context, creating an empty one on first use.
    ///
    /// Idempotent: a known context yields the graph registered earlier.
    pub fn insert(&self, context: &str) -> Arc<VersionsGraph> {
        let mut graphs = self.graphs.write().expect("catalog lock poisoned");
        if let Some(graph) = graphs.get(context) {
            return Arc::clone(graph);
        }
        debug!(context, "created versions graph for context");
        let graph = Arc::new(VersionsGraph::new());
        graphs.insert(context.to_string(), Arc::clone(&graph));
        graph
    }

    /// Returns the graph for a context, if one was registered.
    pub fn graph(&self, context: &str) -> Option<Arc<VersionsGraph>> {
        let graphs = self.graphs.read().expect("catalog lock poisoned");
        graphs.get(context).map(Arc::clone)
    }

    /// Lists the registered context names, sorted.
    pub fn contexts(&self) -> Vec<String> {
        let graphs = self.graphs.read().expect("catalog lock poisoned");
        graphs.keys().cloned().collect()
    }
}
