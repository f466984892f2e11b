//! Structured error types shared across the AVM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`AvmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (version names, type identifiers, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// Canonical error type for the version-migration resolver.
///
/// The two families preserve the distinction between expected runtime
/// absence and registration-order contract violations:
///
/// * [`AvmError::Version`] — a requested version does not exist
///   (`unknown-version`) or no patch chain connects two versions
///   (`no-path`). Callers are expected to catch these and report an
///   unsupported version to the end user.
/// * [`AvmError::Graph`] — the graph was populated out of order
///   (`unregistered-endpoint`, `duplicate-edge`) or queried for an edge
///   that does not exist (`missing-edge`). These indicate a bug in the
///   registration bootstrap, not a data-dependent condition; callers are
///   not expected to recover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum AvmError {
    /// A named version or a path between versions could not be found.
    #[error("version error: {0}")]
    Version(ErrorInfo),
    /// Graph population or adjacency contract violations.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
}

impl AvmError {
    /// Builds a version-family error.
    pub fn version(code: impl Into<String>, message: impl Into<String>) -> Self {
        AvmError::Version(ErrorInfo::new(code, message))
    }

    /// Builds a graph-family (contract violation) error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        AvmError::Graph(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            AvmError::Version(info) | AvmError::Graph(info) => info,
        }
    }

    /// Attaches a context entry to the error payload.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            AvmError::Version(info) => AvmError::Version(info.with_context(key, value)),
            AvmError::Graph(info) => AvmError::Graph(info.with_context(key, value)),
        }
    }
}
