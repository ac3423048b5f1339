//! Non-fatal diagnostics raised while flattening.
//!
//! A node that cannot be turned into a [`crate::PathValue`] (in practice a JSON
//! `null`) is skipped and reported to a [`DiagnosticSink`]. Diagnostics never
//! abort decomposition; they are a side channel separate from
//! [`crate::DecomposeError`].

use std::fmt;

/// The kind of a JSON node the flatten step could not turn into a value.
///
/// `Null` is the only kind valid JSON produces; `Number` covers a number with
/// no `f64` view, which the enabled serde_json features never yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Number,
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Number => "number",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// An unexpected node that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub kind: NodeKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected {} node at '{}'", self.kind, self.path)
    }
}

/// Receives diagnostics during a decomposition call.
pub trait DiagnosticSink {
    fn unexpected_node(&mut self, path: &str, kind: NodeKind);
}

/// Discards every diagnostic.
impl DiagnosticSink for () {
    fn unexpected_node(&mut self, _path: &str, _kind: NodeKind) {}
}

/// Forwards diagnostics as `tracing` warnings. Used by [`crate::decompose_tree`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn unexpected_node(&mut self, path: &str, kind: NodeKind) {
        tracing::warn!(path, %kind, "unexpected node kind, skipping");
    }
}

/// Keeps every diagnostic in memory, in the order they were raised.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn unexpected_node(&mut self, path: &str, kind: NodeKind) {
        self.diagnostics.push(Diagnostic {
            path: path.to_string(),
            kind,
        });
    }
}
