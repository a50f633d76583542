//! Graph edge model

use serde::{Deserialize, Serialize};

/// Edge role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Caller frame to callee frame
    Call,
    /// Parent to child in a tree or dictionary stand-in
    Child,
    /// Forward link of a list stand-in
    Next,
    /// Backward link of a doubly linked list stand-in
    Prev,
}

/// Graph edge. Endpoints are node ids, not owned nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    pub kind: EdgeKind,
    pub animated: bool,

    /// Number of steps emitted before this edge existed
    #[serde(default)]
    pub introduced_at: usize,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            source_node_id: source_node_id.into(),
            target_node_id: target_node_id.into(),
            kind,
            animated: true,
            introduced_at: 0,
        }
    }

    pub fn introduced_at(mut self, step_count: usize) -> Self {
        self.introduced_at = step_count;
        self
    }
}
