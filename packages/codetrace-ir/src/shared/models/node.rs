//! Graph node model

use serde::{Deserialize, Serialize};

/// Structural role of a node; also the first component of its id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// One element of an array literal
    ArrayElement,
    /// One recognized call, labeled with its depth
    CallFrame,
    /// Stand-in node of a binary tree record
    TreeNode,
    /// Stand-in node of a linked list record
    ListNode,
    /// Stand-in node of a dictionary literal
    GraphNode,
}

impl NodeKind {
    /// Id prefix for this role
    pub fn id_prefix(&self) -> &'static str {
        match self {
            NodeKind::ArrayElement => "array",
            NodeKind::CallFrame => "recurse",
            NodeKind::TreeNode => "node",
            NodeKind::ListNode => "list",
            NodeKind::GraphNode => "dict",
        }
    }
}

/// Layout position handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,

    /// Variable or callable the node was synthesized for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Number of steps emitted before this node existed
    #[serde(default)]
    pub introduced_at: usize,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            position,
            owner: None,
            introduced_at: 0,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn introduced_at(mut self, step_count: usize) -> Self {
        self.introduced_at = step_count;
        self
    }

    /// Exact owner comparison (never a substring match)
    pub fn is_owned_by(&self, name: &str) -> bool {
        self.owner.as_deref() == Some(name)
    }
}
