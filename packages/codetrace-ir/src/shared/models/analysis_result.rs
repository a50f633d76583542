//! Analysis result: the only unit exchanged across the analyzer boundary

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::{Edge, Node, Step, StructureTag, VariableEntry};

/// Complete trace for one analysis request
///
/// `Default` is the canonical empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub structures: Vec<StructureTag>,
    pub variable_history: Vec<VariableEntry>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub steps: Vec<Step>,
}

/// Invariant broken by a trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceViolation {
    #[error("step at position {position} has index {index}")]
    NonDenseIndex { position: usize, index: usize },

    #[error("step {step} references unknown node '{node_id}'")]
    UnknownNode { step: usize, node_id: String },

    #[error("step {step} references node '{node_id}' created after it")]
    ForwardNodeReference { step: usize, node_id: String },

    #[error("step {step} references unknown edge '{edge_id}'")]
    UnknownEdge { step: usize, edge_id: String },

    #[error("step {step} references edge '{edge_id}' created after it")]
    ForwardEdgeReference { step: usize, edge_id: String },

    #[error("edge '{edge_id}' points at missing node '{node_id}'")]
    DanglingEdge { edge_id: String, node_id: String },

    #[error("duplicate id '{0}'")]
    DuplicateId(String),
}

/// What a player shows after replaying steps `0..=step_index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSnapshot<'a> {
    pub step_index: usize,
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<&'a Edge>,
    /// Last value of every variable touched so far
    pub variables: BTreeMap<&'a str, &'a str>,
    /// Output lines in emission order
    pub outputs: Vec<&'a str>,
    pub active_node_id: Option<&'a str>,
    pub active_edge_id: Option<&'a str>,
}

impl AnalysisResult {
    /// Canonical empty result
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
            && self.variable_history.is_empty()
            && self.nodes.is_empty()
            && self.edges.is_empty()
            && self.steps.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Outputs of all print steps, in order
    pub fn outputs(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| s.output.as_deref())
            .collect()
    }

    /// Check the trace invariants; an empty vec means the trace is well formed
    pub fn validate(&self) -> Vec<TraceViolation> {
        let mut violations = Vec::new();

        let mut seen = HashSet::new();
        for id in self.nodes.iter().map(|n| &n.id).chain(self.edges.iter().map(|e| &e.id)) {
            if !seen.insert(id.as_str()) {
                violations.push(TraceViolation::DuplicateId(id.clone()));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source_node_id, &edge.target_node_id] {
                if self.node(endpoint).is_none() {
                    violations.push(TraceViolation::DanglingEdge {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }

        for (position, step) in self.steps.iter().enumerate() {
            if step.index != position {
                violations.push(TraceViolation::NonDenseIndex {
                    position,
                    index: step.index,
                });
            }

            if let Some(node_id) = &step.active_node_id {
                match self.node(node_id) {
                    None => violations.push(TraceViolation::UnknownNode {
                        step: position,
                        node_id: node_id.clone(),
                    }),
                    Some(node) if node.introduced_at > position => {
                        violations.push(TraceViolation::ForwardNodeReference {
                            step: position,
                            node_id: node_id.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }

            if let Some(edge_id) = &step.active_edge_id {
                match self.edge(edge_id) {
                    None => violations.push(TraceViolation::UnknownEdge {
                        step: position,
                        edge_id: edge_id.clone(),
                    }),
                    Some(edge) if edge.introduced_at > position => {
                        violations.push(TraceViolation::ForwardEdgeReference {
                            step: position,
                            edge_id: edge_id.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        violations
    }

    /// Replay steps `0..=step_index`. `None` when the step does not exist.
    pub fn snapshot(&self, step_index: usize) -> Option<TraceSnapshot<'_>> {
        let current = self.steps.get(step_index)?;
        let replayed = &self.steps[..=step_index];

        let mut variables = BTreeMap::new();
        for delta in replayed.iter().flat_map(|s| &s.variable_deltas) {
            variables.insert(delta.name.as_str(), delta.value.as_str());
        }

        Some(TraceSnapshot {
            step_index,
            nodes: self
                .nodes
                .iter()
                .filter(|n| n.introduced_at <= step_index)
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| e.introduced_at <= step_index)
                .collect(),
            variables,
            outputs: replayed.iter().filter_map(|s| s.output.as_deref()).collect(),
            active_node_id: current.active_node_id.as_deref(),
            active_edge_id: current.active_edge_id.as_deref(),
        })
    }
}
