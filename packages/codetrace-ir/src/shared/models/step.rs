//! Trace step and variable history models

use serde::{Deserialize, Serialize};

/// One `(name, value)` change carried by a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDelta {
    pub name: String,
    pub value: String,
}

impl VariableDelta {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One discrete, independently replayable moment of the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub index: usize,
    pub variable_deltas: Vec<VariableDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_edge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Call depth, set on steps produced by recognized calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_depth: Option<u32>,
}

impl Step {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            variable_deltas: Vec::new(),
            active_node_id: None,
            active_edge_id: None,
            output: None,
            call_depth: None,
        }
    }

    pub fn with_delta(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variable_deltas.push(VariableDelta::new(name, value));
        self
    }

    pub fn with_active_node(mut self, node_id: Option<String>) -> Self {
        self.active_node_id = node_id;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// One observed change of a variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableEntry {
    pub variable_name: String,
    pub step_index: usize,
    pub value: String,
}

impl VariableEntry {
    pub fn new(variable_name: impl Into<String>, step_index: usize, value: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            step_index,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_serializes_camel_case_and_skips_empty_optionals() {
        let step = Step::new(3).with_delta("i", "0");
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["index"], 3);
        assert_eq!(json["variableDeltas"][0]["name"], "i");
        assert!(json.get("activeNodeId").is_none());
        assert!(json.get("output").is_none());
    }
}
