//! Trace assertions

use codetrace_ir::AnalysisResult;

/// Assert the trace invariants hold (dense indices, no forward references)
pub fn assert_valid_trace(result: &AnalysisResult) {
    let violations = result.validate();
    assert!(violations.is_empty(), "Expected a valid trace, got: {violations:?}");
    for (position, step) in result.steps.iter().enumerate() {
        assert_eq!(step.index, position);
    }
}

/// Assert node labels in creation order
pub fn assert_node_labels(result: &AnalysisResult, expected: &[&str]) {
    let labels: Vec<&str> = result.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, expected, "Node labels differ");
}
