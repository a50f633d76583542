//! YAML configuration applied end to end

mod common;

use codetrace_ir::{AnalyzerConfig, ConfigError, Dispatcher, Position};
use common::*;
use pretty_assertions::assert_eq;
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_layout_from_file() {
    let file = write_config("version: 1\nlayout:\n  spacing: 40\n  row_y: 10\n");
    let config = AnalyzerConfig::from_yaml(file.path()).unwrap();

    let result = Dispatcher::new(&config).analyze("[7, 8]", "javascript");
    let positions: Vec<Position> = result.nodes.iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![Position::new(0, 10), Position::new(40, 10)]);
}

#[test]
fn test_loop_placeholder_from_file() {
    let file = write_config("version: 1\ntrace:\n  loop_placeholder: \"?\"\n");
    let config = AnalyzerConfig::from_yaml(file.path()).unwrap();

    let result = Dispatcher::new(&config).analyze("for x in items:\n    pass\n", "python");
    assert_eq!(result.steps[0].variable_deltas[0].value, "?");
}

#[test]
fn test_lenient_parse_keeps_partial_trace() {
    let config = AnalyzerConfig::default().trace(|t| t.strict_parse(false));
    let source = "let x = 5;\nconsole.log(x);\nlet = = ;";

    assert!(Dispatcher::default().analyze(source, "javascript").is_empty());

    let result = Dispatcher::new(&config).analyze(source, "javascript");
    assert!(result.outputs().contains(&"5"));
    assert_valid_trace(&result);
}

#[test]
fn test_stand_ins_disabled() {
    let config = AnalyzerConfig::default().trace(|t| t.stand_in_shapes(false));
    let source = "struct Node {\n    Node* next;\n};";
    let result = Dispatcher::new(&config).analyze(source, "cpp");
    assert_eq!(result.structures.len(), 1);
    assert!(result.nodes.is_empty());
}

#[test]
fn test_invalid_files_are_rejected() {
    let missing = AnalyzerConfig::from_yaml("/nonexistent/codetrace.yaml");
    assert!(matches!(missing, Err(ConfigError::Io(_))));

    let file = write_config("version: 1\nlayout:\n  call_x: -5\n");
    assert!(matches!(
        AnalyzerConfig::from_yaml(file.path()),
        Err(ConfigError::Range { .. })
    ));
}
