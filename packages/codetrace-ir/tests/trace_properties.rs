//! Property-based tests for trace invariants
//!
//! For every language and any input:
//! - analysis never panics
//! - step indices are dense
//! - steps never reference nodes/edges created after them
//! - identical input yields an identical result

mod common;

use codetrace_ir::{analyze, AnalysisResult, Language, VariableDelta};
use common::*;
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    // prefixed so no keyword of any language is generated
    "v_[a-z0-9]{0,8}"
}

fn js_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        (identifier(), 0..100i32).prop_map(|(name, n)| format!("let {name} = {n};")),
        (identifier(), 0..100i32).prop_map(|(name, n)| format!("{name} = {n};")),
        identifier().prop_map(|name| format!("console.log({name});")),
        prop::collection::vec(0..10i32, 0..5).prop_map(|items| {
            let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
            format!("[{}];", items.join(", "))
        }),
        identifier().prop_map(|name| format!("for (let {name} = 0; {name} < 3; {name}++) {{}}")),
        identifier().prop_map(|name| format!("function {name}(a) {{\n  {name}(a);\n}}\n{name}(1);")),
    ]
}

fn java_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        (identifier(), 0..100i32).prop_map(|(name, n)| format!("int {name} = {n};")),
        (identifier(), 0..100i32).prop_map(|(name, n)| format!("{name} = {n};")),
        identifier().prop_map(|name| format!("System.out.println(\"v=\" + {name});")),
        identifier().prop_map(|name| format!("int[] {name} = {{1, 2}};")),
        identifier().prop_map(|name| format!("while ({name} > 0) {{")),
        identifier().prop_map(|name| format!("static void {name}(int a) {{\n{name}(a - 1);\n}}")),
        Just("}".to_string()),
    ]
}

fn source_of(statement: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    prop::collection::vec(statement, 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// Property: arbitrary text never panics and never breaks the invariants
    #[test]
    fn prop_arbitrary_input_is_safe(source in "\\PC{0,200}") {
        for language in Language::ALL {
            let result = analyze(&source, language.name());
            prop_assert!(result.validate().is_empty(), "{:?}", result.validate());
        }
    }

    /// Property: generated JavaScript produces valid, repeatable traces
    #[test]
    fn prop_javascript_traces_are_valid(source in source_of(js_statement())) {
        let first = analyze(&source, "javascript");
        prop_assert!(first.validate().is_empty(), "{:?}", first.validate());
        for (position, step) in first.steps.iter().enumerate() {
            prop_assert_eq!(step.index, position);
        }
        prop_assert_eq!(first, analyze(&source, "javascript"));
    }

    /// Property: generated Java produces valid, repeatable traces
    #[test]
    fn prop_java_traces_are_valid(source in source_of(java_statement())) {
        let first = analyze(&source, "java");
        prop_assert!(first.validate().is_empty(), "{:?}", first.validate());
        prop_assert_eq!(first.clone(), analyze(&source, "java"));

        // every replayed prefix is a consistent snapshot
        for step in &first.steps {
            let snapshot = first.snapshot(step.index).unwrap();
            if let Some(active) = snapshot.active_node_id {
                prop_assert!(snapshot.nodes.iter().any(|n| n.id == active));
            }
        }
    }
}

#[test]
fn test_declared_value_prints_in_every_language() {
    let cases = [
        ("javascript", "let x = 5;\nconsole.log(x);"),
        ("java", "int x = 5;\nSystem.out.println(x);"),
        ("cpp", "int x = 5;\ncout << x << endl;"),
        ("python", "x = 5\nprint(x)\n"),
    ];
    for (language, source) in cases {
        let result = analyze(source, language);
        assert_eq!(result.outputs(), vec!["5"], "language {language}");
    }
}

#[test]
fn test_loop_over_declared_counter_is_one_step_in_every_language() {
    let cases = [
        ("javascript", "let i;\nfor (i = 0; i < 3; i++) {\n}"),
        ("java", "int i;\nfor (i = 0; i < 3; i++) {\n}"),
        ("cpp", "int i;\nfor (i = 0; i < 3; i++) {\n}"),
    ];
    for (language, source) in cases {
        let result = analyze(source, language);
        assert_eq!(result.steps.len(), 1, "language {language}");
        assert_eq!(
            result.steps[0].variable_deltas,
            vec![VariableDelta::new("i", "0")],
            "language {language}"
        );
    }
}

#[test]
fn test_deep_nesting_yields_empty_result() {
    let depth = 50_000;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    for language in ["javascript", "python"] {
        assert_eq!(analyze(&source, language), AnalysisResult::empty(), "language {language}");
    }
}

#[test]
fn test_empty_source_in_every_language() {
    for language in Language::ALL {
        assert!(analyze("", language.name()).is_empty(), "language {language}");
    }
}

#[test]
fn test_bare_list_in_every_language() {
    for language in Language::ALL {
        let result = analyze("[1,2,3]", language.name());
        assert_node_labels(&result, &["1", "2", "3"]);
        assert!(result.edges.is_empty(), "language {language}");
    }
}

#[test]
fn test_fixtures_are_valid_and_idempotent() {
    for (language, source) in all_programs() {
        let result = analyze(source, language);
        assert_valid_trace(&result);
        assert_eq!(result, analyze(source, language));
    }
}
