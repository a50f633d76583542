//! Trace builder
//!
//! Walks scanned units in source order. Per unit:
//! 1. declarations/assignment update the state tracker
//! 2. classification synthesizes nodes and edges
//! 3. loop header step
//! 4. plain assignment step
//! 5. print step
//! 6. one step per recognized call

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::layout::Layout;
use super::ports::{Binding, CallSite, LoopHeader, PrintStatement, Recognizer};
use super::render::render_print;
use crate::config::AnalyzerConfig;
use crate::features::classification::StructureMatch;
use crate::features::scanning::{ScannedDocument, ScannedUnit};
use crate::features::state_tracking::StateTracker;
use crate::shared::models::{
    AnalysisResult, Edge, EdgeKind, Node, NodeKind, Position, Step, StructureTag, VariableEntry,
};
use crate::shared::utils::IdGenerator;

/// Generic trace builder over an injected recognizer
pub struct TraceBuilder<'a> {
    recognizer: &'a dyn Recognizer,
    config: &'a AnalyzerConfig,
    layout: Layout,
}

impl<'a> TraceBuilder<'a> {
    pub fn new(recognizer: &'a dyn Recognizer, config: &'a AnalyzerConfig) -> Self {
        Self {
            recognizer,
            config,
            layout: Layout::new(&config.layout),
        }
    }

    /// Names of every callable declared anywhere in the document
    pub fn collect_callables(&self, units: &[ScannedUnit<'_>]) -> FxHashSet<String> {
        units
            .iter()
            .filter_map(|unit| self.recognizer.declared_callable(unit))
            .collect()
    }

    /// Pre-scan for callables, then build
    pub fn build(&self, document: &ScannedDocument) -> AnalysisResult {
        let units = document.units();
        let callables = self.collect_callables(&units);
        self.build_units(document, &units, &callables)
    }

    pub fn build_units(
        &self,
        document: &ScannedDocument,
        units: &[ScannedUnit<'_>],
        callables: &FxHashSet<String>,
    ) -> AnalysisResult {
        let mut trace = TraceState::new(self.layout, self.config);

        for unit in units {
            self.visit(&mut trace, document, unit, callables);
        }

        let result = trace.finish();
        debug!(
            language = %self.recognizer.language(),
            units = units.len(),
            callables = callables.len(),
            steps = result.steps.len(),
            nodes = result.nodes.len(),
            "trace built"
        );
        result
    }

    fn visit(
        &self,
        trace: &mut TraceState<'_>,
        document: &ScannedDocument,
        unit: &ScannedUnit<'_>,
        callables: &FxHashSet<String>,
    ) {
        let recognizer = self.recognizer;

        // 1. State updates
        let declarations = recognizer.declarations(unit);
        for binding in &declarations {
            trace.observe(binding);
        }
        let assignment = if declarations.is_empty() {
            recognizer.assignment(unit)
        } else {
            None
        };
        let assigned = assignment.as_ref().map(|binding| trace.observe(binding));

        // 2. Structures
        if let Some(found) = recognizer.classify(unit, document) {
            trace!(line = unit.line, tag = %found.tag, "structure");
            trace.add_structure(found, unit.line);
        }

        // 3. Loop header
        if let Some(header) = recognizer.loop_header(unit) {
            trace!(line = unit.line, "loop header");
            trace.loop_step(header);
        }

        // 4. Plain assignment
        if let (Some(binding), Some(value)) = (assignment, assigned) {
            trace!(line = unit.line, name = %binding.name, "assignment");
            trace.assignment_step(&binding.name, value);
        }

        // 5. Print
        if let Some(statement) = recognizer.print(unit) {
            trace!(line = unit.line, "print");
            trace.print_step(&statement);
        }

        // 6. Calls
        for call in recognizer.calls(unit, callables) {
            trace!(line = unit.line, callee = %call.callee, "call");
            trace.call_step(call, unit.line);
        }
    }
}

/// Mutable state of one build; dropped when the result is returned
struct TraceState<'c> {
    result: AnalysisResult,
    ids: IdGenerator,
    state: StateTracker,
    layout: Layout,
    config: &'c AnalyzerConfig,
    call_depth: u32,
    last_call_node: Option<String>,
}

impl<'c> TraceState<'c> {
    fn new(layout: Layout, config: &'c AnalyzerConfig) -> Self {
        Self {
            result: AnalysisResult::empty(),
            ids: IdGenerator::new(),
            state: StateTracker::new(),
            layout,
            config,
            call_depth: 0,
            last_call_node: None,
        }
    }

    fn finish(self) -> AnalysisResult {
        self.result
    }

    fn next_index(&self) -> usize {
        self.result.steps.len()
    }

    /// Resolve and record a binding; returns the stored value
    fn observe(&mut self, binding: &Binding) -> String {
        let value = self.state.resolve_value(&binding.value);
        self.state.observe(binding.name.clone(), value.clone());
        value
    }

    fn push_step(&mut self, step: Step) {
        debug_assert_eq!(step.index, self.next_index());
        for delta in &step.variable_deltas {
            self.result
                .variable_history
                .push(VariableEntry::new(delta.name.clone(), step.index, delta.value.clone()));
        }
        self.result.steps.push(step);
    }

    fn push_node(&mut self, node: Node) -> String {
        let id = node.id.clone();
        let introduced_at = self.next_index();
        self.result.nodes.push(node.introduced_at(introduced_at));
        id
    }

    fn push_edge(&mut self, edge: Edge) -> String {
        let id = edge.id.clone();
        let introduced_at = self.next_index();
        self.result.edges.push(edge.introduced_at(introduced_at));
        id
    }

    fn last_node_id(&self) -> Option<String> {
        self.result.nodes.last().map(|n| n.id.clone())
    }

    fn add_structure(&mut self, found: StructureMatch, line: usize) {
        let owner = found.owner.clone();
        match &found.tag {
            StructureTag::Array => {
                for (idx, element) in found.elements.iter().flatten().enumerate() {
                    let label = if element.trim().is_empty() {
                        "empty".to_string()
                    } else {
                        self.state.resolve_value(element)
                    };
                    let id = self.ids.array_element(idx, line);
                    let position = self.layout.array_element(idx);
                    self.push_owned(Node::new(id, NodeKind::ArrayElement, label, position), &owner);
                }
            }
            StructureTag::DictionaryAsGraph => {
                let [root, child1, child2] = self.layout.dictionary();
                self.fan_out(
                    NodeKind::GraphNode,
                    [("root", "Root", root), ("child1", "Child 1", child1), ("child2", "Child 2", child2)],
                    line,
                    &owner,
                );
            }
            StructureTag::BinaryTree if self.config.trace.stand_in_shapes => {
                let [root, left, right] = self.layout.tree();
                self.fan_out(
                    NodeKind::TreeNode,
                    [("root", "Root", root), ("left", "Left", left), ("right", "Right", right)],
                    line,
                    &owner,
                );
            }
            tag @ (StructureTag::SinglyLinkedList
            | StructureTag::DoublyLinkedList
            | StructureTag::CircularLinkedList)
                if self.config.trace.stand_in_shapes =>
            {
                let back_edge = match tag {
                    StructureTag::DoublyLinkedList => Some(EdgeKind::Prev),
                    StructureTag::CircularLinkedList => Some(EdgeKind::Next),
                    _ => None,
                };
                self.list_stand_in(back_edge, line, &owner);
            }
            _ => {}
        }
        self.result.structures.push(found.tag);
    }

    fn push_owned(&mut self, node: Node, owner: &Option<String>) -> String {
        match owner {
            Some(owner) => self.push_node(node.with_owner(owner.clone())),
            None => self.push_node(node),
        }
    }

    /// Root with two children
    fn fan_out(
        &mut self,
        kind: NodeKind,
        slots: [(&str, &str, Position); 3],
        line: usize,
        owner: &Option<String>,
    ) {
        let mut ids = Vec::with_capacity(3);
        for (slot, label, position) in slots {
            let id = self.ids.stand_in(kind, slot, line);
            ids.push(self.push_owned(Node::new(id, kind, label, position), owner));
        }
        for (child_slot, child_id) in slots[1..].iter().map(|s| s.0).zip(&ids[1..]) {
            let edge_id = self.ids.stand_in_edge(slots[0].0, child_slot, line);
            self.push_edge(Edge::new(edge_id, ids[0].clone(), child_id.clone(), EdgeKind::Child));
        }
    }

    fn list_stand_in(&mut self, back_edge: Option<EdgeKind>, line: usize, owner: &Option<String>) {
        let [first_pos, second_pos] = self.layout.list();
        let first_id = self.ids.stand_in(NodeKind::ListNode, "node1", line);
        let first = self.push_owned(Node::new(first_id, NodeKind::ListNode, "Node 1", first_pos), owner);
        let second_id = self.ids.stand_in(NodeKind::ListNode, "node2", line);
        let second = self.push_owned(Node::new(second_id, NodeKind::ListNode, "Node 2", second_pos), owner);

        let forward = self.ids.stand_in_edge("node1", "node2", line);
        self.push_edge(Edge::new(forward, first.clone(), second.clone(), EdgeKind::Next));

        if let Some(kind) = back_edge {
            let back = self.ids.stand_in_edge("node2", "node1", line);
            self.push_edge(Edge::new(back, second, first, kind));
        }
    }

    fn loop_step(&mut self, header: LoopHeader) {
        let mut step = Step::new(self.next_index()).with_active_node(self.last_node_id());
        if let Some(variable) = header.variable {
            let value = match header.initial {
                Some(raw) => self.state.resolve_value(&raw),
                None => self.config.trace.loop_placeholder.clone(),
            };
            self.state.observe(variable.clone(), value.clone());
            step = step.with_delta(variable, value);
        }
        self.push_step(step);
    }

    fn assignment_step(&mut self, name: &str, value: String) {
        let active = self
            .result
            .nodes
            .iter()
            .find(|n| n.is_owned_by(name))
            .map(|n| n.id.clone());
        let step = Step::new(self.next_index())
            .with_delta(name, value)
            .with_active_node(active);
        self.push_step(step);
    }

    fn print_step(&mut self, statement: &PrintStatement) {
        let output = render_print(statement, &self.state);
        let step = Step::new(self.next_index())
            .with_active_node(self.last_node_id())
            .with_output(output);
        self.push_step(step);
    }

    fn call_step(&mut self, call: CallSite, line: usize) {
        self.call_depth += 1;
        let depth = self.call_depth;
        self.result
            .structures
            .push(StructureTag::RecursiveCall(call.callee.clone()));

        let node_id = self.ids.call_frame(&call.callee, depth, line);
        let node = Node::new(
            node_id,
            NodeKind::CallFrame,
            format!("{} (Depth: {})", call.callee, depth),
            self.layout.call_frame(depth),
        )
        .with_owner(call.callee.clone());
        let node_id = self.push_node(node);

        let mut step = Step::new(self.next_index()).with_active_node(Some(node_id.clone()));
        step.call_depth = Some(depth);

        if let Some(previous) = self.last_call_node.replace(node_id.clone()) {
            let edge_id = self.ids.call_edge(&call.callee, depth, line);
            let edge_id = self.push_edge(Edge::new(edge_id, previous, node_id, EdgeKind::Call));
            step.active_edge_id = Some(edge_id);
        }

        for (idx, raw) in call.args.iter().enumerate() {
            let name = format!("param{}_{}", idx + 1, call.callee);
            let value = self.state.resolve_value(raw);
            self.state.observe(name.clone(), value.clone());
            step = step.with_delta(name, value);
        }
        self.push_step(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::features::trace_building::ports::PrintArg;
    use crate::shared::ports::Language;

    /// Line recognizer driven by a tiny prefix language:
    /// `let x v`, `set x v`, `loop x v`, `print x`, `def f`, `call f a`,
    /// `array a,b`, `tree`, `dict`
    struct ScriptRecognizer;

    fn words<'u>(unit: &ScannedUnit<'u>) -> Vec<&'u str> {
        unit.text.split_whitespace().collect()
    }

    impl Recognizer for ScriptRecognizer {
        fn language(&self) -> Language {
            Language::Java
        }

        fn scan(&self, source: &str) -> Result<ScannedDocument> {
            Ok(ScannedDocument::lines(source))
        }

        fn declared_callable(&self, unit: &ScannedUnit<'_>) -> Option<String> {
            match words(unit).as_slice() {
                ["def", name] => Some(name.to_string()),
                _ => None,
            }
        }

        fn declarations(&self, unit: &ScannedUnit<'_>) -> Vec<Binding> {
            match words(unit).as_slice() {
                ["let", name, value] => vec![Binding::new(*name, *value)],
                _ => vec![],
            }
        }

        fn assignment(&self, unit: &ScannedUnit<'_>) -> Option<Binding> {
            match words(unit).as_slice() {
                ["set", name, value] => Some(Binding::new(*name, *value)),
                _ => None,
            }
        }

        fn classify(&self, unit: &ScannedUnit<'_>, _: &ScannedDocument) -> Option<StructureMatch> {
            match words(unit).as_slice() {
                ["array", items] => Some(
                    StructureMatch::array(items.split(',').map(String::from).collect())
                        .with_owner(Some("arr".into())),
                ),
                ["tree"] => Some(StructureMatch::new(StructureTag::BinaryTree)),
                ["dict"] => Some(StructureMatch::new(StructureTag::DictionaryAsGraph)),
                _ => None,
            }
        }

        fn loop_header(&self, unit: &ScannedUnit<'_>) -> Option<LoopHeader> {
            match words(unit).as_slice() {
                ["loop", var, init] => Some(LoopHeader::with_variable(*var, Some(init.to_string()))),
                ["loop", var] => Some(LoopHeader::with_variable(*var, None)),
                ["while"] => Some(LoopHeader::bare()),
                _ => None,
            }
        }

        fn print(&self, unit: &ScannedUnit<'_>) -> Option<PrintStatement> {
            match words(unit).as_slice() {
                ["print", name] => Some(PrintStatement::spaced(vec![PrintArg::Identifier(
                    name.to_string(),
                )])),
                _ => None,
            }
        }

        fn calls(&self, unit: &ScannedUnit<'_>, callables: &FxHashSet<String>) -> Vec<CallSite> {
            match words(unit).as_slice() {
                ["call", name, args @ ..] if callables.contains(*name) => {
                    vec![CallSite::new(*name, args.iter().map(|a| a.to_string()).collect())]
                }
                _ => vec![],
            }
        }
    }

    fn run(source: &str) -> AnalysisResult {
        let config = AnalyzerConfig::default();
        let recognizer = ScriptRecognizer;
        let document = recognizer.scan(source).unwrap();
        TraceBuilder::new(&recognizer, &config).build(&document)
    }

    #[test]
    fn test_declaration_then_print() {
        let result = run("let x 5\nprint x");
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].output.as_deref(), Some("5"));
        assert!(result.variable_history.is_empty());
    }

    #[test]
    fn test_assignment_step_targets_owned_node() {
        let result = run("array 1,2\nset arr 7");
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].active_node_id.as_deref(), Some("array-0-0"));
        assert_eq!(result.variable_history, vec![VariableEntry::new("arr", 0, "7")]);
    }

    #[test]
    fn test_loop_binds_initial_or_placeholder() {
        let result = run("let n 3\nloop i n\nloop j\nwhile");
        assert_eq!(result.steps[0].variable_deltas[0].value, "3");
        assert_eq!(result.steps[1].variable_deltas[0].value, "Initialized");
        assert!(result.steps[2].variable_deltas.is_empty());
    }

    #[test]
    fn test_calls_chain_edges() {
        let result = run("def f\ncall f 3\nlet k 9\ncall f k");
        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.nodes[0].label, "f (Depth: 1)");
        assert_eq!(result.nodes[1].label, "f (Depth: 2)");
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].source_node_id, result.nodes[0].id);
        assert_eq!(result.edges[0].target_node_id, result.nodes[1].id);
        assert_eq!(result.steps[1].active_edge_id.as_deref(), Some(result.edges[0].id.as_str()));
        assert_eq!(result.steps[1].variable_deltas[0].name, "param1_f");
        assert_eq!(result.steps[1].variable_deltas[0].value, "9");
        assert_eq!(result.steps[1].call_depth, Some(2));
        assert_eq!(
            result.structures,
            vec![
                StructureTag::RecursiveCall("f".into()),
                StructureTag::RecursiveCall("f".into())
            ]
        );
        assert!(result.validate().is_empty());
    }

    #[test]
    fn test_stand_ins() {
        let result = run("tree\ndict");
        assert_eq!(result.nodes.len(), 6);
        assert_eq!(result.edges.len(), 4);
        assert_eq!(result.nodes[0].id, "node-root-0");
        assert_eq!(result.nodes[3].id, "dict-root-1");
        assert_eq!(result.edges[0].id, "edge-root-left-0");
        assert!(result.validate().is_empty());
    }

    #[test]
    fn test_stand_ins_can_be_disabled() {
        let config = AnalyzerConfig::default().trace(|t| t.stand_in_shapes(false));
        let recognizer = ScriptRecognizer;
        let document = recognizer.scan("tree\ndict").unwrap();
        let result = TraceBuilder::new(&recognizer, &config).build(&document);
        // dictionaries keep their stand-in
        assert_eq!(result.nodes.len(), 3);
        assert_eq!(
            result.structures,
            vec![StructureTag::BinaryTree, StructureTag::DictionaryAsGraph]
        );
    }

    #[test]
    fn test_loop_points_at_latest_node() {
        let result = run("array 1,2,3\nwhile");
        assert_eq!(result.steps[0].active_node_id.as_deref(), Some("array-2-0"));
    }
}
