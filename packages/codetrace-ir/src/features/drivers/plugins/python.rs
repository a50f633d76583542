//! Python recognizer
//!
//! Python has no declaration keyword, so every `name = value` is an
//! assignment and produces its own step.

use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::features::classification::{classify_record, container_shape, StructureMatch};
use crate::features::scanning::{ScannedDocument, ScannedUnit, SyntaxKind, SyntaxNode, TreeSitterScanner};
use crate::features::trace_building::{
    Binding, CallSite, LoopHeader, PrintArg, PrintStatement, Recognizer,
};
use crate::shared::models::StructureTag;
use crate::shared::ports::Language;
use crate::shared::utils::literal::strip_quotes;

/// Python recognizer over tree-sitter syntax nodes
#[derive(Debug, Clone)]
pub struct PythonRecognizer {
    scanner: TreeSitterScanner,
}

impl PythonRecognizer {
    pub fn new() -> Self {
        Self {
            scanner: TreeSitterScanner::python(),
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.scanner = self.scanner.strict(strict);
        self
    }
}

impl Default for PythonRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// (prefix, body) of a string literal: `f"x={x}"` -> ("f", "x={x}")
fn string_parts(text: &str) -> (&str, &str) {
    let split = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (prefix, quoted) = text.split_at(split);
    for triple in ["\"\"\"", "'''"] {
        if quoted.len() >= 6 && quoted.starts_with(triple) && quoted.ends_with(triple) {
            return (prefix, &quoted[3..quoted.len() - 3]);
        }
    }
    (prefix, strip_quotes(quoted))
}

fn print_arg(arg: &SyntaxNode) -> PrintArg {
    match arg.kind {
        SyntaxKind::StringLiteral => {
            let (prefix, body) = string_parts(arg.text());
            if prefix.contains(['f', 'F']) {
                PrintArg::Template {
                    text: body.to_string(),
                    open: "{",
                }
            } else {
                PrintArg::Literal(body.to_string())
            }
        }
        SyntaxKind::NameExpr => PrintArg::Identifier(arg.text().to_string()),
        _ => PrintArg::Expression(arg.text().to_string()),
    }
}

/// Positional arguments; keyword arguments contribute their value
fn argument_texts(call: &SyntaxNode) -> Vec<String> {
    call.child_by_field("arguments")
        .into_iter()
        .flat_map(|args| args.named_children())
        .map(|arg| match arg.raw_kind.as_str() {
            "keyword_argument" => arg
                .child_by_field("value")
                .map(|v| v.text().to_string())
                .unwrap_or_default(),
            _ => arg.text().to_string(),
        })
        .collect()
}

fn callee_name(call: &SyntaxNode) -> Option<&str> {
    call.child_by_field("function")?.as_identifier()
}

fn literal_shape(value: &SyntaxNode) -> Option<StructureMatch> {
    match value.kind {
        SyntaxKind::ArrayLiteral => Some(StructureMatch::array(
            value.named_children().map(|el| el.text().to_string()).collect(),
        )),
        SyntaxKind::DictLiteral => Some(StructureMatch::new(StructureTag::DictionaryAsGraph)),
        SyntaxKind::CallExpr => {
            // deque(), queue.LifoQueue()
            let function = value.child_by_field("function")?.text();
            let name = function.rsplit('.').next().unwrap_or(function);
            container_shape(name, Language::Python).map(StructureMatch::new)
        }
        _ => None,
    }
}

impl Recognizer for PythonRecognizer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn scan(&self, source: &str) -> Result<ScannedDocument> {
        self.scanner.scan(source)
    }

    fn declared_callable(&self, unit: &ScannedUnit<'_>) -> Option<String> {
        let node = unit.syntax.filter(|n| n.kind == SyntaxKind::FunctionDef)?;
        node.child_by_field("name").map(|n| n.text().to_string())
    }

    fn declarations(&self, _unit: &ScannedUnit<'_>) -> Vec<Binding> {
        Vec::new()
    }

    fn assignment(&self, unit: &ScannedUnit<'_>) -> Option<Binding> {
        let node = unit.syntax.filter(|n| n.kind == SyntaxKind::AssignmentStmt)?;
        let name = node.child_by_field("left")?.as_identifier()?;
        let value = node.child_by_field("right")?;
        Some(Binding::new(name, value.text()))
    }

    fn classify(&self, unit: &ScannedUnit<'_>, document: &ScannedDocument) -> Option<StructureMatch> {
        let node = unit.syntax?;
        match node.kind {
            SyntaxKind::AssignmentStmt => {
                let owner = node
                    .child_by_field("left")
                    .and_then(|l| l.as_identifier())
                    .map(String::from);
                let found = literal_shape(node.child_by_field("right")?)?;
                Some(found.with_owner(owner))
            }
            SyntaxKind::ArrayLiteral | SyntaxKind::DictLiteral => {
                // `x = [...]` was handled by the assignment
                let bound = unit
                    .parent
                    .is_some_and(|p| p.kind == SyntaxKind::AssignmentStmt && node.field == Some("right"));
                if bound {
                    return None;
                }
                literal_shape(node)
            }
            SyntaxKind::ClassDef => {
                let name = node.child_by_field("name")?.text();
                classify_record(name, node.text(), document.source())
                    .or_else(|| container_shape(name, Language::Python))
                    .map(StructureMatch::new)
            }
            _ => None,
        }
    }

    fn loop_header(&self, unit: &ScannedUnit<'_>) -> Option<LoopHeader> {
        let node = unit.syntax?;
        match node.kind {
            SyntaxKind::ForInStmt => {
                let Some(variable) = node.child_by_field("left").and_then(|l| l.as_identifier()) else {
                    return Some(LoopHeader::bare());
                };
                let initial = node
                    .child_by_field("right")
                    .filter(|r| r.kind == SyntaxKind::CallExpr && callee_name(r) == Some("range"))
                    .and_then(|range| {
                        let args = argument_texts(range);
                        match args.len() {
                            0 => None,
                            1 => Some("0".to_string()),
                            _ => args.into_iter().next(),
                        }
                    });
                Some(LoopHeader::with_variable(variable, initial))
            }
            SyntaxKind::WhileStmt => Some(LoopHeader::bare()),
            _ => None,
        }
    }

    fn print(&self, unit: &ScannedUnit<'_>) -> Option<PrintStatement> {
        let node = unit.syntax.filter(|n| n.kind == SyntaxKind::CallExpr)?;
        if callee_name(node) != Some("print") {
            return None;
        }
        let args = node
            .child_by_field("arguments")
            .into_iter()
            .flat_map(|args| args.named_children())
            .filter(|arg| arg.raw_kind != "keyword_argument")
            .map(print_arg)
            .collect();
        Some(PrintStatement::spaced(args))
    }

    fn calls(&self, unit: &ScannedUnit<'_>, callables: &FxHashSet<String>) -> Vec<CallSite> {
        let Some(node) = unit.syntax.filter(|n| n.kind == SyntaxKind::CallExpr) else {
            return Vec::new();
        };
        match callee_name(node) {
            Some(callee) if callables.contains(callee) => {
                vec![CallSite::new(callee, argument_texts(node))]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units_of(source: &str) -> (PythonRecognizer, ScannedDocument) {
        let recognizer = PythonRecognizer::new();
        let doc = recognizer.scan(source).unwrap();
        (recognizer, doc)
    }

    fn find_unit(doc: &ScannedDocument, kind: SyntaxKind) -> ScannedUnit<'_> {
        doc.units()
            .into_iter()
            .find(|u| u.syntax.map(|s| s.kind == kind).unwrap_or(false))
            .unwrap()
    }

    #[test]
    fn test_string_parts() {
        assert_eq!(string_parts("\"hi\""), ("", "hi"));
        assert_eq!(string_parts("f'{x}!'"), ("f", "{x}!"));
        assert_eq!(string_parts("\"\"\"doc\"\"\""), ("", "doc"));
        assert_eq!(string_parts("rb'raw'"), ("rb", "raw"));
    }

    #[test]
    fn test_assignment_and_list() {
        let (recognizer, doc) = units_of("nums = [1, 2]\n");
        let unit = find_unit(&doc, SyntaxKind::AssignmentStmt);
        assert_eq!(recognizer.assignment(&unit), Some(Binding::new("nums", "[1, 2]")));

        let found: Vec<StructureMatch> = doc
            .units()
            .iter()
            .filter_map(|u| recognizer.classify(u, &doc))
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner.as_deref(), Some("nums"));
        assert_eq!(found[0].elements, Some(vec!["1".to_string(), "2".to_string()]));
    }

    #[test]
    fn test_list_operand_is_classified() {
        let (recognizer, doc) = units_of("y = x + [7, 8]\n");
        let found: Vec<StructureMatch> = doc
            .units()
            .iter()
            .filter_map(|u| recognizer.classify(u, &doc))
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner, None);
        assert_eq!(found[0].elements, Some(vec!["7".to_string(), "8".to_string()]));
    }

    #[test]
    fn test_container_constructors() {
        let (recognizer, doc) = units_of("q = deque()\ns = queue.LifoQueue()\n");
        let tags: Vec<StructureTag> = doc
            .units()
            .iter()
            .filter_map(|u| recognizer.classify(u, &doc))
            .map(|m| m.tag)
            .collect();
        assert_eq!(tags, vec![StructureTag::Queue, StructureTag::Stack]);
    }

    #[test]
    fn test_range_loop_initial() {
        let (recognizer, doc) = units_of("for i in range(2, 5):\n    pass\n");
        let unit = find_unit(&doc, SyntaxKind::ForInStmt);
        assert_eq!(
            recognizer.loop_header(&unit),
            Some(LoopHeader::with_variable("i", Some("2".to_string())))
        );

        let (recognizer, doc) = units_of("for x in items:\n    pass\n");
        let unit = find_unit(&doc, SyntaxKind::ForInStmt);
        assert_eq!(recognizer.loop_header(&unit), Some(LoopHeader::with_variable("x", None)));
    }

    #[test]
    fn test_print_args() {
        let (recognizer, doc) = units_of("print('total', n, f\"n={n}\", sep='')\n");
        let unit = find_unit(&doc, SyntaxKind::CallExpr);
        let stmt = recognizer.print(&unit).unwrap();
        assert_eq!(
            stmt.args,
            vec![
                PrintArg::Literal("total".into()),
                PrintArg::Identifier("n".into()),
                PrintArg::Template {
                    text: "n={n}".into(),
                    open: "{"
                },
            ]
        );
    }

    #[test]
    fn test_node_class_with_children_is_tree() {
        let (recognizer, doc) = units_of(
            "class TreeNode:\n    def __init__(self, v):\n        self.left = None\n        self.right = None\n",
        );
        let unit = find_unit(&doc, SyntaxKind::ClassDef);
        assert_eq!(
            recognizer.classify(&unit, &doc).map(|m| m.tag),
            Some(StructureTag::BinaryTree)
        );
    }

    #[test]
    fn test_calls_take_keyword_values() {
        let (recognizer, doc) = units_of("def walk(n, step=1):\n    walk(n - 1, step=2)\n");
        let callables: FxHashSet<String> = doc
            .units()
            .iter()
            .filter_map(|u| recognizer.declared_callable(u))
            .collect();
        let calls: Vec<CallSite> = doc
            .units()
            .iter()
            .flat_map(|u| recognizer.calls(u, &callables))
            .collect();
        assert_eq!(
            calls,
            vec![CallSite::new("walk", vec!["n - 1".to_string(), "2".to_string()])]
        );
    }
}
