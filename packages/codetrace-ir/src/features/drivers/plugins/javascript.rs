//! JavaScript recognizer
//!
//! Works on the tree-sitter tree; every syntax node is one unit, so each
//! method only answers for the node kind it owns.

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

const FUNCTION_VALUES: &[&str] = &["arrow_function", "function_expression", "function"];

/// JavaScript recognizer over tree-sitter syntax nodes
#[derive(Debug, Clone)]
pub struct JavaScriptRecognizer {
    scanner: TreeSitterScanner,
}

impl JavaScriptRecognizer {
    pub fn new() -> Self {
        Self {
            scanner: TreeSitterScanner::javascript(),
        }
    }

    /// Treat trees with syntax errors as parse failures
    pub fn strict(mut self, strict: bool) -> Self {
        self.scanner = self.scanner.strict(strict);
        self
    }
}

impl Default for JavaScriptRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_function_value(node: &SyntaxNode) -> bool {
    FUNCTION_VALUES.contains(&node.raw_kind.as_str())
}

/// `name = value` parts of a declarator or assignment
fn bound_parts(node: &SyntaxNode) -> Option<(&SyntaxNode, &SyntaxNode)> {
    match node.kind {
        SyntaxKind::VariableDecl => Some((node.child_by_field("name")?, node.child_by_field("value")?)),
        SyntaxKind::AssignmentStmt => Some((node.child_by_field("left")?, node.child_by_field("right")?)),
        _ => None,
    }
}

fn literal_shape(value: &SyntaxNode) -> Option<StructureMatch> {
    match value.kind {
        SyntaxKind::ArrayLiteral => Some(StructureMatch::array(
            value.named_children().map(|el| el.text().to_string()).collect(),
        )),
        SyntaxKind::DictLiteral => Some(StructureMatch::new(StructureTag::DictionaryAsGraph)),
        _ => None,
    }
}

fn print_arg(arg: &SyntaxNode) -> PrintArg {
    match arg.kind {
        SyntaxKind::StringLiteral => PrintArg::Literal(strip_quotes(arg.text()).to_string()),
        SyntaxKind::TemplateString => PrintArg::Template {
            text: strip_quotes(arg.text()).to_string(),
            open: "${",
        },
        SyntaxKind::NameExpr => PrintArg::Identifier(arg.text().to_string()),
        _ => PrintArg::Expression(arg.text().to_string()),
    }
}

fn argument_nodes(call: &SyntaxNode) -> impl Iterator<Item = &SyntaxNode> {
    call.child_by_field("arguments")
        .into_iter()
        .flat_map(|args| args.named_children())
}

impl Recognizer for JavaScriptRecognizer {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn scan(&self, source: &str) -> Result<ScannedDocument> {
        self.scanner.scan(source)
    }

    fn declared_callable(&self, unit: &ScannedUnit<'_>) -> Option<String> {
        let node = unit.syntax?;
        match node.kind {
            SyntaxKind::FunctionDef if node.raw_kind != "method_definition" => {
                node.child_by_field("name").map(|n| n.text().to_string())
            }
            SyntaxKind::VariableDecl => {
                let value = node.child_by_field("value")?;
                if !is_function_value(value) {
                    return None;
                }
                node.child_by_field("name")?.as_identifier().map(String::from)
            }
            _ => None,
        }
    }

    fn declarations(&self, unit: &ScannedUnit<'_>) -> Vec<Binding> {
        let Some(node) = unit.syntax.filter(|n| n.kind == SyntaxKind::VariableDecl) else {
            return Vec::new();
        };
        match bound_parts(node) {
            Some((name, value)) if !is_function_value(value) => match name.as_identifier() {
                Some(name) => vec![Binding::new(name, value.text())],
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn assignment(&self, unit: &ScannedUnit<'_>) -> Option<Binding> {
        let node = unit.syntax.filter(|n| n.kind == SyntaxKind::AssignmentStmt)?;
        // `for (i = 0; ...)` is bound by the loop header
        let in_initializer = |n: &SyntaxNode| n.field == Some("initializer");
        if in_initializer(node) || unit.parent.is_some_and(in_initializer) {
            return None;
        }
        let (left, right) = bound_parts(node)?;
        Some(Binding::new(left.as_identifier()?, right.text()))
    }

    fn classify(&self, unit: &ScannedUnit<'_>, document: &ScannedDocument) -> Option<StructureMatch> {
        let node = unit.syntax?;
        match &node.kind {
            SyntaxKind::VariableDecl | SyntaxKind::AssignmentStmt => {
                let (name, value) = bound_parts(node)?;
                let owner = name.as_identifier().map(String::from);
                if let Some(found) = literal_shape(value) {
                    return Some(found.with_owner(owner));
                }
                // `new Queue()` is classified on its own unit
                if node.kind == SyntaxKind::VariableDecl && value.kind != SyntaxKind::NewExpr {
                    let tag = container_shape(owner.as_deref()?, Language::JavaScript)?;
                    return Some(StructureMatch::new(tag).with_owner(owner));
                }
                None
            }
            SyntaxKind::ArrayLiteral | SyntaxKind::DictLiteral => {
                // bound literals were handled by their declarator/assignment
                let bound = unit
                    .parent
                    .and_then(bound_parts)
                    .is_some_and(|(_, value)| std::ptr::eq(value, node));
                if bound {
                    return None;
                }
                literal_shape(node)
            }
            SyntaxKind::ClassDef => {
                let name = node.child_by_field("name")?.text();
                classify_record(name, node.text(), document.source())
                    .or_else(|| container_shape(name, Language::JavaScript))
                    .map(StructureMatch::new)
            }
            SyntaxKind::NewExpr => {
                let constructor = node.child_by_field("constructor")?;
                container_shape(constructor.text(), Language::JavaScript).map(StructureMatch::new)
            }
            _ => None,
        }
    }

    fn loop_header(&self, unit: &ScannedUnit<'_>) -> Option<LoopHeader> {
        let node = unit.syntax?;
        match node.kind {
            SyntaxKind::ForStmt => {
                let initializer = node
                    .child_by_field("initializer")
                    .or_else(|| node.named_children().find(|c| c.field != Some("body")));
                let bound = initializer.and_then(|init| {
                    std::iter::once(init)
                        .chain(init.descendants())
                        .find_map(bound_parts)
                });
                Some(match bound {
                    Some((name, value)) => match name.as_identifier() {
                        Some(var) => LoopHeader::with_variable(var, Some(value.text().to_string())),
                        None => LoopHeader::bare(),
                    },
                    None => LoopHeader::bare(),
                })
            }
            SyntaxKind::ForInStmt => {
                let variable = node.child_by_field("left").and_then(|l| l.as_identifier());
                Some(match variable {
                    Some(var) => LoopHeader::with_variable(var, None),
                    None => LoopHeader::bare(),
                })
            }
            SyntaxKind::WhileStmt => Some(LoopHeader::bare()),
            _ => None,
        }
    }

    fn print(&self, unit: &ScannedUnit<'_>) -> Option<PrintStatement> {
        let node = unit.syntax.filter(|n| n.kind == SyntaxKind::CallExpr)?;
        let function = node.child_by_field("function")?;
        if function.text() != "console.log" {
            return None;
        }
        Some(PrintStatement::spaced(argument_nodes(node).map(print_arg).collect()))
    }

    fn calls(&self, unit: &ScannedUnit<'_>, callables: &FxHashSet<String>) -> Vec<CallSite> {
        let Some(node) = unit.syntax.filter(|n| n.kind == SyntaxKind::CallExpr) else {
            return Vec::new();
        };
        let Some(callee) = node.child_by_field("function").and_then(|f| f.as_identifier()) else {
            return Vec::new();
        };
        if !callables.contains(callee) {
            return Vec::new();
        }
        let args = argument_nodes(node).map(|arg| arg.text().to_string()).collect();
        vec![CallSite::new(callee, args)]
    }
}
