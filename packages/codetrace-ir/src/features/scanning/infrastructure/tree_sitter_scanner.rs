//! Tree-sitter scanner implementation
//!
//! This is where the tree-sitter dependency lives.

use std::sync::Arc;

use tracing::trace;
use tree_sitter::{Node as TSNode, Parser as TSParser};

use crate::errors::{AnalyzerError, Result};
use crate::features::scanning::domain::{
    ParseError, ParsedTree, ScannedDocument, SyntaxKind, SyntaxNode,
};
use crate::shared::models::Span;

/// Deepest syntax tree the scanner converts; deeper input is a parse failure
pub const MAX_NESTING_DEPTH: usize = 512;

/// Grammars linked into the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeSitterGrammar {
    /// JavaScript uses the TypeScript grammar (a superset for our idioms)
    JavaScript,
    Python,
}

impl TreeSitterGrammar {
    fn ts_language(&self) -> tree_sitter::Language {
        match self {
            TreeSitterGrammar::JavaScript => tree_sitter_typescript::language_typescript(),
            TreeSitterGrammar::Python => tree_sitter_python::language(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TreeSitterGrammar::JavaScript => "javascript",
            TreeSitterGrammar::Python => "python",
        }
    }
}

/// Tree-sitter based scanner
#[derive(Debug, Clone)]
pub struct TreeSitterScanner {
    grammar: TreeSitterGrammar,
    strict: bool,
}

impl TreeSitterScanner {
    pub fn new(grammar: TreeSitterGrammar) -> Self {
        Self {
            grammar,
            strict: true,
        }
    }

    pub fn javascript() -> Self {
        Self::new(TreeSitterGrammar::JavaScript)
    }

    pub fn python() -> Self {
        Self::new(TreeSitterGrammar::Python)
    }

    /// Reject trees containing ERROR/MISSING nodes
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse source into a scanned document
    pub fn scan(&self, source: &str) -> Result<ScannedDocument> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.grammar.ts_language())
            .map_err(|e| AnalyzerError::scan(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalyzerError::parse("Failed to parse source code"))?;

        let root_node = tree.root_node();
        if exceeds_depth(&root_node, MAX_NESTING_DEPTH) {
            return Err(AnalyzerError::parse(format!(
                "syntax tree nested deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        let shared: Arc<str> = Arc::from(source);
        let root = self.convert_tree(&root_node, &shared);

        let mut errors = Vec::new();
        collect_errors(&root_node, &mut errors);

        let parsed = ParsedTree::new(root, self.grammar.name()).with_errors(errors);
        if self.strict && parsed.has_errors {
            let summary = parsed.error_summary().unwrap_or_default();
            return Err(AnalyzerError::parse(summary));
        }

        trace!(
            grammar = self.grammar.name(),
            errors = parsed.errors.len(),
            "scanned source"
        );
        Ok(ScannedDocument::parsed(source, parsed))
    }

    /// Convert the tree without recursion; extras (comments) are dropped
    fn convert_tree(&self, root: &TSNode<'_>, source: &Arc<str>) -> SyntaxNode {
        let mut open: Vec<(SyntaxNode, Vec<SyntaxNode>)> = Vec::new();
        let mut top_level = Vec::new();
        let mut cursor = root.walk();

        let mut has_next = cursor.goto_first_child();
        while has_next {
            let node = cursor.node();
            if !node.is_extra() {
                open.push((self.shell(&node, cursor.field_name(), source), Vec::new()));
                if cursor.goto_first_child() {
                    continue;
                }
                close_innermost(&mut open, &mut top_level);
            }
            has_next = cursor.goto_next_sibling();
            while !has_next && !open.is_empty() {
                cursor.goto_parent();
                close_innermost(&mut open, &mut top_level);
                has_next = cursor.goto_next_sibling();
            }
        }

        self.shell(root, None, source).with_children(top_level)
    }

    /// Childless SyntaxNode for a tree-sitter node
    fn shell(&self, node: &TSNode<'_>, field: Option<&'static str>, source: &Arc<str>) -> SyntaxNode {
        SyntaxNode::new(self.map_node_kind(node.kind()), node_span(node))
            .with_raw_kind(node.kind())
            .with_source(source, node.byte_range())
            .with_field(field)
            .named(node.is_named())
    }

    /// Map tree-sitter node kind to our SyntaxKind
    fn map_node_kind(&self, ts_kind: &str) -> SyntaxKind {
        match self.grammar {
            TreeSitterGrammar::JavaScript => map_javascript_kind(ts_kind),
            TreeSitterGrammar::Python => map_python_kind(ts_kind),
        }
    }
}

fn map_javascript_kind(ts_kind: &str) -> SyntaxKind {
    match ts_kind {
        // Definitions
        "function_declaration" | "generator_function_declaration" | "method_definition" => {
            SyntaxKind::FunctionDef
        }
        "class_declaration" | "class" => SyntaxKind::ClassDef,

        // Declarations
        "variable_declarator" => SyntaxKind::VariableDecl,
        "public_field_definition" | "field_definition" => SyntaxKind::FieldDecl,

        // Statements
        "assignment_expression" => SyntaxKind::AssignmentStmt,
        "for_statement" => SyntaxKind::ForStmt,
        "for_in_statement" => SyntaxKind::ForInStmt,
        "while_statement" | "do_statement" => SyntaxKind::WhileStmt,

        // Expressions
        "call_expression" => SyntaxKind::CallExpr,
        "new_expression" => SyntaxKind::NewExpr,
        "identifier" => SyntaxKind::NameExpr,
        "member_expression" => SyntaxKind::AttributeExpr,
        "number" | "true" | "false" | "null" | "undefined" => SyntaxKind::LiteralExpr,
        "string" => SyntaxKind::StringLiteral,
        "template_string" => SyntaxKind::TemplateString,
        "array" => SyntaxKind::ArrayLiteral,
        "object" => SyntaxKind::DictLiteral,
        "arguments" => SyntaxKind::ArgumentList,

        // Other
        "statement_block" | "program" => SyntaxKind::Block,
        "comment" => SyntaxKind::Comment,

        other => SyntaxKind::Other(other.to_string()),
    }
}

fn map_python_kind(ts_kind: &str) -> SyntaxKind {
    match ts_kind {
        // Definitions
        "function_definition" => SyntaxKind::FunctionDef,
        "class_definition" => SyntaxKind::ClassDef,

        // Statements
        "assignment" => SyntaxKind::AssignmentStmt,
        "for_statement" => SyntaxKind::ForInStmt,
        "while_statement" => SyntaxKind::WhileStmt,

        // Expressions
        "call" => SyntaxKind::CallExpr,
        "identifier" => SyntaxKind::NameExpr,
        "attribute" => SyntaxKind::AttributeExpr,
        "integer" | "float" | "true" | "false" | "none" => SyntaxKind::LiteralExpr,
        // f-strings are `string` nodes too; recognizers check the prefix
        "string" => SyntaxKind::StringLiteral,
        "list" => SyntaxKind::ArrayLiteral,
        "dictionary" => SyntaxKind::DictLiteral,
        "argument_list" => SyntaxKind::ArgumentList,

        // Other
        "block" | "module" => SyntaxKind::Block,
        "comment" => SyntaxKind::Comment,

        other => SyntaxKind::Other(other.to_string()),
    }
}

fn close_innermost(open: &mut Vec<(SyntaxNode, Vec<SyntaxNode>)>, top_level: &mut Vec<SyntaxNode>) {
    if let Some((node, children)) = open.pop() {
        let node = node.with_children(children);
        match open.last_mut() {
            Some((_, siblings)) => siblings.push(node),
            None => top_level.push(node),
        }
    }
}

/// Whether any path below `root` is longer than `limit`
fn exceeds_depth(root: &TSNode<'_>, limit: usize) -> bool {
    let mut cursor = root.walk();
    let mut depth = 0;
    loop {
        if cursor.goto_first_child() {
            depth += 1;
            if depth > limit {
                return true;
            }
            continue;
        }
        while !cursor.goto_next_sibling() {
            if depth == 0 || !cursor.goto_parent() {
                return false;
            }
            depth -= 1;
        }
    }
}

fn node_span(node: &TSNode<'_>) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

/// Collect parse errors
fn collect_errors(node: &TSNode<'_>, errors: &mut Vec<ParseError>) {
    if node.is_error() || node.is_missing() {
        errors.push(ParseError {
            message: format!("Parse error at {:?}", node.kind()),
            span: node_span(node),
        });
    }

    if !node.has_error() {
        return;
    }

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_errors(&child, errors);
        }
    }
}
